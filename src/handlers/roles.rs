use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::db::{self, repo::roles};
use crate::error::ApiError;
use crate::middleware::ClientScope;

pub async fn list(Extension(scope): Extension<ClientScope>) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let data = roles::list(pool, scope.client_id()).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn get(Path(id): Path<i32>) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let role = roles::find(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Role not found"))?;
    let permissions = roles::permissions(pool, role.id).await?;
    Ok(Json(json!({
        "success": true,
        "data": { "role": role, "permissions": permissions }
    })))
}

pub async fn create(
    Json(input): Json<roles::RoleInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let pool = db::pool().await?;
    let data = roles::create(pool, &input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": data }))))
}

pub async fn update(
    Path(id): Path<i32>,
    Json(input): Json<roles::RoleInput>,
) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let data = roles::update(pool, id, &input).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn delete(Path(id): Path<i32>) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    roles::delete(pool, id).await?;
    Ok(Json(json!({ "success": true, "message": "Role deleted successfully" })))
}

#[derive(Debug, serde::Deserialize)]
pub struct SetPermissionsRequest {
    pub permission_ids: Vec<i32>,
}

/// PUT /api/roles/:id/permissions - replace the role's grants
pub async fn set_permissions(
    Path(id): Path<i32>,
    Json(payload): Json<SetPermissionsRequest>,
) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    roles::set_permissions(pool, id, &payload.permission_ids).await?;
    let permissions = roles::permissions(pool, id).await?;
    Ok(Json(json!({ "success": true, "data": { "permissions": permissions } })))
}
