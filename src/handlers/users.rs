use axum::{extract::Path, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::db::{self, repo::users};
use crate::error::ApiError;

pub async fn list() -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let data = users::list(pool).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn get(Path(id): Path<i32>) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let user = users::find(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    let clients = users::client_ids(pool, user.id).await?;
    Ok(Json(json!({
        "success": true,
        "data": { "user": user, "clients": clients }
    })))
}

pub async fn create(
    Json(input): Json<users::NewUser>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let pool = db::pool().await?;
    let data = users::create(pool, &input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": data }))))
}

pub async fn update(
    Path(id): Path<i32>,
    Json(patch): Json<users::UserPatch>,
) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let data = users::update(pool, id, &patch).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn delete(Path(id): Path<i32>) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    users::delete(pool, id).await?;
    Ok(Json(json!({ "success": true, "message": "User deleted successfully" })))
}

#[derive(Debug, serde::Deserialize)]
pub struct SetClientsRequest {
    pub client_ids: Vec<i32>,
}

/// PUT /api/users/:id/clients - replace the user's tenant associations
pub async fn set_clients(
    Path(id): Path<i32>,
    Json(payload): Json<SetClientsRequest>,
) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    if users::find(pool, id).await?.is_none() {
        return Err(ApiError::not_found("User not found"));
    }
    users::set_clients(pool, id, &payload.client_ids).await?;
    let clients = users::client_ids(pool, id).await?;
    Ok(Json(json!({ "success": true, "data": { "clients": clients } })))
}
