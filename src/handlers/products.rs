use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::db::{self, repo::products};
use crate::error::ApiError;
use crate::middleware::ClientScope;

pub async fn list(Extension(scope): Extension<ClientScope>) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let data = products::list(pool, scope.client_id()).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn get(
    Extension(scope): Extension<ClientScope>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let data = products::find(pool, id, scope.client_id())
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;
    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn create(
    Extension(scope): Extension<ClientScope>,
    Json(input): Json<products::NewProduct>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let client_id = scope.required()?;
    let pool = db::pool().await?;
    let data = products::create(pool, &input, client_id).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": data }))))
}

pub async fn update(
    Extension(scope): Extension<ClientScope>,
    Path(id): Path<i32>,
    Json(patch): Json<products::ProductPatch>,
) -> Result<Json<Value>, ApiError> {
    let client_id = scope.required()?;
    let pool = db::pool().await?;
    let data = products::update(pool, id, &patch, client_id).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn delete(
    Extension(scope): Extension<ClientScope>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let client_id = scope.required()?;
    let pool = db::pool().await?;
    products::delete(pool, id, client_id).await?;
    Ok(Json(json!({ "success": true, "message": "Product deleted successfully" })))
}
