use axum::{extract::Path, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::db::{self, repo::clients};
use crate::error::ApiError;

pub async fn list() -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let data = clients::list(pool).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn get(Path(id): Path<i32>) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let data = clients::find(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Client not found"))?;
    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn create(
    Json(input): Json<clients::ClientInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let pool = db::pool().await?;
    let data = clients::create(pool, &input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": data }))))
}

pub async fn update(
    Path(id): Path<i32>,
    Json(input): Json<clients::ClientInput>,
) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let data = clients::update(pool, id, &input).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn delete(Path(id): Path<i32>) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    clients::delete(pool, id).await?;
    Ok(Json(json!({ "success": true, "message": "Client deleted successfully" })))
}
