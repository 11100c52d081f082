use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::db::{self, repo::orders};
use crate::error::ApiError;
use crate::middleware::ClientScope;

pub async fn list(Extension(scope): Extension<ClientScope>) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let data = orders::list(pool, scope.client_id()).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn get(
    Extension(scope): Extension<ClientScope>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let data = orders::find(pool, id, scope.client_id())
        .await?
        .ok_or_else(|| ApiError::not_found("Order not found"))?;
    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn create(
    Extension(scope): Extension<ClientScope>,
    Json(input): Json<orders::NewOrder>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let client_id = scope.required()?;
    let pool = db::pool().await?;
    let data = orders::create(pool, &input, client_id).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": data }))))
}

pub async fn update(
    Extension(scope): Extension<ClientScope>,
    Path(id): Path<i32>,
    Json(patch): Json<orders::OrderPatch>,
) -> Result<Json<Value>, ApiError> {
    let client_id = scope.required()?;
    let pool = db::pool().await?;
    let data = orders::update(pool, id, &patch, client_id).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn delete(
    Extension(scope): Extension<ClientScope>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let client_id = scope.required()?;
    let pool = db::pool().await?;
    orders::delete(pool, id, client_id).await?;
    Ok(Json(json!({ "success": true, "message": "Order deleted successfully" })))
}
