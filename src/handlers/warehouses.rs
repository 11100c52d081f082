use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::db::{self, repo::warehouses};
use crate::error::ApiError;
use crate::middleware::ClientScope;

pub async fn list(Extension(scope): Extension<ClientScope>) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let data = warehouses::list(pool, scope.client_id()).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

/// GET /api/warehouses/:id - the row plus the derived label sequences
/// for each configured dimension.
pub async fn get(
    Extension(scope): Extension<ClientScope>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let warehouse = warehouses::find_required(pool, id, scope.client_id()).await?;
    let possible_values = warehouse.possible_values();
    Ok(Json(json!({
        "success": true,
        "data": warehouse,
        "possible_values": possible_values,
    })))
}

pub async fn create(
    Extension(scope): Extension<ClientScope>,
    Json(input): Json<warehouses::WarehouseInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let client_id = scope.required()?;
    let pool = db::pool().await?;
    let data = warehouses::create(pool, &input, client_id).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": data }))))
}

pub async fn update(
    Extension(scope): Extension<ClientScope>,
    Path(id): Path<i32>,
    Json(input): Json<warehouses::WarehouseInput>,
) -> Result<Json<Value>, ApiError> {
    let client_id = scope.required()?;
    let pool = db::pool().await?;
    let data = warehouses::update(pool, id, &input, client_id).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn delete(
    Extension(scope): Extension<ClientScope>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let client_id = scope.required()?;
    let pool = db::pool().await?;
    warehouses::delete(pool, id, client_id).await?;
    Ok(Json(json!({ "success": true, "message": "Warehouse deleted successfully" })))
}
