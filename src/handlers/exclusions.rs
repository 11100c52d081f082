use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::{self, repo::exclusions, repo::warehouses};
use crate::error::ApiError;
use crate::middleware::ClientScope;
use crate::storage::{validate_rule, RangeRule};

/// A rule always belongs to a warehouse; the range fields arrive at the
/// top level of the JSON body alongside the warehouse id.
#[derive(Debug, Deserialize)]
pub struct ExclusionInput {
    pub warehouse_id: i32,
    #[serde(flatten)]
    pub rule: RangeRule,
}

/// GET /api/warehouse-exclusions/warehouse/:warehouse_id
///
/// All rules of the warehouse plus the label sequences they are
/// validated against, so a client can render pickers without a second
/// round trip.
pub async fn list_for_warehouse(
    Extension(scope): Extension<ClientScope>,
    Path(warehouse_id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let warehouse = warehouses::find_required(pool, warehouse_id, scope.client_id()).await?;
    let rules = exclusions::list_for_warehouse(pool, warehouse.id).await?;
    Ok(Json(json!({
        "success": true,
        "data": rules,
        "possible_values": warehouse.possible_values(),
    })))
}

pub async fn get(
    Extension(scope): Extension<ClientScope>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let exclusion = exclusions::find_any(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Exclusion not found"))?;

    // The owning warehouse must be visible under the caller's scope;
    // otherwise the rule does not exist as far as this tenant knows.
    if warehouses::find(pool, exclusion.warehouse_id, scope.client_id())
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("Exclusion not found"));
    }

    Ok(Json(json!({ "success": true, "data": exclusion })))
}

/// POST /api/warehouse-exclusions
///
/// The rule is checked against the warehouse's current dimension
/// configuration before anything is written.
pub async fn create(
    Extension(scope): Extension<ClientScope>,
    Json(input): Json<ExclusionInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let pool = db::pool().await?;
    let warehouse = warehouses::find_required(pool, input.warehouse_id, scope.client_id()).await?;
    validate_rule(&input.rule, &warehouse.possible_values())?;
    let data = exclusions::create(pool, warehouse.id, &input.rule).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": data }))))
}

pub async fn update(
    Extension(scope): Extension<ClientScope>,
    Path(id): Path<i32>,
    Json(input): Json<ExclusionInput>,
) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let warehouse = warehouses::find_required(pool, input.warehouse_id, scope.client_id()).await?;
    validate_rule(&input.rule, &warehouse.possible_values())?;
    let data = exclusions::update(pool, id, warehouse.id, &input.rule).await?;
    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn delete(
    Extension(scope): Extension<ClientScope>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let exclusion = exclusions::find_any(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Exclusion not found"))?;

    if warehouses::find(pool, exclusion.warehouse_id, scope.client_id())
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("Exclusion not found"));
    }

    exclusions::delete(pool, exclusion.id, exclusion.warehouse_id).await?;
    Ok(Json(json!({ "success": true, "message": "Exclusion deleted successfully" })))
}
