use axum::{
    extract::{Path, Query},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::{self, repo::permissions};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub resource: Option<String>,
}

/// Permissions are declared in code and synced at startup, so the API
/// surface is read-only.
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let data = match query.resource.as_deref() {
        Some(resource) => permissions::find_by_resource(pool, resource).await?,
        None => permissions::list(pool).await?,
    };
    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn get(Path(id): Path<i32>) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let data = permissions::find(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Permission not found"))?;
    Ok(Json(json!({ "success": true, "data": data })))
}
