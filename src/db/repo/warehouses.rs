use serde::Deserialize;
use sqlx::PgPool;

use crate::db::models::Warehouse;
use crate::db::DbError;

/// Full warehouse payload. PUT is a full replace so a dimension can be
/// cleared back to "unused" by sending nulls.
#[derive(Debug, Deserialize)]
pub struct WarehouseInput {
    pub name: String,
    pub location_id: i32,
    pub aisle_type: Option<String>,
    pub aisle_count: Option<i32>,
    pub bay_type: Option<String>,
    pub bay_count: Option<i32>,
    pub level_type: Option<String>,
    pub level_count: Option<i32>,
    pub bin_type: Option<String>,
    pub bin_count: Option<i32>,
}

/// Warehouses have no client column of their own; tenant scope resolves
/// through the owning location.
pub async fn list(pool: &PgPool, scope: Option<i32>) -> Result<Vec<Warehouse>, DbError> {
    let rows = match scope {
        Some(client_id) => {
            sqlx::query_as::<_, Warehouse>(
                "SELECT w.* FROM warehouses w
                 JOIN locations l ON l.id = w.location_id
                 WHERE l.client_id = $1 ORDER BY w.id",
            )
            .bind(client_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Warehouse>("SELECT * FROM warehouses ORDER BY id")
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows)
}

pub async fn find(pool: &PgPool, id: i32, scope: Option<i32>) -> Result<Option<Warehouse>, DbError> {
    let row = match scope {
        Some(client_id) => {
            sqlx::query_as::<_, Warehouse>(
                "SELECT w.* FROM warehouses w
                 JOIN locations l ON l.id = w.location_id
                 WHERE w.id = $1 AND l.client_id = $2",
            )
            .bind(id)
            .bind(client_id)
            .fetch_optional(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Warehouse>("SELECT * FROM warehouses WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?
        }
    };
    Ok(row)
}

/// Like `find` but reported as not-found; tenant mismatches are
/// indistinguishable from missing rows so existence never leaks across
/// tenants.
pub async fn find_required(pool: &PgPool, id: i32, scope: Option<i32>) -> Result<Warehouse, DbError> {
    find(pool, id, scope)
        .await?
        .ok_or_else(|| DbError::NotFound("Warehouse not found".into()))
}

/// The target location must belong to the caller's tenant before any row
/// is written. The check and the insert are separate statements; the
/// window in between is accepted.
pub async fn create(pool: &PgPool, input: &WarehouseInput, client_id: i32) -> Result<Warehouse, DbError> {
    verify_location(pool, input.location_id, client_id).await?;

    let row = sqlx::query_as::<_, Warehouse>(
        "INSERT INTO warehouses
            (name, location_id,
             aisle_type, aisle_count, bay_type, bay_count,
             level_type, level_count, bin_type, bin_count)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING *",
    )
    .bind(&input.name)
    .bind(input.location_id)
    .bind(&input.aisle_type)
    .bind(input.aisle_count)
    .bind(&input.bay_type)
    .bind(input.bay_count)
    .bind(&input.level_type)
    .bind(input.level_count)
    .bind(&input.bin_type)
    .bind(input.bin_count)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    input: &WarehouseInput,
    client_id: i32,
) -> Result<Warehouse, DbError> {
    let existing = find_required(pool, id, Some(client_id)).await?;

    // Moving the warehouse to another location requires the new location
    // to belong to the same tenant
    if input.location_id != existing.location_id {
        verify_location(pool, input.location_id, client_id).await?;
    }

    let row = sqlx::query_as::<_, Warehouse>(
        "UPDATE warehouses SET
            name = $2, location_id = $3,
            aisle_type = $4, aisle_count = $5, bay_type = $6, bay_count = $7,
            level_type = $8, level_count = $9, bin_type = $10, bin_count = $11,
            updated_at = now()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(&input.name)
    .bind(input.location_id)
    .bind(&input.aisle_type)
    .bind(input.aisle_count)
    .bind(&input.bay_type)
    .bind(input.bay_count)
    .bind(&input.level_type)
    .bind(input.level_count)
    .bind(&input.bin_type)
    .bind(input.bin_count)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Exclusion rows go with the warehouse via the FK cascade.
pub async fn delete(pool: &PgPool, id: i32, client_id: i32) -> Result<(), DbError> {
    find_required(pool, id, Some(client_id)).await?;
    sqlx::query("DELETE FROM warehouses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

async fn verify_location(pool: &PgPool, location_id: i32, client_id: i32) -> Result<(), DbError> {
    let found = sqlx::query_scalar::<_, i32>(
        "SELECT id FROM locations WHERE id = $1 AND client_id = $2",
    )
    .bind(location_id)
    .bind(client_id)
    .fetch_optional(pool)
    .await?;

    match found {
        Some(_) => Ok(()),
        None => Err(DbError::NotFound(
            "Location not found or does not belong to the selected client".into(),
        )),
    }
}
