use sqlx::PgPool;

use crate::db::models::WarehouseExclusion;
use crate::db::DbError;
use crate::storage::RangeRule;

/// All rules of one warehouse, oldest first.
pub async fn list_for_warehouse(
    pool: &PgPool,
    warehouse_id: i32,
) -> Result<Vec<WarehouseExclusion>, DbError> {
    let rows = sqlx::query_as::<_, WarehouseExclusion>(
        "SELECT * FROM warehouse_exclusions
         WHERE warehouse_id = $1 ORDER BY created_at, id",
    )
    .bind(warehouse_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Unscoped lookup. Callers must still resolve the owning warehouse
/// under the tenant scope before revealing the row.
pub async fn find_any(pool: &PgPool, id: i32) -> Result<Option<WarehouseExclusion>, DbError> {
    let row = sqlx::query_as::<_, WarehouseExclusion>(
        "SELECT * FROM warehouse_exclusions WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Lookups are always scoped by warehouse; a rule id from another
/// warehouse is simply not found.
pub async fn find(
    pool: &PgPool,
    id: i32,
    warehouse_id: i32,
) -> Result<Option<WarehouseExclusion>, DbError> {
    let row = sqlx::query_as::<_, WarehouseExclusion>(
        "SELECT * FROM warehouse_exclusions WHERE id = $1 AND warehouse_id = $2",
    )
    .bind(id)
    .bind(warehouse_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(
    pool: &PgPool,
    warehouse_id: i32,
    rule: &RangeRule,
) -> Result<WarehouseExclusion, DbError> {
    let row = sqlx::query_as::<_, WarehouseExclusion>(
        "INSERT INTO warehouse_exclusions
            (warehouse_id,
             aisle_from, aisle_to, bay_from, bay_to,
             level_from, level_to, bin_from, bin_to)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING *",
    )
    .bind(warehouse_id)
    .bind(&rule.aisle_from)
    .bind(&rule.aisle_to)
    .bind(&rule.bay_from)
    .bind(&rule.bay_to)
    .bind(&rule.level_from)
    .bind(&rule.level_to)
    .bind(&rule.bin_from)
    .bind(&rule.bin_to)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    warehouse_id: i32,
    rule: &RangeRule,
) -> Result<WarehouseExclusion, DbError> {
    let row = sqlx::query_as::<_, WarehouseExclusion>(
        "UPDATE warehouse_exclusions SET
            aisle_from = $3, aisle_to = $4, bay_from = $5, bay_to = $6,
            level_from = $7, level_to = $8, bin_from = $9, bin_to = $10,
            updated_at = now()
         WHERE id = $1 AND warehouse_id = $2
         RETURNING *",
    )
    .bind(id)
    .bind(warehouse_id)
    .bind(&rule.aisle_from)
    .bind(&rule.aisle_to)
    .bind(&rule.bay_from)
    .bind(&rule.bay_to)
    .bind(&rule.level_from)
    .bind(&rule.level_to)
    .bind(&rule.bin_from)
    .bind(&rule.bin_to)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| DbError::NotFound("Exclusion not found".into()))
}

pub async fn delete(pool: &PgPool, id: i32, warehouse_id: i32) -> Result<(), DbError> {
    let result = sqlx::query(
        "DELETE FROM warehouse_exclusions WHERE id = $1 AND warehouse_id = $2",
    )
    .bind(id)
    .bind(warehouse_id)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(DbError::NotFound("Exclusion not found".into()));
    }
    Ok(())
}
