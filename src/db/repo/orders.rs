use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;

use crate::db::models::Order;
use crate::db::DbError;

#[derive(Debug, Deserialize)]
pub struct NewOrder {
    pub user_id: i32,
    pub total: Decimal,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "pending".to_string()
}

#[derive(Debug, Deserialize)]
pub struct OrderPatch {
    pub status: Option<String>,
    pub total: Option<Decimal>,
}

pub async fn list(pool: &PgPool, scope: Option<i32>) -> Result<Vec<Order>, DbError> {
    let rows = match scope {
        Some(client_id) => {
            sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE client_id = $1 ORDER BY id")
                .bind(client_id)
                .fetch_all(pool)
                .await?
        }
        None => {
            sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY id")
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows)
}

pub async fn find(pool: &PgPool, id: i32, scope: Option<i32>) -> Result<Option<Order>, DbError> {
    let row = match scope {
        Some(client_id) => {
            sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 AND client_id = $2")
                .bind(id)
                .bind(client_id)
                .fetch_optional(pool)
                .await?
        }
        None => {
            sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?
        }
    };
    Ok(row)
}

pub async fn create(pool: &PgPool, input: &NewOrder, client_id: i32) -> Result<Order, DbError> {
    let row = sqlx::query_as::<_, Order>(
        "INSERT INTO orders (user_id, client_id, status, total)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(input.user_id)
    .bind(client_id)
    .bind(&input.status)
    .bind(input.total)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    patch: &OrderPatch,
    client_id: i32,
) -> Result<Order, DbError> {
    let row = sqlx::query_as::<_, Order>(
        "UPDATE orders SET
            status = COALESCE($3, status),
            total = COALESCE($4, total),
            updated_at = now()
         WHERE id = $1 AND client_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(client_id)
    .bind(&patch.status)
    .bind(patch.total)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| DbError::NotFound("Order not found".into()))
}

pub async fn delete(pool: &PgPool, id: i32, client_id: i32) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM orders WHERE id = $1 AND client_id = $2")
        .bind(id)
        .bind(client_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(DbError::NotFound("Order not found".into()));
    }
    Ok(())
}
