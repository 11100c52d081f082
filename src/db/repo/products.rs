use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;

use crate::db::models::Product;
use crate::db::DbError;

#[derive(Debug, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    #[serde(default)]
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
}

pub async fn list(pool: &PgPool, scope: Option<i32>) -> Result<Vec<Product>, DbError> {
    let rows = match scope {
        Some(client_id) => {
            sqlx::query_as::<_, Product>(
                "SELECT * FROM products WHERE client_id = $1 ORDER BY id",
            )
            .bind(client_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY id")
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows)
}

pub async fn find(pool: &PgPool, id: i32, scope: Option<i32>) -> Result<Option<Product>, DbError> {
    let row = match scope {
        Some(client_id) => {
            sqlx::query_as::<_, Product>(
                "SELECT * FROM products WHERE id = $1 AND client_id = $2",
            )
            .bind(id)
            .bind(client_id)
            .fetch_optional(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?
        }
    };
    Ok(row)
}

pub async fn create(pool: &PgPool, input: &NewProduct, client_id: i32) -> Result<Product, DbError> {
    let row = sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, sku, client_id, price, quantity)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(&input.name)
    .bind(&input.sku)
    .bind(client_id)
    .bind(input.price)
    .bind(input.quantity)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    patch: &ProductPatch,
    client_id: i32,
) -> Result<Product, DbError> {
    let row = sqlx::query_as::<_, Product>(
        "UPDATE products SET
            name = COALESCE($3, name),
            sku = COALESCE($4, sku),
            price = COALESCE($5, price),
            quantity = COALESCE($6, quantity),
            updated_at = now()
         WHERE id = $1 AND client_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(client_id)
    .bind(&patch.name)
    .bind(&patch.sku)
    .bind(patch.price)
    .bind(patch.quantity)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| DbError::NotFound("Product not found".into()))
}

pub async fn delete(pool: &PgPool, id: i32, client_id: i32) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1 AND client_id = $2")
        .bind(id)
        .bind(client_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(DbError::NotFound("Product not found".into()));
    }
    Ok(())
}
