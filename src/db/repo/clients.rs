use serde::Deserialize;
use sqlx::PgPool;

use crate::db::models::Client;
use crate::db::DbError;

#[derive(Debug, Deserialize)]
pub struct ClientInput {
    pub name: String,
}

pub async fn list(pool: &PgPool) -> Result<Vec<Client>, DbError> {
    let rows = sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Client>, DbError> {
    let row = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &PgPool, input: &ClientInput) -> Result<Client, DbError> {
    let row = sqlx::query_as::<_, Client>(
        "INSERT INTO clients (name) VALUES ($1) RETURNING *",
    )
    .bind(&input.name)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(pool: &PgPool, id: i32, input: &ClientInput) -> Result<Client, DbError> {
    let row = sqlx::query_as::<_, Client>(
        "UPDATE clients SET name = $2, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&input.name)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| DbError::NotFound("Client not found".into()))
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM clients WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(DbError::NotFound("Client not found".into()));
    }
    Ok(())
}
