use serde::Deserialize;
use sqlx::PgPool;

use crate::db::models::Location;
use crate::db::DbError;

#[derive(Debug, Deserialize)]
pub struct LocationInput {
    pub name: String,
}

pub async fn list(pool: &PgPool, scope: Option<i32>) -> Result<Vec<Location>, DbError> {
    let rows = match scope {
        Some(client_id) => {
            sqlx::query_as::<_, Location>(
                "SELECT * FROM locations WHERE client_id = $1 ORDER BY id",
            )
            .bind(client_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Location>("SELECT * FROM locations ORDER BY id")
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows)
}

pub async fn find(pool: &PgPool, id: i32, scope: Option<i32>) -> Result<Option<Location>, DbError> {
    let row = match scope {
        Some(client_id) => {
            sqlx::query_as::<_, Location>(
                "SELECT * FROM locations WHERE id = $1 AND client_id = $2",
            )
            .bind(id)
            .bind(client_id)
            .fetch_optional(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?
        }
    };
    Ok(row)
}

/// Creation always binds the location to the caller's selected tenant.
pub async fn create(pool: &PgPool, input: &LocationInput, client_id: i32) -> Result<Location, DbError> {
    let row = sqlx::query_as::<_, Location>(
        "INSERT INTO locations (name, client_id) VALUES ($1, $2) RETURNING *",
    )
    .bind(&input.name)
    .bind(client_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    input: &LocationInput,
    client_id: i32,
) -> Result<Location, DbError> {
    let row = sqlx::query_as::<_, Location>(
        "UPDATE locations SET name = $3, updated_at = now()
         WHERE id = $1 AND client_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(client_id)
    .bind(&input.name)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| DbError::NotFound("Location not found".into()))
}

pub async fn delete(pool: &PgPool, id: i32, client_id: i32) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM locations WHERE id = $1 AND client_id = $2")
        .bind(id)
        .bind(client_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(DbError::NotFound("Location not found".into()));
    }
    Ok(())
}
