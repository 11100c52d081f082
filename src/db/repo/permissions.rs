use sqlx::PgPool;

use crate::db::models::Permission;
use crate::db::DbError;

pub async fn list(pool: &PgPool) -> Result<Vec<Permission>, DbError> {
    let rows = sqlx::query_as::<_, Permission>("SELECT * FROM permissions ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Permission>, DbError> {
    let row = sqlx::query_as::<_, Permission>("SELECT * FROM permissions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_resource(pool: &PgPool, resource: &str) -> Result<Vec<Permission>, DbError> {
    let rows = sqlx::query_as::<_, Permission>(
        "SELECT * FROM permissions WHERE resource = $1 ORDER BY name",
    )
    .bind(resource)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Insert or refresh a declared permission, keyed by name.
pub async fn upsert(
    pool: &PgPool,
    name: &str,
    resource: &str,
    description: &str,
) -> Result<Permission, DbError> {
    let row = sqlx::query_as::<_, Permission>(
        "INSERT INTO permissions (name, resource, description)
         VALUES ($1, $2, $3)
         ON CONFLICT (name) DO UPDATE
             SET resource = EXCLUDED.resource,
                 description = EXCLUDED.description,
                 updated_at = now()
         RETURNING *",
    )
    .bind(name)
    .bind(resource)
    .bind(description)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Remove permissions that are no longer declared.
pub async fn delete_except(pool: &PgPool, keep_names: &[String]) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM permissions WHERE name <> ALL($1)")
        .bind(keep_names)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
