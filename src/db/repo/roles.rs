use serde::Deserialize;
use sqlx::PgPool;

use crate::db::models::{Permission, Role};
use crate::db::DbError;

/// Roles are either global (no client) or tenant-specific; see
/// `Role::scope`. The list is filtered to the selected tenant's roles
/// plus the globals when a scope is present.
#[derive(Debug, Deserialize)]
pub struct RoleInput {
    pub name: String,
    pub description: Option<String>,
    pub client_id: Option<i32>,
}

pub async fn list(pool: &PgPool, scope: Option<i32>) -> Result<Vec<Role>, DbError> {
    let rows = match scope {
        Some(client_id) => {
            sqlx::query_as::<_, Role>(
                "SELECT * FROM roles WHERE client_id = $1 OR client_id IS NULL ORDER BY id",
            )
            .bind(client_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY id")
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows)
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Role>, DbError> {
    let row = sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &PgPool, input: &RoleInput) -> Result<Role, DbError> {
    let row = sqlx::query_as::<_, Role>(
        "INSERT INTO roles (name, description, client_id)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.client_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(pool: &PgPool, id: i32, input: &RoleInput) -> Result<Role, DbError> {
    let row = sqlx::query_as::<_, Role>(
        "UPDATE roles SET name = $2, description = $3, client_id = $4, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.client_id)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| DbError::NotFound("Role not found".into()))
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM roles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(DbError::NotFound("Role not found".into()));
    }
    Ok(())
}

pub async fn permissions(pool: &PgPool, role_id: i32) -> Result<Vec<Permission>, DbError> {
    let rows = sqlx::query_as::<_, Permission>(
        "SELECT p.* FROM permissions p
         JOIN role_permissions rp ON rp.permission_id = p.id
         WHERE rp.role_id = $1 ORDER BY p.name",
    )
    .bind(role_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Replace the role's permission set atomically.
pub async fn set_permissions(
    pool: &PgPool,
    role_id: i32,
    permission_ids: &[i32],
) -> Result<(), DbError> {
    if find(pool, role_id).await?.is_none() {
        return Err(DbError::NotFound("Role not found".into()));
    }

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM role_permissions WHERE role_id = $1")
        .bind(role_id)
        .execute(&mut *tx)
        .await?;
    for permission_id in permission_ids {
        sqlx::query(
            "INSERT INTO role_permissions (role_id, permission_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(role_id)
        .bind(permission_id)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}
