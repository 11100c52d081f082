use serde::Deserialize;
use sqlx::PgPool;

use crate::auth;
use crate::db::models::User;
use crate::db::DbError;

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UserPatch {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role_id: Option<i32>,
}

pub async fn list(pool: &PgPool) -> Result<Vec<User>, DbError> {
    let rows = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<User>, DbError> {
    let row = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, DbError> {
    let row = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &PgPool, input: &NewUser) -> Result<User, DbError> {
    let password_hash = auth::hash_password(&input.password)
        .map_err(|e| DbError::Internal(e.to_string()))?;
    let row = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, password_hash, role_id)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&input.username)
    .bind(&password_hash)
    .bind(input.role_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(pool: &PgPool, id: i32, patch: &UserPatch) -> Result<User, DbError> {
    let password_hash = match &patch.password {
        Some(password) => Some(
            auth::hash_password(password).map_err(|e| DbError::Internal(e.to_string()))?,
        ),
        None => None,
    };

    let row = sqlx::query_as::<_, User>(
        "UPDATE users SET
            username = COALESCE($2, username),
            password_hash = COALESCE($3, password_hash),
            role_id = COALESCE($4, role_id),
            updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&patch.username)
    .bind(&password_hash)
    .bind(patch.role_id)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| DbError::NotFound("User not found".into()))
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(DbError::NotFound("User not found".into()));
    }
    Ok(())
}

/// Clients the user is associated with (many-to-many).
pub async fn client_ids(pool: &PgPool, user_id: i32) -> Result<Vec<i32>, DbError> {
    let ids = sqlx::query_scalar::<_, i32>(
        "SELECT client_id FROM user_clients WHERE user_id = $1 ORDER BY client_id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

/// Replace the user's client associations.
pub async fn set_clients(pool: &PgPool, user_id: i32, clients: &[i32]) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM user_clients WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    for client_id in clients {
        sqlx::query("INSERT INTO user_clients (user_id, client_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(client_id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}
