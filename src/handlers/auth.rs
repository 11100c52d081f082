use axum::{extract::Extension, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, Claims};
use crate::db::{self, repo::users};
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/auth/login - verify credentials and issue a JWT
pub async fn login(Json(payload): Json<LoginRequest>) -> Result<Json<Value>, ApiError> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    let pool = db::pool().await?;
    let user = users::find_by_username(pool, &payload.username).await?;

    // Same response whether the user is unknown or the password is wrong
    let user = match user {
        Some(u) if auth::verify_password(&payload.password, &u.password_hash) => u,
        _ => return Err(ApiError::unauthorized("Invalid username or password")),
    };

    let claims = Claims::new(user.id, user.username.clone(), user.role_id);
    let token = auth::generate_jwt(&claims)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "token": token,
            "user": user,
        }
    })))
}

/// GET /api/auth/me - current user from the bearer token
pub async fn me(Extension(auth_user): Extension<AuthUser>) -> Result<Json<Value>, ApiError> {
    let pool = db::pool().await?;
    let user = users::find(pool, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    let clients = users::client_ids(pool, user.id).await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "user": user,
            "clients": clients,
        }
    })))
}

/// POST /api/auth/logout - tokens are stateless; logout is client-side
pub async fn logout() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Logged out successfully"
    }))
}
