use axum::{extract::Request, middleware::Next, response::Response};

use crate::authz;
use crate::db;
use crate::error::ApiError;

use super::auth::AuthUser;

/// Restricts a route to the global system administrator role.
pub async fn require_system_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    let pool = db::pool().await?;
    let allowed = authz::is_system_admin(pool, auth_user.role_id).await?;
    if !allowed {
        return Err(ApiError::forbidden(
            "This resource is only accessible to system administrators",
        ));
    }

    Ok(next.run(request).await)
}
