pub mod auth;
pub mod client_context;
pub mod require_admin;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use client_context::{client_context_middleware, ClientScope};
pub use require_admin::require_system_admin;
