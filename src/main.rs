use axum::{
    middleware::from_fn,
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod auth;
mod authz;
mod config;
mod db;
mod error;
mod handlers;
mod middleware;
mod storage;

use crate::config::Environment;
use crate::middleware::{client_context_middleware, jwt_auth_middleware, require_system_admin};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = crate::config::config();
    tracing::info!("Starting Stockroom API in {:?} mode", config.environment);

    // Only development ships a fallback secret
    if config.environment != Environment::Development && config.security.jwt_secret.is_empty() {
        eprintln!("JWT_SECRET must be set outside development");
        std::process::exit(1);
    }

    let pool = match db::pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("database unavailable: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = startup(pool).await {
        eprintln!("startup failed: {}", e);
        std::process::exit(1);
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("STOCKROOM_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Stockroom API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

/// Schema, declared permissions and the bootstrap admin must all be in
/// place before the first request is served.
async fn startup(pool: &sqlx::PgPool) -> Result<(), db::DbError> {
    db::schema::ensure_schema(pool).await?;
    authz::sync_permissions(pool).await?;
    authz::ensure_system_admin(pool).await?;
    Ok(())
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/auth/login", post(handlers::auth::login))
        // Everything else requires a bearer token
        .merge(protected_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn protected_routes() -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(role_routes())
        .merge(permission_routes())
        .merge(client_routes())
        .merge(location_routes())
        .merge(warehouse_routes())
        .merge(exclusion_routes())
        .merge(product_routes())
        .merge(order_routes())
        // Layers run outermost-last, so the token is checked before the
        // tenant header is parsed
        .layer(from_fn(client_context_middleware))
        .layer(from_fn(jwt_auth_middleware))
}

fn auth_routes() -> Router {
    use handlers::auth;

    Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
}

fn user_routes() -> Router {
    use handlers::users;

    Router::new()
        .route("/api/users", get(users::list).post(users::create))
        .route(
            "/api/users/:id",
            get(users::get).put(users::update).delete(users::delete),
        )
        .route("/api/users/:id/clients", put(users::set_clients))
}

fn role_routes() -> Router {
    use handlers::roles;

    Router::new()
        .route("/api/roles", get(roles::list).post(roles::create))
        .route(
            "/api/roles/:id",
            get(roles::get).put(roles::update).delete(roles::delete),
        )
        .route("/api/roles/:id/permissions", put(roles::set_permissions))
}

fn permission_routes() -> Router {
    use handlers::permissions;

    Router::new()
        .route("/api/permissions", get(permissions::list))
        .route("/api/permissions/:id", get(permissions::get))
}

fn client_routes() -> Router {
    use handlers::clients;

    // Reads are open to any authenticated user; tenant management is
    // reserved for the global administrator
    Router::new()
        .route("/api/clients", get(clients::list))
        .route("/api/clients/:id", get(clients::get))
        .merge(
            Router::new()
                .route("/api/clients", post(clients::create))
                .route(
                    "/api/clients/:id",
                    put(clients::update).delete(clients::delete),
                )
                .route_layer(from_fn(require_system_admin)),
        )
}

fn location_routes() -> Router {
    use handlers::locations;

    Router::new()
        .route("/api/locations", get(locations::list).post(locations::create))
        .route(
            "/api/locations/:id",
            get(locations::get)
                .put(locations::update)
                .delete(locations::delete),
        )
}

fn warehouse_routes() -> Router {
    use handlers::warehouses;

    Router::new()
        .route(
            "/api/warehouses",
            get(warehouses::list).post(warehouses::create),
        )
        .route(
            "/api/warehouses/:id",
            get(warehouses::get)
                .put(warehouses::update)
                .delete(warehouses::delete),
        )
}

fn exclusion_routes() -> Router {
    use handlers::exclusions;

    Router::new()
        .route(
            "/api/warehouse-exclusions/warehouse/:warehouse_id",
            get(exclusions::list_for_warehouse),
        )
        .route("/api/warehouse-exclusions", post(exclusions::create))
        .route(
            "/api/warehouse-exclusions/:id",
            get(exclusions::get)
                .put(exclusions::update)
                .delete(exclusions::delete),
        )
}

fn product_routes() -> Router {
    use handlers::products;

    Router::new()
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/:id",
            get(products::get)
                .put(products::update)
                .delete(products::delete),
        )
}

fn order_routes() -> Router {
    use handlers::orders;

    Router::new()
        .route("/api/orders", get(orders::list).post(orders::create))
        .route(
            "/api/orders/:id",
            get(orders::get).put(orders::update).delete(orders::delete),
        )
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Stockroom API",
            "version": version,
            "description": "Multi-tenant warehouse management backend",
            "endpoints": {
                "home": "/ (public)",
                "health": "/api/health (public)",
                "login": "POST /api/auth/login (public)",
                "auth": "/api/auth/* (protected)",
                "users": "/api/users (protected)",
                "roles": "/api/roles (protected)",
                "permissions": "/api/permissions (protected)",
                "clients": "/api/clients (protected, writes restricted)",
                "locations": "/api/locations (protected)",
                "warehouses": "/api/warehouses (protected)",
                "warehouse_exclusions": "/api/warehouse-exclusions (protected)",
                "products": "/api/products (protected)",
                "orders": "/api/orders (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match db::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
