use sqlx::PgPool;
use tracing::info;

use crate::auth;
use crate::db::repo::permissions;
use crate::db::DbError;

/// Whether a role applies everywhere or to a single tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleScope {
    Global,
    ScopedTo(i32),
}

impl RoleScope {
    pub fn applies_to(&self, client_id: i32) -> bool {
        match self {
            RoleScope::Global => true,
            RoleScope::ScopedTo(scoped) => *scoped == client_id,
        }
    }
}

/// One declared permission: what can be done to which resource, and the
/// route that carries it. This table is the authority the permissions
/// table is synced from; routes are never introspected at runtime.
#[derive(Debug, Clone, Copy)]
pub struct PermissionDef {
    pub resource: &'static str,
    pub action: &'static str,
    pub method: &'static str,
    pub path: &'static str,
}

impl PermissionDef {
    /// Unique permission name. Resource-qualified so "list" on users and
    /// "list" on orders stay distinct permissions.
    pub fn name(&self) -> String {
        format!("{}:{}", self.resource, self.action)
    }

    pub fn description(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

pub const ROUTE_PERMISSIONS: &[PermissionDef] = &[
    PermissionDef { resource: "users", action: "list", method: "GET", path: "/api/users" },
    PermissionDef { resource: "users", action: "read", method: "GET", path: "/api/users/:id" },
    PermissionDef { resource: "users", action: "create", method: "POST", path: "/api/users" },
    PermissionDef { resource: "users", action: "update", method: "PUT", path: "/api/users/:id" },
    PermissionDef { resource: "users", action: "delete", method: "DELETE", path: "/api/users/:id" },
    PermissionDef { resource: "roles", action: "list", method: "GET", path: "/api/roles" },
    PermissionDef { resource: "roles", action: "read", method: "GET", path: "/api/roles/:id" },
    PermissionDef { resource: "roles", action: "create", method: "POST", path: "/api/roles" },
    PermissionDef { resource: "roles", action: "update", method: "PUT", path: "/api/roles/:id" },
    PermissionDef { resource: "roles", action: "delete", method: "DELETE", path: "/api/roles/:id" },
    PermissionDef { resource: "roles", action: "manage_permissions", method: "PUT", path: "/api/roles/:id/permissions" },
    PermissionDef { resource: "permissions", action: "list", method: "GET", path: "/api/permissions" },
    PermissionDef { resource: "permissions", action: "read", method: "GET", path: "/api/permissions/:id" },
    PermissionDef { resource: "clients", action: "list", method: "GET", path: "/api/clients" },
    PermissionDef { resource: "clients", action: "read", method: "GET", path: "/api/clients/:id" },
    PermissionDef { resource: "clients", action: "create", method: "POST", path: "/api/clients" },
    PermissionDef { resource: "clients", action: "update", method: "PUT", path: "/api/clients/:id" },
    PermissionDef { resource: "clients", action: "delete", method: "DELETE", path: "/api/clients/:id" },
    PermissionDef { resource: "locations", action: "list", method: "GET", path: "/api/locations" },
    PermissionDef { resource: "locations", action: "read", method: "GET", path: "/api/locations/:id" },
    PermissionDef { resource: "locations", action: "create", method: "POST", path: "/api/locations" },
    PermissionDef { resource: "locations", action: "update", method: "PUT", path: "/api/locations/:id" },
    PermissionDef { resource: "locations", action: "delete", method: "DELETE", path: "/api/locations/:id" },
    PermissionDef { resource: "warehouses", action: "list", method: "GET", path: "/api/warehouses" },
    PermissionDef { resource: "warehouses", action: "read", method: "GET", path: "/api/warehouses/:id" },
    PermissionDef { resource: "warehouses", action: "create", method: "POST", path: "/api/warehouses" },
    PermissionDef { resource: "warehouses", action: "update", method: "PUT", path: "/api/warehouses/:id" },
    PermissionDef { resource: "warehouses", action: "delete", method: "DELETE", path: "/api/warehouses/:id" },
    PermissionDef { resource: "warehouse-exclusions", action: "list", method: "GET", path: "/api/warehouse-exclusions/warehouse/:warehouse_id" },
    PermissionDef { resource: "warehouse-exclusions", action: "read", method: "GET", path: "/api/warehouse-exclusions/:id" },
    PermissionDef { resource: "warehouse-exclusions", action: "create", method: "POST", path: "/api/warehouse-exclusions" },
    PermissionDef { resource: "warehouse-exclusions", action: "update", method: "PUT", path: "/api/warehouse-exclusions/:id" },
    PermissionDef { resource: "warehouse-exclusions", action: "delete", method: "DELETE", path: "/api/warehouse-exclusions/:id" },
    PermissionDef { resource: "products", action: "list", method: "GET", path: "/api/products" },
    PermissionDef { resource: "products", action: "read", method: "GET", path: "/api/products/:id" },
    PermissionDef { resource: "products", action: "create", method: "POST", path: "/api/products" },
    PermissionDef { resource: "products", action: "update", method: "PUT", path: "/api/products/:id" },
    PermissionDef { resource: "products", action: "delete", method: "DELETE", path: "/api/products/:id" },
    PermissionDef { resource: "orders", action: "list", method: "GET", path: "/api/orders" },
    PermissionDef { resource: "orders", action: "read", method: "GET", path: "/api/orders/:id" },
    PermissionDef { resource: "orders", action: "create", method: "POST", path: "/api/orders" },
    PermissionDef { resource: "orders", action: "update", method: "PUT", path: "/api/orders/:id" },
    PermissionDef { resource: "orders", action: "delete", method: "DELETE", path: "/api/orders/:id" },
];

pub const SYSTEM_ADMIN_ROLE: &str = "systemadmin";

/// Bring the permissions table in line with the declared table: insert
/// new entries, refresh descriptions, remove orphans.
pub async fn sync_permissions(pool: &PgPool) -> Result<(), DbError> {
    let mut names = Vec::with_capacity(ROUTE_PERMISSIONS.len());
    for def in ROUTE_PERMISSIONS {
        let name = def.name();
        permissions::upsert(pool, &name, def.resource, &def.description()).await?;
        names.push(name);
    }

    let removed = permissions::delete_except(pool, &names).await?;
    if removed > 0 {
        info!("Removed {} orphaned permissions", removed);
    }
    info!("Synced {} permissions", names.len());
    Ok(())
}

/// Ensure the global systemadmin role exists and holds every declared
/// permission, and seed an initial admin user when the users table is
/// empty. Runs on every startup after `sync_permissions`.
pub async fn ensure_system_admin(pool: &PgPool) -> Result<(), DbError> {
    // UNIQUE (name, client_id) does not catch duplicate globals (NULLs
    // compare distinct), so look the role up explicitly
    let existing = sqlx::query_scalar::<_, i32>(
        "SELECT id FROM roles WHERE lower(name) = $1 AND client_id IS NULL",
    )
    .bind(SYSTEM_ADMIN_ROLE)
    .fetch_optional(pool)
    .await?;

    let role_id = match existing {
        Some(id) => id,
        None => {
            sqlx::query_scalar::<_, i32>(
                "INSERT INTO roles (name, description, client_id)
                 VALUES ($1, 'System administrator with full access', NULL)
                 RETURNING id",
            )
            .bind(SYSTEM_ADMIN_ROLE)
            .fetch_one(pool)
            .await?
        }
    };

    sqlx::query(
        "INSERT INTO role_permissions (role_id, permission_id)
         SELECT $1, id FROM permissions
         ON CONFLICT DO NOTHING",
    )
    .bind(role_id)
    .execute(pool)
    .await?;

    let user_count = sqlx::query_scalar::<_, i64>("SELECT count(*) FROM users")
        .fetch_one(pool)
        .await?;

    if user_count == 0 {
        let password = std::env::var("BOOTSTRAP_ADMIN_PASSWORD")
            .unwrap_or_else(|_| "admin".to_string());
        let hash = auth::hash_password(&password).map_err(|e| DbError::Internal(e.to_string()))?;
        sqlx::query("INSERT INTO users (username, password_hash, role_id) VALUES ('admin', $1, $2)")
            .bind(&hash)
            .bind(role_id)
            .execute(pool)
            .await?;
        info!("Seeded initial admin user with systemadmin role");
    }

    Ok(())
}

/// Is the caller's role the global system administrator? Used to gate
/// client management and to relax tenant filters.
pub async fn is_system_admin(pool: &PgPool, role_id: Option<i32>) -> Result<bool, DbError> {
    let role_id = match role_id {
        Some(id) => id,
        None => return Ok(false),
    };
    let matched = sqlx::query_scalar::<_, i32>(
        "SELECT id FROM roles
         WHERE id = $1 AND lower(name) = $2 AND client_id IS NULL",
    )
    .bind(role_id)
    .bind(SYSTEM_ADMIN_ROLE)
    .fetch_optional(pool)
    .await?;
    Ok(matched.is_some())
}
