use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::authz::RoleScope;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub client_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// The nullable column never leaks past this boundary: a null
    /// client_id means the role is global.
    pub fn scope(&self) -> RoleScope {
        match self.client_id {
            None => RoleScope::Global,
            Some(client_id) => RoleScope::ScopedTo(client_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(client_id: Option<i32>) -> Role {
        Role {
            id: 1,
            name: "picker".into(),
            description: None,
            client_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn null_client_means_global() {
        assert_eq!(role(None).scope(), RoleScope::Global);
        assert_eq!(role(Some(7)).scope(), RoleScope::ScopedTo(7));
    }
}
