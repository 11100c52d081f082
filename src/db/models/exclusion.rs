use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::storage::RangeRule;

/// A persisted exclusion rule. The eight endpoints are nullable text so
/// numeric and alphabetic dimensions share one column shape; a null
/// `*_from` leaves that dimension unconstrained.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WarehouseExclusion {
    pub id: i32,
    pub warehouse_id: i32,
    pub aisle_from: Option<String>,
    pub aisle_to: Option<String>,
    pub bay_from: Option<String>,
    pub bay_to: Option<String>,
    pub level_from: Option<String>,
    pub level_to: Option<String>,
    pub bin_from: Option<String>,
    pub bin_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WarehouseExclusion {
    /// View of the row as a matchable range rule, for callers that run
    /// the stored set against slot coordinates.
    pub fn rule(&self) -> RangeRule {
        RangeRule {
            aisle_from: self.aisle_from.clone(),
            aisle_to: self.aisle_to.clone(),
            bay_from: self.bay_from.clone(),
            bay_to: self.bay_to.clone(),
            level_from: self.level_from.clone(),
            level_to: self.level_to.clone(),
            bin_from: self.bin_from.clone(),
            bin_to: self.bin_to.clone(),
        }
    }
}
