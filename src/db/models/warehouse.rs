use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::storage::{generate_sequence, DimensionKind, PossibleValues};

/// A warehouse and its storage matrix configuration. Each of the four
/// dimensions is independently typed (numeric/alphabetic, stored as text)
/// with a count; both nullable, meaning the dimension is unused.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Warehouse {
    pub id: i32,
    pub name: String,
    pub location_id: i32,
    pub aisle_type: Option<String>,
    pub aisle_count: Option<i32>,
    pub bay_type: Option<String>,
    pub bay_count: Option<i32>,
    pub level_type: Option<String>,
    pub level_count: Option<i32>,
    pub bin_type: Option<String>,
    pub bin_count: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Warehouse {
    /// Derive the label sequences for all four dimensions from the
    /// current configuration. Recomputed on every call, never cached.
    pub fn possible_values(&self) -> PossibleValues {
        PossibleValues {
            aisle: dimension_sequence(self.aisle_type.as_deref(), self.aisle_count),
            bay: dimension_sequence(self.bay_type.as_deref(), self.bay_count),
            level: dimension_sequence(self.level_type.as_deref(), self.level_count),
            bin: dimension_sequence(self.bin_type.as_deref(), self.bin_count),
        }
    }
}

fn dimension_sequence(kind: Option<&str>, count: Option<i32>) -> Vec<String> {
    generate_sequence(kind.and_then(DimensionKind::parse), count)
}
