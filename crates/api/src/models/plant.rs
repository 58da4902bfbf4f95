//! Plant catalog row.

use chrono::{DateTime, Utc};
use serde::Serialize;

use verdant_core::PlantId;

/// A sellable catalog item.
///
/// `sold` is monotonic non-decreasing; it only moves when the order
/// processor commits. `stock` can never go negative on a committed order
/// (guarded update plus a schema CHECK).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
    pub discount: i64,
    pub image: Option<String>,
    pub description: Option<String>,
    pub sold: i64,
    pub created_at: DateTime<Utc>,
}
