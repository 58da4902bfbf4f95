//! Customer ledger row.

use chrono::{DateTime, Utc};
use serde::Serialize;

use verdant_core::{CustomerId, Email};

/// Denormalized per-email aggregate of a customer's orders.
///
/// One logical customer per distinct email. Created by the order processor
/// on the first order for an email; `total_orders`/`total_spent` are
/// incremented on every subsequent one.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub total_orders: i64,
    pub total_spent: f64,
    pub created_at: DateTime<Utc>,
}
