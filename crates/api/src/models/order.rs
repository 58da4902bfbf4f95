//! Order rows and their line-item snapshots.

use chrono::{DateTime, Utc};
use serde::Serialize;

use verdant_core::{DeliveryType, OrderId, OrderItemId, OrderStatus, PlantId};

/// An order as stored, without its line items.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderRow {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub total: f64,
    pub status: OrderStatus,
    pub delivery_type: DeliveryType,
    pub created_at: DateTime<Utc>,
}

impl OrderRow {
    /// Attach line items to produce the wire representation.
    #[must_use]
    pub fn into_order(self, items: Vec<OrderItem>) -> Order {
        Order {
            id: self.id,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            customer_phone: self.customer_phone,
            customer_address: self.customer_address,
            items,
            total: self.total,
            status: self.status,
            delivery_type: self.delivery_type,
            created_at: self.created_at,
        }
    }
}

/// A customer's purchase request with line items and a lifecycle status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub status: OrderStatus,
    pub delivery_type: DeliveryType,
    pub created_at: DateTime<Utc>,
}

/// An immutable line-item snapshot taken at order time.
///
/// `plant_id` is a weak reference into the catalog; `plant_name` and `price`
/// are denormalized so the order stays readable after the plant changes or
/// disappears.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub plant_id: PlantId,
    pub plant_name: String,
    pub quantity: i64,
    pub price: f64,
}

/// Compact order view for the dashboard's recent-orders list.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: OrderId,
    pub customer_name: String,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}
