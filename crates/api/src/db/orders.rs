//! Order repository and the order processor.
//!
//! `create` is the one multi-step operation in the system: it validates a
//! proposed order against the catalog, persists the order and its item
//! snapshots, decrements stock / increments sold per item, and upserts the
//! per-email customer ledger. The whole sequence runs inside a single
//! transaction so a failure at any step leaves nothing behind, and the stock
//! decrement itself is guarded (`... AND stock >= ?`) so two concurrent
//! orders can never drive stock negative.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;

use verdant_core::{DeliveryType, Email, OrderId, OrderStatus, PlantId};

use super::RepositoryError;
use crate::models::{Order, OrderItem, OrderRow};

const ORDER_COLUMNS: &str = "id, customer_name, customer_email, customer_phone, \
     customer_address, total, status, delivery_type, created_at";

/// A proposed order, as submitted by checkout.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub items: Vec<NewOrderItem>,
    pub total: f64,
    pub delivery_type: DeliveryType,
}

/// A proposed line item. `plant_name` is the human-readable name used in
/// error messages when the referenced plant cannot be found.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub plant_id: PlantId,
    pub plant_name: String,
    pub quantity: i64,
    pub price: f64,
}

/// Errors from the order processor.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A referenced plant does not exist; reports the name from the request.
    #[error("Plant {name} not found")]
    PlantNotFound { name: String },

    /// A plant's current stock is below the requested quantity.
    #[error("Insufficient stock for {name}")]
    InsufficientStock { name: String },

    /// The submitted order failed input validation.
    #[error("{0}")]
    Invalid(String),

    /// Storage failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl NewOrder {
    /// Check input constraints before touching storage.
    fn validate(&self) -> Result<(), CheckoutError> {
        if self.customer_name.trim().is_empty() {
            return Err(CheckoutError::Invalid("customerName is required".into()));
        }
        if let Err(e) = Email::parse(&self.customer_email) {
            return Err(CheckoutError::Invalid(format!("customerEmail: {e}")));
        }
        if self.customer_phone.trim().is_empty() {
            return Err(CheckoutError::Invalid("customerPhone is required".into()));
        }
        if self.customer_address.trim().is_empty() {
            return Err(CheckoutError::Invalid("customerAddress is required".into()));
        }
        if self.items.is_empty() {
            return Err(CheckoutError::Invalid(
                "order must contain at least one item".into(),
            ));
        }
        for item in &self.items {
            if item.quantity <= 0 {
                return Err(CheckoutError::Invalid(format!(
                    "quantity for {} must be positive",
                    item.plant_name
                )));
            }
            if item.price < 0.0 {
                return Err(CheckoutError::Invalid(format!(
                    "price for {} must not be negative",
                    item.plant_name
                )));
            }
        }
        if !self.total.is_finite() || self.total < 0.0 {
            return Err(CheckoutError::Invalid("total must not be negative".into()));
        }
        Ok(())
    }
}

/// Run the order processor for a proposed order.
///
/// Validation covers the entire item list before any mutation; the order,
/// stock adjustments, and ledger upsert then commit atomically.
///
/// # Errors
///
/// - [`CheckoutError::Invalid`] if input constraints fail
/// - [`CheckoutError::PlantNotFound`] if any referenced plant is missing
/// - [`CheckoutError::InsufficientStock`] if any plant cannot cover its
///   requested quantity, whether seen at validation or at decrement time
/// - [`CheckoutError::Database`] on storage failure
pub async fn create(pool: &SqlitePool, input: NewOrder) -> Result<Order, CheckoutError> {
    input.validate()?;

    let mut tx = pool.begin().await?;

    // Validate every line item against the catalog before mutating anything.
    for item in &input.items {
        let stock: Option<i64> = sqlx::query_scalar("SELECT stock FROM plants WHERE id = ?")
            .bind(item.plant_id)
            .fetch_optional(&mut *tx)
            .await?;

        match stock {
            None => {
                return Err(CheckoutError::PlantNotFound {
                    name: item.plant_name.clone(),
                });
            }
            Some(available) if available < item.quantity => {
                return Err(CheckoutError::InsufficientStock {
                    name: item.plant_name.clone(),
                });
            }
            Some(_) => {}
        }
    }

    let created_at = Utc::now();
    let order_id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (customer_name, customer_email, customer_phone, \
             customer_address, total, status, delivery_type, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
         RETURNING id",
    )
    .bind(&input.customer_name)
    .bind(&input.customer_email)
    .bind(&input.customer_phone)
    .bind(&input.customer_address)
    .bind(input.total)
    .bind(OrderStatus::Pending)
    .bind(input.delivery_type)
    .bind(created_at)
    .fetch_one(&mut *tx)
    .await?;

    for item in &input.items {
        sqlx::query(
            "INSERT INTO order_items (order_id, plant_id, plant_name, quantity, price) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(order_id)
        .bind(item.plant_id)
        .bind(&item.plant_name)
        .bind(item.quantity)
        .bind(item.price)
        .execute(&mut *tx)
        .await?;

        // Guarded decrement: zero rows affected means another transaction
        // took the stock since validation, so the whole order aborts.
        let result = sqlx::query(
            "UPDATE plants SET stock = stock - ?, sold = sold + ? \
             WHERE id = ? AND stock >= ?",
        )
        .bind(item.quantity)
        .bind(item.quantity)
        .bind(item.plant_id)
        .bind(item.quantity)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CheckoutError::InsufficientStock {
                name: item.plant_name.clone(),
            });
        }
    }

    // Ledger upsert: first order for an email creates the customer, later
    // ones bump the denormalized totals.
    sqlx::query(
        "INSERT INTO customers (name, email, phone, address, total_orders, total_spent, created_at) \
         VALUES (?, ?, ?, ?, 1, ?, ?) \
         ON CONFLICT (email) DO UPDATE SET \
             total_orders = total_orders + 1, \
             total_spent = total_spent + excluded.total_spent",
    )
    .bind(&input.customer_name)
    .bind(&input.customer_email)
    .bind(&input.customer_phone)
    .bind(&input.customer_address)
    .bind(input.total)
    .bind(created_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    get(pool, OrderId::new(order_id))
        .await
        .map_err(|e| match e {
            RepositoryError::Database(err) => CheckoutError::Database(err),
            other => CheckoutError::Invalid(other.to_string()),
        })?
        .ok_or_else(|| CheckoutError::Invalid("order vanished after commit".into()))
}

/// List all orders with their item snapshots, newest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a query fails.
pub async fn list(pool: &SqlitePool) -> Result<Vec<Order>, RepositoryError> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;

    #[derive(sqlx::FromRow)]
    struct ItemRow {
        order_id: OrderId,
        #[sqlx(flatten)]
        item: OrderItem,
    }

    let item_rows = sqlx::query_as::<_, ItemRow>(
        "SELECT order_id, id, plant_id, plant_name, quantity, price \
         FROM order_items ORDER BY order_id, id",
    )
    .fetch_all(pool)
    .await?;

    let mut items_by_order: HashMap<OrderId, Vec<OrderItem>> = HashMap::new();
    for row in item_rows {
        items_by_order.entry(row.order_id).or_default().push(row.item);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let items = items_by_order.remove(&row.id).unwrap_or_default();
            row.into_order(items)
        })
        .collect())
}

/// Fetch one order with its items.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a query fails.
pub async fn get(pool: &SqlitePool, id: OrderId) -> Result<Option<Order>, RepositoryError> {
    let row =
        sqlx::query_as::<_, OrderRow>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT id, plant_id, plant_name, quantity, price \
         FROM order_items WHERE order_id = ? ORDER BY id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(row.into_order(items)))
}

/// Overwrite an order's status.
///
/// Any of the four values is accepted regardless of the current status;
/// there is deliberately no transition table. Returns `None` if the order
/// does not exist.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the update fails.
pub async fn set_status(
    pool: &SqlitePool,
    id: OrderId,
    status: OrderStatus,
) -> Result<Option<Order>, RepositoryError> {
    let result = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get(pool, id).await
}

/// Delete an order and (via cascade) its item snapshots.
///
/// Stock is not restored and the customer ledger is not rewound; deletion
/// removes the record, not its history of side effects.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the delete fails.
pub async fn delete(pool: &SqlitePool, id: OrderId) -> Result<bool, RepositoryError> {
    let result = sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_order() -> NewOrder {
        NewOrder {
            customer_name: "Asha Rao".into(),
            customer_email: "asha@example.com".into(),
            customer_phone: "9876543210".into(),
            customer_address: "12 Garden Lane".into(),
            items: vec![NewOrderItem {
                plant_id: PlantId::new(1),
                plant_name: "Monstera Deliciosa".into(),
                quantity: 2,
                price: 1500.0,
            }],
            total: 3000.0,
            delivery_type: DeliveryType::Delivery,
        }
    }

    #[test]
    fn validation_accepts_well_formed_order() {
        assert!(valid_order().validate().is_ok());
    }

    #[test]
    fn validation_rejects_empty_items() {
        let mut order = valid_order();
        order.items.clear();
        assert!(matches!(order.validate(), Err(CheckoutError::Invalid(_))));
    }

    #[test]
    fn validation_rejects_zero_quantity() {
        let mut order = valid_order();
        order.items[0].quantity = 0;
        assert!(matches!(order.validate(), Err(CheckoutError::Invalid(_))));
    }

    #[test]
    fn validation_rejects_bad_email() {
        let mut order = valid_order();
        order.customer_email = "not-an-email".into();
        let err = order.validate().unwrap_err();
        assert!(err.to_string().contains("customerEmail"));
    }

    #[test]
    fn validation_rejects_negative_total() {
        let mut order = valid_order();
        order.total = -1.0;
        assert!(matches!(order.validate(), Err(CheckoutError::Invalid(_))));
    }

    #[test]
    fn checkout_error_reports_request_plant_name() {
        let err = CheckoutError::PlantNotFound {
            name: "Peace Lily".into(),
        };
        assert_eq!(err.to_string(), "Plant Peace Lily not found");
    }
}
