//! Read-only aggregation: dashboard stats and the sales report.
//!
//! Everything here is recomputed in full per request; there is no cache to
//! invalidate and the data volumes of a single nursery never justify one.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;

use verdant_core::OrderStatus;

use super::RepositoryError;
use crate::models::{OrderSummary, Plant};

/// Stock level below which a plant counts as "low stock".
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Dashboard aggregate, computed fresh per request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_plants: i64,
    pub total_orders: i64,
    pub total_customers: i64,
    pub low_stock_count: i64,
    /// Sum of `total` across orders whose status is exactly `completed`.
    pub total_revenue: f64,
    /// The 5 most recent orders.
    pub recent_orders: Vec<OrderSummary>,
    /// The 5 lowest-stock plants.
    pub low_stock_plants: Vec<Plant>,
}

/// Sales report over an optional inclusive date range.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub total_sales: f64,
    pub total_orders: i64,
    /// 0 when no orders fall in the range.
    pub average_order_value: f64,
    /// Top 10 plants by quantity sold, descending.
    pub top_plants: Vec<PlantSales>,
}

/// Per-plant-name quantity tally in the sales report.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlantSales {
    pub plant_name: String,
    pub quantity: i64,
}

/// Compute the dashboard aggregate.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any query fails.
pub async fn dashboard(pool: &SqlitePool) -> Result<DashboardStats, RepositoryError> {
    let total_plants: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM plants")
        .fetch_one(pool)
        .await?;
    let total_orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await?;
    let total_customers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
        .fetch_one(pool)
        .await?;

    let low_stock_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM plants WHERE stock < ?")
        .bind(LOW_STOCK_THRESHOLD)
        .fetch_one(pool)
        .await?;

    let total_revenue: f64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(total), 0.0) FROM orders WHERE status = ?")
            .bind(OrderStatus::Completed)
            .fetch_one(pool)
            .await?;

    let recent_orders = sqlx::query_as::<_, OrderSummary>(
        "SELECT id, customer_name, total, status, created_at \
         FROM orders ORDER BY created_at DESC, id DESC LIMIT 5",
    )
    .fetch_all(pool)
    .await?;

    let low_stock_plants = sqlx::query_as::<_, Plant>(
        "SELECT id, name, category, price, stock, discount, image, description, sold, created_at \
         FROM plants ORDER BY stock ASC, id ASC LIMIT 5",
    )
    .fetch_all(pool)
    .await?;

    Ok(DashboardStats {
        total_plants,
        total_orders,
        total_customers,
        low_stock_count,
        total_revenue,
        recent_orders,
        low_stock_plants,
    })
}

/// Compute the sales report for completed orders inside `[start, end]`
/// (inclusive both ends; either bound may be open).
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any query fails.
pub async fn sales_report(
    pool: &SqlitePool,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<SalesReport, RepositoryError> {
    let (total_sales, total_orders): (f64, i64) = sqlx::query_as(
        "SELECT COALESCE(SUM(total), 0.0), COUNT(*) FROM orders \
         WHERE status = ?1 \
           AND (?2 IS NULL OR date(created_at) >= ?2) \
           AND (?3 IS NULL OR date(created_at) <= ?3)",
    )
    .bind(OrderStatus::Completed)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;

    let average_order_value = if total_orders == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let count = total_orders as f64;
        total_sales / count
    };

    // Tie-break on name only to make the truncation deterministic.
    let top_plants = sqlx::query_as::<_, PlantSales>(
        "SELECT oi.plant_name, CAST(SUM(oi.quantity) AS INTEGER) AS quantity \
         FROM order_items oi \
         JOIN orders o ON o.id = oi.order_id \
         WHERE o.status = ?1 \
           AND (?2 IS NULL OR date(o.created_at) >= ?2) \
           AND (?3 IS NULL OR date(o.created_at) <= ?3) \
         GROUP BY oi.plant_name \
         ORDER BY quantity DESC, oi.plant_name ASC \
         LIMIT 10",
    )
    .bind(OrderStatus::Completed)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(SalesReport {
        total_sales,
        total_orders,
        average_order_value,
        top_plants,
    })
}
