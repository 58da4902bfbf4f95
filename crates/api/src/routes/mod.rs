//! HTTP route handlers for the nursery API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (DB ping)
//!
//! # Admin catalog
//! GET    /plants               - List plants, newest first
//! GET    /plants/{id}          - Fetch one plant
//! POST   /plants               - Create plant
//! PUT    /plants/{id}          - Update plant
//! DELETE /plants/{id}          - Delete plant
//!
//! # Orders
//! GET    /orders               - List orders with item snapshots
//! POST   /orders               - Run the order processor (checkout)
//! PUT    /orders/{id}          - Overwrite order status
//! DELETE /orders/{id}          - Delete order
//!
//! # Customers
//! GET    /customers            - List customers
//! GET    /customers/{id}       - Fetch one customer
//! PUT    /customers/{id}       - Update contact fields
//! DELETE /customers/{id}       - Delete customer
//!
//! # Reporting
//! GET  /dashboard/stats        - Dashboard aggregate
//! GET  /reports/sales          - Sales report (?startDate&endDate)
//!
//! # Public storefront
//! GET  /store/plants           - In-stock catalog (?category&search&minPrice&maxPrice&sortBy)
//! GET  /store/categories       - Distinct category values
//!
//! # Seeding
//! POST /init-sample-data       - Seed sample catalog if empty
//! ```

pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod plants;
pub mod reports;
pub mod store;

use axum::Router;

use crate::state::AppState;

/// Assemble all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(plants::routes())
        .merge(orders::routes())
        .merge(customers::routes())
        .merge(dashboard::routes())
        .merge(reports::routes())
        .merge(store::routes())
}
