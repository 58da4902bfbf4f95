//! Database row types and their wire representations.
//!
//! All wire types serialize with camelCase field names, matching the JSON
//! surface the React frontend consumes.

pub mod customer;
pub mod order;
pub mod plant;

pub use customer::Customer;
pub use order::{Order, OrderItem, OrderRow, OrderSummary};
pub use plant::Plant;
