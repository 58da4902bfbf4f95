//! Customer ledger repository.
//!
//! Customers are created by the order processor (`db::orders::create`), not
//! through this module; what lives here is the admin CRUD over the ledger.

use sqlx::SqlitePool;

use verdant_core::CustomerId;

use super::RepositoryError;
use crate::models::Customer;

const CUSTOMER_COLUMNS: &str =
    "id, name, email, phone, address, total_orders, total_spent, created_at";

/// Partial update for a customer's contact fields; `None` keeps the current
/// value. The ledger totals are deliberately not editable here.
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// List all customers, newest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list(pool: &SqlitePool) -> Result<Vec<Customer>, RepositoryError> {
    let customers = sqlx::query_as::<_, Customer>(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(customers)
}

/// Fetch a single customer by id.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get(pool: &SqlitePool, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
    let customer = sqlx::query_as::<_, Customer>(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(customer)
}

/// Apply a partial update; returns `None` if the customer does not exist.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the new email is already taken.
/// Returns `RepositoryError::Database` for other failures.
pub async fn update(
    pool: &SqlitePool,
    id: CustomerId,
    patch: CustomerPatch,
) -> Result<Option<Customer>, RepositoryError> {
    let updated = sqlx::query_as::<_, Customer>(&format!(
        "UPDATE customers SET \
             name = COALESCE(?, name), \
             email = COALESCE(?, email), \
             phone = COALESCE(?, phone), \
             address = COALESCE(?, address) \
         WHERE id = ? \
         RETURNING {CUSTOMER_COLUMNS}"
    ))
    .bind(patch.name)
    .bind(patch.email)
    .bind(patch.phone)
    .bind(patch.address)
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return RepositoryError::Conflict("email already exists".to_owned());
        }
        RepositoryError::Database(e)
    })?;
    Ok(updated)
}

/// Delete a customer; returns whether a row was removed.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the delete fails.
pub async fn delete(pool: &SqlitePool, id: CustomerId) -> Result<bool, RepositoryError> {
    let result = sqlx::query("DELETE FROM customers WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
