//! Sample-data seed command.

use verdant_api::db::plants;

use super::{CommandError, connect};

/// Insert the fixed sample catalog if the catalog table is empty.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let inserted = plants::seed_sample_data(&pool).await?;
    if inserted == 0 {
        tracing::info!("Catalog already has rows; nothing seeded");
    } else {
        tracing::info!(inserted, "Sample catalog seeded");
    }
    Ok(())
}
