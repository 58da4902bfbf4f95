//! Dashboard aggregation route.

use axum::{Json, Router, extract::State, routing::get};
use tracing::instrument;

use crate::db::stats::{self, DashboardStats};
use crate::error::Result;
use crate::state::AppState;

/// GET /dashboard/stats
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    let stats = stats::dashboard(state.pool()).await?;
    Ok(Json(stats))
}

/// Dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard/stats", get(show))
}
