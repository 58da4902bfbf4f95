//! Sales report route.

use axum::{
    Json, Router,
    extract::{Query, State},
    extract::rejection::QueryRejection,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::instrument;

use crate::db::stats::{self, SalesReport};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Date-range query for the sales report. Both bounds are inclusive and
/// either may be omitted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// GET /reports/sales?startDate&endDate
#[instrument(skip(state, query))]
pub async fn sales(
    State(state): State<AppState>,
    query: std::result::Result<Query<SalesQuery>, QueryRejection>,
) -> Result<Json<SalesReport>> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let report = stats::sales_report(state.pool(), query.start_date, query.end_date).await?;
    Ok(Json(report))
}

/// Report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/sales", get(sales))
}
