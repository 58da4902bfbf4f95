//! Public storefront routes: the in-stock catalog and its categories.

use axum::{
    Json, Router,
    extract::{Query, State},
    extract::rejection::QueryRejection,
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use crate::db::plants::{self, CatalogFilter, CatalogSort};
use crate::error::{AppError, Result};
use crate::models::Plant;
use crate::state::AppState;

/// Storefront catalog query parameters.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: Option<String>,
}

impl From<CatalogQuery> for CatalogFilter {
    fn from(query: CatalogQuery) -> Self {
        let sort_by = CatalogSort::from_query(query.sort_by.as_deref());
        Self {
            category: query.category,
            search: query.search,
            min_price: query.min_price,
            max_price: query.max_price,
            sort_by,
        }
    }
}

/// GET /store/plants - in-stock plants only, filtered and sorted.
#[instrument(skip(state, query))]
pub async fn catalog(
    State(state): State<AppState>,
    query: std::result::Result<Query<CatalogQuery>, QueryRejection>,
) -> Result<Json<Vec<Plant>>> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let filter = CatalogFilter::from(query);
    let plants = plants::catalog(state.pool(), &filter).await?;
    Ok(Json(plants))
}

/// GET /store/categories
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let categories = plants::categories(state.pool()).await?;
    Ok(Json(categories))
}

/// Storefront routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/store/plants", get(catalog))
        .route("/store/categories", get(categories))
}
