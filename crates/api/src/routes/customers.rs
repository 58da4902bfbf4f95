//! Customer ledger routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    extract::rejection::JsonRejection,
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use verdant_core::{CustomerId, Email};

use crate::db::customers::{self, CustomerPatch};
use crate::error::{AppError, Result};
use crate::models::Customer;
use crate::state::AppState;

/// Customer update request body; the ledger totals are not editable.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// GET /customers
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Customer>>> {
    let customers = customers::list(state.pool()).await?;
    Ok(Json(customers))
}

/// GET /customers/{id}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<Customer>> {
    let customer = customers::get(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".into()))?;
    Ok(Json(customer))
}

/// PUT /customers/{id}
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    payload: std::result::Result<Json<UpdateCustomerRequest>, JsonRejection>,
) -> Result<Json<Customer>> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if let Some(email) = req.email.as_deref()
        && let Err(e) = Email::parse(email)
    {
        return Err(AppError::BadRequest(format!("email: {e}")));
    }
    if let Some(name) = req.name.as_deref()
        && name.trim().is_empty()
    {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }

    let customer = customers::update(
        state.pool(),
        id,
        CustomerPatch {
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Customer not found".into()))?;

    Ok(Json(customer))
}

/// DELETE /customers/{id}
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<serde_json::Value>> {
    if !customers::delete(state.pool(), id).await? {
        return Err(AppError::NotFound("Customer not found".into()));
    }
    Ok(Json(
        serde_json::json!({ "message": "Customer deleted successfully" }),
    ))
}

/// Customer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(index))
        .route("/customers/{id}", get(show).put(update).delete(destroy))
}
