//! Order routes: checkout, listing, status updates, deletion.

use axum::{
    Json, Router,
    extract::{Path, State},
    extract::rejection::JsonRejection,
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use verdant_core::{DeliveryType, OrderId, OrderStatus, PlantId};

use crate::db::orders::{self, NewOrder, NewOrderItem};
use crate::error::{AppError, Result};
use crate::models::Order;
use crate::state::AppState;

/// Checkout request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub items: Vec<OrderItemRequest>,
    pub total: f64,
    #[serde(default)]
    pub delivery_type: DeliveryType,
}

/// One proposed line item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub plant_id: PlantId,
    pub plant_name: String,
    pub quantity: i64,
    pub price: f64,
}

/// Status update request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub status: OrderStatus,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(req: CreateOrderRequest) -> Self {
        Self {
            customer_name: req.customer_name,
            customer_email: req.customer_email,
            customer_phone: req.customer_phone,
            customer_address: req.customer_address,
            items: req
                .items
                .into_iter()
                .map(|item| NewOrderItem {
                    plant_id: item.plant_id,
                    plant_name: item.plant_name,
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
            total: req.total,
            delivery_type: req.delivery_type,
        }
    }
}

/// GET /orders
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    let orders = orders::list(state.pool()).await?;
    Ok(Json(orders))
}

/// POST /orders - run the order processor.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>)> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let order = orders::create(state.pool(), req.into()).await?;

    tracing::info!(
        order_id = %order.id,
        total = order.total,
        items = order.items.len(),
        "order placed"
    );
    Ok((StatusCode::CREATED, Json(order)))
}

/// PUT /orders/{id} - overwrite the status.
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    payload: std::result::Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> Result<Json<Order>> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let order = orders::set_status(state.pool(), id, req.status)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".into()))?;

    tracing::info!(order_id = %id, status = %req.status, "order status updated");
    Ok(Json(order))
}

/// DELETE /orders/{id}
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<serde_json::Value>> {
    if !orders::delete(state.pool(), id).await? {
        return Err(AppError::NotFound("Order not found".into()));
    }
    Ok(Json(
        serde_json::json!({ "message": "Order deleted successfully" }),
    ))
}

/// Order routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(index).post(create))
        .route("/orders/{id}", axum::routing::put(update).delete(destroy))
}
