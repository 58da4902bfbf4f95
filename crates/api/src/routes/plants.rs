//! Admin catalog CRUD and the sample-data seed.

use axum::{
    Json, Router,
    extract::{Path, State},
    extract::rejection::JsonRejection,
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use verdant_core::PlantId;

use crate::db::plants::{self, NewPlant, PlantPatch};
use crate::error::{AppError, Result};
use crate::models::Plant;
use crate::state::AppState;

/// Plant creation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlantRequest {
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub discount: i64,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// Plant update request body; omitted fields keep their current value.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlantRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub discount: Option<i64>,
    pub image: Option<String>,
    pub description: Option<String>,
}

fn check_fields(
    name: Option<&str>,
    price: Option<f64>,
    stock: Option<i64>,
    discount: Option<i64>,
) -> Result<()> {
    if let Some(name) = name
        && name.trim().is_empty()
    {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    if let Some(price) = price
        && (!price.is_finite() || price < 0.0)
    {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }
    if let Some(stock) = stock
        && stock < 0
    {
        return Err(AppError::BadRequest("stock must not be negative".into()));
    }
    if let Some(discount) = discount
        && !(0..=100).contains(&discount)
    {
        return Err(AppError::BadRequest(
            "discount must be between 0 and 100".into(),
        ));
    }
    Ok(())
}

/// GET /plants
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Plant>>> {
    let plants = plants::list(state.pool()).await?;
    Ok(Json(plants))
}

/// GET /plants/{id}
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<PlantId>) -> Result<Json<Plant>> {
    let plant = plants::get(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Plant not found".into()))?;
    Ok(Json(plant))
}

/// POST /plants
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreatePlantRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Plant>)> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    check_fields(
        Some(&req.name),
        Some(req.price),
        Some(req.stock),
        Some(req.discount),
    )?;

    let plant = plants::create(
        state.pool(),
        NewPlant {
            name: req.name,
            category: req.category,
            price: req.price,
            stock: req.stock,
            discount: req.discount,
            image: req.image,
            description: req.description,
        },
    )
    .await?;

    tracing::info!(plant_id = %plant.id, "plant created");
    Ok((StatusCode::CREATED, Json(plant)))
}

/// PUT /plants/{id}
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<PlantId>,
    payload: std::result::Result<Json<UpdatePlantRequest>, JsonRejection>,
) -> Result<Json<Plant>> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    check_fields(req.name.as_deref(), req.price, req.stock, req.discount)?;

    let plant = plants::update(
        state.pool(),
        id,
        PlantPatch {
            name: req.name,
            category: req.category,
            price: req.price,
            stock: req.stock,
            discount: req.discount,
            image: req.image,
            description: req.description,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Plant not found".into()))?;

    Ok(Json(plant))
}

/// DELETE /plants/{id}
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<PlantId>,
) -> Result<Json<serde_json::Value>> {
    if !plants::delete(state.pool(), id).await? {
        return Err(AppError::NotFound("Plant not found".into()));
    }
    Ok(Json(
        serde_json::json!({ "message": "Plant deleted successfully" }),
    ))
}

/// POST /init-sample-data
#[instrument(skip(state))]
pub async fn init_sample_data(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let inserted = plants::seed_sample_data(state.pool()).await?;
    let message = if inserted == 0 {
        "Sample data already exists".to_owned()
    } else {
        format!("Inserted {inserted} sample plants")
    };
    tracing::info!(inserted, "sample data seed requested");
    Ok(Json(serde_json::json!({ "message": message })))
}

/// Catalog admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/plants", get(index).post(create))
        .route("/plants/{id}", get(show).put(update).delete(destroy))
        .route("/init-sample-data", post(init_sample_data))
}
