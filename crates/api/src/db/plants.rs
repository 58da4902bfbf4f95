//! Plant catalog repository.
//!
//! Admin CRUD plus the public storefront queries (filtered/sorted catalog,
//! distinct categories) and the fixed sample-data seed.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use verdant_core::PlantId;

use super::RepositoryError;
use crate::models::Plant;

const PLANT_COLUMNS: &str =
    "id, name, category, price, stock, discount, image, description, sold, created_at";

/// Fields for creating a plant.
#[derive(Debug, Clone)]
pub struct NewPlant {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
    pub discount: i64,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// Partial update for a plant; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct PlantPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub discount: Option<i64>,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// Storefront catalog filters.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: CatalogSort,
}

/// Storefront sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogSort {
    PriceLow,
    PriceHigh,
    Popular,
    Newest,
    /// Name ascending.
    #[default]
    Name,
}

impl CatalogSort {
    /// Map the `sortBy` query value; anything unrecognized sorts by name.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("price_low") => Self::PriceLow,
            Some("price_high") => Self::PriceHigh,
            Some("popular") => Self::Popular,
            Some("newest") => Self::Newest,
            _ => Self::Name,
        }
    }

    const fn order_clause(self) -> &'static str {
        match self {
            Self::PriceLow => " ORDER BY price ASC",
            Self::PriceHigh => " ORDER BY price DESC",
            Self::Popular => " ORDER BY sold DESC",
            Self::Newest => " ORDER BY created_at DESC, id DESC",
            Self::Name => " ORDER BY name ASC",
        }
    }
}

/// List all plants, newest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list(pool: &SqlitePool) -> Result<Vec<Plant>, RepositoryError> {
    let plants = sqlx::query_as::<_, Plant>(&format!(
        "SELECT {PLANT_COLUMNS} FROM plants ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(plants)
}

/// Fetch a single plant by id.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get(pool: &SqlitePool, id: PlantId) -> Result<Option<Plant>, RepositoryError> {
    let plant =
        sqlx::query_as::<_, Plant>(&format!("SELECT {PLANT_COLUMNS} FROM plants WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(plant)
}

/// Insert a new plant and return it as stored.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn create(pool: &SqlitePool, plant: NewPlant) -> Result<Plant, RepositoryError> {
    let created = sqlx::query_as::<_, Plant>(&format!(
        "INSERT INTO plants (name, category, price, stock, discount, image, description, sold, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?) \
         RETURNING {PLANT_COLUMNS}"
    ))
    .bind(plant.name)
    .bind(plant.category)
    .bind(plant.price)
    .bind(plant.stock)
    .bind(plant.discount)
    .bind(plant.image)
    .bind(plant.description)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;
    Ok(created)
}

/// Apply a partial update; returns `None` if the plant does not exist.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the update fails.
pub async fn update(
    pool: &SqlitePool,
    id: PlantId,
    patch: PlantPatch,
) -> Result<Option<Plant>, RepositoryError> {
    let updated = sqlx::query_as::<_, Plant>(&format!(
        "UPDATE plants SET \
             name = COALESCE(?, name), \
             category = COALESCE(?, category), \
             price = COALESCE(?, price), \
             stock = COALESCE(?, stock), \
             discount = COALESCE(?, discount), \
             image = COALESCE(?, image), \
             description = COALESCE(?, description) \
         WHERE id = ? \
         RETURNING {PLANT_COLUMNS}"
    ))
    .bind(patch.name)
    .bind(patch.category)
    .bind(patch.price)
    .bind(patch.stock)
    .bind(patch.discount)
    .bind(patch.image)
    .bind(patch.description)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(updated)
}

/// Delete a plant; returns whether a row was removed.
///
/// Orders keep their denormalized item snapshots, so deleting a plant never
/// touches order history.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the delete fails.
pub async fn delete(pool: &SqlitePool, id: PlantId) -> Result<bool, RepositoryError> {
    let result = sqlx::query("DELETE FROM plants WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Public catalog query: in-stock plants only, filtered and sorted.
///
/// `category` of `"all"` means no category filter; `search` matches name or
/// description, case-insensitively for ASCII (`LIKE`).
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn catalog(
    pool: &SqlitePool,
    filter: &CatalogFilter,
) -> Result<Vec<Plant>, RepositoryError> {
    let mut query: QueryBuilder<'_, Sqlite> =
        QueryBuilder::new(format!("SELECT {PLANT_COLUMNS} FROM plants WHERE stock > 0"));

    if let Some(category) = filter.category.as_deref()
        && !category.is_empty()
        && category != "all"
    {
        query.push(" AND category = ").push_bind(category.to_owned());
    }

    if let Some(search) = filter.search.as_deref()
        && !search.is_empty()
    {
        let pattern = format!("%{search}%");
        query
            .push(" AND (name LIKE ")
            .push_bind(pattern.clone())
            .push(" OR description LIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(min_price) = filter.min_price {
        query.push(" AND price >= ").push_bind(min_price);
    }

    if let Some(max_price) = filter.max_price {
        query.push(" AND price <= ").push_bind(max_price);
    }

    query.push(filter.sort_by.order_clause());

    let plants = query.build_query_as::<Plant>().fetch_all(pool).await?;
    Ok(plants)
}

/// Distinct category values, alphabetical.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn categories(pool: &SqlitePool) -> Result<Vec<String>, RepositoryError> {
    let categories =
        sqlx::query_scalar::<_, String>("SELECT DISTINCT category FROM plants ORDER BY category")
            .fetch_all(pool)
            .await?;
    Ok(categories)
}

/// Seed the fixed sample catalog if (and only if) the catalog is empty.
///
/// Returns the number of plants inserted (0 when the catalog already has
/// rows).
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any statement fails.
pub async fn seed_sample_data(pool: &SqlitePool) -> Result<u64, RepositoryError> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM plants")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(0);
    }

    let mut inserted = 0;
    for sample in sample_plants() {
        create(pool, sample).await?;
        inserted += 1;
    }
    Ok(inserted)
}

/// The fixed sample catalog used by `/init-sample-data` and `verdant-cli seed`.
fn sample_plants() -> Vec<NewPlant> {
    let rows: [(&str, &str, f64, i64, i64, &str); 8] = [
        (
            "Monstera Deliciosa",
            "indoor",
            1500.0,
            25,
            10,
            "Glossy split leaves; thrives in bright, indirect light.",
        ),
        (
            "Snake Plant",
            "indoor",
            800.0,
            40,
            0,
            "Near-indestructible air purifier for low-light corners.",
        ),
        (
            "Peace Lily",
            "indoor",
            650.0,
            30,
            5,
            "White blooms; droops politely when thirsty.",
        ),
        (
            "Hibiscus",
            "outdoor",
            350.0,
            50,
            0,
            "Large trumpet flowers; full sun and regular feeding.",
        ),
        (
            "Bougainvillea",
            "outdoor",
            450.0,
            35,
            15,
            "Vivid papery bracts; drought-tolerant once established.",
        ),
        (
            "Jade Plant",
            "succulent",
            300.0,
            60,
            0,
            "Plump coin-shaped leaves; water sparingly.",
        ),
        (
            "Aloe Vera",
            "succulent",
            250.0,
            45,
            0,
            "Soothing gel in every leaf; loves a sunny sill.",
        ),
        (
            "Tulsi",
            "herb",
            150.0,
            80,
            0,
            "Sacred basil; fragrant leaves for tea.",
        ),
    ];

    rows.into_iter()
        .map(|(name, category, price, stock, discount, description)| NewPlant {
            name: name.to_owned(),
            category: category.to_owned(),
            price,
            stock,
            discount,
            image: None,
            description: Some(description.to_owned()),
        })
        .collect()
}
