//! Integration test harness for Verdant.
//!
//! Each test builds the full application router over a fresh in-memory
//! `SQLite` database (single connection, so every request sees the same
//! memory database) and drives it in-process with
//! `tower::ServiceExt::oneshot`. No server, no sockets, no fixtures on disk.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p verdant-integration-tests
//! ```

use std::str::FromStr;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use verdant_api::config::ApiConfig;
use verdant_api::db::MIGRATOR;
use verdant_api::state::AppState;

/// Create a migrated in-memory database pool.
///
/// # Panics
///
/// Panics if the pool cannot be created or migrations fail.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("parse in-memory connection options")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("failed to open in-memory database");
    MIGRATOR.run(&pool).await.expect("migrations failed");
    pool
}

/// Configuration for tests; never used to bind a socket.
fn test_config() -> ApiConfig {
    ApiConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
        port: 0,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Build the application router over a fresh database.
pub async fn test_app() -> Router {
    let pool = test_pool().await;
    verdant_api::app(AppState::new(test_config(), pool))
}

/// Build the application router and also hand back the pool for direct
/// assertions against storage.
pub async fn test_app_with_pool() -> (Router, SqlitePool) {
    let pool = test_pool().await;
    let app = verdant_api::app(AppState::new(test_config(), pool.clone()));
    (app, pool)
}

/// Drive one request through the router and decode the JSON response.
///
/// Returns the status and the parsed body (`serde_json::Value::Null` for
/// empty bodies).
///
/// # Panics
///
/// Panics if the request cannot be built or the body is not valid JSON.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            builder
                .body(Body::from(serde_json::to_vec(&json).expect("serialize body")))
                .expect("build request")
        }
        None => builder.body(Body::empty()).expect("build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router call failed");
    let status = response.status();

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is not JSON")
    };

    (status, json)
}

/// Create a plant through the API and return its id.
///
/// # Panics
///
/// Panics if creation does not return 201.
pub async fn create_plant(
    app: &Router,
    name: &str,
    category: &str,
    price: f64,
    stock: i64,
) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/plants",
        Some(serde_json::json!({
            "name": name,
            "category": category,
            "price": price,
            "stock": stock,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "plant creation failed: {body}");
    body["id"].as_i64().expect("plant id")
}

/// Place an order for a single line item and return the response.
pub async fn place_order(
    app: &Router,
    email: &str,
    plant_id: i64,
    plant_name: &str,
    quantity: i64,
    price: f64,
) -> (StatusCode, serde_json::Value) {
    #[allow(clippy::cast_precision_loss)]
    let total = price * quantity as f64;
    send(
        app,
        "POST",
        "/orders",
        Some(serde_json::json!({
            "customerName": "Asha Rao",
            "customerEmail": email,
            "customerPhone": "9876543210",
            "customerAddress": "12 Garden Lane",
            "items": [{
                "plantId": plant_id,
                "plantName": plant_name,
                "quantity": quantity,
                "price": price,
            }],
            "total": total,
        })),
    )
    .await
}
