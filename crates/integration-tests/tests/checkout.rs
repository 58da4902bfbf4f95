//! End-to-end tests for the order processor: stock adjustment, item
//! snapshots, and the customer ledger.

use axum::http::StatusCode;
use serde_json::json;

use verdant_integration_tests::{create_plant, place_order, send, test_app};

#[tokio::test]
async fn order_decrements_stock_and_increments_sold() {
    let app = test_app().await;
    let p1 = create_plant(&app, "Monstera Deliciosa", "indoor", 1500.0, 25).await;

    let (status, order) = place_order(&app, "asha@example.com", p1, "Monstera Deliciosa", 2, 1500.0).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["deliveryType"], "delivery");
    assert_eq!(order["total"], json!(3000.0));
    assert!(order["id"].as_i64().is_some());
    assert!(order["createdAt"].as_str().is_some());

    let items = order["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["plantId"].as_i64(), Some(p1));
    assert_eq!(items[0]["plantName"], "Monstera Deliciosa");
    assert_eq!(items[0]["quantity"], 2);

    let (status, plant) = send(&app, "GET", &format!("/plants/{p1}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plant["stock"], 23);
    assert_eq!(plant["sold"], 2);
}

#[tokio::test]
async fn order_creates_customer_ledger_entry() {
    let app = test_app().await;
    let p1 = create_plant(&app, "Monstera Deliciosa", "indoor", 1500.0, 25).await;

    let (status, _) = place_order(&app, "asha@example.com", p1, "Monstera Deliciosa", 2, 1500.0).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, customers) = send(&app, "GET", "/customers", None).await;
    assert_eq!(status, StatusCode::OK);
    let customers = customers.as_array().expect("customers array");
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0]["email"], "asha@example.com");
    assert_eq!(customers[0]["totalOrders"], 1);
    assert_eq!(customers[0]["totalSpent"], json!(3000.0));
}

#[tokio::test]
async fn repeat_email_updates_existing_customer() {
    let app = test_app().await;
    let p1 = create_plant(&app, "Snake Plant", "indoor", 800.0, 40).await;

    let (status, _) = place_order(&app, "asha@example.com", p1, "Snake Plant", 1, 800.0).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = place_order(&app, "asha@example.com", p1, "Snake Plant", 3, 800.0).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, customers) = send(&app, "GET", "/customers", None).await;
    let customers = customers.as_array().expect("customers array");
    assert_eq!(customers.len(), 1, "same email must stay one customer");
    assert_eq!(customers[0]["totalOrders"], 2);
    assert_eq!(customers[0]["totalSpent"], json!(800.0 + 2400.0));
}

#[tokio::test]
async fn insufficient_stock_rejects_whole_batch() {
    let app = test_app().await;
    let p1 = create_plant(&app, "Peace Lily", "indoor", 650.0, 30).await;
    let p2 = create_plant(&app, "Jade Plant", "succulent", 300.0, 2).await;

    // One satisfiable item, one short item: nothing may be applied.
    let (status, body) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customerName": "Asha Rao",
            "customerEmail": "asha@example.com",
            "customerPhone": "9876543210",
            "customerAddress": "12 Garden Lane",
            "items": [
                { "plantId": p1, "plantName": "Peace Lily", "quantity": 1, "price": 650.0 },
                { "plantId": p2, "plantName": "Jade Plant", "quantity": 5, "price": 300.0 },
            ],
            "total": 2150.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Insufficient stock for Jade Plant");

    let (_, orders) = send(&app, "GET", "/orders", None).await;
    assert_eq!(orders.as_array().expect("orders").len(), 0);

    let (_, plant) = send(&app, "GET", &format!("/plants/{p1}"), None).await;
    assert_eq!(plant["stock"], 30, "no stock mutation for any item");
    assert_eq!(plant["sold"], 0);

    let (_, customers) = send(&app, "GET", "/customers", None).await;
    assert_eq!(customers.as_array().expect("customers").len(), 0);
}

#[tokio::test]
async fn unknown_plant_rejects_order_with_request_name() {
    let app = test_app().await;
    let p1 = create_plant(&app, "Hibiscus", "outdoor", 350.0, 50).await;

    let (status, body) = place_order(&app, "asha@example.com", 9999, "Dragon Tree", 1, 500.0).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Plant Dragon Tree not found");

    let (_, orders) = send(&app, "GET", "/orders", None).await;
    assert_eq!(orders.as_array().expect("orders").len(), 0);

    let (_, plant) = send(&app, "GET", &format!("/plants/{p1}"), None).await;
    assert_eq!(plant["stock"], 50);
}

#[tokio::test]
async fn stock_cannot_go_negative_across_orders() {
    let app = test_app().await;
    let p1 = create_plant(&app, "Aloe Vera", "succulent", 250.0, 3).await;

    let (status, _) = place_order(&app, "a@example.com", p1, "Aloe Vera", 2, 250.0).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = place_order(&app, "b@example.com", p1, "Aloe Vera", 2, 250.0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Insufficient stock for Aloe Vera");

    let (_, plant) = send(&app, "GET", &format!("/plants/{p1}"), None).await;
    assert_eq!(plant["stock"], 1);
    assert_eq!(plant["sold"], 2);
}

#[tokio::test]
async fn exact_stock_order_drains_to_zero() {
    let app = test_app().await;
    let p1 = create_plant(&app, "Tulsi", "herb", 150.0, 4).await;

    let (status, _) = place_order(&app, "asha@example.com", p1, "Tulsi", 4, 150.0).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, plant) = send(&app, "GET", &format!("/plants/{p1}"), None).await;
    assert_eq!(plant["stock"], 0);
    assert_eq!(plant["sold"], 4);
}

#[tokio::test]
async fn empty_items_are_rejected() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customerName": "Asha Rao",
            "customerEmail": "asha@example.com",
            "customerPhone": "9876543210",
            "customerAddress": "12 Garden Lane",
            "items": [],
            "total": 0.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "order must contain at least one item");
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let app = test_app().await;
    let p1 = create_plant(&app, "Hibiscus", "outdoor", 350.0, 50).await;

    let (status, body) = place_order(&app, "not-an-email", p1, "Hibiscus", 1, 350.0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .expect("message")
            .starts_with("customerEmail"),
        "unexpected message: {body}"
    );
}

#[tokio::test]
async fn missing_required_field_is_rejected() {
    let app = test_app().await;

    // No customerEmail at all: rejected at deserialization with 400.
    let (status, _) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customerName": "Asha Rao",
            "customerPhone": "9876543210",
            "customerAddress": "12 Garden Lane",
            "items": [],
            "total": 0.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn pickup_delivery_type_is_stored() {
    let app = test_app().await;
    let p1 = create_plant(&app, "Jade Plant", "succulent", 300.0, 10).await;

    let (status, order) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customerName": "Asha Rao",
            "customerEmail": "asha@example.com",
            "customerPhone": "9876543210",
            "customerAddress": "12 Garden Lane",
            "items": [{ "plantId": p1, "plantName": "Jade Plant", "quantity": 1, "price": 300.0 }],
            "total": 300.0,
            "deliveryType": "pickup",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["deliveryType"], "pickup");
}
