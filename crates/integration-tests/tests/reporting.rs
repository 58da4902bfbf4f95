//! Dashboard aggregation and sales report tests.

use axum::http::StatusCode;
use serde_json::json;

use verdant_integration_tests::{create_plant, place_order, send, test_app};

/// Place an order and flip it to the given status, returning the order id.
async fn completed_order(
    app: &axum::Router,
    email: &str,
    plant_id: i64,
    plant_name: &str,
    quantity: i64,
    price: f64,
    status: &str,
) -> i64 {
    let (code, order) = place_order(app, email, plant_id, plant_name, quantity, price).await;
    assert_eq!(code, StatusCode::CREATED);
    let id = order["id"].as_i64().expect("order id");

    let (code, _) = send(
        app,
        "PUT",
        &format!("/orders/{id}"),
        Some(json!({ "status": status })),
    )
    .await;
    assert_eq!(code, StatusCode::OK);
    id
}

#[tokio::test]
async fn sales_report_sums_completed_orders() {
    let app = test_app().await;
    let p1 = create_plant(&app, "Monstera Deliciosa", "indoor", 100.0, 50).await;

    completed_order(&app, "a@example.com", p1, "Monstera Deliciosa", 1, 100.0, "completed").await;
    completed_order(&app, "b@example.com", p1, "Monstera Deliciosa", 3, 100.0, "completed").await;
    // Pending order must not count.
    let (code, _) = place_order(&app, "c@example.com", p1, "Monstera Deliciosa", 5, 100.0).await;
    assert_eq!(code, StatusCode::CREATED);

    let (status, report) = send(&app, "GET", "/reports/sales", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totalSales"], json!(400.0));
    assert_eq!(report["totalOrders"], 2);
    assert_eq!(report["averageOrderValue"], json!(200.0));
}

#[tokio::test]
async fn sales_report_is_zero_when_empty() {
    let app = test_app().await;

    let (status, report) = send(&app, "GET", "/reports/sales", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totalSales"], json!(0.0));
    assert_eq!(report["totalOrders"], 0);
    assert_eq!(report["averageOrderValue"], json!(0.0));
    assert_eq!(report["topPlants"], json!([]));
}

#[tokio::test]
async fn sales_report_date_range_is_inclusive() {
    let app = test_app().await;
    let p1 = create_plant(&app, "Snake Plant", "indoor", 200.0, 50).await;
    completed_order(&app, "a@example.com", p1, "Snake Plant", 1, 200.0, "completed").await;

    // A range nowhere near today excludes everything.
    let (status, report) = send(
        &app,
        "GET",
        "/reports/sales?startDate=2000-01-01&endDate=2000-12-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totalOrders"], 0);

    // A wide-open range (inclusive both ends) includes today's order.
    let (status, report) = send(
        &app,
        "GET",
        "/reports/sales?startDate=2000-01-01&endDate=2099-12-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totalOrders"], 1);
    assert_eq!(report["totalSales"], json!(200.0));
}

#[tokio::test]
async fn sales_report_tallies_top_plants_by_quantity() {
    let app = test_app().await;
    let p1 = create_plant(&app, "Monstera Deliciosa", "indoor", 100.0, 50).await;
    let p2 = create_plant(&app, "Snake Plant", "indoor", 50.0, 50).await;

    completed_order(&app, "a@example.com", p1, "Monstera Deliciosa", 2, 100.0, "completed").await;
    completed_order(&app, "b@example.com", p2, "Snake Plant", 5, 50.0, "completed").await;
    completed_order(&app, "c@example.com", p1, "Monstera Deliciosa", 1, 100.0, "completed").await;

    let (_, report) = send(&app, "GET", "/reports/sales", None).await;
    assert_eq!(
        report["topPlants"],
        json!([
            { "plantName": "Snake Plant", "quantity": 5 },
            { "plantName": "Monstera Deliciosa", "quantity": 3 },
        ])
    );
}

#[tokio::test]
async fn sales_report_rejects_malformed_dates() {
    let app = test_app().await;

    let (status, _) = send(&app, "GET", "/reports/sales?startDate=yesterday", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_counts_entities_and_low_stock() {
    let app = test_app().await;
    let p1 = create_plant(&app, "Monstera Deliciosa", "indoor", 100.0, 25).await;
    create_plant(&app, "Snake Plant", "indoor", 50.0, 3).await;
    create_plant(&app, "Jade Plant", "succulent", 30.0, 9).await;

    completed_order(&app, "a@example.com", p1, "Monstera Deliciosa", 1, 100.0, "completed").await;
    let (code, _) = place_order(&app, "b@example.com", p1, "Monstera Deliciosa", 1, 100.0).await;
    assert_eq!(code, StatusCode::CREATED);

    let (status, stats) = send(&app, "GET", "/dashboard/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalPlants"], 3);
    assert_eq!(stats["totalOrders"], 2);
    assert_eq!(stats["totalCustomers"], 2);
    // Stock < 10: Snake Plant (3) and Jade Plant (9).
    assert_eq!(stats["lowStockCount"], 2);
    // Only the completed order counts toward revenue.
    assert_eq!(stats["totalRevenue"], json!(100.0));
}

#[tokio::test]
async fn dashboard_lists_recent_orders_and_lowest_stock() {
    let app = test_app().await;
    let p1 = create_plant(&app, "Monstera Deliciosa", "indoor", 10.0, 100).await;
    create_plant(&app, "Snake Plant", "indoor", 10.0, 1).await;

    for i in 0..7 {
        let (code, _) = place_order(
            &app,
            &format!("buyer{i}@example.com"),
            p1,
            "Monstera Deliciosa",
            1,
            10.0,
        )
        .await;
        assert_eq!(code, StatusCode::CREATED);
    }

    let (_, stats) = send(&app, "GET", "/dashboard/stats", None).await;
    assert_eq!(stats["recentOrders"].as_array().expect("recent").len(), 5);
    let low_stock = stats["lowStockPlants"].as_array().expect("low stock");
    assert_eq!(low_stock.len(), 2);
    assert_eq!(low_stock[0]["name"], "Snake Plant");
}
