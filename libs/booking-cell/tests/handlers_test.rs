use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booking_cell::router::appointment_routes;
use shared_database::AppContext;
use shared_utils::test_utils::{MockStoreRows, TestConfig};

fn test_app(server: &MockServer) -> Router {
    let config = TestConfig::for_mock_server(&server.uri()).to_app_config();
    appointment_routes(Arc::new(AppContext::new(config)))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn booking_body(datetime: &str) -> Value {
    json!({
        "customer_name": "Jo Customer",
        "customer_email": "jo@example.com",
        "customer_phone": "555-0199",
        "staff_id": 1,
        "service_id": 2,
        "appointment_datetime": datetime,
    })
}

async fn mount_bookable_monday(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/staff"))
        .and(query_param("id", "eq.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::staff_row(1, "Sam Provider", "sam@example.com")
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .and(query_param("id", "eq.2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::service_row(2, "Consultation", 30, 5000)
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/staff_services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::assignment_row(1, 2)
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/schedules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::schedule_row(10, 1, 1, "09:00", "17:00")
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn post_appointment_returns_created() {
    let server = MockServer::start().await;
    mount_bookable_monday(&server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreRows::appointment_row(100, 1, 2, "2025-03-10T17:30:00Z", 30, "confirmed")
        ])))
        .mount(&server)
        .await;

    let response = test_app(&server)
        .oneshot(post_json("/appointments", booking_body("2025-03-10T17:30:00Z")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let appointment: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(appointment["status"], "confirmed");
    assert_eq!(appointment["duration_minutes"], 30);
}

#[tokio::test]
async fn conflicting_slot_maps_to_409() {
    let server = MockServer::start().await;
    mount_bookable_monday(&server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::appointment_row(100, 1, 2, "2025-03-10T17:30:00Z", 30, "confirmed")
        ])))
        .mount(&server)
        .await;

    let response = test_app(&server)
        .oneshot(post_json("/appointments", booking_body("2025-03-10T17:45:00Z")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_request_maps_to_400() {
    let server = MockServer::start().await;

    let mut body = booking_body("2025-03-10T17:30:00Z");
    body["customer_name"] = json!("");

    let response = test_app(&server)
        .oneshot(post_json("/appointments", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_staff_maps_to_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/staff"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let response = test_app(&server)
        .oneshot(post_json("/appointments", booking_body("2025-03-10T17:30:00Z")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cancel_endpoint_conflicts_when_already_cancelled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", "eq.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::appointment_row(5, 1, 2, "2025-03-10T17:30:00Z", 30, "cancelled")
        ])))
        .mount(&server)
        .await;

    let response = test_app(&server)
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/appointments/5/cancel")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Already cancelled: the state machine rejects the repeat.
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn storage_failures_stay_opaque() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("relation \"appointments\" does not exist"),
        )
        .mount(&server)
        .await;

    let response = test_app(&server)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/appointments")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    // The raw storage message never reaches the caller.
    assert_eq!(body["error"], "storage operation failed");
}

#[tokio::test]
async fn list_appointments_filters_by_staff() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("staff_id", "eq.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::appointment_row(7, 1, 2, "2025-03-10T17:30:00Z", 30, "confirmed")
        ])))
        .mount(&server)
        .await;

    let response = test_app(&server)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/appointments?staff_id=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let rows: Vec<Value> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], 7);
}

#[tokio::test]
async fn detailed_listing_carries_service_price() {
    let server = MockServer::start().await;

    let mut row = MockStoreRows::appointment_row(7, 1, 2, "2025-03-10T17:30:00Z", 30, "completed");
    row["service"] = json!({ "price_cents": 5000 });

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row])))
        .mount(&server)
        .await;

    let response = test_app(&server)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/appointments/detailed")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let rows: Vec<Value> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(rows[0]["service"]["price_cents"], 5000);
}
