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

use catalog_cell::router::catalog_routes;
use shared_database::AppContext;
use shared_utils::test_utils::{MockStoreRows, TestConfig};

fn test_app(server: &MockServer) -> Router {
    let config = TestConfig::for_mock_server(&server.uri()).to_app_config();
    catalog_routes(Arc::new(AppContext::new(config)))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// ==============================================================================
// SERVICES
// ==============================================================================

#[tokio::test]
async fn creates_service() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreRows::service_row(2, "Consultation", 30, 5000)
        ])))
        .mount(&server)
        .await;

    let response = test_app(&server)
        .oneshot(post_json(
            "/services",
            json!({ "name": "Consultation", "duration_minutes": 30, "price_cents": 5000 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn rejects_service_with_bad_fields() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    for body in [
        json!({ "name": "", "duration_minutes": 30, "price_cents": 5000 }),
        json!({ "name": "Cut", "duration_minutes": 0, "price_cents": 5000 }),
        json!({ "name": "Cut", "duration_minutes": 30, "price_cents": -1 }),
    ] {
        let response = app.clone().oneshot(post_json("/services", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn deletes_unreferenced_service() {
    let server = MockServer::start().await;

    // No eligible staff, no appointments.
    Mock::given(method("GET"))
        .and(path("/rest/v1/staff_services"))
        .and(query_param("service_id", "eq.2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("service_id", "eq.2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/services"))
        .and(query_param("id", "eq.2"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let response = test_app(&server).oneshot(delete("/services/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn refuses_to_delete_service_assigned_to_staff() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/staff_services"))
        .and(query_param("service_id", "eq.2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "staff": MockStoreRows::staff_row(1, "Sam Provider", "sam@example.com") }
        ])))
        .mount(&server)
        .await;

    let response = test_app(&server).oneshot(delete("/services/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn refuses_to_delete_service_with_appointment_history() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/staff_services"))
        .and(query_param("service_id", "eq.2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    // Even a cancelled appointment keeps its service pinned.
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("service_id", "eq.2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 9 }])))
        .mount(&server)
        .await;

    let response = test_app(&server).oneshot(delete("/services/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ==============================================================================
// STAFF
// ==============================================================================

#[tokio::test]
async fn creates_staff_with_unique_email() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/staff"))
        .and(query_param("email", "eq.sam@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/staff"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreRows::staff_row(1, "Sam Provider", "sam@example.com")
        ])))
        .mount(&server)
        .await;

    let response = test_app(&server)
        .oneshot(post_json(
            "/staff",
            json!({ "name": "Sam Provider", "email": "sam@example.com", "role": "provider" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn duplicate_staff_email_conflicts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/staff"))
        .and(query_param("email", "eq.sam@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::staff_row(1, "Sam Provider", "sam@example.com")
        ])))
        .mount(&server)
        .await;

    let response = test_app(&server)
        .oneshot(post_json(
            "/staff",
            json!({ "name": "Sam Again", "email": "sam@example.com", "role": "provider" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn staff_email_must_contain_at_sign() {
    let server = MockServer::start().await;

    let response = test_app(&server)
        .oneshot(post_json(
            "/staff",
            json!({ "name": "Sam", "email": "sam.example.com", "role": "provider" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn refuses_to_delete_staff_with_appointments() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("staff_id", "eq.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 4 }])))
        .mount(&server)
        .await;

    let response = test_app(&server).oneshot(delete("/staff/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ==============================================================================
// ELIGIBILITY
// ==============================================================================

async fn mount_staff_and_service(server: &MockServer) {
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
}

#[tokio::test]
async fn assigns_service_to_staff() {
    let server = MockServer::start().await;
    mount_staff_and_service(&server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/staff_services"))
        .and(query_param("staff_id", "eq.1"))
        .and(query_param("service_id", "eq.2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/staff_services"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreRows::assignment_row(1, 2)
        ])))
        .mount(&server)
        .await;

    let response = test_app(&server)
        .oneshot(post_json("/staff/1/services", json!({ "service_id": 2 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn duplicate_assignment_conflicts() {
    let server = MockServer::start().await;
    mount_staff_and_service(&server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/staff_services"))
        .and(query_param("staff_id", "eq.1"))
        .and(query_param("service_id", "eq.2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::assignment_row(1, 2)
        ])))
        .mount(&server)
        .await;

    let response = test_app(&server)
        .oneshot(post_json("/staff/1/services", json!({ "service_id": 2 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn assignment_requires_existing_service() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/staff"))
        .and(query_param("id", "eq.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::staff_row(1, "Sam Provider", "sam@example.com")
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let response = test_app(&server)
        .oneshot(post_json("/staff/1/services", json!({ "service_id": 2 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lists_staff_for_a_service() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/staff_services"))
        .and(query_param("service_id", "eq.2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "staff": MockStoreRows::staff_row(1, "Sam Provider", "sam@example.com") }
        ])))
        .mount(&server)
        .await;

    let response = test_app(&server)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/staff/by-service/2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let rows: Vec<Value> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(rows[0]["email"], "sam@example.com");
}
