//! Shared harness for the HTTP integration tests.
//!
//! The router is built exactly as in `main.rs`, over an in-memory store so
//! the tests need no database. `Router` is cheap to clone; every request in a
//! test goes through a clone of the same app and therefore sees the same
//! store.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use fleetops_api::config::ServerConfig;
use fleetops_api::router::build_app_router;
use fleetops_api::state::AppState;
use fleetops_core::trips::TransitionPolicy;
use fleetops_lifecycle::MemoryStore;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(trip_transitions: TransitionPolicy) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        trip_transitions,
        database_max_connections: 1,
    }
}

/// Full application router over a fresh in-memory store.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(MemoryStore::new()), TransitionPolicy::Permissive)
}

/// Full application router over `store`, keeping a handle for fault injection.
pub fn build_test_app_with(store: Arc<MemoryStore>, trip_transitions: TransitionPolicy) -> Router {
    let config = test_config(trip_transitions);
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri, None).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Collect and parse a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// POST `body` to `uri`, assert 201 and return the created record.
pub async fn create(app: &Router, uri: &str, body: Value) -> Value {
    let response = post_json(app.clone(), uri, body).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {uri}");
    body_json(response).await
}

pub async fn create_truck(app: &Router, plate: &str, mileage: f64) -> i64 {
    let truck = create(
        app,
        "/api/v1/trucks",
        json!({
            "plate_number": plate,
            "make": "Scania",
            "capacity_kg": 18000.0,
            "current_mileage": mileage
        }),
    )
    .await;
    truck["id"].as_i64().unwrap()
}

pub async fn create_driver(app: &Router, license: &str) -> i64 {
    let driver = create(
        app,
        "/api/v1/drivers",
        json!({ "full_name": "Rui Costa", "license_number": license }),
    )
    .await;
    driver["id"].as_i64().unwrap()
}

pub async fn create_trailer(app: &Router, plate: &str) -> i64 {
    let trailer = create(
        app,
        "/api/v1/trailers",
        json!({ "plate_number": plate, "trailer_type": "reefer", "capacity_kg": 22000.0 }),
    )
    .await;
    trailer["id"].as_i64().unwrap()
}

pub async fn create_tire(app: &Router, serial: &str) -> i64 {
    let tire = create(
        app,
        "/api/v1/tires",
        json!({ "serial_number": serial, "max_mileage": 100000.0 }),
    )
    .await;
    tire["id"].as_i64().unwrap()
}

/// Schedule a trip for a new truck at 1000 km and a new driver. Returns
/// `(trip_id, truck_id)`.
pub async fn create_trip(app: &Router) -> (i64, i64) {
    let truck_id = create_truck(app, "TRIP-01", 1000.0).await;
    let driver_id = create_driver(app, "LIC-TRIP").await;
    let trip = create(
        app,
        "/api/v1/trips",
        json!({
            "truck_id": truck_id,
            "driver_id": driver_id,
            "departure_location": "Porto",
            "arrival_location": "Madrid",
            "scheduled_departure": "2026-03-01T08:00:00Z"
        }),
    )
    .await;
    (trip["id"].as_i64().unwrap(), truck_id)
}
