//! HTTP-level tests for maintenance records, rules and the due/upcoming views.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, FixedOffset, SecondsFormat, Utc};
use common::{body_json, create, create_tire, create_truck, delete, get, post_json, put_json};
use serde_json::json;

fn iso(t: chrono::DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_rule_defaults_to_active() {
    let app = common::build_test_app();
    let rule = create(
        &app,
        "/api/v1/maintenance/rules",
        json!({
            "name": "Oil change",
            "interval_value": 10000.0,
            "condition_type": "mileage",
            "target_type": "truck"
        }),
    )
    .await;

    assert_eq!(rule["is_active"], true);
    assert_eq!(rule["condition_type"], "mileage");
}

#[tokio::test]
async fn zero_interval_is_a_validation_error() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/maintenance/rules",
        json!({
            "name": "Broken",
            "interval_value": 0.0,
            "condition_type": "time",
            "target_type": "tire"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn rules_list_can_hide_inactive() {
    let app = common::build_test_app();
    for (name, active) in [("On", true), ("Off", false)] {
        create(
            &app,
            "/api/v1/maintenance/rules",
            json!({
                "name": name,
                "interval_value": 30.0,
                "condition_type": "time",
                "target_type": "trailer",
                "is_active": active
            }),
        )
        .await;
    }

    let json = body_json(get(app.clone(), "/api/v1/maintenance/rules").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let json = body_json(get(app, "/api/v1/maintenance/rules?active_only=true").await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "On");
}

#[tokio::test]
async fn update_and_delete_rule() {
    let app = common::build_test_app();
    let rule = create(
        &app,
        "/api/v1/maintenance/rules",
        json!({
            "name": "Rotation",
            "interval_value": 20000.0,
            "condition_type": "mileage",
            "target_type": "tire"
        }),
    )
    .await;
    let id = rule["id"].as_i64().unwrap();

    let json = body_json(
        put_json(
            app.clone(),
            &format!("/api/v1/maintenance/rules/{id}"),
            json!({ "is_active": false }),
        )
        .await,
    )
    .await;
    assert_eq!(json["is_active"], false);
    assert_eq!(json["name"], "Rotation");

    let response = delete(app.clone(), &format!("/api/v1/maintenance/rules/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get(app, &format!("/api/v1/maintenance/rules/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[tokio::test]
async fn record_snapshots_target_odometer() {
    let app = common::build_test_app();
    let truck_id = create_truck(&app, "AA-01-BB", 5000.0).await;

    let record = create(
        &app,
        "/api/v1/maintenance/records",
        json!({
            "target_type": "truck",
            "target_id": truck_id,
            "maintenance_type": "oil_change",
            "performed_on": iso(Utc::now()),
            "cost": 180.0,
            "status": "completed"
        }),
    )
    .await;

    assert_eq!(record["mileage_at_service"], 5000.0);
    assert_eq!(record["status"], "completed");
}

#[tokio::test]
async fn record_for_missing_target_returns_404() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/maintenance/records",
        json!({
            "target_type": "trailer",
            "target_id": 9,
            "maintenance_type": "brakes",
            "performed_on": iso(Utc::now()),
            "cost": 0.0
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Trailer with id 9 not found");
}

#[tokio::test]
async fn records_filter_by_target() {
    let app = common::build_test_app();
    let truck_id = create_truck(&app, "AA-01-BB", 0.0).await;
    let tire_id = create_tire(&app, "SN-1").await;
    for (kind, id) in [("truck", truck_id), ("tire", tire_id)] {
        create(
            &app,
            "/api/v1/maintenance/records",
            json!({
                "target_type": kind,
                "target_id": id,
                "maintenance_type": "inspection",
                "performed_on": iso(Utc::now()),
                "cost": 50.0
            }),
        )
        .await;
    }

    let json = body_json(get(app, "/api/v1/maintenance/records?target_type=tire").await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["target_id"], tire_id);
}

#[tokio::test]
async fn completing_a_record_retakes_the_odometer() {
    let app = common::build_test_app();
    let truck_id = create_truck(&app, "AA-01-BB", 1000.0).await;
    let booked = create(
        &app,
        "/api/v1/maintenance/records",
        json!({
            "target_type": "truck",
            "target_id": truck_id,
            "maintenance_type": "oil_change",
            "performed_on": iso(Utc::now()),
            "cost": 0.0,
            "status": "scheduled"
        }),
    )
    .await;
    assert_eq!(booked["mileage_at_service"], 1000.0);

    let response = put_json(
        app.clone(),
        &format!("/api/v1/trucks/{truck_id}"),
        json!({ "current_mileage": 9000.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json(
        app,
        &format!("/api/v1/maintenance/records/{}", booked["id"]),
        json!({ "status": "completed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let record = body_json(response).await;
    assert_eq!(record["status"], "completed");
    assert_eq!(record["mileage_at_service"], 9000.0);
}

#[tokio::test]
async fn updating_a_missing_record_returns_404() {
    let app = common::build_test_app();
    let response = put_json(
        app,
        "/api/v1/maintenance/records/77",
        json!({ "status": "completed" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

#[tokio::test]
async fn due_lists_trucks_past_their_mileage_interval() {
    let app = common::build_test_app();
    create_truck(&app, "WORN-1", 12000.0).await;
    create_truck(&app, "FRESH-1", 800.0).await;
    create(
        &app,
        "/api/v1/maintenance/rules",
        json!({
            "name": "Oil change",
            "description": "Every 10000 km",
            "interval_value": 10000.0,
            "condition_type": "mileage",
            "target_type": "truck"
        }),
    )
    .await;

    let response = get(app, "/api/v1/maintenance/due").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["rule"], "Oil change");
    assert_eq!(data[0]["target_type"], "truck");
    assert_eq!(data[0]["target_name"], "WORN-1");
    assert_eq!(data[0]["description"], "Every 10000 km");
}

#[tokio::test]
async fn due_honours_reference_time() {
    let app = common::build_test_app();
    create_tire(&app, "SN-1").await;
    create(
        &app,
        "/api/v1/maintenance/rules",
        json!({
            "name": "Tire check",
            "interval_value": 30.0,
            "condition_type": "time",
            "target_type": "tire"
        }),
    )
    .await;

    let json = body_json(get(app.clone(), "/api/v1/maintenance/due").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let later = iso(Utc::now() + Duration::days(31));
    let json = body_json(get(app, &format!("/api/v1/maintenance/due?at={later}")).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["target_name"], "SN-1");
}

#[tokio::test]
async fn reference_time_accepts_an_encoded_offset() {
    let app = common::build_test_app();
    create_tire(&app, "SN-1").await;
    create(
        &app,
        "/api/v1/maintenance/rules",
        json!({
            "name": "Tire check",
            "interval_value": 30.0,
            "condition_type": "time",
            "target_type": "tire"
        }),
    )
    .await;

    let plus_one = FixedOffset::east_opt(3600).unwrap();
    let later = (Utc::now() + Duration::days(31))
        .with_timezone(&plus_one)
        .to_rfc3339_opts(SecondsFormat::Secs, false);
    assert!(later.ends_with("+01:00"));

    let encoded = later.replace('+', "%2B");
    let response = get(app.clone(), &format!("/api/v1/maintenance/due?at={encoded}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    // An unencoded `+` decodes to a space.
    let response = get(app, &format!("/api/v1/maintenance/due?at={later}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn due_is_empty_without_rules() {
    let app = common::build_test_app();
    create_truck(&app, "AA-01-BB", 900000.0).await;

    let json = body_json(get(app, "/api/v1/maintenance/due").await).await;
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn upcoming_lists_future_scheduled_records_soonest_first() {
    let app = common::build_test_app();
    let truck_id = create_truck(&app, "AA-01-BB", 0.0).await;
    let now = Utc::now();

    for (kind, days, status) in [
        ("tyres", 20, "scheduled"),
        ("brakes", 5, "scheduled"),
        ("past", -3, "scheduled"),
        ("done", 10, "completed"),
    ] {
        create(
            &app,
            "/api/v1/maintenance/records",
            json!({
                "target_type": "truck",
                "target_id": truck_id,
                "maintenance_type": kind,
                "performed_on": iso(now + Duration::days(days)),
                "cost": 0.0,
                "status": status
            }),
        )
        .await;
    }

    let json = body_json(
        get(app, &format!("/api/v1/maintenance/upcoming?at={}", iso(now))).await,
    )
    .await;
    let kinds: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["maintenance_type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, ["brakes", "tyres"]);
}
