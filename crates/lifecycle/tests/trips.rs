//! Trip state machine behaviour against the in-memory store.

mod common;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use fleetops_core::assets::TruckStatus;
use fleetops_core::error::CoreError;
use fleetops_core::trips::{TransitionPolicy, TripFields, TripStatus};
use fleetops_db::models::trip::CompleteTrip;
use fleetops_lifecycle::store::{Collection, TripStore, TruckStore};
use fleetops_lifecycle::trips::*;
use fleetops_lifecycle::{FleetError, MemoryStore};

const PERMISSIVE: TransitionPolicy = TransitionPolicy::Permissive;
const STRICT: TransitionPolicy = TransitionPolicy::Strict;

fn completion(end_mileage: f64, fuel_volume: f64) -> CompleteTrip {
    CompleteTrip {
        end_mileage,
        fuel_volume,
        arrival_time: None,
        notes: Some("delivered".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Scheduling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn schedule_trip_starts_pending() {
    let store = MemoryStore::new();
    let truck = common::truck(&store, "AB-1", 0.0).await;
    let driver = common::driver(&store, "L-1").await;

    let trip = schedule_trip(&store, &common::new_trip(truck.id, driver.id))
        .await
        .unwrap();
    assert_eq!(trip.status, TripStatus::Pending);
    assert_eq!(trip.truck_id, truck.id);
}

#[tokio::test]
async fn schedule_trip_requires_truck_and_driver() {
    let store = MemoryStore::new();
    let truck = common::truck(&store, "AB-1", 0.0).await;

    assert_matches!(
        schedule_trip(&store, &common::new_trip(truck.id, 404)).await,
        Err(FleetError::Core(CoreError::NotFound { entity: "Driver", id: 404 }))
    );
}

// ---------------------------------------------------------------------------
// Start / complete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn start_trip_records_departure_and_marks_truck_in_use() {
    let store = MemoryStore::new();
    let trip = common::pending_trip(&store).await;
    let now = Utc::now();

    let started = start_trip(&store, PERMISSIVE, trip.id, 1000.0, now).await.unwrap();
    assert_eq!(started.status, TripStatus::InProgress);
    assert_eq!(started.start_mileage, Some(1000.0));
    assert_eq!(started.actual_departure, Some(now));

    let truck = store.find_truck(trip.truck_id).await.unwrap().unwrap();
    assert_eq!(truck.status, TruckStatus::InUse);
}

#[tokio::test]
async fn complete_trip_computes_distance_and_consumption() {
    let store = MemoryStore::new();
    let trip = common::pending_trip(&store).await;
    start_trip(&store, PERMISSIVE, trip.id, 1000.0, Utc::now())
        .await
        .unwrap();

    let now = Utc::now();
    let done = complete_trip(&store, PERMISSIVE, trip.id, completion(1600.0, 40.0), now)
        .await
        .unwrap();
    assert_eq!(done.status, TripStatus::Completed);
    assert_eq!(done.distance, Some(600.0));
    assert_eq!(done.actual_arrival, Some(now));
    assert_eq!(done.completion_notes.as_deref(), Some("delivered"));

    let summary = trip_summary(&store, trip.id).await.unwrap();
    assert_eq!(summary.distance, Some(600.0));
    assert_eq!(summary.consumption_per_100km, Some(6.67));
}

#[tokio::test]
async fn complete_trip_uses_supplied_arrival_time() {
    let store = MemoryStore::new();
    let trip = common::pending_trip(&store).await;
    let arrival = Utc::now() - Duration::hours(2);
    let input = CompleteTrip {
        arrival_time: Some(arrival),
        ..completion(1200.0, 10.0)
    };

    let done = complete_trip(&store, PERMISSIVE, trip.id, input, Utc::now())
        .await
        .unwrap();
    assert_eq!(done.actual_arrival, Some(arrival));
}

#[tokio::test]
async fn completing_advances_the_truck_odometer_only_forward() {
    let store = MemoryStore::new();
    let trip = common::pending_trip(&store).await;

    complete_trip(&store, PERMISSIVE, trip.id, completion(1600.0, 40.0), Utc::now())
        .await
        .unwrap();
    let truck = store.find_truck(trip.truck_id).await.unwrap().unwrap();
    assert_eq!(truck.current_mileage, 1600.0);

    let second = store
        .create_trip(&common::new_trip(trip.truck_id, trip.driver_id))
        .await
        .unwrap();
    complete_trip(&store, PERMISSIVE, second.id, completion(500.0, 5.0), Utc::now())
        .await
        .unwrap();
    let truck = store.find_truck(trip.truck_id).await.unwrap().unwrap();
    assert_eq!(truck.current_mileage, 1600.0);
}

#[tokio::test]
async fn completing_without_start_counts_from_zero() {
    let store = MemoryStore::new();
    let trip = common::pending_trip(&store).await;

    let done = complete_trip(&store, PERMISSIVE, trip.id, completion(250.0, 20.0), Utc::now())
        .await
        .unwrap();
    assert_eq!(done.distance, Some(250.0));

    let summary = trip_summary(&store, trip.id).await.unwrap();
    assert_eq!(summary.consumption_per_100km, None);
}

#[tokio::test]
async fn permissive_policy_allows_negative_distance() {
    let store = MemoryStore::new();
    let trip = common::pending_trip(&store).await;
    start_trip(&store, PERMISSIVE, trip.id, 1000.0, Utc::now())
        .await
        .unwrap();

    let done = complete_trip(&store, PERMISSIVE, trip.id, completion(900.0, 10.0), Utc::now())
        .await
        .unwrap();
    assert_eq!(done.distance, Some(-100.0));
    let summary = trip_summary(&store, trip.id).await.unwrap();
    assert_eq!(summary.consumption_per_100km, None);
}

// ---------------------------------------------------------------------------
// update_trip_status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn permissive_status_update_writes_supplied_fields_only() {
    let store = MemoryStore::new();
    let trip = common::pending_trip(&store).await;
    let fields = TripFields {
        comments: Some("skipped ahead".to_string()),
        ..TripFields::default()
    };

    let updated = update_trip_status(&store, PERMISSIVE, trip.id, TripStatus::Completed, &fields)
        .await
        .unwrap();
    assert_eq!(updated.status, TripStatus::Completed);
    assert_eq!(updated.comments.as_deref(), Some("skipped ahead"));
    assert_eq!(updated.start_mileage, None);

    let reopened = update_trip_status(
        &store,
        PERMISSIVE,
        trip.id,
        TripStatus::Pending,
        &TripFields::default(),
    )
    .await
    .unwrap();
    assert_eq!(reopened.status, TripStatus::Pending);
    assert_eq!(reopened.comments.as_deref(), Some("skipped ahead"));
}

#[tokio::test]
async fn strict_policy_rejects_illegal_transition_without_writing() {
    let store = MemoryStore::new();
    let trip = common::pending_trip(&store).await;

    let result =
        update_trip_status(&store, STRICT, trip.id, TripStatus::Completed, &TripFields::default())
            .await;
    assert_matches!(result, Err(FleetError::Core(CoreError::Validation(_))));

    let stored = store.find_trip(trip.id).await.unwrap().unwrap();
    assert_eq!(stored.status, TripStatus::Pending);
}

#[tokio::test]
async fn strict_policy_follows_the_happy_path() {
    let store = MemoryStore::new();
    let trip = common::pending_trip(&store).await;

    start_trip(&store, STRICT, trip.id, 1000.0, Utc::now())
        .await
        .unwrap();
    let done = complete_trip(&store, STRICT, trip.id, completion(1600.0, 40.0), Utc::now())
        .await
        .unwrap();
    assert_eq!(done.status, TripStatus::Completed);

    assert_matches!(
        start_trip(&store, STRICT, trip.id, 1600.0, Utc::now()).await,
        Err(FleetError::Core(CoreError::Validation(_)))
    );
}

#[tokio::test]
async fn strict_policy_rejects_end_below_start() {
    let store = MemoryStore::new();
    let trip = common::pending_trip(&store).await;
    start_trip(&store, STRICT, trip.id, 1000.0, Utc::now())
        .await
        .unwrap();

    assert_matches!(
        complete_trip(&store, STRICT, trip.id, completion(900.0, 10.0), Utc::now()).await,
        Err(FleetError::Core(CoreError::Validation(msg))) if msg.contains("below start_mileage")
    );
}

#[tokio::test]
async fn strict_policy_allows_cancelling_a_pending_trip() {
    let store = MemoryStore::new();
    let trip = common::pending_trip(&store).await;

    let cancelled = update_trip_status(
        &store,
        STRICT,
        trip.id,
        TripStatus::Cancelled,
        &TripFields::default(),
    )
    .await
    .unwrap();
    assert_eq!(cancelled.status, TripStatus::Cancelled);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn every_trip_operation_reports_missing_trip() {
    let store = MemoryStore::new();
    let missing = 31;

    assert_matches!(
        start_trip(&store, PERMISSIVE, missing, 0.0, Utc::now()).await,
        Err(FleetError::Core(CoreError::NotFound { entity: "Trip", id: 31 }))
    );
    assert_matches!(
        complete_trip(&store, PERMISSIVE, missing, completion(1.0, 1.0), Utc::now()).await,
        Err(FleetError::Core(CoreError::NotFound { entity: "Trip", .. }))
    );
    assert_matches!(
        update_trip_status(&store, PERMISSIVE, missing, TripStatus::Cancelled, &TripFields::default())
            .await,
        Err(FleetError::Core(CoreError::NotFound { entity: "Trip", .. }))
    );
    assert_matches!(
        trip_summary(&store, missing).await,
        Err(FleetError::Core(CoreError::NotFound { entity: "Trip", .. }))
    );
}

#[tokio::test]
async fn failed_truck_write_after_start_is_a_partial_write() {
    let store = MemoryStore::new();
    let trip = common::pending_trip(&store).await;
    store.fail_writes(Collection::Trucks).await;

    let err = start_trip(&store, PERMISSIVE, trip.id, 1000.0, Utc::now())
        .await
        .unwrap_err();
    assert_matches!(
        err,
        FleetError::Core(CoreError::PartialWrite { operation: "start_trip", .. })
    );

    // The trip half committed.
    let stored = store.find_trip(trip.id).await.unwrap().unwrap();
    assert_eq!(stored.status, TripStatus::InProgress);
    let truck = store.find_truck(trip.truck_id).await.unwrap().unwrap();
    assert_eq!(truck.status, TruckStatus::Available);
}

#[tokio::test]
async fn failed_odometer_write_after_completion_is_a_partial_write() {
    let store = MemoryStore::new();
    let trip = common::pending_trip(&store).await;
    store.fail_writes(Collection::Trucks).await;

    let err = complete_trip(&store, PERMISSIVE, trip.id, completion(1600.0, 40.0), Utc::now())
        .await
        .unwrap_err();
    match err {
        FleetError::Core(CoreError::PartialWrite {
            committed, failed, ..
        }) => {
            assert!(committed.contains("completed"));
            assert!(failed.contains("odometer"));
        }
        other => panic!("expected PartialWrite, got {other:?}"),
    }

    let stored = store.find_trip(trip.id).await.unwrap().unwrap();
    assert_eq!(stored.status, TripStatus::Completed);
}

#[tokio::test]
async fn failed_trip_write_leaves_truck_untouched() {
    let store = MemoryStore::new();
    let trip = common::pending_trip(&store).await;
    store.fail_writes(Collection::Trips).await;

    let err = start_trip(&store, PERMISSIVE, trip.id, 1000.0, Utc::now())
        .await
        .unwrap_err();
    assert_matches!(err, FleetError::Core(CoreError::Internal(_)));

    let truck = store.find_truck(trip.truck_id).await.unwrap().unwrap();
    assert_eq!(truck.status, TruckStatus::Available);
}

#[tokio::test]
async fn truck_with_trips_cannot_be_deleted() {
    let store = MemoryStore::new();
    let trip = common::pending_trip(&store).await;

    assert_matches!(
        store.delete_truck(trip.truck_id).await,
        Err(FleetError::Core(CoreError::Conflict(_)))
    );
}
