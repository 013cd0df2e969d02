//! Repository tests against a real PostgreSQL database.
//!
//! Each test gets a fresh database with all migrations applied. They are
//! ignored by default; run with `cargo test -- --ignored` and a
//! `DATABASE_URL` pointing at a server the tests may create databases on.

use chrono::{Duration, Utc};
use fleetops_core::assets::{AssetKind, AssetRef, TirePosition, TireStatus, TruckStatus};
use fleetops_core::maintenance::{ConditionType, MaintenanceStatus};
use fleetops_core::trips::{completion_fields, TripStatus};
use fleetops_db::models::driver::CreateDriver;
use fleetops_db::models::maintenance::{CreateMaintenanceRecord, CreateMaintenanceRule};
use fleetops_db::models::tire::{CreateTire, TireListQuery, TireMount};
use fleetops_db::models::trip::CreateTrip;
use fleetops_db::models::truck::{CreateTruck, TruckListQuery, UpdateTruck};
use fleetops_db::repositories::{
    DriverRepo, MaintenanceRecordRepo, MaintenanceRuleRepo, TireRepo, TripRepo, TruckRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_truck(plate: &str) -> CreateTruck {
    CreateTruck {
        plate_number: plate.to_string(),
        make: Some("Volvo".to_string()),
        model: None,
        capacity_kg: 18_000.0,
        status: None,
        current_mileage: None,
    }
}

fn new_driver(license: &str) -> CreateDriver {
    CreateDriver {
        full_name: "Ana Lopes".to_string(),
        license_number: license.to_string(),
        phone: None,
        is_active: None,
    }
}

fn new_tire(serial: &str) -> CreateTire {
    CreateTire {
        serial_number: serial.to_string(),
        brand: None,
        max_mileage: 80_000.0,
        current_mileage: None,
        status: None,
    }
}

fn new_record(target: AssetRef, status: MaintenanceStatus, days_ago: i64) -> CreateMaintenanceRecord {
    CreateMaintenanceRecord {
        target_type: target.kind(),
        target_id: target.id(),
        maintenance_type: "oil_change".to_string(),
        description: None,
        performed_on: Utc::now() - Duration::days(days_ago),
        cost: 120.0,
        status: Some(status),
        mileage_at_service: None,
    }
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_health_check(pool: PgPool) {
    fleetops_db::health_check(&pool).await.unwrap();
}

// ---------------------------------------------------------------------------
// Trucks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_truck_defaults_and_partial_update(pool: PgPool) {
    let truck = TruckRepo::create(&pool, &new_truck("AB-123-CD")).await.unwrap();
    assert_eq!(truck.status, TruckStatus::Available);
    assert_eq!(truck.current_mileage, 0.0);

    let update = UpdateTruck {
        model: Some("FH16".to_string()),
        ..UpdateTruck::default()
    };
    let updated = TruckRepo::update(&pool, truck.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.model.as_deref(), Some("FH16"));
    assert_eq!(updated.make.as_deref(), Some("Volvo"));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_duplicate_plate_violates_named_constraint(pool: PgPool) {
    TruckRepo::create(&pool, &new_truck("DUP-1")).await.unwrap();
    let err = TruckRepo::create(&pool, &new_truck("DUP-1")).await.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_trucks_plate_number"));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_set_driver_and_filter_by_driver(pool: PgPool) {
    let truck = TruckRepo::create(&pool, &new_truck("AB-1")).await.unwrap();
    TruckRepo::create(&pool, &new_truck("AB-2")).await.unwrap();
    let driver = DriverRepo::create(&pool, &new_driver("L-1")).await.unwrap();

    let assigned = TruckRepo::set_driver(&pool, truck.id, Some(driver.id), TruckStatus::InUse)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assigned.driver_id, Some(driver.id));
    assert_eq!(assigned.status, TruckStatus::InUse);

    let params = TruckListQuery {
        driver_id: Some(driver.id),
        ..TruckListQuery::default()
    };
    let listed = TruckRepo::list(&pool, &params).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, truck.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_odometer_never_moves_backwards(pool: PgPool) {
    let truck = TruckRepo::create(&pool, &new_truck("ODO-1")).await.unwrap();
    TruckRepo::advance_odometer(&pool, truck.id, 1600.0).await.unwrap();
    let after = TruckRepo::advance_odometer(&pool, truck.id, 900.0)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.current_mileage, 1600.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_truck_with_trips_cannot_be_deleted(pool: PgPool) {
    let truck = TruckRepo::create(&pool, &new_truck("TRIP-1")).await.unwrap();
    let driver = DriverRepo::create(&pool, &new_driver("L-2")).await.unwrap();
    let trip = CreateTrip {
        truck_id: truck.id,
        driver_id: driver.id,
        departure_location: "Lyon".to_string(),
        arrival_location: "Turin".to_string(),
        scheduled_departure: Utc::now(),
        scheduled_arrival: None,
        comments: None,
    };
    TripRepo::create(&pool, &trip).await.unwrap();

    assert_eq!(TruckRepo::count_trips(&pool, truck.id).await.unwrap(), 1);
    let err = TruckRepo::delete(&pool, truck.id).await.unwrap_err();
    let code = err.as_database_error().and_then(|e| e.code()).unwrap();
    assert_eq!(code, "23503");
}

// ---------------------------------------------------------------------------
// Tires
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_tire_mount_and_unmount(pool: PgPool) {
    let truck = TruckRepo::create(&pool, &new_truck("TIRE-T")).await.unwrap();
    let tire = TireRepo::create(&pool, &new_tire("SN-1")).await.unwrap();
    assert_eq!(tire.position, TirePosition::Spare);
    assert_eq!(tire.status, TireStatus::New);

    let mount = TireMount::mounted(truck.id, TirePosition::FrontLeft, Utc::now());
    let mounted = TireRepo::set_mount(&pool, tire.id, &mount).await.unwrap().unwrap();
    assert_eq!(mounted.truck_id, Some(truck.id));
    assert!(mounted.installed_at.is_some());

    let params = TireListQuery {
        truck_id: Some(truck.id),
        ..TireListQuery::default()
    };
    assert_eq!(TireRepo::list(&pool, &params).await.unwrap().len(), 1);

    let unmounted = TireRepo::set_mount(&pool, tire.id, &TireMount::unmounted())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unmounted.truck_id, None);
    assert_eq!(unmounted.position, TirePosition::Spare);
    assert_eq!(unmounted.installed_at, None);
}

// ---------------------------------------------------------------------------
// Trips
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_apply_transition_keeps_unsupplied_fields(pool: PgPool) {
    let truck = TruckRepo::create(&pool, &new_truck("TRIP-2")).await.unwrap();
    let driver = DriverRepo::create(&pool, &new_driver("L-3")).await.unwrap();
    let input = CreateTrip {
        truck_id: truck.id,
        driver_id: driver.id,
        departure_location: "Porto".to_string(),
        arrival_location: "Madrid".to_string(),
        scheduled_departure: Utc::now(),
        scheduled_arrival: None,
        comments: Some("fragile".to_string()),
    };
    let trip = TripRepo::create(&pool, &input).await.unwrap();
    assert_eq!(trip.status, TripStatus::Pending);

    let fields = completion_fields(None, 600.0, 40.0, Utc::now(), None);
    let done = TripRepo::apply_transition(&pool, trip.id, TripStatus::Completed, &fields)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.status, TripStatus::Completed);
    assert_eq!(done.distance, Some(600.0));
    assert_eq!(done.comments.as_deref(), Some("fragile"));
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_latest_completed_ignores_other_statuses(pool: PgPool) {
    let target = AssetRef::Truck(7);
    MaintenanceRecordRepo::create(&pool, &new_record(target, MaintenanceStatus::Completed, 40), Some(1000.0))
        .await
        .unwrap();
    let newest = MaintenanceRecordRepo::create(
        &pool,
        &new_record(target, MaintenanceStatus::Completed, 10),
        Some(5000.0),
    )
    .await
    .unwrap();
    MaintenanceRecordRepo::create(&pool, &new_record(target, MaintenanceStatus::Scheduled, 1), None)
        .await
        .unwrap();

    let latest = MaintenanceRecordRepo::latest_completed(&pool, target)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.id, newest.id);
    assert_eq!(latest.mileage_at_service, Some(5000.0));

    let other = MaintenanceRecordRepo::latest_completed(&pool, AssetRef::Tire(7))
        .await
        .unwrap();
    assert!(other.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_upcoming_is_future_scheduled_ascending(pool: PgPool) {
    let target = AssetRef::Trailer(1);
    let later = MaintenanceRecordRepo::create(
        &pool,
        &new_record(target, MaintenanceStatus::Scheduled, -20),
        None,
    )
    .await
    .unwrap();
    let sooner = MaintenanceRecordRepo::create(
        &pool,
        &new_record(target, MaintenanceStatus::Scheduled, -5),
        None,
    )
    .await
    .unwrap();
    MaintenanceRecordRepo::create(&pool, &new_record(target, MaintenanceStatus::Scheduled, 3), None)
        .await
        .unwrap();

    let upcoming = MaintenanceRecordRepo::list_upcoming(&pool, Utc::now()).await.unwrap();
    let ids: Vec<i64> = upcoming.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![sooner.id, later.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_list_active_rules(pool: PgPool) {
    let rule = |name: &str, active: bool| CreateMaintenanceRule {
        name: name.to_string(),
        description: None,
        interval_value: 10_000.0,
        condition_type: ConditionType::Mileage,
        target_type: AssetKind::Truck,
        is_active: Some(active),
    };
    MaintenanceRuleRepo::create(&pool, &rule("Oil", true)).await.unwrap();
    MaintenanceRuleRepo::create(&pool, &rule("Retired rule", false)).await.unwrap();

    let active = MaintenanceRuleRepo::list_active(&pool).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "Oil");
}
