//! Seed helpers shared by the lifecycle integration tests.

#![allow(dead_code)]

use chrono::Utc;
use fleetops_core::assets::AssetKind;
use fleetops_core::maintenance::{ConditionType, MaintenanceStatus};
use fleetops_core::types::{DbId, Kilometres, Timestamp};
use fleetops_db::models::driver::{CreateDriver, Driver};
use fleetops_db::models::maintenance::{
    CreateMaintenanceRecord, CreateMaintenanceRule, MaintenanceRecord, MaintenanceRule,
};
use fleetops_db::models::tire::{CreateTire, Tire};
use fleetops_db::models::trailer::{CreateTrailer, Trailer};
use fleetops_db::models::trip::{CreateTrip, Trip};
use fleetops_db::models::truck::{CreateTruck, Truck};
use fleetops_lifecycle::store::{
    DriverStore, MaintenanceStore, TireStore, TrailerStore, TripStore, TruckStore,
};
use fleetops_lifecycle::MemoryStore;

pub async fn truck(store: &MemoryStore, plate: &str, mileage: Kilometres) -> Truck {
    let input = CreateTruck {
        plate_number: plate.to_string(),
        make: Some("Volvo".to_string()),
        model: Some("FH".to_string()),
        capacity_kg: 18_000.0,
        status: None,
        current_mileage: Some(mileage),
    };
    store.create_truck(&input).await.unwrap()
}

pub async fn trailer(store: &MemoryStore, plate: &str) -> Trailer {
    let input = CreateTrailer {
        plate_number: plate.to_string(),
        trailer_type: "flatbed".to_string(),
        capacity_kg: 24_000.0,
        status: None,
        current_mileage: None,
    };
    store.create_trailer(&input).await.unwrap()
}

pub async fn tire(store: &MemoryStore, serial: &str) -> Tire {
    let input = CreateTire {
        serial_number: serial.to_string(),
        brand: Some("Michelin".to_string()),
        max_mileage: 120_000.0,
        current_mileage: None,
        status: None,
    };
    store.create_tire(&input).await.unwrap()
}

pub async fn driver(store: &MemoryStore, license: &str) -> Driver {
    let input = CreateDriver {
        full_name: "Ana Lopes".to_string(),
        license_number: license.to_string(),
        phone: None,
        is_active: None,
    };
    store.create_driver(&input).await.unwrap()
}

pub fn new_trip(truck_id: DbId, driver_id: DbId) -> CreateTrip {
    CreateTrip {
        truck_id,
        driver_id,
        departure_location: "Lyon".to_string(),
        arrival_location: "Turin".to_string(),
        scheduled_departure: Utc::now(),
        scheduled_arrival: None,
        comments: None,
    }
}

/// A truck, a driver and a pending trip between them.
pub async fn pending_trip(store: &MemoryStore) -> Trip {
    let truck = truck(store, "TRIP-TRUCK", 1000.0).await;
    let driver = driver(store, "TRIP-DRIVER").await;
    store
        .create_trip(&new_trip(truck.id, driver.id))
        .await
        .unwrap()
}

pub async fn rule(
    store: &MemoryStore,
    target_type: AssetKind,
    condition_type: ConditionType,
    interval_value: f64,
    active: bool,
) -> MaintenanceRule {
    let input = CreateMaintenanceRule {
        name: format!("{condition_type} every {interval_value}"),
        description: Some("Routine service".to_string()),
        interval_value,
        condition_type,
        target_type,
        is_active: Some(active),
    };
    store.create_rule(&input).await.unwrap()
}

pub fn new_record(
    target_type: AssetKind,
    target_id: DbId,
    status: MaintenanceStatus,
    performed_on: Timestamp,
) -> CreateMaintenanceRecord {
    CreateMaintenanceRecord {
        target_type,
        target_id,
        maintenance_type: "service".to_string(),
        description: None,
        performed_on,
        cost: 250.0,
        status: Some(status),
        mileage_at_service: None,
    }
}

/// Insert a record directly, bypassing the odometer snapshot.
pub async fn record(
    store: &MemoryStore,
    input: &CreateMaintenanceRecord,
    mileage_at_service: Option<Kilometres>,
) -> MaintenanceRecord {
    store.create_record(input, mileage_at_service).await.unwrap()
}
