//! Resolve ids to records, failing with `NotFound` when absent.

use fleetops_core::error::CoreError;
use fleetops_core::types::DbId;
use fleetops_db::models::driver::Driver;
use fleetops_db::models::maintenance::{MaintenanceRecord, MaintenanceRule};
use fleetops_db::models::tire::Tire;
use fleetops_db::models::trailer::Trailer;
use fleetops_db::models::trip::Trip;
use fleetops_db::models::truck::Truck;

use crate::error::FleetResult;
use crate::store::FleetStore;

pub async fn truck(store: &dyn FleetStore, id: DbId) -> FleetResult<Truck> {
    Ok(store
        .find_truck(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Truck", id))?)
}

pub async fn trailer(store: &dyn FleetStore, id: DbId) -> FleetResult<Trailer> {
    Ok(store
        .find_trailer(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Trailer", id))?)
}

pub async fn tire(store: &dyn FleetStore, id: DbId) -> FleetResult<Tire> {
    Ok(store
        .find_tire(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Tire", id))?)
}

pub async fn driver(store: &dyn FleetStore, id: DbId) -> FleetResult<Driver> {
    Ok(store
        .find_driver(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Driver", id))?)
}

pub async fn trip(store: &dyn FleetStore, id: DbId) -> FleetResult<Trip> {
    Ok(store
        .find_trip(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Trip", id))?)
}

pub async fn maintenance_record(
    store: &dyn FleetStore,
    id: DbId,
) -> FleetResult<MaintenanceRecord> {
    Ok(store
        .find_record(id)
        .await?
        .ok_or_else(|| CoreError::not_found("MaintenanceRecord", id))?)
}

pub async fn maintenance_rule(store: &dyn FleetStore, id: DbId) -> FleetResult<MaintenanceRule> {
    Ok(store
        .find_rule(id)
        .await?
        .ok_or_else(|| CoreError::not_found("MaintenanceRule", id))?)
}
