//! Record access used by the lifecycle services.
//!
//! One trait per collection, combined into [`FleetStore`]. Each method is a
//! single-record operation; no method spans a transaction. Lookups return
//! `Ok(None)` for a missing row and leave the `NotFound` decision to the
//! caller.

use async_trait::async_trait;
use fleetops_core::assets::{AssetRef, TrailerStatus, TruckStatus};
use fleetops_core::trips::{TripFields, TripStatus};
use fleetops_core::types::{DbId, Kilometres, Timestamp};
use fleetops_db::models::driver::{CreateDriver, Driver, DriverListQuery, UpdateDriver};
use fleetops_db::models::maintenance::{
    CreateMaintenanceRecord, CreateMaintenanceRule, MaintenanceRecord, MaintenanceRecordListQuery,
    MaintenanceRule, MaintenanceRuleListQuery, UpdateMaintenanceRecord, UpdateMaintenanceRule,
};
use fleetops_db::models::tire::{CreateTire, Tire, TireListQuery, TireMount, UpdateTire};
use fleetops_db::models::trailer::{CreateTrailer, Trailer, TrailerListQuery, UpdateTrailer};
use fleetops_db::models::trip::{CreateTrip, Trip, TripListQuery, UpdateTrip};
use fleetops_db::models::truck::{CreateTruck, Truck, TruckListQuery, UpdateTruck};

use crate::error::FleetResult;

#[cfg(any(test, feature = "test-support"))]
mod memory;
mod postgres;

#[cfg(any(test, feature = "test-support"))]
pub use memory::{Collection, MemoryStore};
pub use postgres::PgFleetStore;

#[async_trait]
pub trait TruckStore: Send + Sync {
    async fn create_truck(&self, input: &CreateTruck) -> FleetResult<Truck>;
    async fn find_truck(&self, id: DbId) -> FleetResult<Option<Truck>>;
    async fn list_trucks(&self, params: &TruckListQuery) -> FleetResult<Vec<Truck>>;
    /// Every truck, unpaginated.
    async fn all_trucks(&self) -> FleetResult<Vec<Truck>>;
    async fn update_truck(&self, id: DbId, input: &UpdateTruck) -> FleetResult<Option<Truck>>;
    async fn set_truck_driver(
        &self,
        id: DbId,
        driver_id: Option<DbId>,
        status: TruckStatus,
    ) -> FleetResult<Option<Truck>>;
    async fn set_truck_status(&self, id: DbId, status: TruckStatus) -> FleetResult<Option<Truck>>;
    /// Raise the odometer to `mileage` if it is higher than the stored value.
    async fn advance_truck_odometer(
        &self,
        id: DbId,
        mileage: Kilometres,
    ) -> FleetResult<Option<Truck>>;
    /// Fails with `Conflict` while any trip references the truck.
    async fn delete_truck(&self, id: DbId) -> FleetResult<bool>;
}

#[async_trait]
pub trait TrailerStore: Send + Sync {
    async fn create_trailer(&self, input: &CreateTrailer) -> FleetResult<Trailer>;
    async fn find_trailer(&self, id: DbId) -> FleetResult<Option<Trailer>>;
    async fn list_trailers(&self, params: &TrailerListQuery) -> FleetResult<Vec<Trailer>>;
    async fn all_trailers(&self) -> FleetResult<Vec<Trailer>>;
    async fn update_trailer(
        &self,
        id: DbId,
        input: &UpdateTrailer,
    ) -> FleetResult<Option<Trailer>>;
    async fn set_trailer_truck(
        &self,
        id: DbId,
        truck_id: Option<DbId>,
        status: TrailerStatus,
    ) -> FleetResult<Option<Trailer>>;
    async fn delete_trailer(&self, id: DbId) -> FleetResult<bool>;
}

#[async_trait]
pub trait TireStore: Send + Sync {
    async fn create_tire(&self, input: &CreateTire) -> FleetResult<Tire>;
    async fn find_tire(&self, id: DbId) -> FleetResult<Option<Tire>>;
    async fn list_tires(&self, params: &TireListQuery) -> FleetResult<Vec<Tire>>;
    async fn all_tires(&self) -> FleetResult<Vec<Tire>>;
    async fn update_tire(&self, id: DbId, input: &UpdateTire) -> FleetResult<Option<Tire>>;
    async fn set_tire_mount(&self, id: DbId, mount: &TireMount) -> FleetResult<Option<Tire>>;
    async fn delete_tire(&self, id: DbId) -> FleetResult<bool>;
}

#[async_trait]
pub trait DriverStore: Send + Sync {
    async fn create_driver(&self, input: &CreateDriver) -> FleetResult<Driver>;
    async fn find_driver(&self, id: DbId) -> FleetResult<Option<Driver>>;
    async fn list_drivers(&self, params: &DriverListQuery) -> FleetResult<Vec<Driver>>;
    async fn update_driver(&self, id: DbId, input: &UpdateDriver)
        -> FleetResult<Option<Driver>>;
    /// Fails with `Conflict` while any trip references the driver.
    async fn delete_driver(&self, id: DbId) -> FleetResult<bool>;
}

#[async_trait]
pub trait TripStore: Send + Sync {
    async fn create_trip(&self, input: &CreateTrip) -> FleetResult<Trip>;
    async fn find_trip(&self, id: DbId) -> FleetResult<Option<Trip>>;
    async fn list_trips(&self, params: &TripListQuery) -> FleetResult<Vec<Trip>>;
    async fn update_trip(&self, id: DbId, input: &UpdateTrip) -> FleetResult<Option<Trip>>;
    /// Write `status` and every `Some` field of `fields`.
    async fn apply_trip_transition(
        &self,
        id: DbId,
        status: TripStatus,
        fields: &TripFields,
    ) -> FleetResult<Option<Trip>>;
    async fn delete_trip(&self, id: DbId) -> FleetResult<bool>;
}

#[async_trait]
pub trait MaintenanceStore: Send + Sync {
    async fn create_record(
        &self,
        input: &CreateMaintenanceRecord,
        mileage_at_service: Option<Kilometres>,
    ) -> FleetResult<MaintenanceRecord>;
    async fn find_record(&self, id: DbId) -> FleetResult<Option<MaintenanceRecord>>;
    async fn list_records(
        &self,
        params: &MaintenanceRecordListQuery,
    ) -> FleetResult<Vec<MaintenanceRecord>>;
    /// Most recent `completed` record for `target` by `performed_on`.
    async fn latest_completed_record(
        &self,
        target: AssetRef,
    ) -> FleetResult<Option<MaintenanceRecord>>;
    /// `scheduled` records with `performed_on >= now`, soonest first.
    async fn upcoming_records(&self, now: Timestamp) -> FleetResult<Vec<MaintenanceRecord>>;
    async fn update_record(
        &self,
        id: DbId,
        input: &UpdateMaintenanceRecord,
    ) -> FleetResult<Option<MaintenanceRecord>>;
    async fn delete_record(&self, id: DbId) -> FleetResult<bool>;

    async fn create_rule(&self, input: &CreateMaintenanceRule) -> FleetResult<MaintenanceRule>;
    async fn find_rule(&self, id: DbId) -> FleetResult<Option<MaintenanceRule>>;
    async fn list_rules(
        &self,
        params: &MaintenanceRuleListQuery,
    ) -> FleetResult<Vec<MaintenanceRule>>;
    async fn active_rules(&self) -> FleetResult<Vec<MaintenanceRule>>;
    async fn update_rule(
        &self,
        id: DbId,
        input: &UpdateMaintenanceRule,
    ) -> FleetResult<Option<MaintenanceRule>>;
    async fn delete_rule(&self, id: DbId) -> FleetResult<bool>;
}

/// Everything the services and the HTTP layer need from storage.
#[async_trait]
pub trait FleetStore:
    TruckStore + TrailerStore + TireStore + DriverStore + TripStore + MaintenanceStore
{
    /// Confirm the backing storage is reachable.
    async fn ping(&self) -> FleetResult<()>;
}
