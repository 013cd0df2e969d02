use async_trait::async_trait;
use fleetops_core::assets::{AssetRef, TrailerStatus, TruckStatus};
use fleetops_core::error::CoreError;
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
use fleetops_db::repositories::{
    DriverRepo, MaintenanceRecordRepo, MaintenanceRuleRepo, TireRepo, TrailerRepo, TripRepo,
    TruckRepo,
};
use fleetops_db::DbPool;

use super::{
    DriverStore, FleetStore, MaintenanceStore, TireStore, TrailerStore, TripStore, TruckStore,
};
use crate::error::FleetResult;

/// [`FleetStore`] backed by the PostgreSQL repositories.
#[derive(Clone)]
pub struct PgFleetStore {
    pool: DbPool,
}

impl PgFleetStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl TruckStore for PgFleetStore {
    async fn create_truck(&self, input: &CreateTruck) -> FleetResult<Truck> {
        Ok(TruckRepo::create(&self.pool, input).await?)
    }

    async fn find_truck(&self, id: DbId) -> FleetResult<Option<Truck>> {
        Ok(TruckRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_trucks(&self, params: &TruckListQuery) -> FleetResult<Vec<Truck>> {
        Ok(TruckRepo::list(&self.pool, params).await?)
    }

    async fn all_trucks(&self) -> FleetResult<Vec<Truck>> {
        Ok(TruckRepo::list_all(&self.pool).await?)
    }

    async fn update_truck(&self, id: DbId, input: &UpdateTruck) -> FleetResult<Option<Truck>> {
        Ok(TruckRepo::update(&self.pool, id, input).await?)
    }

    async fn set_truck_driver(
        &self,
        id: DbId,
        driver_id: Option<DbId>,
        status: TruckStatus,
    ) -> FleetResult<Option<Truck>> {
        Ok(TruckRepo::set_driver(&self.pool, id, driver_id, status).await?)
    }

    async fn set_truck_status(&self, id: DbId, status: TruckStatus) -> FleetResult<Option<Truck>> {
        Ok(TruckRepo::set_status(&self.pool, id, status).await?)
    }

    async fn advance_truck_odometer(
        &self,
        id: DbId,
        mileage: Kilometres,
    ) -> FleetResult<Option<Truck>> {
        Ok(TruckRepo::advance_odometer(&self.pool, id, mileage).await?)
    }

    async fn delete_truck(&self, id: DbId) -> FleetResult<bool> {
        let trips = TruckRepo::count_trips(&self.pool, id).await?;
        if trips > 0 {
            return Err(CoreError::Conflict(format!(
                "Truck {id} is referenced by {trips} trip(s) and cannot be deleted"
            ))
            .into());
        }
        Ok(TruckRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl TrailerStore for PgFleetStore {
    async fn create_trailer(&self, input: &CreateTrailer) -> FleetResult<Trailer> {
        Ok(TrailerRepo::create(&self.pool, input).await?)
    }

    async fn find_trailer(&self, id: DbId) -> FleetResult<Option<Trailer>> {
        Ok(TrailerRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_trailers(&self, params: &TrailerListQuery) -> FleetResult<Vec<Trailer>> {
        Ok(TrailerRepo::list(&self.pool, params).await?)
    }

    async fn all_trailers(&self) -> FleetResult<Vec<Trailer>> {
        Ok(TrailerRepo::list_all(&self.pool).await?)
    }

    async fn update_trailer(
        &self,
        id: DbId,
        input: &UpdateTrailer,
    ) -> FleetResult<Option<Trailer>> {
        Ok(TrailerRepo::update(&self.pool, id, input).await?)
    }

    async fn set_trailer_truck(
        &self,
        id: DbId,
        truck_id: Option<DbId>,
        status: TrailerStatus,
    ) -> FleetResult<Option<Trailer>> {
        Ok(TrailerRepo::set_truck(&self.pool, id, truck_id, status).await?)
    }

    async fn delete_trailer(&self, id: DbId) -> FleetResult<bool> {
        Ok(TrailerRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl TireStore for PgFleetStore {
    async fn create_tire(&self, input: &CreateTire) -> FleetResult<Tire> {
        Ok(TireRepo::create(&self.pool, input).await?)
    }

    async fn find_tire(&self, id: DbId) -> FleetResult<Option<Tire>> {
        Ok(TireRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_tires(&self, params: &TireListQuery) -> FleetResult<Vec<Tire>> {
        Ok(TireRepo::list(&self.pool, params).await?)
    }

    async fn all_tires(&self) -> FleetResult<Vec<Tire>> {
        Ok(TireRepo::list_all(&self.pool).await?)
    }

    async fn update_tire(&self, id: DbId, input: &UpdateTire) -> FleetResult<Option<Tire>> {
        Ok(TireRepo::update(&self.pool, id, input).await?)
    }

    async fn set_tire_mount(&self, id: DbId, mount: &TireMount) -> FleetResult<Option<Tire>> {
        Ok(TireRepo::set_mount(&self.pool, id, mount).await?)
    }

    async fn delete_tire(&self, id: DbId) -> FleetResult<bool> {
        Ok(TireRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl DriverStore for PgFleetStore {
    async fn create_driver(&self, input: &CreateDriver) -> FleetResult<Driver> {
        Ok(DriverRepo::create(&self.pool, input).await?)
    }

    async fn find_driver(&self, id: DbId) -> FleetResult<Option<Driver>> {
        Ok(DriverRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_drivers(&self, params: &DriverListQuery) -> FleetResult<Vec<Driver>> {
        Ok(DriverRepo::list(&self.pool, params).await?)
    }

    async fn update_driver(
        &self,
        id: DbId,
        input: &UpdateDriver,
    ) -> FleetResult<Option<Driver>> {
        Ok(DriverRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_driver(&self, id: DbId) -> FleetResult<bool> {
        let trips = DriverRepo::count_trips(&self.pool, id).await?;
        if trips > 0 {
            return Err(CoreError::Conflict(format!(
                "Driver {id} is referenced by {trips} trip(s) and cannot be deleted"
            ))
            .into());
        }
        Ok(DriverRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl TripStore for PgFleetStore {
    async fn create_trip(&self, input: &CreateTrip) -> FleetResult<Trip> {
        Ok(TripRepo::create(&self.pool, input).await?)
    }

    async fn find_trip(&self, id: DbId) -> FleetResult<Option<Trip>> {
        Ok(TripRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_trips(&self, params: &TripListQuery) -> FleetResult<Vec<Trip>> {
        Ok(TripRepo::list(&self.pool, params).await?)
    }

    async fn update_trip(&self, id: DbId, input: &UpdateTrip) -> FleetResult<Option<Trip>> {
        Ok(TripRepo::update(&self.pool, id, input).await?)
    }

    async fn apply_trip_transition(
        &self,
        id: DbId,
        status: TripStatus,
        fields: &TripFields,
    ) -> FleetResult<Option<Trip>> {
        Ok(TripRepo::apply_transition(&self.pool, id, status, fields).await?)
    }

    async fn delete_trip(&self, id: DbId) -> FleetResult<bool> {
        Ok(TripRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl MaintenanceStore for PgFleetStore {
    async fn create_record(
        &self,
        input: &CreateMaintenanceRecord,
        mileage_at_service: Option<Kilometres>,
    ) -> FleetResult<MaintenanceRecord> {
        Ok(MaintenanceRecordRepo::create(&self.pool, input, mileage_at_service).await?)
    }

    async fn find_record(&self, id: DbId) -> FleetResult<Option<MaintenanceRecord>> {
        Ok(MaintenanceRecordRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_records(
        &self,
        params: &MaintenanceRecordListQuery,
    ) -> FleetResult<Vec<MaintenanceRecord>> {
        Ok(MaintenanceRecordRepo::list(&self.pool, params).await?)
    }

    async fn latest_completed_record(
        &self,
        target: AssetRef,
    ) -> FleetResult<Option<MaintenanceRecord>> {
        Ok(MaintenanceRecordRepo::latest_completed(&self.pool, target).await?)
    }

    async fn upcoming_records(&self, now: Timestamp) -> FleetResult<Vec<MaintenanceRecord>> {
        Ok(MaintenanceRecordRepo::list_upcoming(&self.pool, now).await?)
    }

    async fn update_record(
        &self,
        id: DbId,
        input: &UpdateMaintenanceRecord,
    ) -> FleetResult<Option<MaintenanceRecord>> {
        Ok(MaintenanceRecordRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_record(&self, id: DbId) -> FleetResult<bool> {
        Ok(MaintenanceRecordRepo::delete(&self.pool, id).await?)
    }

    async fn create_rule(&self, input: &CreateMaintenanceRule) -> FleetResult<MaintenanceRule> {
        Ok(MaintenanceRuleRepo::create(&self.pool, input).await?)
    }

    async fn find_rule(&self, id: DbId) -> FleetResult<Option<MaintenanceRule>> {
        Ok(MaintenanceRuleRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_rules(
        &self,
        params: &MaintenanceRuleListQuery,
    ) -> FleetResult<Vec<MaintenanceRule>> {
        Ok(MaintenanceRuleRepo::list(&self.pool, params).await?)
    }

    async fn active_rules(&self) -> FleetResult<Vec<MaintenanceRule>> {
        Ok(MaintenanceRuleRepo::list_active(&self.pool).await?)
    }

    async fn update_rule(
        &self,
        id: DbId,
        input: &UpdateMaintenanceRule,
    ) -> FleetResult<Option<MaintenanceRule>> {
        Ok(MaintenanceRuleRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_rule(&self, id: DbId) -> FleetResult<bool> {
        Ok(MaintenanceRuleRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl FleetStore for PgFleetStore {
    async fn ping(&self) -> FleetResult<()> {
        Ok(fleetops_db::health_check(&self.pool).await?)
    }
}
