//! In-process [`FleetStore`] used by tests and local tooling.
//!
//! Mirrors the constraints the PostgreSQL schema enforces: unique plate,
//! serial and licence numbers, trips pinning their truck and driver, and
//! `SET NULL` on the truck and driver links when the parent is deleted.
//! Writes to any collection can be made to fail on demand.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use async_trait::async_trait;
use chrono::Utc;
use fleetops_core::assets::{AssetRef, TirePosition, TireStatus, TrailerStatus, TruckStatus};
use fleetops_core::error::CoreError;
use fleetops_core::maintenance::MaintenanceStatus;
use fleetops_core::pagination::{Page, SortOrder};
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
use tokio::sync::RwLock;

use super::{
    DriverStore, FleetStore, MaintenanceStore, TireStore, TrailerStore, TripStore, TruckStore,
};
use crate::error::FleetResult;

/// A collection whose writes can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Trucks,
    Trailers,
    Tires,
    Drivers,
    Trips,
    MaintenanceRecords,
    MaintenanceRules,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Trucks => "trucks",
            Self::Trailers => "trailers",
            Self::Tires => "tires",
            Self::Drivers => "drivers",
            Self::Trips => "trips",
            Self::MaintenanceRecords => "maintenance_records",
            Self::MaintenanceRules => "maintenance_rules",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

trait Row: Clone {
    fn order_key(&self) -> (Timestamp, DbId);
    fn touch(&mut self, now: Timestamp);
}

macro_rules! impl_row {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Row for $ty {
                fn order_key(&self) -> (Timestamp, DbId) {
                    (self.created_at, self.id)
                }

                fn touch(&mut self, now: Timestamp) {
                    self.updated_at = now;
                }
            }
        )+
    };
}

impl_row!(Truck, Trailer, Tire, Driver, Trip, MaintenanceRecord, MaintenanceRule);

struct Table<T> {
    next_id: DbId,
    rows: BTreeMap<DbId, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T: Row> Table<T> {
    fn insert(&mut self, build: impl FnOnce(DbId, Timestamp) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id, Utc::now());
        self.rows.insert(id, row.clone());
        row
    }

    fn get(&self, id: DbId) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn modify(&mut self, id: DbId, apply: impl FnOnce(&mut T)) -> Option<T> {
        let row = self.rows.get_mut(&id)?;
        apply(row);
        row.touch(Utc::now());
        Some(row.clone())
    }

    fn remove(&mut self, id: DbId) -> bool {
        self.rows.remove(&id).is_some()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    /// Fail with `Conflict` if another row already holds `value`.
    fn ensure_unique(
        &self,
        except: Option<DbId>,
        value: &str,
        field: impl Fn(&T) -> &str,
        constraint: &str,
    ) -> FleetResult<()> {
        let taken = self
            .rows
            .iter()
            .any(|(id, row)| Some(*id) != except && field(row) == value);
        if taken {
            return Err(CoreError::Conflict(format!(
                "Duplicate value violates unique constraint: {constraint}"
            ))
            .into());
        }
        Ok(())
    }

    /// Filter, sort by creation and cut the requested page.
    fn page(
        &self,
        keep: impl Fn(&T) -> bool,
        order: Option<SortOrder>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Vec<T> {
        let mut rows: Vec<&T> = self.rows.values().filter(|row| keep(row)).collect();
        rows.sort_by_key(|row| row.order_key());
        if order.unwrap_or_default() == SortOrder::Desc {
            rows.reverse();
        }
        Page::new(limit, offset).slice(rows.into_iter().cloned())
    }
}

#[derive(Default)]
struct State {
    trucks: Table<Truck>,
    trailers: Table<Trailer>,
    tires: Table<Tire>,
    drivers: Table<Driver>,
    trips: Table<Trip>,
    records: Table<MaintenanceRecord>,
    rules: Table<MaintenanceRule>,
    failing: HashSet<Collection>,
}

impl State {
    fn writable(&self, collection: Collection) -> FleetResult<()> {
        if self.failing.contains(&collection) {
            return Err(CoreError::Internal(format!(
                "simulated write failure on {collection}"
            ))
            .into());
        }
        Ok(())
    }
}

fn eq_filter<T: PartialEq>(filter: Option<T>, value: T) -> bool {
    filter.map_or(true, |wanted| wanted == value)
}

fn link_filter(filter: Option<DbId>, value: Option<DbId>) -> bool {
    filter.map_or(true, |wanted| value == Some(wanted))
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// A [`FleetStore`] holding every collection behind one async lock.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write to `collection` fail.
    pub async fn fail_writes(&self, collection: Collection) {
        self.state.write().await.failing.insert(collection);
    }

    /// Undo [`MemoryStore::fail_writes`].
    pub async fn restore_writes(&self, collection: Collection) {
        self.state.write().await.failing.remove(&collection);
    }
}

#[async_trait]
impl TruckStore for MemoryStore {
    async fn create_truck(&self, input: &CreateTruck) -> FleetResult<Truck> {
        let mut state = self.state.write().await;
        state.writable(Collection::Trucks)?;
        state.trucks.ensure_unique(
            None,
            &input.plate_number,
            |t| t.plate_number.as_str(),
            "uq_trucks_plate_number",
        )?;
        Ok(state.trucks.insert(|id, now| Truck {
            id,
            plate_number: input.plate_number.clone(),
            make: input.make.clone(),
            model: input.model.clone(),
            capacity_kg: input.capacity_kg,
            status: input.status.unwrap_or(TruckStatus::Available),
            driver_id: None,
            current_mileage: input.current_mileage.unwrap_or(0.0),
            created_at: now,
            updated_at: now,
        }))
    }

    async fn find_truck(&self, id: DbId) -> FleetResult<Option<Truck>> {
        Ok(self.state.read().await.trucks.get(id))
    }

    async fn list_trucks(&self, params: &TruckListQuery) -> FleetResult<Vec<Truck>> {
        let state = self.state.read().await;
        Ok(state.trucks.page(
            |t| eq_filter(params.status, t.status) && link_filter(params.driver_id, t.driver_id),
            params.order,
            params.limit,
            params.offset,
        ))
    }

    async fn all_trucks(&self) -> FleetResult<Vec<Truck>> {
        Ok(self.state.read().await.trucks.all())
    }

    async fn update_truck(&self, id: DbId, input: &UpdateTruck) -> FleetResult<Option<Truck>> {
        let mut state = self.state.write().await;
        state.writable(Collection::Trucks)?;
        if let Some(plate) = &input.plate_number {
            state.trucks.ensure_unique(
                Some(id),
                plate,
                |t| t.plate_number.as_str(),
                "uq_trucks_plate_number",
            )?;
        }
        Ok(state.trucks.modify(id, |t| {
            if let Some(v) = &input.plate_number {
                t.plate_number = v.clone();
            }
            if let Some(v) = &input.make {
                t.make = Some(v.clone());
            }
            if let Some(v) = &input.model {
                t.model = Some(v.clone());
            }
            if let Some(v) = input.capacity_kg {
                t.capacity_kg = v;
            }
            if let Some(v) = input.status {
                t.status = v;
            }
            if let Some(v) = input.current_mileage {
                t.current_mileage = v;
            }
        }))
    }

    async fn set_truck_driver(
        &self,
        id: DbId,
        driver_id: Option<DbId>,
        status: TruckStatus,
    ) -> FleetResult<Option<Truck>> {
        let mut state = self.state.write().await;
        state.writable(Collection::Trucks)?;
        Ok(state.trucks.modify(id, |t| {
            t.driver_id = driver_id;
            t.status = status;
        }))
    }

    async fn set_truck_status(&self, id: DbId, status: TruckStatus) -> FleetResult<Option<Truck>> {
        let mut state = self.state.write().await;
        state.writable(Collection::Trucks)?;
        Ok(state.trucks.modify(id, |t| t.status = status))
    }

    async fn advance_truck_odometer(
        &self,
        id: DbId,
        mileage: Kilometres,
    ) -> FleetResult<Option<Truck>> {
        let mut state = self.state.write().await;
        state.writable(Collection::Trucks)?;
        Ok(state
            .trucks
            .modify(id, |t| t.current_mileage = t.current_mileage.max(mileage)))
    }

    async fn delete_truck(&self, id: DbId) -> FleetResult<bool> {
        let mut state = self.state.write().await;
        state.writable(Collection::Trucks)?;
        let trips = state.trips.rows.values().filter(|t| t.truck_id == id).count();
        if trips > 0 {
            return Err(CoreError::Conflict(format!(
                "Truck {id} is referenced by {trips} trip(s) and cannot be deleted"
            ))
            .into());
        }
        if !state.trucks.remove(id) {
            return Ok(false);
        }
        for trailer in state.trailers.rows.values_mut() {
            if trailer.truck_id == Some(id) {
                trailer.truck_id = None;
            }
        }
        for tire in state.tires.rows.values_mut() {
            if tire.truck_id == Some(id) {
                tire.truck_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl TrailerStore for MemoryStore {
    async fn create_trailer(&self, input: &CreateTrailer) -> FleetResult<Trailer> {
        let mut state = self.state.write().await;
        state.writable(Collection::Trailers)?;
        state.trailers.ensure_unique(
            None,
            &input.plate_number,
            |t| t.plate_number.as_str(),
            "uq_trailers_plate_number",
        )?;
        Ok(state.trailers.insert(|id, now| Trailer {
            id,
            plate_number: input.plate_number.clone(),
            trailer_type: input.trailer_type.clone(),
            capacity_kg: input.capacity_kg,
            status: input.status.unwrap_or(TrailerStatus::Available),
            truck_id: None,
            current_mileage: input.current_mileage.unwrap_or(0.0),
            created_at: now,
            updated_at: now,
        }))
    }

    async fn find_trailer(&self, id: DbId) -> FleetResult<Option<Trailer>> {
        Ok(self.state.read().await.trailers.get(id))
    }

    async fn list_trailers(&self, params: &TrailerListQuery) -> FleetResult<Vec<Trailer>> {
        let state = self.state.read().await;
        Ok(state.trailers.page(
            |t| eq_filter(params.status, t.status) && link_filter(params.truck_id, t.truck_id),
            params.order,
            params.limit,
            params.offset,
        ))
    }

    async fn all_trailers(&self) -> FleetResult<Vec<Trailer>> {
        Ok(self.state.read().await.trailers.all())
    }

    async fn update_trailer(
        &self,
        id: DbId,
        input: &UpdateTrailer,
    ) -> FleetResult<Option<Trailer>> {
        let mut state = self.state.write().await;
        state.writable(Collection::Trailers)?;
        if let Some(plate) = &input.plate_number {
            state.trailers.ensure_unique(
                Some(id),
                plate,
                |t| t.plate_number.as_str(),
                "uq_trailers_plate_number",
            )?;
        }
        Ok(state.trailers.modify(id, |t| {
            if let Some(v) = &input.plate_number {
                t.plate_number = v.clone();
            }
            if let Some(v) = &input.trailer_type {
                t.trailer_type = v.clone();
            }
            if let Some(v) = input.capacity_kg {
                t.capacity_kg = v;
            }
            if let Some(v) = input.status {
                t.status = v;
            }
            if let Some(v) = input.current_mileage {
                t.current_mileage = v;
            }
        }))
    }

    async fn set_trailer_truck(
        &self,
        id: DbId,
        truck_id: Option<DbId>,
        status: TrailerStatus,
    ) -> FleetResult<Option<Trailer>> {
        let mut state = self.state.write().await;
        state.writable(Collection::Trailers)?;
        Ok(state.trailers.modify(id, |t| {
            t.truck_id = truck_id;
            t.status = status;
        }))
    }

    async fn delete_trailer(&self, id: DbId) -> FleetResult<bool> {
        let mut state = self.state.write().await;
        state.writable(Collection::Trailers)?;
        Ok(state.trailers.remove(id))
    }
}

#[async_trait]
impl TireStore for MemoryStore {
    async fn create_tire(&self, input: &CreateTire) -> FleetResult<Tire> {
        let mut state = self.state.write().await;
        state.writable(Collection::Tires)?;
        state.tires.ensure_unique(
            None,
            &input.serial_number,
            |t| t.serial_number.as_str(),
            "uq_tires_serial_number",
        )?;
        Ok(state.tires.insert(|id, now| Tire {
            id,
            serial_number: input.serial_number.clone(),
            brand: input.brand.clone(),
            position: TirePosition::Spare,
            truck_id: None,
            current_mileage: input.current_mileage.unwrap_or(0.0),
            max_mileage: input.max_mileage,
            status: input.status.unwrap_or(TireStatus::New),
            installed_at: None,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn find_tire(&self, id: DbId) -> FleetResult<Option<Tire>> {
        Ok(self.state.read().await.tires.get(id))
    }

    async fn list_tires(&self, params: &TireListQuery) -> FleetResult<Vec<Tire>> {
        let state = self.state.read().await;
        Ok(state.tires.page(
            |t| {
                eq_filter(params.status, t.status)
                    && link_filter(params.truck_id, t.truck_id)
                    && eq_filter(params.position, t.position)
            },
            params.order,
            params.limit,
            params.offset,
        ))
    }

    async fn all_tires(&self) -> FleetResult<Vec<Tire>> {
        Ok(self.state.read().await.tires.all())
    }

    async fn update_tire(&self, id: DbId, input: &UpdateTire) -> FleetResult<Option<Tire>> {
        let mut state = self.state.write().await;
        state.writable(Collection::Tires)?;
        if let Some(serial) = &input.serial_number {
            state.tires.ensure_unique(
                Some(id),
                serial,
                |t| t.serial_number.as_str(),
                "uq_tires_serial_number",
            )?;
        }
        Ok(state.tires.modify(id, |t| {
            if let Some(v) = &input.serial_number {
                t.serial_number = v.clone();
            }
            if let Some(v) = &input.brand {
                t.brand = Some(v.clone());
            }
            if let Some(v) = input.current_mileage {
                t.current_mileage = v;
            }
            if let Some(v) = input.max_mileage {
                t.max_mileage = v;
            }
            if let Some(v) = input.status {
                t.status = v;
            }
        }))
    }

    async fn set_tire_mount(&self, id: DbId, mount: &TireMount) -> FleetResult<Option<Tire>> {
        let mut state = self.state.write().await;
        state.writable(Collection::Tires)?;
        Ok(state.tires.modify(id, |t| {
            t.truck_id = mount.truck_id;
            t.position = mount.position;
            t.status = mount.status;
            t.installed_at = mount.installed_at;
        }))
    }

    async fn delete_tire(&self, id: DbId) -> FleetResult<bool> {
        let mut state = self.state.write().await;
        state.writable(Collection::Tires)?;
        Ok(state.tires.remove(id))
    }
}

#[async_trait]
impl DriverStore for MemoryStore {
    async fn create_driver(&self, input: &CreateDriver) -> FleetResult<Driver> {
        let mut state = self.state.write().await;
        state.writable(Collection::Drivers)?;
        state.drivers.ensure_unique(
            None,
            &input.license_number,
            |d| d.license_number.as_str(),
            "uq_drivers_license_number",
        )?;
        Ok(state.drivers.insert(|id, now| Driver {
            id,
            full_name: input.full_name.clone(),
            license_number: input.license_number.clone(),
            phone: input.phone.clone(),
            is_active: input.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }))
    }

    async fn find_driver(&self, id: DbId) -> FleetResult<Option<Driver>> {
        Ok(self.state.read().await.drivers.get(id))
    }

    async fn list_drivers(&self, params: &DriverListQuery) -> FleetResult<Vec<Driver>> {
        let state = self.state.read().await;
        Ok(state.drivers.page(
            |d| !params.active_only || d.is_active,
            params.order,
            params.limit,
            params.offset,
        ))
    }

    async fn update_driver(
        &self,
        id: DbId,
        input: &UpdateDriver,
    ) -> FleetResult<Option<Driver>> {
        let mut state = self.state.write().await;
        state.writable(Collection::Drivers)?;
        if let Some(license) = &input.license_number {
            state.drivers.ensure_unique(
                Some(id),
                license,
                |d| d.license_number.as_str(),
                "uq_drivers_license_number",
            )?;
        }
        Ok(state.drivers.modify(id, |d| {
            if let Some(v) = &input.full_name {
                d.full_name = v.clone();
            }
            if let Some(v) = &input.license_number {
                d.license_number = v.clone();
            }
            if let Some(v) = &input.phone {
                d.phone = Some(v.clone());
            }
            if let Some(v) = input.is_active {
                d.is_active = v;
            }
        }))
    }

    async fn delete_driver(&self, id: DbId) -> FleetResult<bool> {
        let mut state = self.state.write().await;
        state.writable(Collection::Drivers)?;
        let trips = state.trips.rows.values().filter(|t| t.driver_id == id).count();
        if trips > 0 {
            return Err(CoreError::Conflict(format!(
                "Driver {id} is referenced by {trips} trip(s) and cannot be deleted"
            ))
            .into());
        }
        if !state.drivers.remove(id) {
            return Ok(false);
        }
        for truck in state.trucks.rows.values_mut() {
            if truck.driver_id == Some(id) {
                truck.driver_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl TripStore for MemoryStore {
    async fn create_trip(&self, input: &CreateTrip) -> FleetResult<Trip> {
        let mut state = self.state.write().await;
        state.writable(Collection::Trips)?;
        if state.trucks.get(input.truck_id).is_none() || state.drivers.get(input.driver_id).is_none()
        {
            return Err(CoreError::Conflict(
                "Trip references a truck or driver that does not exist".to_string(),
            )
            .into());
        }
        Ok(state.trips.insert(|id, now| Trip {
            id,
            truck_id: input.truck_id,
            driver_id: input.driver_id,
            departure_location: input.departure_location.clone(),
            arrival_location: input.arrival_location.clone(),
            scheduled_departure: input.scheduled_departure,
            scheduled_arrival: input.scheduled_arrival,
            status: TripStatus::Pending,
            start_mileage: None,
            end_mileage: None,
            fuel_volume: None,
            distance: None,
            actual_departure: None,
            actual_arrival: None,
            comments: input.comments.clone(),
            completion_notes: None,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn find_trip(&self, id: DbId) -> FleetResult<Option<Trip>> {
        Ok(self.state.read().await.trips.get(id))
    }

    async fn list_trips(&self, params: &TripListQuery) -> FleetResult<Vec<Trip>> {
        let state = self.state.read().await;
        Ok(state.trips.page(
            |t| {
                eq_filter(params.status, t.status)
                    && eq_filter(params.truck_id, t.truck_id)
                    && eq_filter(params.driver_id, t.driver_id)
            },
            params.order,
            params.limit,
            params.offset,
        ))
    }

    async fn update_trip(&self, id: DbId, input: &UpdateTrip) -> FleetResult<Option<Trip>> {
        let mut state = self.state.write().await;
        state.writable(Collection::Trips)?;
        Ok(state.trips.modify(id, |t| {
            if let Some(v) = &input.departure_location {
                t.departure_location = v.clone();
            }
            if let Some(v) = &input.arrival_location {
                t.arrival_location = v.clone();
            }
            if let Some(v) = input.scheduled_departure {
                t.scheduled_departure = v;
            }
            if let Some(v) = input.scheduled_arrival {
                t.scheduled_arrival = Some(v);
            }
            if let Some(v) = &input.comments {
                t.comments = Some(v.clone());
            }
        }))
    }

    async fn apply_trip_transition(
        &self,
        id: DbId,
        status: TripStatus,
        fields: &TripFields,
    ) -> FleetResult<Option<Trip>> {
        let mut state = self.state.write().await;
        state.writable(Collection::Trips)?;
        Ok(state.trips.modify(id, |t| t.apply(status, fields)))
    }

    async fn delete_trip(&self, id: DbId) -> FleetResult<bool> {
        let mut state = self.state.write().await;
        state.writable(Collection::Trips)?;
        Ok(state.trips.remove(id))
    }
}

#[async_trait]
impl MaintenanceStore for MemoryStore {
    async fn create_record(
        &self,
        input: &CreateMaintenanceRecord,
        mileage_at_service: Option<Kilometres>,
    ) -> FleetResult<MaintenanceRecord> {
        let mut state = self.state.write().await;
        state.writable(Collection::MaintenanceRecords)?;
        Ok(state.records.insert(|id, now| MaintenanceRecord {
            id,
            target_type: input.target_type,
            target_id: input.target_id,
            maintenance_type: input.maintenance_type.clone(),
            description: input.description.clone(),
            performed_on: input.performed_on,
            cost: input.cost,
            status: input.status.unwrap_or(MaintenanceStatus::Scheduled),
            mileage_at_service,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn find_record(&self, id: DbId) -> FleetResult<Option<MaintenanceRecord>> {
        Ok(self.state.read().await.records.get(id))
    }

    async fn list_records(
        &self,
        params: &MaintenanceRecordListQuery,
    ) -> FleetResult<Vec<MaintenanceRecord>> {
        let state = self.state.read().await;
        Ok(state.records.page(
            |r| {
                eq_filter(params.status, r.status)
                    && eq_filter(params.target_type, r.target_type)
                    && eq_filter(params.target_id, r.target_id)
            },
            params.order,
            params.limit,
            params.offset,
        ))
    }

    async fn latest_completed_record(
        &self,
        target: AssetRef,
    ) -> FleetResult<Option<MaintenanceRecord>> {
        let state = self.state.read().await;
        Ok(state
            .records
            .rows
            .values()
            .filter(|r| r.target() == target && r.status == MaintenanceStatus::Completed)
            .max_by_key(|r| (r.performed_on, r.id))
            .cloned())
    }

    async fn upcoming_records(&self, now: Timestamp) -> FleetResult<Vec<MaintenanceRecord>> {
        let state = self.state.read().await;
        let mut upcoming: Vec<MaintenanceRecord> = state
            .records
            .rows
            .values()
            .filter(|r| r.status == MaintenanceStatus::Scheduled && r.performed_on >= now)
            .cloned()
            .collect();
        upcoming.sort_by_key(|r| (r.performed_on, r.id));
        Ok(upcoming)
    }

    async fn update_record(
        &self,
        id: DbId,
        input: &UpdateMaintenanceRecord,
    ) -> FleetResult<Option<MaintenanceRecord>> {
        let mut state = self.state.write().await;
        state.writable(Collection::MaintenanceRecords)?;
        Ok(state.records.modify(id, |r| {
            if let Some(v) = &input.maintenance_type {
                r.maintenance_type = v.clone();
            }
            if let Some(v) = &input.description {
                r.description = Some(v.clone());
            }
            if let Some(v) = input.performed_on {
                r.performed_on = v;
            }
            if let Some(v) = input.cost {
                r.cost = v;
            }
            if let Some(v) = input.status {
                r.status = v;
            }
            if let Some(v) = input.mileage_at_service {
                r.mileage_at_service = Some(v);
            }
        }))
    }

    async fn delete_record(&self, id: DbId) -> FleetResult<bool> {
        let mut state = self.state.write().await;
        state.writable(Collection::MaintenanceRecords)?;
        Ok(state.records.remove(id))
    }

    async fn create_rule(&self, input: &CreateMaintenanceRule) -> FleetResult<MaintenanceRule> {
        let mut state = self.state.write().await;
        state.writable(Collection::MaintenanceRules)?;
        Ok(state.rules.insert(|id, now| MaintenanceRule {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            interval_value: input.interval_value,
            condition_type: input.condition_type,
            target_type: input.target_type,
            is_active: input.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }))
    }

    async fn find_rule(&self, id: DbId) -> FleetResult<Option<MaintenanceRule>> {
        Ok(self.state.read().await.rules.get(id))
    }

    async fn list_rules(
        &self,
        params: &MaintenanceRuleListQuery,
    ) -> FleetResult<Vec<MaintenanceRule>> {
        let state = self.state.read().await;
        Ok(state.rules.page(
            |r| {
                (!params.active_only || r.is_active)
                    && eq_filter(params.target_type, r.target_type)
            },
            params.order,
            params.limit,
            params.offset,
        ))
    }

    async fn active_rules(&self) -> FleetResult<Vec<MaintenanceRule>> {
        let state = self.state.read().await;
        Ok(state
            .rules
            .rows
            .values()
            .filter(|r| r.is_active)
            .cloned()
            .collect())
    }

    async fn update_rule(
        &self,
        id: DbId,
        input: &UpdateMaintenanceRule,
    ) -> FleetResult<Option<MaintenanceRule>> {
        let mut state = self.state.write().await;
        state.writable(Collection::MaintenanceRules)?;
        Ok(state.rules.modify(id, |r| {
            if let Some(v) = &input.name {
                r.name = v.clone();
            }
            if let Some(v) = &input.description {
                r.description = Some(v.clone());
            }
            if let Some(v) = input.interval_value {
                r.interval_value = v;
            }
            if let Some(v) = input.condition_type {
                r.condition_type = v;
            }
            if let Some(v) = input.target_type {
                r.target_type = v;
            }
            if let Some(v) = input.is_active {
                r.is_active = v;
            }
        }))
    }

    async fn delete_rule(&self, id: DbId) -> FleetResult<bool> {
        let mut state = self.state.write().await;
        state.writable(Collection::MaintenanceRules)?;
        Ok(state.rules.remove(id))
    }
}

#[async_trait]
impl FleetStore for MemoryStore {
    async fn ping(&self) -> FleetResult<()> {
        Ok(())
    }
}
