//! Attaching drivers, trailers and tires to trucks.
//!
//! Each operation resolves its ids, then performs a single-record write.
//! No capacity, double-booking or status legality checks are made: a
//! driver may drive several trucks and a trailer can be re-hitched without
//! first being released.

use fleetops_core::assets::{TirePosition, TrailerStatus, TruckStatus};
use fleetops_core::error::CoreError;
use fleetops_core::types::{DbId, Timestamp};
use fleetops_db::models::tire::{Tire, TireListQuery, TireMount};
use fleetops_db::models::trailer::{Trailer, TrailerListQuery};
use fleetops_db::models::truck::Truck;

use crate::error::FleetResult;
use crate::lookup;
use crate::store::FleetStore;

// ---------------------------------------------------------------------------
// Drivers
// ---------------------------------------------------------------------------

/// Put `driver_id` behind the wheel of `truck_id`; the truck becomes `in_use`.
pub async fn assign_driver(
    store: &dyn FleetStore,
    truck_id: DbId,
    driver_id: DbId,
) -> FleetResult<Truck> {
    lookup::truck(store, truck_id).await?;
    lookup::driver(store, driver_id).await?;

    let truck = store
        .set_truck_driver(truck_id, Some(driver_id), TruckStatus::InUse)
        .await?
        .ok_or_else(|| CoreError::not_found("Truck", truck_id))?;

    tracing::info!(truck_id, driver_id, "Driver assigned to truck");
    Ok(truck)
}

/// Clear the truck's driver; the truck becomes `available`.
pub async fn unassign_driver(store: &dyn FleetStore, truck_id: DbId) -> FleetResult<Truck> {
    let previous = lookup::truck(store, truck_id).await?.driver_id;

    let truck = store
        .set_truck_driver(truck_id, None, TruckStatus::Available)
        .await?
        .ok_or_else(|| CoreError::not_found("Truck", truck_id))?;

    tracing::info!(truck_id, previous_driver_id = ?previous, "Driver unassigned from truck");
    Ok(truck)
}

// ---------------------------------------------------------------------------
// Trailers
// ---------------------------------------------------------------------------

/// Hitch a trailer to a truck; the trailer becomes `in_use`.
pub async fn assign_trailer(
    store: &dyn FleetStore,
    trailer_id: DbId,
    truck_id: DbId,
) -> FleetResult<Trailer> {
    lookup::trailer(store, trailer_id).await?;
    lookup::truck(store, truck_id).await?;

    let trailer = store
        .set_trailer_truck(trailer_id, Some(truck_id), TrailerStatus::InUse)
        .await?
        .ok_or_else(|| CoreError::not_found("Trailer", trailer_id))?;

    tracing::info!(trailer_id, truck_id, "Trailer assigned to truck");
    Ok(trailer)
}

/// Unhitch a trailer; it becomes `available`.
pub async fn unassign_trailer(store: &dyn FleetStore, trailer_id: DbId) -> FleetResult<Trailer> {
    lookup::trailer(store, trailer_id).await?;

    let trailer = store
        .set_trailer_truck(trailer_id, None, TrailerStatus::Available)
        .await?
        .ok_or_else(|| CoreError::not_found("Trailer", trailer_id))?;

    tracing::info!(trailer_id, "Trailer unassigned");
    Ok(trailer)
}

// ---------------------------------------------------------------------------
// Tires
// ---------------------------------------------------------------------------

/// Mount a tire on a truck at `position`, stamping `installed_at` with `now`.
pub async fn assign_tire(
    store: &dyn FleetStore,
    tire_id: DbId,
    truck_id: DbId,
    position: TirePosition,
    now: Timestamp,
) -> FleetResult<Tire> {
    lookup::tire(store, tire_id).await?;
    lookup::truck(store, truck_id).await?;

    let tire = store
        .set_tire_mount(tire_id, &TireMount::mounted(truck_id, position, now))
        .await?
        .ok_or_else(|| CoreError::not_found("Tire", tire_id))?;

    tracing::info!(tire_id, truck_id, position = %position, "Tire mounted");
    Ok(tire)
}

/// Return a tire to stock: no truck, `spare` position, status `new`.
///
/// Unmounting an already unmounted tire yields the same state.
pub async fn unassign_tire(store: &dyn FleetStore, tire_id: DbId) -> FleetResult<Tire> {
    lookup::tire(store, tire_id).await?;

    let tire = store
        .set_tire_mount(tire_id, &TireMount::unmounted())
        .await?
        .ok_or_else(|| CoreError::not_found("Tire", tire_id))?;

    tracing::info!(tire_id, "Tire unmounted");
    Ok(tire)
}

// ---------------------------------------------------------------------------
// Read models
// ---------------------------------------------------------------------------

/// Trailers currently hitched to `truck_id`.
pub async fn trailers_for_truck(
    store: &dyn FleetStore,
    truck_id: DbId,
    params: TrailerListQuery,
) -> FleetResult<Vec<Trailer>> {
    lookup::truck(store, truck_id).await?;
    let params = TrailerListQuery {
        truck_id: Some(truck_id),
        ..params
    };
    store.list_trailers(&params).await
}

/// Tires currently mounted on `truck_id`.
pub async fn tires_for_truck(
    store: &dyn FleetStore,
    truck_id: DbId,
    params: TireListQuery,
) -> FleetResult<Vec<Tire>> {
    lookup::truck(store, truck_id).await?;
    let params = TireListQuery {
        truck_id: Some(truck_id),
        ..params
    };
    store.list_tires(&params).await
}
