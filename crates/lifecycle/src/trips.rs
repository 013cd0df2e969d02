//! Trip lifecycle operations.
//!
//! The transition check and the mileage arithmetic live in
//! [`fleetops_core::trips`]; this module loads the trip, writes the result
//! and applies the follow-up truck write. The trip and truck writes are not
//! atomic: when the truck write fails after the trip committed, the caller
//! receives [`CoreError::PartialWrite`] describing both halves.

use fleetops_core::assets::TruckStatus;
use fleetops_core::error::CoreError;
use fleetops_core::trips::{
    completion_fields, consumption_per_100km, start_fields, TransitionPolicy, TripFields,
    TripStatus,
};
use fleetops_core::types::{DbId, Kilometres, Timestamp};
use fleetops_db::models::trip::{CompleteTrip, CreateTrip, Trip, TripSummary};
use fleetops_db::models::truck::Truck;

use crate::error::{FleetError, FleetResult};
use crate::lookup;
use crate::store::FleetStore;

/// Create a `pending` trip for an existing truck and driver.
pub async fn schedule_trip(store: &dyn FleetStore, input: &CreateTrip) -> FleetResult<Trip> {
    lookup::truck(store, input.truck_id).await?;
    lookup::driver(store, input.driver_id).await?;

    let trip = store.create_trip(input).await?;
    tracing::info!(
        trip_id = trip.id,
        truck_id = trip.truck_id,
        driver_id = trip.driver_id,
        "Trip scheduled"
    );
    Ok(trip)
}

/// Write `status` and any supplied fields after checking them against
/// `policy`.
pub async fn update_trip_status(
    store: &dyn FleetStore,
    policy: TransitionPolicy,
    trip_id: DbId,
    status: TripStatus,
    fields: &TripFields,
) -> FleetResult<Trip> {
    let current = lookup::trip(store, trip_id).await?;
    policy.check(&current.snapshot(), status, fields)?;

    let trip = write_transition(store, trip_id, status, fields).await?;
    tracing::info!(trip_id, from = %current.status, to = %status, "Trip status updated");
    Ok(trip)
}

/// Depart: record the start mileage and departure time, then mark the truck
/// `in_use`.
pub async fn start_trip(
    store: &dyn FleetStore,
    policy: TransitionPolicy,
    trip_id: DbId,
    start_mileage: Kilometres,
    now: Timestamp,
) -> FleetResult<Trip> {
    let current = lookup::trip(store, trip_id).await?;
    let fields = start_fields(start_mileage, now);
    policy.check(&current.snapshot(), TripStatus::InProgress, &fields)?;

    let trip = write_transition(store, trip_id, TripStatus::InProgress, &fields).await?;
    tracing::info!(trip_id, start_mileage, "Trip started");

    let truck_write = store
        .set_truck_status(trip.truck_id, TruckStatus::InUse)
        .await;
    follow_up("start_trip", &trip, truck_write, "truck status in_use")?;

    Ok(trip)
}

/// Arrive: compute the distance, record fuel and arrival, then advance the
/// truck odometer if the end reading is higher.
///
/// `arrival_time` defaults to `now`.
pub async fn complete_trip(
    store: &dyn FleetStore,
    policy: TransitionPolicy,
    trip_id: DbId,
    input: CompleteTrip,
    now: Timestamp,
) -> FleetResult<Trip> {
    let current = lookup::trip(store, trip_id).await?;
    let fields = completion_fields(
        current.start_mileage,
        input.end_mileage,
        input.fuel_volume,
        input.arrival_time.unwrap_or(now),
        input.notes,
    );
    policy.check(&current.snapshot(), TripStatus::Completed, &fields)?;

    let trip = write_transition(store, trip_id, TripStatus::Completed, &fields).await?;
    if let Some(distance) = trip.distance {
        if distance < 0.0 {
            tracing::warn!(trip_id, distance, "Trip completed with negative distance");
        }
    }
    tracing::info!(trip_id, end_mileage = input.end_mileage, "Trip completed");

    let truck_write = store
        .advance_truck_odometer(trip.truck_id, input.end_mileage)
        .await;
    follow_up("complete_trip", &trip, truck_write, "truck odometer")?;

    Ok(trip)
}

/// Distance, fuel and consumption for one trip.
pub async fn trip_summary(store: &dyn FleetStore, trip_id: DbId) -> FleetResult<TripSummary> {
    let trip = lookup::trip(store, trip_id).await?;
    Ok(TripSummary {
        trip_id: trip.id,
        status: trip.status,
        distance: trip.distance,
        fuel_volume: trip.fuel_volume,
        consumption_per_100km: consumption_per_100km(
            trip.fuel_volume,
            trip.start_mileage,
            trip.end_mileage,
        ),
    })
}

async fn write_transition(
    store: &dyn FleetStore,
    trip_id: DbId,
    status: TripStatus,
    fields: &TripFields,
) -> FleetResult<Trip> {
    Ok(store
        .apply_trip_transition(trip_id, status, fields)
        .await?
        .ok_or_else(|| CoreError::not_found("Trip", trip_id))?)
}

/// Turn a failed truck write after a committed trip write into
/// `PartialWrite`.
fn follow_up(
    operation: &'static str,
    trip: &Trip,
    truck_write: FleetResult<Option<Truck>>,
    what: &str,
) -> FleetResult<()> {
    let reason = match truck_write {
        Ok(Some(_)) => return Ok(()),
        Ok(None) => format!("truck {} not found", trip.truck_id),
        Err(e) => e.to_string(),
    };

    tracing::warn!(
        operation,
        trip_id = trip.id,
        truck_id = trip.truck_id,
        error = %reason,
        "Trip written but truck update failed"
    );
    Err(FleetError::Core(CoreError::PartialWrite {
        operation,
        committed: format!("trip {} status {}", trip.id, trip.status),
        failed: format!("{what} on truck {}", trip.truck_id),
        reason,
    }))
}
