//! Repository for the `trips` table.

use fleetops_core::pagination::Page;
use fleetops_core::trips::{TripFields, TripStatus};
use fleetops_core::types::DbId;
use sqlx::PgPool;

use crate::models::trip::{CreateTrip, Trip, TripListQuery, UpdateTrip};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, truck_id, driver_id, departure_location, arrival_location, \
                       scheduled_departure, scheduled_arrival, status, start_mileage, \
                       end_mileage, fuel_volume, distance, actual_departure, actual_arrival, \
                       comments, completion_notes, created_at, updated_at";

/// Provides CRUD operations for trips.
pub struct TripRepo;

impl TripRepo {
    /// Insert a new `pending` trip.
    pub async fn create(pool: &PgPool, input: &CreateTrip) -> Result<Trip, sqlx::Error> {
        let query = format!(
            "INSERT INTO trips (truck_id, driver_id, departure_location, arrival_location,
                                scheduled_departure, scheduled_arrival, comments, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trip>(&query)
            .bind(input.truck_id)
            .bind(input.driver_id)
            .bind(&input.departure_location)
            .bind(&input.arrival_location)
            .bind(input.scheduled_departure)
            .bind(input.scheduled_arrival)
            .bind(&input.comments)
            .bind(TripStatus::Pending.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a trip by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Trip>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trips WHERE id = $1");
        sqlx::query_as::<_, Trip>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List trips matching the optional filters, in creation order.
    pub async fn list(pool: &PgPool, params: &TripListQuery) -> Result<Vec<Trip>, sqlx::Error> {
        let page = Page::new(params.limit, params.offset);
        let dir = params.order.unwrap_or_default().sql();
        let query = format!(
            "SELECT {COLUMNS} FROM trips
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::BIGINT IS NULL OR truck_id = $2)
               AND ($3::BIGINT IS NULL OR driver_id = $3)
             ORDER BY created_at {dir}, id {dir}
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Trip>(&query)
            .bind(params.status.map(TripStatus::as_str))
            .bind(params.truck_id)
            .bind(params.driver_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Edit the schedule columns. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTrip,
    ) -> Result<Option<Trip>, sqlx::Error> {
        let query = format!(
            "UPDATE trips SET
                departure_location = COALESCE($2, departure_location),
                arrival_location = COALESCE($3, arrival_location),
                scheduled_departure = COALESCE($4, scheduled_departure),
                scheduled_arrival = COALESCE($5, scheduled_arrival),
                comments = COALESCE($6, comments)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trip>(&query)
            .bind(id)
            .bind(&input.departure_location)
            .bind(&input.arrival_location)
            .bind(input.scheduled_departure)
            .bind(input.scheduled_arrival)
            .bind(&input.comments)
            .fetch_optional(pool)
            .await
    }

    /// Write a status change together with any supplied lifecycle fields.
    ///
    /// Absent fields keep their stored value.
    pub async fn apply_transition(
        pool: &PgPool,
        id: DbId,
        status: TripStatus,
        fields: &TripFields,
    ) -> Result<Option<Trip>, sqlx::Error> {
        let query = format!(
            "UPDATE trips SET
                status = $2,
                start_mileage = COALESCE($3, start_mileage),
                end_mileage = COALESCE($4, end_mileage),
                fuel_volume = COALESCE($5, fuel_volume),
                comments = COALESCE($6, comments),
                actual_departure = COALESCE($7, actual_departure),
                actual_arrival = COALESCE($8, actual_arrival),
                distance = COALESCE($9, distance),
                completion_notes = COALESCE($10, completion_notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trip>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(fields.start_mileage)
            .bind(fields.end_mileage)
            .bind(fields.fuel_volume)
            .bind(&fields.comments)
            .bind(fields.actual_departure)
            .bind(fields.actual_arrival)
            .bind(fields.distance)
            .bind(&fields.completion_notes)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a trip by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
