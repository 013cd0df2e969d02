//! Repository for the `trailers` table.

use fleetops_core::assets::TrailerStatus;
use fleetops_core::pagination::Page;
use fleetops_core::types::DbId;
use sqlx::PgPool;

use crate::models::trailer::{CreateTrailer, Trailer, TrailerListQuery, UpdateTrailer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, plate_number, trailer_type, capacity_kg, status, truck_id, \
                       current_mileage, created_at, updated_at";

/// Provides CRUD operations for trailers.
pub struct TrailerRepo;

impl TrailerRepo {
    /// Insert a new trailer, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTrailer) -> Result<Trailer, sqlx::Error> {
        let query = format!(
            "INSERT INTO trailers (plate_number, trailer_type, capacity_kg, status, current_mileage)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trailer>(&query)
            .bind(&input.plate_number)
            .bind(&input.trailer_type)
            .bind(input.capacity_kg)
            .bind(input.status.unwrap_or(TrailerStatus::Available).as_str())
            .bind(input.current_mileage)
            .fetch_one(pool)
            .await
    }

    /// Find a trailer by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Trailer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trailers WHERE id = $1");
        sqlx::query_as::<_, Trailer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List trailers matching the optional filters, in creation order.
    ///
    /// Filtering on `truck_id` is how a truck's trailers are found.
    pub async fn list(
        pool: &PgPool,
        params: &TrailerListQuery,
    ) -> Result<Vec<Trailer>, sqlx::Error> {
        let page = Page::new(params.limit, params.offset);
        let dir = params.order.unwrap_or_default().sql();
        let query = format!(
            "SELECT {COLUMNS} FROM trailers
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::BIGINT IS NULL OR truck_id = $2)
             ORDER BY created_at {dir}, id {dir}
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Trailer>(&query)
            .bind(params.status.map(TrailerStatus::as_str))
            .bind(params.truck_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// All trailers, oldest first. Used by the maintenance scan.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Trailer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trailers ORDER BY id");
        sqlx::query_as::<_, Trailer>(&query).fetch_all(pool).await
    }

    /// Update a trailer. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTrailer,
    ) -> Result<Option<Trailer>, sqlx::Error> {
        let query = format!(
            "UPDATE trailers SET
                plate_number = COALESCE($2, plate_number),
                trailer_type = COALESCE($3, trailer_type),
                capacity_kg = COALESCE($4, capacity_kg),
                status = COALESCE($5, status),
                current_mileage = COALESCE($6, current_mileage)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trailer>(&query)
            .bind(id)
            .bind(&input.plate_number)
            .bind(&input.trailer_type)
            .bind(input.capacity_kg)
            .bind(input.status.map(TrailerStatus::as_str))
            .bind(input.current_mileage)
            .fetch_optional(pool)
            .await
    }

    /// Write the truck link and status together. `None` unhitches.
    pub async fn set_truck(
        pool: &PgPool,
        id: DbId,
        truck_id: Option<DbId>,
        status: TrailerStatus,
    ) -> Result<Option<Trailer>, sqlx::Error> {
        let query = format!(
            "UPDATE trailers SET truck_id = $2, status = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Trailer>(&query)
            .bind(id)
            .bind(truck_id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a trailer by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trailers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
