//! Repository for the `trucks` table.

use fleetops_core::assets::TruckStatus;
use fleetops_core::pagination::Page;
use fleetops_core::types::{DbId, Kilometres};
use sqlx::PgPool;

use crate::models::truck::{CreateTruck, Truck, TruckListQuery, UpdateTruck};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, plate_number, make, model, capacity_kg, status, driver_id, \
                       current_mileage, created_at, updated_at";

/// Provides CRUD operations for trucks.
pub struct TruckRepo;

impl TruckRepo {
    /// Insert a new truck, returning the created row.
    ///
    /// Status defaults to `available` and mileage to 0.
    pub async fn create(pool: &PgPool, input: &CreateTruck) -> Result<Truck, sqlx::Error> {
        let query = format!(
            "INSERT INTO trucks (plate_number, make, model, capacity_kg, status, current_mileage)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Truck>(&query)
            .bind(&input.plate_number)
            .bind(&input.make)
            .bind(&input.model)
            .bind(input.capacity_kg)
            .bind(input.status.unwrap_or(TruckStatus::Available).as_str())
            .bind(input.current_mileage)
            .fetch_one(pool)
            .await
    }

    /// Find a truck by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Truck>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trucks WHERE id = $1");
        sqlx::query_as::<_, Truck>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List trucks matching the optional filters, in creation order.
    pub async fn list(pool: &PgPool, params: &TruckListQuery) -> Result<Vec<Truck>, sqlx::Error> {
        let page = Page::new(params.limit, params.offset);
        let dir = params.order.unwrap_or_default().sql();
        let query = format!(
            "SELECT {COLUMNS} FROM trucks
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::BIGINT IS NULL OR driver_id = $2)
             ORDER BY created_at {dir}, id {dir}
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Truck>(&query)
            .bind(params.status.map(TruckStatus::as_str))
            .bind(params.driver_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// All trucks, oldest first. Used by the maintenance scan.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Truck>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trucks ORDER BY id");
        sqlx::query_as::<_, Truck>(&query).fetch_all(pool).await
    }

    /// Update a truck. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTruck,
    ) -> Result<Option<Truck>, sqlx::Error> {
        let query = format!(
            "UPDATE trucks SET
                plate_number = COALESCE($2, plate_number),
                make = COALESCE($3, make),
                model = COALESCE($4, model),
                capacity_kg = COALESCE($5, capacity_kg),
                status = COALESCE($6, status),
                current_mileage = COALESCE($7, current_mileage)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Truck>(&query)
            .bind(id)
            .bind(&input.plate_number)
            .bind(&input.make)
            .bind(&input.model)
            .bind(input.capacity_kg)
            .bind(input.status.map(TruckStatus::as_str))
            .bind(input.current_mileage)
            .fetch_optional(pool)
            .await
    }

    /// Write the driver link and status together. `None` clears the driver.
    pub async fn set_driver(
        pool: &PgPool,
        id: DbId,
        driver_id: Option<DbId>,
        status: TruckStatus,
    ) -> Result<Option<Truck>, sqlx::Error> {
        let query = format!(
            "UPDATE trucks SET driver_id = $2, status = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Truck>(&query)
            .bind(id)
            .bind(driver_id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Set the truck status only.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: TruckStatus,
    ) -> Result<Option<Truck>, sqlx::Error> {
        let query = format!("UPDATE trucks SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Truck>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Raise the odometer to `mileage`; a lower reading leaves it unchanged.
    pub async fn advance_odometer(
        pool: &PgPool,
        id: DbId,
        mileage: Kilometres,
    ) -> Result<Option<Truck>, sqlx::Error> {
        let query = format!(
            "UPDATE trucks SET current_mileage = GREATEST(current_mileage, $2)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Truck>(&query)
            .bind(id)
            .bind(mileage)
            .fetch_optional(pool)
            .await
    }

    /// Number of trips referencing this truck.
    pub async fn count_trips(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trips WHERE truck_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Permanently delete a truck by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM trucks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
