//! Repository for the `drivers` table.

use fleetops_core::pagination::Page;
use fleetops_core::types::DbId;
use sqlx::PgPool;

use crate::models::driver::{CreateDriver, Driver, DriverListQuery, UpdateDriver};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, license_number, phone, is_active, created_at, updated_at";

/// Provides CRUD operations for drivers.
pub struct DriverRepo;

impl DriverRepo {
    /// Insert a new driver, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDriver) -> Result<Driver, sqlx::Error> {
        let query = format!(
            "INSERT INTO drivers (full_name, license_number, phone, is_active)
             VALUES ($1, $2, $3, COALESCE($4, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(&input.full_name)
            .bind(&input.license_number)
            .bind(&input.phone)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a driver by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Driver>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drivers WHERE id = $1");
        sqlx::query_as::<_, Driver>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List drivers, optionally restricted to active ones.
    pub async fn list(
        pool: &PgPool,
        params: &DriverListQuery,
    ) -> Result<Vec<Driver>, sqlx::Error> {
        let page = Page::new(params.limit, params.offset);
        let dir = params.order.unwrap_or_default().sql();
        let query = format!(
            "SELECT {COLUMNS} FROM drivers
             WHERE (NOT $1 OR is_active)
             ORDER BY created_at {dir}, id {dir}
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(params.active_only)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Update a driver. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDriver,
    ) -> Result<Option<Driver>, sqlx::Error> {
        let query = format!(
            "UPDATE drivers SET
                full_name = COALESCE($2, full_name),
                license_number = COALESCE($3, license_number),
                phone = COALESCE($4, phone),
                is_active = COALESCE($5, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.license_number)
            .bind(&input.phone)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Number of trips driven or scheduled for this driver.
    pub async fn count_trips(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trips WHERE driver_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Permanently delete a driver. Trucks driven by them lose the link;
    /// a driver with trips is rejected by the foreign key.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
