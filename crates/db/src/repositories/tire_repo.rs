//! Repository for the `tires` table.

use fleetops_core::assets::{TirePosition, TireStatus};
use fleetops_core::pagination::Page;
use fleetops_core::types::DbId;
use sqlx::PgPool;

use crate::models::tire::{CreateTire, Tire, TireListQuery, TireMount, UpdateTire};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, serial_number, brand, position, truck_id, current_mileage, \
                       max_mileage, status, installed_at, created_at, updated_at";

/// Provides CRUD operations for tires.
pub struct TireRepo;

impl TireRepo {
    /// Register a new, unmounted tire.
    pub async fn create(pool: &PgPool, input: &CreateTire) -> Result<Tire, sqlx::Error> {
        let query = format!(
            "INSERT INTO tires (serial_number, brand, position, max_mileage, current_mileage, status)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tire>(&query)
            .bind(&input.serial_number)
            .bind(&input.brand)
            .bind(TirePosition::Spare.as_str())
            .bind(input.max_mileage)
            .bind(input.current_mileage)
            .bind(input.status.unwrap_or(TireStatus::New).as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a tire by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tire>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tires WHERE id = $1");
        sqlx::query_as::<_, Tire>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tires matching the optional filters, in creation order.
    pub async fn list(pool: &PgPool, params: &TireListQuery) -> Result<Vec<Tire>, sqlx::Error> {
        let page = Page::new(params.limit, params.offset);
        let dir = params.order.unwrap_or_default().sql();
        let query = format!(
            "SELECT {COLUMNS} FROM tires
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::BIGINT IS NULL OR truck_id = $2)
               AND ($3::TEXT IS NULL OR position = $3)
             ORDER BY created_at {dir}, id {dir}
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Tire>(&query)
            .bind(params.status.map(TireStatus::as_str))
            .bind(params.truck_id)
            .bind(params.position.map(TirePosition::as_str))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// All tires, oldest first. Used by the maintenance scan.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Tire>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tires ORDER BY id");
        sqlx::query_as::<_, Tire>(&query).fetch_all(pool).await
    }

    /// Update a tire. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTire,
    ) -> Result<Option<Tire>, sqlx::Error> {
        let query = format!(
            "UPDATE tires SET
                serial_number = COALESCE($2, serial_number),
                brand = COALESCE($3, brand),
                current_mileage = COALESCE($4, current_mileage),
                max_mileage = COALESCE($5, max_mileage),
                status = COALESCE($6, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tire>(&query)
            .bind(id)
            .bind(&input.serial_number)
            .bind(&input.brand)
            .bind(input.current_mileage)
            .bind(input.max_mileage)
            .bind(input.status.map(TireStatus::as_str))
            .fetch_optional(pool)
            .await
    }

    /// Write all mounting columns in one statement.
    pub async fn set_mount(
        pool: &PgPool,
        id: DbId,
        mount: &TireMount,
    ) -> Result<Option<Tire>, sqlx::Error> {
        let query = format!(
            "UPDATE tires SET truck_id = $2, position = $3, status = $4, installed_at = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tire>(&query)
            .bind(id)
            .bind(mount.truck_id)
            .bind(mount.position.as_str())
            .bind(mount.status.as_str())
            .bind(mount.installed_at)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a tire by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tires WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
