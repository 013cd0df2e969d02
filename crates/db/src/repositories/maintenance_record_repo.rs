//! Repository for the `maintenance_records` table.

use fleetops_core::assets::{AssetKind, AssetRef};
use fleetops_core::maintenance::MaintenanceStatus;
use fleetops_core::pagination::Page;
use fleetops_core::types::{DbId, Kilometres, Timestamp};
use sqlx::PgPool;

use crate::models::maintenance::{
    CreateMaintenanceRecord, MaintenanceRecord, MaintenanceRecordListQuery,
    UpdateMaintenanceRecord,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, target_type, target_id, maintenance_type, description, performed_on, \
                       cost, status, mileage_at_service, created_at, updated_at";

/// Provides CRUD operations and baseline lookups for maintenance records.
pub struct MaintenanceRecordRepo;

impl MaintenanceRecordRepo {
    /// Insert a record. `mileage_at_service` is passed separately so the
    /// caller can fill it from the target's odometer.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMaintenanceRecord,
        mileage_at_service: Option<Kilometres>,
    ) -> Result<MaintenanceRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO maintenance_records
                (target_type, target_id, maintenance_type, description, performed_on,
                 cost, status, mileage_at_service)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(input.target_type.as_str())
            .bind(input.target_id)
            .bind(&input.maintenance_type)
            .bind(&input.description)
            .bind(input.performed_on)
            .bind(input.cost)
            .bind(input.status.unwrap_or(MaintenanceStatus::Scheduled).as_str())
            .bind(mileage_at_service)
            .fetch_one(pool)
            .await
    }

    /// Find a record by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maintenance_records WHERE id = $1");
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List records matching the optional filters, in creation order.
    pub async fn list(
        pool: &PgPool,
        params: &MaintenanceRecordListQuery,
    ) -> Result<Vec<MaintenanceRecord>, sqlx::Error> {
        let page = Page::new(params.limit, params.offset);
        let dir = params.order.unwrap_or_default().sql();
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_records
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::TEXT IS NULL OR target_type = $2)
               AND ($3::BIGINT IS NULL OR target_id = $3)
             ORDER BY created_at {dir}, id {dir}
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(params.status.map(MaintenanceStatus::as_str))
            .bind(params.target_type.map(AssetKind::as_str))
            .bind(params.target_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// The most recent completed record for `target`, if any.
    pub async fn latest_completed(
        pool: &PgPool,
        target: AssetRef,
    ) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_records
             WHERE target_type = $1 AND target_id = $2 AND status = $3
             ORDER BY performed_on DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(target.kind().as_str())
            .bind(target.id())
            .bind(MaintenanceStatus::Completed.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Scheduled records dated on or after `now`, soonest first.
    pub async fn list_upcoming(
        pool: &PgPool,
        now: Timestamp,
    ) -> Result<Vec<MaintenanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_records
             WHERE status = $1 AND performed_on >= $2
             ORDER BY performed_on ASC, id ASC"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(MaintenanceStatus::Scheduled.as_str())
            .bind(now)
            .fetch_all(pool)
            .await
    }

    /// Update a record. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMaintenanceRecord,
    ) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE maintenance_records SET
                maintenance_type = COALESCE($2, maintenance_type),
                description = COALESCE($3, description),
                performed_on = COALESCE($4, performed_on),
                cost = COALESCE($5, cost),
                status = COALESCE($6, status),
                mileage_at_service = COALESCE($7, mileage_at_service)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(id)
            .bind(&input.maintenance_type)
            .bind(&input.description)
            .bind(input.performed_on)
            .bind(input.cost)
            .bind(input.status.map(MaintenanceStatus::as_str))
            .bind(input.mileage_at_service)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a record by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM maintenance_records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
