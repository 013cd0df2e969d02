//! Repository for the `maintenance_rules` table.

use fleetops_core::assets::AssetKind;
use fleetops_core::maintenance::ConditionType;
use fleetops_core::pagination::Page;
use fleetops_core::types::DbId;
use sqlx::PgPool;

use crate::models::maintenance::{
    CreateMaintenanceRule, MaintenanceRule, MaintenanceRuleListQuery, UpdateMaintenanceRule,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, interval_value, condition_type, target_type, \
                       is_active, created_at, updated_at";

/// Provides CRUD operations for maintenance rules.
pub struct MaintenanceRuleRepo;

impl MaintenanceRuleRepo {
    /// Insert a new rule, active unless stated otherwise.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMaintenanceRule,
    ) -> Result<MaintenanceRule, sqlx::Error> {
        let query = format!(
            "INSERT INTO maintenance_rules
                (name, description, interval_value, condition_type, target_type, is_active)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRule>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.interval_value)
            .bind(input.condition_type.as_str())
            .bind(input.target_type.as_str())
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a rule by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MaintenanceRule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maintenance_rules WHERE id = $1");
        sqlx::query_as::<_, MaintenanceRule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List rules matching the optional filters, in creation order.
    pub async fn list(
        pool: &PgPool,
        params: &MaintenanceRuleListQuery,
    ) -> Result<Vec<MaintenanceRule>, sqlx::Error> {
        let page = Page::new(params.limit, params.offset);
        let dir = params.order.unwrap_or_default().sql();
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_rules
             WHERE (NOT $1 OR is_active)
               AND ($2::TEXT IS NULL OR target_type = $2)
             ORDER BY created_at {dir}, id {dir}
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, MaintenanceRule>(&query)
            .bind(params.active_only)
            .bind(params.target_type.map(AssetKind::as_str))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }

    /// Every active rule, oldest first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<MaintenanceRule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maintenance_rules WHERE is_active ORDER BY id");
        sqlx::query_as::<_, MaintenanceRule>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a rule. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMaintenanceRule,
    ) -> Result<Option<MaintenanceRule>, sqlx::Error> {
        let query = format!(
            "UPDATE maintenance_rules SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                interval_value = COALESCE($4, interval_value),
                condition_type = COALESCE($5, condition_type),
                target_type = COALESCE($6, target_type),
                is_active = COALESCE($7, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRule>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.interval_value)
            .bind(input.condition_type.map(ConditionType::as_str))
            .bind(input.target_type.map(AssetKind::as_str))
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a rule by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM maintenance_rules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
