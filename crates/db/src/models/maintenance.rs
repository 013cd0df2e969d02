//! Maintenance record and rule models and DTOs.

use fleetops_core::assets::{AssetKind, AssetRef};
use fleetops_core::maintenance::{Baseline, ConditionType, MaintenanceStatus, Rule};
use fleetops_core::pagination::SortOrder;
use fleetops_core::types::{DbId, Kilometres, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A row from the `maintenance_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaintenanceRecord {
    pub id: DbId,
    #[sqlx(try_from = "String")]
    pub target_type: AssetKind,
    pub target_id: DbId,
    pub maintenance_type: String,
    pub description: Option<String>,
    pub performed_on: Timestamp,
    pub cost: f64,
    #[sqlx(try_from = "String")]
    pub status: MaintenanceStatus,
    /// Odometer of the target when the record was created, retaken on completion.
    pub mileage_at_service: Option<Kilometres>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MaintenanceRecord {
    pub fn target(&self) -> AssetRef {
        AssetRef::new(self.target_type, self.target_id)
    }

    pub fn baseline(&self) -> Baseline {
        Baseline {
            performed_on: self.performed_on,
            mileage_at_service: self.mileage_at_service,
        }
    }
}

/// DTO for creating a maintenance record.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMaintenanceRecord {
    pub target_type: AssetKind,
    pub target_id: DbId,
    #[validate(length(min = 1, message = "maintenance_type must not be empty"))]
    pub maintenance_type: String,
    pub description: Option<String>,
    pub performed_on: Timestamp,
    #[validate(range(min = 0.0, message = "cost must not be negative"))]
    pub cost: f64,
    /// Defaults to `scheduled` if omitted.
    pub status: Option<MaintenanceStatus>,
    /// Taken from the target's odometer when omitted.
    #[validate(range(min = 0.0, message = "mileage_at_service must not be negative"))]
    pub mileage_at_service: Option<Kilometres>,
}

impl CreateMaintenanceRecord {
    pub fn target(&self) -> AssetRef {
        AssetRef::new(self.target_type, self.target_id)
    }
}

/// DTO for updating a maintenance record. The target cannot change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMaintenanceRecord {
    #[validate(length(min = 1, message = "maintenance_type must not be empty"))]
    pub maintenance_type: Option<String>,
    pub description: Option<String>,
    pub performed_on: Option<Timestamp>,
    #[validate(range(min = 0.0, message = "cost must not be negative"))]
    pub cost: Option<f64>,
    pub status: Option<MaintenanceStatus>,
    #[validate(range(min = 0.0, message = "mileage_at_service must not be negative"))]
    pub mileage_at_service: Option<Kilometres>,
}

/// Query parameters for `GET /api/v1/maintenance/records`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaintenanceRecordListQuery {
    pub status: Option<MaintenanceStatus>,
    pub target_type: Option<AssetKind>,
    pub target_id: Option<DbId>,
    pub order: Option<SortOrder>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// A row from the `maintenance_rules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaintenanceRule {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub interval_value: f64,
    #[sqlx(try_from = "String")]
    pub condition_type: ConditionType,
    #[sqlx(try_from = "String")]
    pub target_type: AssetKind,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MaintenanceRule {
    /// The evaluator's view of this rule.
    pub fn to_rule(&self) -> Rule {
        Rule {
            name: self.name.clone(),
            description: self.description.clone(),
            interval_value: self.interval_value,
            condition_type: self.condition_type,
        }
    }
}

/// DTO for creating a maintenance rule.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMaintenanceRule {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "interval_value must be positive"))]
    pub interval_value: f64,
    pub condition_type: ConditionType,
    pub target_type: AssetKind,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}

/// DTO for updating a maintenance rule. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMaintenanceRule {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "interval_value must be positive"))]
    pub interval_value: Option<f64>,
    pub condition_type: Option<ConditionType>,
    pub target_type: Option<AssetKind>,
    pub is_active: Option<bool>,
}

/// Query parameters for `GET /api/v1/maintenance/rules`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaintenanceRuleListQuery {
    #[serde(default)]
    pub active_only: bool,
    pub target_type: Option<AssetKind>,
    pub order: Option<SortOrder>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
