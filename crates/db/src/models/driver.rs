//! Driver entity model and DTOs.

use fleetops_core::pagination::SortOrder;
use fleetops_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A driver row from the `drivers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Driver {
    pub id: DbId,
    pub full_name: String,
    pub license_number: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new driver.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDriver {
    #[validate(length(min = 1, message = "full_name must not be empty"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "license_number must not be empty"))]
    pub license_number: String,
    pub phone: Option<String>,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}

/// DTO for updating an existing driver. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateDriver {
    #[validate(length(min = 1, message = "full_name must not be empty"))]
    pub full_name: Option<String>,
    #[validate(length(min = 1, message = "license_number must not be empty"))]
    pub license_number: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

/// Query parameters for `GET /api/v1/drivers`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriverListQuery {
    /// Only return active drivers when `true`.
    #[serde(default)]
    pub active_only: bool,
    pub order: Option<SortOrder>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
