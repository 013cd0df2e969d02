//! Tire entity model and DTOs.

use fleetops_core::assets::{AssetRef, TirePosition, TireStatus};
use fleetops_core::maintenance::AssetSnapshot;
use fleetops_core::pagination::SortOrder;
use fleetops_core::types::{DbId, Kilometres, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A tire row from the `tires` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tire {
    pub id: DbId,
    pub serial_number: String,
    pub brand: Option<String>,
    #[sqlx(try_from = "String")]
    pub position: TirePosition,
    pub truck_id: Option<DbId>,
    pub current_mileage: Kilometres,
    pub max_mileage: Kilometres,
    #[sqlx(try_from = "String")]
    pub status: TireStatus,
    pub installed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Tire {
    /// The maintenance evaluator's view of this tire.
    pub fn asset_snapshot(&self) -> AssetSnapshot {
        AssetSnapshot {
            target: AssetRef::Tire(self.id),
            label: self.serial_number.clone(),
            current_mileage: self.current_mileage,
            created_at: self.created_at,
        }
    }
}

/// DTO for registering a new tire. Tires start unmounted.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTire {
    #[validate(length(min = 1, message = "serial_number must not be empty"))]
    pub serial_number: String,
    pub brand: Option<String>,
    #[validate(range(min = 0.0, message = "max_mileage must not be negative"))]
    pub max_mileage: Kilometres,
    #[validate(range(min = 0.0, message = "current_mileage must not be negative"))]
    pub current_mileage: Option<Kilometres>,
    /// Defaults to `new` if omitted.
    pub status: Option<TireStatus>,
}

/// DTO for updating an existing tire. All fields are optional.
///
/// Mounting is changed through the assignment endpoints only.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTire {
    #[validate(length(min = 1, message = "serial_number must not be empty"))]
    pub serial_number: Option<String>,
    pub brand: Option<String>,
    #[validate(range(min = 0.0, message = "current_mileage must not be negative"))]
    pub current_mileage: Option<Kilometres>,
    #[validate(range(min = 0.0, message = "max_mileage must not be negative"))]
    pub max_mileage: Option<Kilometres>,
    pub status: Option<TireStatus>,
}

/// The mounting columns written together by assign/unassign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TireMount {
    pub truck_id: Option<DbId>,
    pub position: TirePosition,
    pub status: TireStatus,
    pub installed_at: Option<Timestamp>,
}

impl TireMount {
    /// Mounted on `truck_id` at `position`, installed at `now`.
    pub fn mounted(truck_id: DbId, position: TirePosition, now: Timestamp) -> Self {
        Self {
            truck_id: Some(truck_id),
            position,
            status: TireStatus::InUse,
            installed_at: Some(now),
        }
    }

    /// Back in stock: no truck, spare position, status `new`.
    pub fn unmounted() -> Self {
        Self {
            truck_id: None,
            position: TirePosition::Spare,
            status: TireStatus::New,
            installed_at: None,
        }
    }
}

/// Query parameters for `GET /api/v1/tires`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TireListQuery {
    pub status: Option<TireStatus>,
    /// Tires currently mounted on this truck.
    pub truck_id: Option<DbId>,
    pub position: Option<TirePosition>,
    pub order: Option<SortOrder>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Body of `POST /api/v1/tires/{id}/assign`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignTire {
    pub truck_id: DbId,
    pub position: TirePosition,
}
