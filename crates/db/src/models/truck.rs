//! Truck entity model and DTOs.

use fleetops_core::assets::{AssetRef, TruckStatus};
use fleetops_core::maintenance::AssetSnapshot;
use fleetops_core::pagination::SortOrder;
use fleetops_core::types::{DbId, Kilometres, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A truck row from the `trucks` table.
///
/// The truck does not list its trailers or tires; those are found by
/// filtering trailers/tires on `truck_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Truck {
    pub id: DbId,
    pub plate_number: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub capacity_kg: f64,
    #[sqlx(try_from = "String")]
    pub status: TruckStatus,
    pub driver_id: Option<DbId>,
    pub current_mileage: Kilometres,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Truck {
    /// The maintenance evaluator's view of this truck.
    pub fn asset_snapshot(&self) -> AssetSnapshot {
        AssetSnapshot {
            target: AssetRef::Truck(self.id),
            label: self.plate_number.clone(),
            current_mileage: self.current_mileage,
            created_at: self.created_at,
        }
    }
}

/// DTO for creating a new truck.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTruck {
    #[validate(length(min = 1, message = "plate_number must not be empty"))]
    pub plate_number: String,
    pub make: Option<String>,
    pub model: Option<String>,
    #[validate(range(min = 0.0, message = "capacity_kg must not be negative"))]
    pub capacity_kg: f64,
    /// Defaults to `available` if omitted.
    pub status: Option<TruckStatus>,
    #[validate(range(min = 0.0, message = "current_mileage must not be negative"))]
    pub current_mileage: Option<Kilometres>,
}

/// DTO for updating an existing truck. All fields are optional.
///
/// The driver link is changed through the assignment endpoints only.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTruck {
    #[validate(length(min = 1, message = "plate_number must not be empty"))]
    pub plate_number: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    #[validate(range(min = 0.0, message = "capacity_kg must not be negative"))]
    pub capacity_kg: Option<f64>,
    pub status: Option<TruckStatus>,
    #[validate(range(min = 0.0, message = "current_mileage must not be negative"))]
    pub current_mileage: Option<Kilometres>,
}

/// Query parameters for `GET /api/v1/trucks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TruckListQuery {
    pub status: Option<TruckStatus>,
    pub driver_id: Option<DbId>,
    pub order: Option<SortOrder>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Body of `POST /api/v1/trucks/{id}/driver`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignDriver {
    pub driver_id: DbId,
}
