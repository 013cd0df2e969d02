//! Trailer entity model and DTOs.

use fleetops_core::assets::{AssetRef, TrailerStatus};
use fleetops_core::maintenance::AssetSnapshot;
use fleetops_core::pagination::SortOrder;
use fleetops_core::types::{DbId, Kilometres, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A trailer row from the `trailers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Trailer {
    pub id: DbId,
    pub plate_number: String,
    pub trailer_type: String,
    pub capacity_kg: f64,
    #[sqlx(try_from = "String")]
    pub status: TrailerStatus,
    pub truck_id: Option<DbId>,
    pub current_mileage: Kilometres,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Trailer {
    /// The maintenance evaluator's view of this trailer.
    pub fn asset_snapshot(&self) -> AssetSnapshot {
        AssetSnapshot {
            target: AssetRef::Trailer(self.id),
            label: self.plate_number.clone(),
            current_mileage: self.current_mileage,
            created_at: self.created_at,
        }
    }
}

/// DTO for creating a new trailer.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTrailer {
    #[validate(length(min = 1, message = "plate_number must not be empty"))]
    pub plate_number: String,
    #[validate(length(min = 1, message = "trailer_type must not be empty"))]
    pub trailer_type: String,
    #[validate(range(min = 0.0, message = "capacity_kg must not be negative"))]
    pub capacity_kg: f64,
    /// Defaults to `available` if omitted.
    pub status: Option<TrailerStatus>,
    #[validate(range(min = 0.0, message = "current_mileage must not be negative"))]
    pub current_mileage: Option<Kilometres>,
}

/// DTO for updating an existing trailer. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTrailer {
    #[validate(length(min = 1, message = "plate_number must not be empty"))]
    pub plate_number: Option<String>,
    #[validate(length(min = 1, message = "trailer_type must not be empty"))]
    pub trailer_type: Option<String>,
    #[validate(range(min = 0.0, message = "capacity_kg must not be negative"))]
    pub capacity_kg: Option<f64>,
    pub status: Option<TrailerStatus>,
    #[validate(range(min = 0.0, message = "current_mileage must not be negative"))]
    pub current_mileage: Option<Kilometres>,
}

/// Query parameters for `GET /api/v1/trailers`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrailerListQuery {
    pub status: Option<TrailerStatus>,
    /// Trailers currently hitched to this truck.
    pub truck_id: Option<DbId>,
    pub order: Option<SortOrder>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Body of `POST /api/v1/trailers/{id}/assign`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignTrailer {
    pub truck_id: DbId,
}
