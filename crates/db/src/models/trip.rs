//! Trip entity model and DTOs.

use fleetops_core::pagination::SortOrder;
use fleetops_core::trips::{TripFields, TripSnapshot, TripStatus};
use fleetops_core::types::{DbId, Kilometres, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A trip row from the `trips` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Trip {
    pub id: DbId,
    pub truck_id: DbId,
    pub driver_id: DbId,
    pub departure_location: String,
    pub arrival_location: String,
    pub scheduled_departure: Timestamp,
    pub scheduled_arrival: Option<Timestamp>,
    #[sqlx(try_from = "String")]
    pub status: TripStatus,
    pub start_mileage: Option<Kilometres>,
    pub end_mileage: Option<Kilometres>,
    pub fuel_volume: Option<f64>,
    pub distance: Option<Kilometres>,
    pub actual_departure: Option<Timestamp>,
    pub actual_arrival: Option<Timestamp>,
    pub comments: Option<String>,
    pub completion_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Trip {
    /// The state the transition policy checks against.
    pub fn snapshot(&self) -> TripSnapshot {
        TripSnapshot {
            status: self.status,
            start_mileage: self.start_mileage,
        }
    }

    /// Overlay a status change and its fields, as the store would persist it.
    pub fn apply(&mut self, status: TripStatus, fields: &TripFields) {
        self.status = status;
        if let Some(v) = fields.start_mileage {
            self.start_mileage = Some(v);
        }
        if let Some(v) = fields.end_mileage {
            self.end_mileage = Some(v);
        }
        if let Some(v) = fields.fuel_volume {
            self.fuel_volume = Some(v);
        }
        if let Some(v) = &fields.comments {
            self.comments = Some(v.clone());
        }
        if let Some(v) = fields.actual_departure {
            self.actual_departure = Some(v);
        }
        if let Some(v) = fields.actual_arrival {
            self.actual_arrival = Some(v);
        }
        if let Some(v) = fields.distance {
            self.distance = Some(v);
        }
        if let Some(v) = &fields.completion_notes {
            self.completion_notes = Some(v.clone());
        }
    }
}

/// DTO for scheduling a new trip. Trips start `pending`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTrip {
    pub truck_id: DbId,
    pub driver_id: DbId,
    #[validate(length(min = 1, message = "departure_location must not be empty"))]
    pub departure_location: String,
    #[validate(length(min = 1, message = "arrival_location must not be empty"))]
    pub arrival_location: String,
    pub scheduled_departure: Timestamp,
    pub scheduled_arrival: Option<Timestamp>,
    pub comments: Option<String>,
}

/// DTO for editing a trip's schedule. Status and mileage go through the
/// lifecycle endpoints.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTrip {
    #[validate(length(min = 1, message = "departure_location must not be empty"))]
    pub departure_location: Option<String>,
    #[validate(length(min = 1, message = "arrival_location must not be empty"))]
    pub arrival_location: Option<String>,
    pub scheduled_departure: Option<Timestamp>,
    pub scheduled_arrival: Option<Timestamp>,
    pub comments: Option<String>,
}

/// Body of `PUT /api/v1/trips/{id}/status`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTripStatus {
    pub status: TripStatus,
    #[validate(range(min = 0.0, message = "start_mileage must not be negative"))]
    pub start_mileage: Option<Kilometres>,
    #[validate(range(min = 0.0, message = "end_mileage must not be negative"))]
    pub end_mileage: Option<Kilometres>,
    #[validate(range(min = 0.0, message = "fuel_volume must not be negative"))]
    pub fuel_volume: Option<f64>,
    pub comments: Option<String>,
    pub actual_departure: Option<Timestamp>,
    pub actual_arrival: Option<Timestamp>,
    pub distance: Option<Kilometres>,
    pub completion_notes: Option<String>,
}

impl UpdateTripStatus {
    /// Split into the requested status and the fields to write with it.
    pub fn into_parts(self) -> (TripStatus, TripFields) {
        let fields = TripFields {
            start_mileage: self.start_mileage,
            end_mileage: self.end_mileage,
            fuel_volume: self.fuel_volume,
            comments: self.comments,
            actual_departure: self.actual_departure,
            actual_arrival: self.actual_arrival,
            distance: self.distance,
            completion_notes: self.completion_notes,
        };
        (self.status, fields)
    }
}

/// Body of `POST /api/v1/trips/{id}/start`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartTrip {
    #[validate(range(min = 0.0, message = "start_mileage must not be negative"))]
    pub start_mileage: Kilometres,
}

/// Body of `POST /api/v1/trips/{id}/complete`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompleteTrip {
    #[validate(range(min = 0.0, message = "end_mileage must not be negative"))]
    pub end_mileage: Kilometres,
    #[validate(range(min = 0.0, message = "fuel_volume must not be negative"))]
    pub fuel_volume: f64,
    /// Defaults to the time of the request.
    pub arrival_time: Option<Timestamp>,
    pub notes: Option<String>,
}

/// Derived figures for a single trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSummary {
    pub trip_id: DbId,
    pub status: TripStatus,
    pub distance: Option<Kilometres>,
    pub fuel_volume: Option<f64>,
    /// Litres per 100 km; absent when the distance is not positive.
    pub consumption_per_100km: Option<f64>,
}

/// Query parameters for `GET /api/v1/trips`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripListQuery {
    pub status: Option<TripStatus>,
    pub truck_id: Option<DbId>,
    pub driver_id: Option<DbId>,
    pub order: Option<SortOrder>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn status_body_splits_into_status_and_fields() {
        let body: UpdateTripStatus = serde_json::from_value(serde_json::json!({
            "status": "completed",
            "end_mileage": 1600.0,
            "fuel_volume": 40.0
        }))
        .unwrap();
        let (status, fields) = body.into_parts();
        assert_eq!(status, TripStatus::Completed);
        assert_eq!(fields.end_mileage, Some(1600.0));
        assert_eq!(fields.start_mileage, None);
    }

    #[test]
    fn unknown_status_is_rejected_at_deserialization() {
        let result: Result<UpdateTripStatus, _> =
            serde_json::from_value(serde_json::json!({ "status": "parked" }));
        assert!(result.is_err());
    }

    #[test]
    fn negative_fuel_fails_validation() {
        let body = CompleteTrip {
            end_mileage: 1600.0,
            fuel_volume: -1.0,
            arrival_time: None,
            notes: None,
        };
        assert!(body.validate().is_err());
    }
}
