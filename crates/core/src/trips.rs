//! Trip lifecycle rules: statuses, the transition table, and the mileage
//! and fuel arithmetic applied when a trip starts or completes.
//!
//! Pure logic. The lifecycle crate loads the trip, asks this module what to
//! write, and persists the result.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Kilometres, Timestamp};

define_text_enum! {
    /// Trip lifecycle status.
    TripStatus ("trip status") {
        Pending = "pending",
        InProgress = "in_progress",
        Completed = "completed",
        Cancelled = "cancelled",
    }
}

impl TripStatus {
    /// Completed and cancelled trips are finished in practice.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

define_text_enum! {
    /// How strictly status updates are checked against the current state.
    TransitionPolicy ("trip transition policy") {
        /// Accept any requested status and field combination.
        Permissive = "permissive",
        /// Enforce the transition table, required fields and mileage ordering.
        Strict = "strict",
    }
}

impl Default for TransitionPolicy {
    fn default() -> Self {
        Self::Permissive
    }
}

/// Optional facts written alongside a status change. Absent fields keep
/// their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripFields {
    pub start_mileage: Option<Kilometres>,
    pub end_mileage: Option<Kilometres>,
    pub fuel_volume: Option<f64>,
    pub comments: Option<String>,
    pub actual_departure: Option<Timestamp>,
    pub actual_arrival: Option<Timestamp>,
    pub distance: Option<Kilometres>,
    pub completion_notes: Option<String>,
}

/// The parts of a stored trip the transition check needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripSnapshot {
    pub status: TripStatus,
    pub start_mileage: Option<Kilometres>,
}

pub mod state_machine {
    use super::TripStatus;

    /// Statuses reachable from `from` under the strict policy.
    pub fn valid_transitions(from: TripStatus) -> &'static [TripStatus] {
        match from {
            TripStatus::Pending => &[TripStatus::InProgress, TripStatus::Cancelled],
            TripStatus::InProgress => &[TripStatus::Completed, TripStatus::Cancelled],
            TripStatus::Completed | TripStatus::Cancelled => &[],
        }
    }

    pub fn can_transition(from: TripStatus, to: TripStatus) -> bool {
        valid_transitions(from).contains(&to)
    }

    /// Validate a state transition, returning an error message for invalid ones.
    pub fn validate_transition(from: TripStatus, to: TripStatus) -> Result<(), String> {
        if can_transition(from, to) {
            Ok(())
        } else {
            Err(format!("Invalid trip transition: {from} -> {to}"))
        }
    }
}

impl TransitionPolicy {
    /// Check a requested status change against the stored trip.
    ///
    /// The permissive policy accepts everything, including a negative
    /// distance. The strict policy rejects transitions outside the table,
    /// missing required fields, and an end mileage below the start mileage.
    pub fn check(
        self,
        current: &TripSnapshot,
        requested: TripStatus,
        fields: &TripFields,
    ) -> Result<(), CoreError> {
        if self == Self::Permissive {
            return Ok(());
        }

        state_machine::validate_transition(current.status, requested)
            .map_err(CoreError::Validation)?;

        let start = fields.start_mileage.or(current.start_mileage);

        match (current.status, requested) {
            (TripStatus::Pending, TripStatus::InProgress) if start.is_none() => {
                return Err(CoreError::Validation(
                    "start_mileage is required to start a trip".to_string(),
                ));
            }
            (TripStatus::InProgress, TripStatus::Completed) => {
                if fields.end_mileage.is_none() || fields.fuel_volume.is_none() {
                    return Err(CoreError::Validation(
                        "end_mileage and fuel_volume are required to complete a trip".to_string(),
                    ));
                }
            }
            _ => {}
        }

        if let Some(fuel) = fields.fuel_volume {
            if fuel < 0.0 {
                return Err(CoreError::Validation(
                    "fuel_volume must not be negative".to_string(),
                ));
            }
        }

        if let (Some(start), Some(end)) = (start, fields.end_mileage) {
            if end < start {
                return Err(CoreError::Validation(format!(
                    "end_mileage ({end}) is below start_mileage ({start})"
                )));
            }
        }

        Ok(())
    }
}

/// Distance covered, treating an unset start reading as zero.
///
/// May be negative; callers decide whether that is acceptable.
pub fn trip_distance(start_mileage: Option<Kilometres>, end_mileage: Kilometres) -> Kilometres {
    end_mileage - start_mileage.unwrap_or(0.0)
}

/// Fields written when a trip starts.
pub fn start_fields(start_mileage: Kilometres, now: Timestamp) -> TripFields {
    TripFields {
        start_mileage: Some(start_mileage),
        actual_departure: Some(now),
        ..TripFields::default()
    }
}

/// Fields written when a trip completes, including the derived distance.
pub fn completion_fields(
    current_start: Option<Kilometres>,
    end_mileage: Kilometres,
    fuel_volume: f64,
    arrival: Timestamp,
    notes: Option<String>,
) -> TripFields {
    TripFields {
        end_mileage: Some(end_mileage),
        fuel_volume: Some(fuel_volume),
        actual_arrival: Some(arrival),
        distance: Some(trip_distance(current_start, end_mileage)),
        completion_notes: notes,
        ..TripFields::default()
    }
}

/// Litres per 100 km, rounded to two decimals.
///
/// Returns `None` when either reading is missing or the distance is not
/// positive.
pub fn consumption_per_100km(
    fuel_volume: Option<f64>,
    start_mileage: Option<Kilometres>,
    end_mileage: Option<Kilometres>,
) -> Option<f64> {
    let (fuel, start, end) = (fuel_volume?, start_mileage?, end_mileage?);
    let distance = end - start;
    if distance <= 0.0 {
        return None;
    }
    Some(round2(fuel / distance * 100.0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::state_machine::*;
    use super::*;
    use chrono::Utc;

    fn snapshot(status: TripStatus, start: Option<f64>) -> TripSnapshot {
        TripSnapshot {
            status,
            start_mileage: start,
        }
    }

    // -----------------------------------------------------------------------
    // Transition table
    // -----------------------------------------------------------------------

    #[test]
    fn pending_to_in_progress() {
        assert!(can_transition(TripStatus::Pending, TripStatus::InProgress));
    }

    #[test]
    fn pending_to_cancelled() {
        assert!(can_transition(TripStatus::Pending, TripStatus::Cancelled));
    }

    #[test]
    fn in_progress_to_completed_and_cancelled() {
        assert!(can_transition(TripStatus::InProgress, TripStatus::Completed));
        assert!(can_transition(TripStatus::InProgress, TripStatus::Cancelled));
    }

    #[test]
    fn pending_cannot_skip_to_completed() {
        assert!(!can_transition(TripStatus::Pending, TripStatus::Completed));
    }

    #[test]
    fn terminal_states_have_no_transitions() {
        assert!(valid_transitions(TripStatus::Completed).is_empty());
        assert!(valid_transitions(TripStatus::Cancelled).is_empty());
        assert!(TripStatus::Cancelled.is_terminal());
    }

    #[test]
    fn validate_transition_names_both_states() {
        let msg = validate_transition(TripStatus::Completed, TripStatus::Pending).unwrap_err();
        assert_eq!(msg, "Invalid trip transition: completed -> pending");
    }

    // -----------------------------------------------------------------------
    // Policies
    // -----------------------------------------------------------------------

    #[test]
    fn permissive_accepts_anything() {
        let fields = TripFields {
            end_mileage: Some(10.0),
            ..TripFields::default()
        };
        let current = snapshot(TripStatus::Pending, Some(500.0));
        assert!(TransitionPolicy::Permissive
            .check(&current, TripStatus::Completed, &fields)
            .is_ok());
        assert_eq!(TransitionPolicy::default(), TransitionPolicy::Permissive);
    }

    #[test]
    fn strict_rejects_transition_outside_table() {
        let current = snapshot(TripStatus::Pending, None);
        let err = TransitionPolicy::Strict
            .check(&current, TripStatus::Completed, &TripFields::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn strict_requires_start_mileage_to_start() {
        let current = snapshot(TripStatus::Pending, None);
        assert!(TransitionPolicy::Strict
            .check(&current, TripStatus::InProgress, &TripFields::default())
            .is_err());
        let fields = start_fields(1000.0, Utc::now());
        assert!(TransitionPolicy::Strict
            .check(&current, TripStatus::InProgress, &fields)
            .is_ok());
    }

    #[test]
    fn strict_requires_end_mileage_and_fuel_to_complete() {
        let current = snapshot(TripStatus::InProgress, Some(1000.0));
        let fields = TripFields {
            end_mileage: Some(1600.0),
            ..TripFields::default()
        };
        assert!(TransitionPolicy::Strict
            .check(&current, TripStatus::Completed, &fields)
            .is_err());
    }

    #[test]
    fn strict_rejects_end_below_start() {
        let current = snapshot(TripStatus::InProgress, Some(1000.0));
        let fields = completion_fields(Some(1000.0), 900.0, 20.0, Utc::now(), None);
        let err = TransitionPolicy::Strict
            .check(&current, TripStatus::Completed, &fields)
            .unwrap_err();
        match err {
            CoreError::Validation(msg) => assert!(msg.contains("below start_mileage")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn strict_accepts_well_formed_completion() {
        let current = snapshot(TripStatus::InProgress, Some(1000.0));
        let fields = completion_fields(Some(1000.0), 1600.0, 40.0, Utc::now(), None);
        assert!(TransitionPolicy::Strict
            .check(&current, TripStatus::Completed, &fields)
            .is_ok());
    }

    // -----------------------------------------------------------------------
    // Arithmetic
    // -----------------------------------------------------------------------

    #[test]
    fn completion_computes_distance_from_start() {
        let fields = completion_fields(Some(1000.0), 1600.0, 40.0, Utc::now(), Some("ok".into()));
        assert_eq!(fields.distance, Some(600.0));
        assert_eq!(fields.fuel_volume, Some(40.0));
        assert_eq!(fields.completion_notes.as_deref(), Some("ok"));
        assert!(fields.start_mileage.is_none());
    }

    #[test]
    fn missing_start_counts_as_zero() {
        assert_eq!(trip_distance(None, 250.0), 250.0);
    }

    #[test]
    fn negative_distance_is_representable() {
        assert_eq!(trip_distance(Some(1000.0), 900.0), -100.0);
    }

    #[test]
    fn consumption_is_rounded_to_two_decimals() {
        assert_eq!(
            consumption_per_100km(Some(40.0), Some(1000.0), Some(1600.0)),
            Some(6.67)
        );
    }

    #[test]
    fn consumption_guards_against_zero_distance() {
        assert_eq!(
            consumption_per_100km(Some(40.0), Some(1000.0), Some(1000.0)),
            None
        );
        assert_eq!(consumption_per_100km(Some(40.0), None, Some(1000.0)), None);
    }

    #[test]
    fn start_fields_stamp_departure() {
        let now = Utc::now();
        let fields = start_fields(1000.0, now);
        assert_eq!(fields.start_mileage, Some(1000.0));
        assert_eq!(fields.actual_departure, Some(now));
    }
}
