//! Maintenance due-ness evaluation.
//!
//! Pure logic, no database access. The caller loads active rules, the
//! current instances of each rule's target class and each instance's
//! baseline record, then asks this module which instances are due.

use serde::Serialize;

use crate::assets::{AssetKind, AssetRef};
use crate::types::{DbId, Kilometres, Timestamp};

define_text_enum! {
    /// Maintenance record lifecycle status.
    MaintenanceStatus ("maintenance status") {
        Scheduled = "scheduled",
        InProgress = "in_progress",
        Completed = "completed",
        Cancelled = "cancelled",
    }
}

define_text_enum! {
    /// What a rule's `interval_value` measures.
    ConditionType ("condition type") {
        /// Kilometres since the baseline.
        Mileage = "mileage",
        /// Whole days since the baseline.
        Time = "time",
        /// Either threshold is enough.
        Both = "both",
    }
}

impl ConditionType {
    fn checks_mileage(self) -> bool {
        matches!(self, Self::Mileage | Self::Both)
    }

    fn checks_time(self) -> bool {
        matches!(self, Self::Time | Self::Both)
    }
}

/// A rule definition used by the evaluator.
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub description: Option<String>,
    pub interval_value: f64,
    pub condition_type: ConditionType,
}

/// The current state of one asset instance.
#[derive(Debug, Clone)]
pub struct AssetSnapshot {
    pub target: AssetRef,
    /// Plate number for trucks and trailers, serial number for tires.
    pub label: String,
    pub current_mileage: Kilometres,
    pub created_at: Timestamp,
}

/// The most recent completed maintenance of an asset.
#[derive(Debug, Clone, Copy)]
pub struct Baseline {
    pub performed_on: Timestamp,
    /// Odometer reading captured with the record, if any.
    pub mileage_at_service: Option<Kilometres>,
}

/// Which thresholds an asset has reached for a rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueCheck {
    pub by_mileage: bool,
    pub by_time: bool,
}

impl DueCheck {
    /// Due when either evaluated threshold was reached.
    pub fn is_due(self) -> bool {
        self.by_mileage || self.by_time
    }
}

/// One asset flagged by one rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DueItem {
    pub rule: String,
    pub target_type: AssetKind,
    pub target_id: DbId,
    pub target_name: String,
    pub description: Option<String>,
}

/// Whole days elapsed between `from` and `now`, truncated toward zero.
pub fn elapsed_days(from: Timestamp, now: Timestamp) -> i64 {
    now.signed_duration_since(from).num_days()
}

/// Evaluate one rule against one asset.
///
/// Without a baseline the mileage is measured from zero and the time from
/// the asset's creation.
pub fn check_due(
    rule: &Rule,
    asset: &AssetSnapshot,
    baseline: Option<&Baseline>,
    now: Timestamp,
) -> DueCheck {
    let mut check = DueCheck::default();

    if rule.condition_type.checks_mileage() {
        let baseline_mileage = baseline.and_then(|b| b.mileage_at_service).unwrap_or(0.0);
        check.by_mileage = asset.current_mileage - baseline_mileage >= rule.interval_value;
    }

    if rule.condition_type.checks_time() {
        let since = baseline.map_or(asset.created_at, |b| b.performed_on);
        check.by_time = elapsed_days(since, now) as f64 >= rule.interval_value;
    }

    check
}

/// Build the due-list entry for an asset flagged by `rule`.
pub fn due_item(rule: &Rule, asset: &AssetSnapshot) -> DueItem {
    DueItem {
        rule: rule.name.clone(),
        target_type: asset.target.kind(),
        target_id: asset.target.id(),
        target_name: asset.label.clone(),
        description: rule.description.clone(),
    }
}

/// Evaluate a rule against every instance of its class.
pub fn evaluate_rule(
    rule: &Rule,
    assets: &[(AssetSnapshot, Option<Baseline>)],
    now: Timestamp,
) -> Vec<DueItem> {
    assets
        .iter()
        .filter(|(asset, baseline)| check_due(rule, asset, baseline.as_ref(), now).is_due())
        .map(|(asset, _)| due_item(rule, asset))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
