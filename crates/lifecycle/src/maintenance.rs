//! Maintenance scan and record keeping.
//!
//! [`check_maintenance_needed`] is read-only: it loads the active rules,
//! every instance of each rule's target class and each instance's baseline
//! record, then hands them to [`fleetops_core::maintenance::evaluate_rule`].
//! The scan runs outside any transaction and may observe writes made while
//! it is in progress.

use std::collections::HashMap;

use fleetops_core::assets::{AssetKind, AssetRef};
use fleetops_core::error::CoreError;
use fleetops_core::maintenance::{
    evaluate_rule, AssetSnapshot, Baseline, DueItem, MaintenanceStatus,
};
use fleetops_core::types::{DbId, Kilometres, Timestamp};
use fleetops_db::models::maintenance::{
    CreateMaintenanceRecord, MaintenanceRecord, UpdateMaintenanceRecord,
};

use crate::error::FleetResult;
use crate::lookup;
use crate::store::FleetStore;

type ClassSnapshot = Vec<(AssetSnapshot, Option<Baseline>)>;

/// Every (rule, asset) pair whose threshold has been reached at `now`.
///
/// The list is flat and not deduplicated: an asset flagged by two rules
/// appears twice.
pub async fn check_maintenance_needed(
    store: &dyn FleetStore,
    now: Timestamp,
) -> FleetResult<Vec<DueItem>> {
    let rules = store.active_rules().await?;
    let mut classes: HashMap<AssetKind, ClassSnapshot> = HashMap::new();
    let mut due = Vec::new();

    for rule in &rules {
        if !classes.contains_key(&rule.target_type) {
            let loaded = load_class(store, rule.target_type).await?;
            classes.insert(rule.target_type, loaded);
        }
        let assets = classes
            .get(&rule.target_type)
            .map(Vec::as_slice)
            .unwrap_or_default();
        due.extend(evaluate_rule(&rule.to_rule(), assets, now));
    }

    tracing::debug!(
        rules = rules.len(),
        classes = classes.len(),
        due = due.len(),
        "Maintenance scan finished"
    );
    Ok(due)
}

/// Scheduled records dated `now` or later, soonest first.
pub async fn get_upcoming_maintenance(
    store: &dyn FleetStore,
    now: Timestamp,
) -> FleetResult<Vec<MaintenanceRecord>> {
    store.upcoming_records(now).await
}

/// Store a maintenance record against an existing asset.
///
/// When the input carries no `mileage_at_service`, the target's current
/// odometer is recorded so later scans can measure from it.
pub async fn record_maintenance(
    store: &dyn FleetStore,
    input: &CreateMaintenanceRecord,
) -> FleetResult<MaintenanceRecord> {
    let target = input.target();
    let odometer = current_mileage(store, target).await?;
    let mileage_at_service = input.mileage_at_service.or(Some(odometer));

    let record = store.create_record(input, mileage_at_service).await?;
    tracing::info!(
        record_id = record.id,
        target = %target,
        status = %record.status,
        "Maintenance recorded"
    );
    Ok(record)
}

/// Apply a partial update to a maintenance record.
///
/// When the update moves the record to `completed` without a
/// `mileage_at_service`, the target's odometer at this moment replaces the
/// reading taken at booking time.
pub async fn update_maintenance_record(
    store: &dyn FleetStore,
    record_id: DbId,
    input: &UpdateMaintenanceRecord,
) -> FleetResult<MaintenanceRecord> {
    let current = lookup::maintenance_record(store, record_id).await?;

    let completing = input.status == Some(MaintenanceStatus::Completed)
        && current.status != MaintenanceStatus::Completed;
    let mut input = input.clone();
    if completing && input.mileage_at_service.is_none() {
        input.mileage_at_service = Some(current_mileage(store, current.target()).await?);
    }

    let record = store
        .update_record(record_id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("MaintenanceRecord", record_id))?;
    if completing {
        tracing::info!(
            record_id,
            target = %record.target(),
            mileage_at_service = ?record.mileage_at_service,
            "Maintenance completed"
        );
    }
    Ok(record)
}

/// Resolve `target` and read its odometer. Fails with `NotFound` when the
/// asset does not exist.
pub async fn current_mileage(store: &dyn FleetStore, target: AssetRef) -> FleetResult<Kilometres> {
    let mileage = match target {
        AssetRef::Truck(id) => lookup::truck(store, id).await?.current_mileage,
        AssetRef::Trailer(id) => lookup::trailer(store, id).await?.current_mileage,
        AssetRef::Tire(id) => lookup::tire(store, id).await?.current_mileage,
    };
    Ok(mileage)
}

/// Load every instance of `kind` together with its baseline record.
async fn load_class(store: &dyn FleetStore, kind: AssetKind) -> FleetResult<ClassSnapshot> {
    let snapshots: Vec<AssetSnapshot> = match kind {
        AssetKind::Truck => store
            .all_trucks()
            .await?
            .iter()
            .map(|t| t.asset_snapshot())
            .collect(),
        AssetKind::Trailer => store
            .all_trailers()
            .await?
            .iter()
            .map(|t| t.asset_snapshot())
            .collect(),
        AssetKind::Tire => store
            .all_tires()
            .await?
            .iter()
            .map(|t| t.asset_snapshot())
            .collect(),
    };

    let mut class = Vec::with_capacity(snapshots.len());
    for snapshot in snapshots {
        let baseline = store
            .latest_completed_record(snapshot.target)
            .await?
            .map(|record| record.baseline());
        class.push((snapshot, baseline));
    }
    Ok(class)
}
