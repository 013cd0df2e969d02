//! Handlers for `/maintenance`: records, rules, and the two derived views
//! (upcoming work and assets due for service).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use fleetops_core::error::CoreError;
use fleetops_core::maintenance::DueItem;
use fleetops_core::types::DbId;
use fleetops_db::models::maintenance::{
    CreateMaintenanceRecord, CreateMaintenanceRule, MaintenanceRecord,
    MaintenanceRecordListQuery, MaintenanceRule, MaintenanceRuleListQuery,
    UpdateMaintenanceRecord, UpdateMaintenanceRule,
};
use fleetops_lifecycle::{lookup, maintenance};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::AsOfParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// POST /api/v1/maintenance/records
pub async fn create_record(
    State(state): State<AppState>,
    Json(input): Json<CreateMaintenanceRecord>,
) -> AppResult<(StatusCode, Json<MaintenanceRecord>)> {
    input.validate()?;
    let record = maintenance::record_maintenance(state.store(), &input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/maintenance/records
pub async fn list_records(
    State(state): State<AppState>,
    Query(params): Query<MaintenanceRecordListQuery>,
) -> AppResult<Json<DataResponse<Vec<MaintenanceRecord>>>> {
    let records = state.store.list_records(&params).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/maintenance/records/{id}
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MaintenanceRecord>> {
    Ok(Json(lookup::maintenance_record(state.store(), id).await?))
}

/// PUT /api/v1/maintenance/records/{id}
pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMaintenanceRecord>,
) -> AppResult<Json<MaintenanceRecord>> {
    input.validate()?;
    let record = maintenance::update_maintenance_record(state.store(), id, &input).await?;
    Ok(Json(record))
}

/// DELETE /api/v1/maintenance/records/{id}
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if state.store.delete_record(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "MaintenanceRecord",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// GET /api/v1/maintenance/upcoming
pub async fn upcoming(
    State(state): State<AppState>,
    Query(params): Query<AsOfParams>,
) -> AppResult<Json<DataResponse<Vec<MaintenanceRecord>>>> {
    let now = params.at.unwrap_or_else(Utc::now);
    let records = maintenance::get_upcoming_maintenance(state.store(), now).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/maintenance/due
pub async fn due(
    State(state): State<AppState>,
    Query(params): Query<AsOfParams>,
) -> AppResult<Json<DataResponse<Vec<DueItem>>>> {
    let now = params.at.unwrap_or_else(Utc::now);
    let due = maintenance::check_maintenance_needed(state.store(), now).await?;
    Ok(Json(DataResponse { data: due }))
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// POST /api/v1/maintenance/rules
pub async fn create_rule(
    State(state): State<AppState>,
    Json(input): Json<CreateMaintenanceRule>,
) -> AppResult<(StatusCode, Json<MaintenanceRule>)> {
    input.validate()?;
    let rule = state.store.create_rule(&input).await?;
    tracing::info!(rule_id = rule.id, target_type = %rule.target_type, "Maintenance rule created");
    Ok((StatusCode::CREATED, Json(rule)))
}

/// GET /api/v1/maintenance/rules
pub async fn list_rules(
    State(state): State<AppState>,
    Query(params): Query<MaintenanceRuleListQuery>,
) -> AppResult<Json<DataResponse<Vec<MaintenanceRule>>>> {
    let rules = state.store.list_rules(&params).await?;
    Ok(Json(DataResponse { data: rules }))
}

/// GET /api/v1/maintenance/rules/{id}
pub async fn get_rule(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MaintenanceRule>> {
    Ok(Json(lookup::maintenance_rule(state.store(), id).await?))
}

/// PUT /api/v1/maintenance/rules/{id}
pub async fn update_rule(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMaintenanceRule>,
) -> AppResult<Json<MaintenanceRule>> {
    input.validate()?;
    let rule = state
        .store
        .update_rule(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MaintenanceRule",
            id,
        }))?;
    Ok(Json(rule))
}

/// DELETE /api/v1/maintenance/rules/{id}
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if state.store.delete_rule(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "MaintenanceRule",
            id,
        }))
    }
}
