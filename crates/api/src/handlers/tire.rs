//! Handlers for the `/tires` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use fleetops_core::error::CoreError;
use fleetops_core::types::DbId;
use fleetops_db::models::tire::{AssignTire, CreateTire, Tire, TireListQuery, UpdateTire};
use fleetops_lifecycle::{assignment, lookup};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/tires
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTire>,
) -> AppResult<(StatusCode, Json<Tire>)> {
    input.validate()?;
    let tire = state.store.create_tire(&input).await?;
    tracing::info!(tire_id = tire.id, serial_number = %tire.serial_number, "Tire created");
    Ok((StatusCode::CREATED, Json(tire)))
}

/// GET /api/v1/tires
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TireListQuery>,
) -> AppResult<Json<DataResponse<Vec<Tire>>>> {
    let tires = state.store.list_tires(&params).await?;
    Ok(Json(DataResponse { data: tires }))
}

/// GET /api/v1/tires/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Tire>> {
    Ok(Json(lookup::tire(state.store(), id).await?))
}

/// PUT /api/v1/tires/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTire>,
) -> AppResult<Json<Tire>> {
    input.validate()?;
    let tire = state
        .store
        .update_tire(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Tire", id }))?;
    Ok(Json(tire))
}

/// DELETE /api/v1/tires/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if state.store.delete_tire(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Tire", id }))
    }
}

/// POST /api/v1/tires/{id}/assign
pub async fn assign(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignTire>,
) -> AppResult<Json<DataResponse<Tire>>> {
    let tire =
        assignment::assign_tire(state.store(), id, input.truck_id, input.position, Utc::now())
            .await?;
    Ok(Json(DataResponse { data: tire }))
}

/// POST /api/v1/tires/{id}/unassign
pub async fn unassign(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Tire>>> {
    let tire = assignment::unassign_tire(state.store(), id).await?;
    Ok(Json(DataResponse { data: tire }))
}
