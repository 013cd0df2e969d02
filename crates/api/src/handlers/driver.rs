//! Handlers for the `/drivers` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fleetops_core::error::CoreError;
use fleetops_core::types::DbId;
use fleetops_db::models::driver::{CreateDriver, Driver, DriverListQuery, UpdateDriver};
use fleetops_lifecycle::lookup;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/drivers
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateDriver>,
) -> AppResult<(StatusCode, Json<Driver>)> {
    input.validate()?;
    let driver = state.store.create_driver(&input).await?;
    tracing::info!(driver_id = driver.id, "Driver created");
    Ok((StatusCode::CREATED, Json(driver)))
}

/// GET /api/v1/drivers
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<DriverListQuery>,
) -> AppResult<Json<DataResponse<Vec<Driver>>>> {
    let drivers = state.store.list_drivers(&params).await?;
    Ok(Json(DataResponse { data: drivers }))
}

/// GET /api/v1/drivers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Driver>> {
    Ok(Json(lookup::driver(state.store(), id).await?))
}

/// PUT /api/v1/drivers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDriver>,
) -> AppResult<Json<Driver>> {
    input.validate()?;
    let driver = state
        .store
        .update_driver(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Driver",
            id,
        }))?;
    Ok(Json(driver))
}

/// DELETE /api/v1/drivers/{id}
///
/// Refused with 409 while any trip references the driver.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if state.store.delete_driver(id).await? {
        tracing::info!(driver_id = id, "Driver deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Driver",
            id,
        }))
    }
}
