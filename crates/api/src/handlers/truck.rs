//! Handlers for the `/trucks` resource, including driver assignment and the
//! trailer/tire back-views.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fleetops_core::error::CoreError;
use fleetops_core::types::DbId;
use fleetops_db::models::tire::{Tire, TireListQuery};
use fleetops_db::models::trailer::{Trailer, TrailerListQuery};
use fleetops_db::models::truck::{AssignDriver, CreateTruck, Truck, TruckListQuery, UpdateTruck};
use fleetops_lifecycle::{assignment, lookup};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/trucks
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTruck>,
) -> AppResult<(StatusCode, Json<Truck>)> {
    input.validate()?;
    let truck = state.store.create_truck(&input).await?;
    tracing::info!(truck_id = truck.id, plate_number = %truck.plate_number, "Truck created");
    Ok((StatusCode::CREATED, Json(truck)))
}

/// GET /api/v1/trucks
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TruckListQuery>,
) -> AppResult<Json<DataResponse<Vec<Truck>>>> {
    let trucks = state.store.list_trucks(&params).await?;
    Ok(Json(DataResponse { data: trucks }))
}

/// GET /api/v1/trucks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Truck>> {
    let truck = lookup::truck(state.store(), id).await?;
    Ok(Json(truck))
}

/// PUT /api/v1/trucks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTruck>,
) -> AppResult<Json<Truck>> {
    input.validate()?;
    let truck = state
        .store
        .update_truck(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Truck",
            id,
        }))?;
    Ok(Json(truck))
}

/// DELETE /api/v1/trucks/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = state.store.delete_truck(id).await?;
    if deleted {
        tracing::info!(truck_id = id, "Truck deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Truck",
            id,
        }))
    }
}

/// POST /api/v1/trucks/{id}/driver
pub async fn assign_driver(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignDriver>,
) -> AppResult<Json<DataResponse<Truck>>> {
    let truck = assignment::assign_driver(state.store(), id, input.driver_id).await?;
    Ok(Json(DataResponse { data: truck }))
}

/// DELETE /api/v1/trucks/{id}/driver
pub async fn unassign_driver(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Truck>>> {
    let truck = assignment::unassign_driver(state.store(), id).await?;
    Ok(Json(DataResponse { data: truck }))
}

/// GET /api/v1/trucks/{id}/trailers
pub async fn list_trailers(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<TrailerListQuery>,
) -> AppResult<Json<DataResponse<Vec<Trailer>>>> {
    let trailers = assignment::trailers_for_truck(state.store(), id, params).await?;
    Ok(Json(DataResponse { data: trailers }))
}

/// GET /api/v1/trucks/{id}/tires
pub async fn list_tires(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<TireListQuery>,
) -> AppResult<Json<DataResponse<Vec<Tire>>>> {
    let tires = assignment::tires_for_truck(state.store(), id, params).await?;
    Ok(Json(DataResponse { data: tires }))
}
