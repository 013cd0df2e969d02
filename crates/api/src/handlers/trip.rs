//! Handlers for the `/trips` resource and its lifecycle actions.
//!
//! Status changes go through [`fleetops_lifecycle::trips`] with the
//! transition policy from [`ServerConfig`](crate::config::ServerConfig).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use fleetops_core::error::CoreError;
use fleetops_core::types::DbId;
use fleetops_db::models::trip::{
    CompleteTrip, CreateTrip, StartTrip, Trip, TripListQuery, TripSummary, UpdateTrip,
    UpdateTripStatus,
};
use fleetops_lifecycle::{lookup, trips};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/trips
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTrip>,
) -> AppResult<(StatusCode, Json<Trip>)> {
    input.validate()?;
    let trip = trips::schedule_trip(state.store(), &input).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

/// GET /api/v1/trips
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TripListQuery>,
) -> AppResult<Json<DataResponse<Vec<Trip>>>> {
    let trips = state.store.list_trips(&params).await?;
    Ok(Json(DataResponse { data: trips }))
}

/// GET /api/v1/trips/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Trip>> {
    Ok(Json(lookup::trip(state.store(), id).await?))
}

/// PUT /api/v1/trips/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTrip>,
) -> AppResult<Json<Trip>> {
    input.validate()?;
    let trip = state
        .store
        .update_trip(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Trip", id }))?;
    Ok(Json(trip))
}

/// DELETE /api/v1/trips/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if state.store.delete_trip(id).await? {
        tracing::info!(trip_id = id, "Trip deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Trip", id }))
    }
}

/// PUT /api/v1/trips/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTripStatus>,
) -> AppResult<Json<DataResponse<Trip>>> {
    input.validate()?;
    let (status, fields) = input.into_parts();
    let trip = trips::update_trip_status(
        state.store(),
        state.config.trip_transitions,
        id,
        status,
        &fields,
    )
    .await?;
    Ok(Json(DataResponse { data: trip }))
}

/// POST /api/v1/trips/{id}/start
pub async fn start(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StartTrip>,
) -> AppResult<Json<DataResponse<Trip>>> {
    input.validate()?;
    let trip = trips::start_trip(
        state.store(),
        state.config.trip_transitions,
        id,
        input.start_mileage,
        Utc::now(),
    )
    .await?;
    Ok(Json(DataResponse { data: trip }))
}

/// POST /api/v1/trips/{id}/complete
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CompleteTrip>,
) -> AppResult<Json<DataResponse<Trip>>> {
    input.validate()?;
    let trip = trips::complete_trip(
        state.store(),
        state.config.trip_transitions,
        id,
        input,
        Utc::now(),
    )
    .await?;
    Ok(Json(DataResponse { data: trip }))
}

/// GET /api/v1/trips/{id}/summary
pub async fn summary(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TripSummary>>> {
    let summary = trips::trip_summary(state.store(), id).await?;
    Ok(Json(DataResponse { data: summary }))
}
