//! Handlers for the `/trailers` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fleetops_core::error::CoreError;
use fleetops_core::types::DbId;
use fleetops_db::models::trailer::{
    AssignTrailer, CreateTrailer, Trailer, TrailerListQuery, UpdateTrailer,
};
use fleetops_lifecycle::{assignment, lookup};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/trailers
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTrailer>,
) -> AppResult<(StatusCode, Json<Trailer>)> {
    input.validate()?;
    let trailer = state.store.create_trailer(&input).await?;
    tracing::info!(trailer_id = trailer.id, "Trailer created");
    Ok((StatusCode::CREATED, Json(trailer)))
}

/// GET /api/v1/trailers
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TrailerListQuery>,
) -> AppResult<Json<DataResponse<Vec<Trailer>>>> {
    let trailers = state.store.list_trailers(&params).await?;
    Ok(Json(DataResponse { data: trailers }))
}

/// GET /api/v1/trailers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Trailer>> {
    Ok(Json(lookup::trailer(state.store(), id).await?))
}

/// PUT /api/v1/trailers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTrailer>,
) -> AppResult<Json<Trailer>> {
    input.validate()?;
    let trailer = state
        .store
        .update_trailer(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Trailer",
            id,
        }))?;
    Ok(Json(trailer))
}

/// DELETE /api/v1/trailers/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if state.store.delete_trailer(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Trailer",
            id,
        }))
    }
}

/// POST /api/v1/trailers/{id}/assign
pub async fn assign(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignTrailer>,
) -> AppResult<Json<DataResponse<Trailer>>> {
    let trailer = assignment::assign_trailer(state.store(), id, input.truck_id).await?;
    Ok(Json(DataResponse { data: trailer }))
}

/// POST /api/v1/trailers/{id}/unassign
pub async fn unassign(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Trailer>>> {
    let trailer = assignment::unassign_trailer(state.store(), id).await?;
    Ok(Json(DataResponse { data: trailer }))
}
