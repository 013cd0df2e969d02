//! Route definitions for the `/trucks` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::truck;
use crate::state::AppState;

/// Routes mounted at `/trucks`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// POST   /{id}/driver      -> assign_driver
/// DELETE /{id}/driver      -> unassign_driver
/// GET    /{id}/trailers    -> list_trailers
/// GET    /{id}/tires       -> list_tires
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(truck::list).post(truck::create))
        .route(
            "/{id}",
            get(truck::get_by_id)
                .put(truck::update)
                .delete(truck::delete),
        )
        .route(
            "/{id}/driver",
            post(truck::assign_driver).delete(truck::unassign_driver),
        )
        .route("/{id}/trailers", get(truck::list_trailers))
        .route("/{id}/tires", get(truck::list_tires))
}
