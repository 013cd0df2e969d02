use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tire;
use crate::state::AppState;

/// Routes mounted at `/tires`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// POST   /{id}/assign      -> assign
/// POST   /{id}/unassign    -> unassign
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tire::list).post(tire::create))
        .route(
            "/{id}",
            get(tire::get_by_id).put(tire::update).delete(tire::delete),
        )
        .route("/{id}/assign", post(tire::assign))
        .route("/{id}/unassign", post(tire::unassign))
}
