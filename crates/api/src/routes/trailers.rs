use axum::routing::{get, post};
use axum::Router;

use crate::handlers::trailer;
use crate::state::AppState;

/// Routes mounted at `/trailers`.
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
        .route("/", get(trailer::list).post(trailer::create))
        .route(
            "/{id}",
            get(trailer::get_by_id)
                .put(trailer::update)
                .delete(trailer::delete),
        )
        .route("/{id}/assign", post(trailer::assign))
        .route("/{id}/unassign", post(trailer::unassign))
}
