//! Route definitions for the `/trips` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::trip;
use crate::state::AppState;

/// Routes mounted at `/trips`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create (schedule)
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update (schedule fields)
/// DELETE /{id}             -> delete
/// PUT    /{id}/status      -> update_status
/// POST   /{id}/start       -> start
/// POST   /{id}/complete    -> complete
/// GET    /{id}/summary     -> summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(trip::list).post(trip::create))
        .route(
            "/{id}",
            get(trip::get_by_id).put(trip::update).delete(trip::delete),
        )
        .route("/{id}/status", put(trip::update_status))
        .route("/{id}/start", post(trip::start))
        .route("/{id}/complete", post(trip::complete))
        .route("/{id}/summary", get(trip::summary))
}
