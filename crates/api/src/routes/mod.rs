pub mod drivers;
pub mod health;
pub mod maintenance;
pub mod tires;
pub mod trailers;
pub mod trips;
pub mod trucks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /trucks                     CRUD, driver assignment, trailer/tire views
/// /trailers                   CRUD, assign/unassign
/// /tires                      CRUD, assign/unassign
/// /drivers                    CRUD
/// /trips                      CRUD, status/start/complete, summary
/// /maintenance/records        CRUD
/// /maintenance/rules          CRUD
/// /maintenance/upcoming       scheduled work
/// /maintenance/due            assets due for service
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/trucks", trucks::router())
        .nest("/trailers", trailers::router())
        .nest("/tires", tires::router())
        .nest("/drivers", drivers::router())
        .nest("/trips", trips::router())
        .nest("/maintenance", maintenance::router())
}
