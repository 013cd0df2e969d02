//! Route definitions for `/maintenance`.

use axum::routing::get;
use axum::Router;

use crate::handlers::maintenance;
use crate::state::AppState;

/// Routes mounted at `/maintenance`.
///
/// ```text
/// GET    /records          -> list_records
/// POST   /records          -> create_record
/// GET    /records/{id}     -> get_record
/// PUT    /records/{id}     -> update_record
/// DELETE /records/{id}     -> delete_record
///
/// GET    /rules            -> list_rules
/// POST   /rules            -> create_rule
/// GET    /rules/{id}       -> get_rule
/// PUT    /rules/{id}       -> update_rule
/// DELETE /rules/{id}       -> delete_rule
///
/// GET    /upcoming         -> upcoming (?at=)
/// GET    /due              -> due (?at=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/records",
            get(maintenance::list_records).post(maintenance::create_record),
        )
        .route(
            "/records/{id}",
            get(maintenance::get_record)
                .put(maintenance::update_record)
                .delete(maintenance::delete_record),
        )
        .route(
            "/rules",
            get(maintenance::list_rules).post(maintenance::create_rule),
        )
        .route(
            "/rules/{id}",
            get(maintenance::get_rule)
                .put(maintenance::update_rule)
                .delete(maintenance::delete_rule),
        )
        .route("/upcoming", get(maintenance::upcoming))
        .route("/due", get(maintenance::due))
}
