//! Shared query parameter types for API handlers.

use fleetops_core::types::Timestamp;
use serde::Deserialize;

/// `?at=` override for the reference time of time-dependent reads.
///
/// Defaults to the time of the request. Any RFC 3339 offset is accepted, but
/// a `+` in the query string decodes to a space, so positive offsets must be
/// sent as `%2B` (or the value given in `Z` form).
#[derive(Debug, Default, Deserialize)]
pub struct AsOfParams {
    pub at: Option<Timestamp>,
}
