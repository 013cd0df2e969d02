use std::sync::Arc;

use fleetops_lifecycle::FleetStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Record storage: PostgreSQL in production, in-memory in tests.
    pub store: Arc<dyn FleetStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Borrow the store as the lifecycle services expect it.
    pub fn store(&self) -> &dyn FleetStore {
        self.store.as_ref()
    }
}
