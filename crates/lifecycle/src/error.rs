use fleetops_core::error::CoreError;

/// Errors raised by lifecycle services and stores.
#[derive(Debug, thiserror::Error)]
pub enum FleetError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type FleetResult<T> = Result<T, FleetError>;
