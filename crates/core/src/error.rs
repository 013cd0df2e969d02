use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The first write of a dependent pair committed but the second did not.
    /// The two records may now disagree until the caller reconciles them.
    #[error("Partial write during {operation}: {committed} committed, {failed} failed: {reason}")]
    PartialWrite {
        operation: &'static str,
        committed: String,
        failed: String,
        reason: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound { entity, id }
    }
}
