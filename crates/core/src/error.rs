use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Structural request problems (missing fields, password mismatch).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Well-formed input carrying a value outside its allowed set.
    #[error("Unprocessable value: {0}")]
    Unprocessable(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The server is in a state that cannot satisfy the request (e.g. no
    /// user accounts exist yet). The message is shown to the caller.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] with an owned id.
    pub fn not_found(entity: &'static str, id: impl Into<DbId>) -> Self {
        CoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}
