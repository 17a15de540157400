use std::fmt::Display;

/// Domain error taxonomy shared by the engine and the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid transition: project cannot move from {from} to {to}")]
    InvalidTransition { from: &'static str, to: &'static str },

    #[error("Capacity exceeded: at most {limit} open projects are allowed")]
    CapacityExceeded { limit: i64 },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Signature invalid: {0}")]
    SignatureInvalid(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`] with any displayable key.
    pub fn not_found(entity: &'static str, id: impl Display) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
