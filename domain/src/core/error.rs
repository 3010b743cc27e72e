//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid object id: {0:?}")]
    InvalidId(String),

    #[error("Invalid property path: {0:?}")]
    InvalidPropertyPath(String),

    #[error("Property '{path}' cannot be set: {reason}")]
    PropertyConflict { path: String, reason: String },
}
