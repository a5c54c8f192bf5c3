//! Error types for the ORM.

use thiserror::Error;

/// ORM-specific errors.
#[derive(Debug, Error)]
pub enum OrmError {
    /// A field name did not resolve against the model.
    #[error("invalid field: {0}")]
    InvalidField(String),

    /// Query building error.
    #[error("query error: {0}")]
    QueryError(String),
}

/// Result type alias for ORM operations.
pub type Result<T> = std::result::Result<T, OrmError>;
