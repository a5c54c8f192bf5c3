//! Error types for the Oracle backend.

use oxide_orm::OrmError;

/// Errors raised while compiling for, or decoding rows from, Oracle.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// Failure from the underlying query compiler, passed through as-is.
    #[error(transparent)]
    Orm(#[from] OrmError),

    /// A value read for a decimal field is not an exact decimal.
    #[error("invalid decimal value '{input}': {source}")]
    InvalidDecimal {
        /// The formatted text that failed to parse.
        input: String,
        /// Parser error.
        #[source]
        source: rust_decimal::Error,
    },

    /// A value of this driver type cannot be read as a decimal.
    #[error("cannot convert {0} value to decimal")]
    NotNumeric(&'static str),

    /// The configured row number alias cannot be used in generated SQL.
    #[error("invalid row number alias '{alias}': {reason}")]
    InvalidAlias {
        alias: String,
        reason: &'static str,
    },

    /// The driver failed to read a large object.
    #[error("large object read failed: {0}")]
    Lob(String),
}

/// Result type for Oracle backend operations.
pub type Result<T> = std::result::Result<T, OracleError>;
