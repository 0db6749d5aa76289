use thiserror::Error;

/// Errors produced while decoding the data model from its manifest form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid size {0:?}: expected a decimal integer")]
    InvalidSize(String),

    #[error("invalid mtime {0:?}: expected an RFC 3339 timestamp")]
    InvalidMtime(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for type operations.
pub type TypeResult<T> = Result<T, TypeError>;
