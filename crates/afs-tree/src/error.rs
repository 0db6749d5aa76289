use thiserror::Error;

/// Errors from tree construction.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The entry source failed; the build was aborted.
    #[error("reading source: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result alias for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
