use afs_sri::SriError;

/// Errors from content store operations and store configuration.
#[derive(Debug, thiserror::Error)]
pub enum CasError {
    /// No content is stored under the integrity string.
    #[error("content not found: {0}")]
    NotFound(String),

    /// Written bytes do not hash to the integrity string they were written under.
    #[error("integrity mismatch for {expected}: computed {computed}")]
    IntegrityMismatch { expected: String, computed: String },

    /// The key is not a parseable integrity string.
    #[error("invalid integrity string {sri:?}: {source}")]
    InvalidIntegrity {
        sri: String,
        #[source]
        source: SriError,
    },

    /// I/O error from the payload stream or the backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store refuses writes.
    #[error("store is read-only")]
    ReadOnly,

    #[error("unknown option {key:?} (valid options are {valid:?})")]
    UnknownOption {
        key: String,
        valid: Vec<&'static str>,
    },

    #[error("invalid value {value:?} for option {key:?}: {reason}")]
    InvalidOptionValue {
        key: String,
        value: String,
        reason: String,
    },

    /// Configuration text could not be parsed or produced.
    #[error("config error: {0}")]
    Config(String),
}

impl CasError {
    /// Returns `true` for [`CasError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result alias for store operations.
pub type CasResult<T> = Result<T, CasError>;
