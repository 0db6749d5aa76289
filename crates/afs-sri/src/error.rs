use thiserror::Error;

use crate::algorithm::Algorithm;

/// Errors produced while parsing, computing, or verifying integrity strings.
#[derive(Debug, Error)]
pub enum SriError {
    /// The algorithm token is not one of the supported algorithms.
    #[error("invalid algorithm: {0:?}")]
    InvalidAlgorithm(String),

    /// The digest part is not valid standard base64.
    #[error("invalid digest encoding: {0}")]
    InvalidEncoding(String),

    /// The decoded digest does not have the algorithm's fixed length.
    #[error("invalid hash length for {algorithm}: expected {expected}, got {actual}")]
    LengthMismatch {
        algorithm: Algorithm,
        expected: usize,
        actual: usize,
    },

    /// The recomputed digest differs from the stored one.
    #[error("hash mismatch for {algorithm}: expected {expected}, computed {computed}")]
    Mismatch {
        algorithm: Algorithm,
        expected: String,
        computed: String,
    },

    /// Reading the payload failed while hashing.
    #[error("hashing: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for integrity operations.
pub type SriResult<T> = Result<T, SriError>;
