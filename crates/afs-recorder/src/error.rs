use afs_cas::CasError;
use afs_sri::SriError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecorderError {
    /// A record of one type was found where the other was required.
    #[error("expected record type {expected:#04x}, got {actual:#04x}")]
    UnexpectedRecordType { expected: u8, actual: u8 },

    /// The stream ended inside a record header.
    #[error("truncated record header: got {got} of 9 bytes")]
    TruncatedHeader { got: usize },

    /// The stream ended cleanly where an item was required.
    #[error("end of stream")]
    EndOfStream,

    #[error("invalid integrity record: {0}")]
    InvalidIntegrity(#[from] SriError),

    #[error("integrity record is not valid UTF-8")]
    InvalidUtf8,

    /// A declared record length is larger than the protocol allows.
    #[error("record length {0} is too large")]
    LengthOverflow(u64),

    #[error("store error: {0}")]
    Cas(#[from] CasError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A regular file's content is not in the store it is recorded from.
    #[error("content missing from store: {0}")]
    PayloadMissing(String),

    /// A payload source ended before its declared size.
    #[error("payload for {sri} ended after {actual} of {expected} bytes")]
    ShortPayload {
        sri: String,
        expected: u64,
        actual: u64,
    },
}

impl RecorderError {
    /// Returns `true` for [`RecorderError::EndOfStream`].
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }
}

pub type RecorderResult<T> = Result<T, RecorderError>;
