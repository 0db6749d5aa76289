use std::io::Read;
use std::sync::Arc;

use crate::error::{CasError, CasResult};

/// Read side of a content-addressed store.
///
/// Content is looked up solely by its integrity string
/// (`"<algorithm>-<base64(digest)>"`). Implementations must:
/// - return [`CasError::NotFound`] for absent content, and only for that
/// - propagate every I/O error, never silently ignore it
pub trait CasReader: Send + Sync {
    /// Open the content stored under `sri` as a byte stream.
    fn open(&self, sri: &str) -> CasResult<Box<dyn Read + Send>>;

    /// Check whether content is stored under `sri`.
    ///
    /// The default implementation opens the content and drops the stream.
    fn exists(&self, sri: &str) -> CasResult<bool> {
        match self.open(sri) {
            Ok(_) => Ok(true),
            Err(CasError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Write side of a content-addressed store.
pub trait CasWriter: Send + Sync {
    /// Store the bytes read from `payload` under `sri`.
    ///
    /// The content is durable once this returns `Ok`. Writing content that is
    /// already present is a no-op.
    fn write(&self, sri: &str, payload: &mut dyn Read) -> CasResult<()>;
}

/// A store that can both read and write.
pub trait Cas: CasReader + CasWriter {}

impl<T: CasReader + CasWriter + ?Sized> Cas for T {}

impl<T: CasReader + ?Sized> CasReader for &T {
    fn open(&self, sri: &str) -> CasResult<Box<dyn Read + Send>> {
        (**self).open(sri)
    }

    fn exists(&self, sri: &str) -> CasResult<bool> {
        (**self).exists(sri)
    }
}

impl<T: CasWriter + ?Sized> CasWriter for &T {
    fn write(&self, sri: &str, payload: &mut dyn Read) -> CasResult<()> {
        (**self).write(sri, payload)
    }
}

impl<T: CasReader + ?Sized> CasReader for Arc<T> {
    fn open(&self, sri: &str) -> CasResult<Box<dyn Read + Send>> {
        (**self).open(sri)
    }

    fn exists(&self, sri: &str) -> CasResult<bool> {
        (**self).exists(sri)
    }
}

impl<T: CasWriter + ?Sized> CasWriter for Arc<T> {
    fn write(&self, sri: &str, payload: &mut dyn Read) -> CasResult<()> {
        (**self).write(sri, payload)
    }
}
