use std::io::Read;

use crate::error::{CasError, CasResult};
use crate::traits::CasReader;

/// A store that holds nothing: every lookup is [`CasError::NotFound`].
///
/// Used where a reader is required but no content is expected to be read,
/// e.g. recording a tree that only has directories and symlinks.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyCas;

impl CasReader for EmptyCas {
    fn open(&self, sri: &str) -> CasResult<Box<dyn Read + Send>> {
        Err(CasError::NotFound(sri.to_string()))
    }
}
