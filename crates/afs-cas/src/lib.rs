//! Content-addressed store interfaces for abstractfs.
//!
//! Payloads are stored and retrieved solely by their integrity string. The
//! rest of the workspace depends only on the capability traits here, never
//! on a concrete backend.
//!
//! # Key Types
//!
//! - [`CasReader`] / [`CasWriter`] -- open-by-integrity and write-by-integrity
//! - [`Cas`] -- anything that is both
//! - [`InMemoryCas`] -- `HashMap`-based store for tests and embedding
//! - [`EmptyCas`] -- a reader that never finds anything
//! - [`CasConfig`] -- store configuration from TOML or string options

pub mod config;
pub mod empty;
pub mod error;
pub mod memory;
pub mod traits;

pub use config::CasConfig;
pub use empty::EmptyCas;
pub use error::{CasError, CasResult};
pub use memory::InMemoryCas;
pub use traits::{Cas, CasReader, CasWriter};
