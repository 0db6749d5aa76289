//! Content-integrity addressing for abstractfs.
//!
//! Every regular file in a snapshot is referenced by an integrity string
//! (`"<algorithm>-<base64(digest)>"`, the Subresource Integrity format)
//! instead of being stored inline. This crate parses, computes, and verifies
//! those strings.
//!
//! # Key Types
//!
//! - [`Algorithm`] -- the fixed set of supported digest algorithms
//! - [`Integrity`] -- an algorithm plus the raw digest bytes
//!
//! Hashing always streams the payload through the digest; payloads are never
//! buffered whole.

pub mod algorithm;
pub mod error;
pub mod integrity;

pub use algorithm::Algorithm;
pub use error::{SriError, SriResult};
pub use integrity::Integrity;
