//! The recorder stream protocol.
//!
//! A recorder stream carries content-addressed payloads between stores with
//! no directory structure: a sequence of (integrity string, payload) items,
//! each framed as two type-length-value records. See [`stream`] for the wire
//! format.
//!
//! - [`encode`] / [`decode_next`] -- one item at a time, payloads streamed
//! - [`Recorder`] -- drains a stream into a [`CasWriter`](afs_cas::CasWriter)
//! - [`record_tree`] -- produces a stream from a tree's regular files
//!
//! Decoding is strictly sequential: the [`PayloadReader`] of one item must
//! be finished, closed, or dropped before the next item is decoded.

pub mod error;
pub mod record;
pub mod recorder;
pub mod stream;

pub use error::{RecorderError, RecorderResult};
pub use record::record_tree;
pub use recorder::Recorder;
pub use stream::{decode, decode_next, encode, encode_bytes, PayloadReader};
