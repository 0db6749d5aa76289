//! Tree traversal and tree/flat conversion for abstractfs.
//!
//! The [`Tree`](afs_types::Tree) and [`Flat`](afs_types::Flat) forms of a
//! snapshot are converted into each other here:
//!
//! - [`flatten`] walks the tree breadth-first and rewrites every name to its
//!   full rooted path
//! - [`unflatten`] and [`from_source`] split rooted paths back into a parent
//!   directory and a bare name and [`insert`] each entry, creating missing
//!   ancestor directories on the way
//!
//! All operations are synchronous and assume exclusive access to the tree.
//! The round-trip contract is `unflatten(flatten(t)) == t` and
//! `flatten(unflatten(f)) == f` for inputs that pass validation.
//!
//! # Modules
//!
//! - [`traverse`] -- breadth-first and depth-first walks
//! - [`convert`] -- insert, lookup, flatten, unflatten, deep copy
//! - [`path`] -- the shared path normalization rules
//! - [`source`] -- the entry-source capability consumed by [`from_source`]
//! - [`index`] -- a separately owned path index over a tree

pub mod convert;
pub mod error;
pub mod index;
pub mod path;
pub mod source;
pub mod traverse;

#[cfg(test)]
pub(crate) mod testdata;

pub use convert::{deep_copy, deep_copy_into, flatten, from_source, get, get_mut, insert, unflatten};
pub use error::{TreeError, TreeResult};
pub use index::PathIndex;
pub use source::{from_nodes, IterSource, OpenFn, Source, SourceNode};
pub use traverse::{bfs, dfs};
