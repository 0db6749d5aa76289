//! Foundation types for abstractfs.
//!
//! A snapshot of a filesystem subtree has two interchangeable shapes: a
//! hierarchical [`Tree`] of [`Node`]s and a [`Flat`] pre-order list of
//! [`Stat`] records with fully rooted names. Regular file contents are never
//! stored inline; a [`Stat`]'s `payload` holds the integrity string that
//! names the content in a content-addressed store.
//!
//! # Key Types
//!
//! - [`EntryKind`] -- directory, regular file, or symlink
//! - [`NodeAttributes`] -- optional mtime, ownership, mode, and xattrs
//! - [`Stat`] -- metadata for one entry
//! - [`Node`] / [`Tree`] -- the strictly owned hierarchical form
//! - [`Flat`] -- the ordered manifest form
//!
//! The manifest encoding of [`Stat`] (see [`stat`]) is a fixed wire format:
//! `size` is a decimal string present only for regular files, and absent
//! attributes are omitted entirely.

pub mod error;
pub mod kind;
pub mod node;
pub mod stat;

pub use error::{TypeError, TypeResult};
pub use kind::EntryKind;
pub use node::{Flat, Node, Tree};
pub use stat::{NodeAttributes, Stat};
