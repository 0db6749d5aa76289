//! Structural validation for abstractfs snapshots.
//!
//! Violations are values, not panics: a validation pass reports every
//! problem it finds in one go, each tagged with a [`ValidationErrorReason`].
//!
//! - [`validate_stat`] checks a single entry in [`ValidationMode::Flat`]
//!   (rooted full paths) or [`ValidationMode::Tree`] (bare names)
//! - [`validate_tree`] and [`validate_flat`] check a whole snapshot and
//!   aggregate everything into one [`TreeValidationError`]

pub mod error;
pub mod stat;
pub mod tree;

pub use error::{StatValidationError, TreeValidationError, ValidationErrorReason, ValidationResult};
pub use stat::{validate_stat, ValidationMode};
pub use tree::{validate_flat, validate_tree};
