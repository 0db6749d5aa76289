//! Whole-snapshot validation.

use afs_tree::bfs;
use afs_types::{Flat, Tree};
use tracing::debug;

use crate::error::{StatValidationError, TreeValidationError, ValidationErrorReason, ValidationResult};
use crate::stat::{validate_stat, ValidationMode};

/// Validate a tree: the root must exist, be a directory and be unnamed, and
/// every node must pass [`validate_stat`] in tree mode.
///
/// Nodes are checked in breadth-first order and all violations are
/// collected into one error.
pub fn validate_tree(tree: &Tree) -> ValidationResult<()> {
    let mut err = TreeValidationError::default();

    let Some(root) = tree.root() else {
        err.root_errors.push(ValidationErrorReason::RootNodeMissing);
        return finish(err, ValidationMode::Tree);
    };
    if !root.stat.kind.is_dir() {
        err.root_errors.push(ValidationErrorReason::RootNodeKindIsNotDir);
    }
    if !root.stat.name.is_empty() {
        err.root_errors.push(ValidationErrorReason::RootNodeNameNotEmpty);
    }

    bfs(root, |dir, node| {
        err.node_errors
            .extend(validate_stat(dir, &node.stat, ValidationMode::Tree));
        // Direct children of the root share its empty directory path, so
        // an unnamed one is not caught by the per-entry check.
        if dir.is_empty() && node.stat.name.is_empty() && !std::ptr::eq(node, root) {
            err.node_errors.push(StatValidationError::new(
                dir,
                &node.stat,
                ValidationErrorReason::NodeNameEmpty,
            ));
        }
    });
    finish(err, ValidationMode::Tree)
}

/// Validate a flat manifest: the first record must be the root directory
/// (named `""` or `"/"`), and every record must pass [`validate_stat`] in
/// flat mode.
///
/// A root record named `""` is checked as if it were named `"/"`.
pub fn validate_flat(flat: &Flat) -> ValidationResult<()> {
    let mut err = TreeValidationError::default();

    match flat.root() {
        None => err.root_errors.push(ValidationErrorReason::RootNodeMissing),
        Some(root) => {
            if !root.kind.is_dir() {
                err.root_errors.push(ValidationErrorReason::RootNodeKindIsNotDir);
            }
            if !(root.name.is_empty() || root.name == "/") {
                err.root_errors.push(ValidationErrorReason::RootNodeNameNotEmpty);
            }
        }
    }

    for (idx, stat) in flat.iter().enumerate() {
        if idx == 0 && stat.name.is_empty() {
            let rooted = stat.clone().with_name("/");
            err.node_errors.extend(
                validate_stat("", &rooted, ValidationMode::Flat)
                    .into_iter()
                    .map(|e| StatValidationError { stat: stat.clone(), ..e }),
            );
        } else {
            err.node_errors
                .extend(validate_stat("", stat, ValidationMode::Flat));
        }
    }
    finish(err, ValidationMode::Flat)
}

fn finish(err: TreeValidationError, mode: ValidationMode) -> ValidationResult<()> {
    if err.is_empty() {
        return Ok(());
    }
    debug!(
        %mode,
        root_errors = err.root_errors.len(),
        node_errors = err.node_errors.len(),
        "validation failed"
    );
    Err(err)
}
