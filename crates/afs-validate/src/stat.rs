//! Per-entry structural checks.

use std::fmt;

use afs_sri::Integrity;
use afs_types::{EntryKind, Stat};

use crate::error::{StatValidationError, ValidationErrorReason};

/// Which naming rules an entry is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationMode {
    /// Names are full rooted paths (`/etc/passwd`).
    Flat,
    /// Names are bare path components (`passwd`).
    Tree,
}

impl ValidationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Tree => "tree",
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check one entry found in directory `dir`.
///
/// Every applicable check runs, so the result lists all violations of the
/// entry (empty when it is well formed), in this order: name, rootedness,
/// separators, path components, kind, payload, size.
///
/// # Examples
///
/// ```
/// use afs_types::Stat;
/// use afs_validate::{validate_stat, ValidationErrorReason, ValidationMode};
///
/// let errors = validate_stat("", &Stat::directory("/"), ValidationMode::Tree);
/// let reasons: Vec<_> = errors.iter().map(|e| e.reason).collect();
/// assert_eq!(
///     reasons,
///     [ValidationErrorReason::TreeNameRooted, ValidationErrorReason::NodeNameContainsSlash]
/// );
/// ```
pub fn validate_stat(dir: &str, stat: &Stat, mode: ValidationMode) -> Vec<StatValidationError> {
    name_reasons(dir, &stat.name, mode)
        .into_iter()
        .chain(kind_reasons(&stat.kind))
        .chain(payload_reasons(stat))
        .chain(size_reasons(stat))
        .map(|reason| StatValidationError::new(dir, stat, reason))
        .collect()
}

fn name_reasons(dir: &str, name: &str, mode: ValidationMode) -> Vec<ValidationErrorReason> {
    use ValidationErrorReason::*;

    let mut reasons = Vec::new();
    // Only the tree root may go unnamed.
    if name.is_empty() && (!dir.is_empty() || mode == ValidationMode::Flat) {
        reasons.push(NodeNameEmpty);
    }

    let rooted = name.starts_with('/');
    match mode {
        ValidationMode::Flat if !rooted => reasons.push(FlatNameNotRooted),
        ValidationMode::Tree if rooted => reasons.push(TreeNameRooted),
        _ => {}
    }

    match mode {
        ValidationMode::Tree => {
            if name.contains('/') {
                reasons.push(NodeNameContainsSlash);
            }
        }
        ValidationMode::Flat => {
            let unrooted = name.strip_prefix('/').unwrap_or(name);
            if !unrooted.is_empty() {
                for component in unrooted.split('/') {
                    match component {
                        "" => reasons.push(PathComponentEmpty),
                        "." => reasons.push(PathComponentDot),
                        ".." => reasons.push(PathComponentDotDot),
                        _ => {}
                    }
                }
            }
        }
    }
    reasons
}

fn kind_reasons(kind: &EntryKind) -> Option<ValidationErrorReason> {
    (!kind.is_known()).then_some(ValidationErrorReason::KindInvalid)
}

fn payload_reasons(stat: &Stat) -> Vec<ValidationErrorReason> {
    let mut reasons = Vec::new();
    let empty = stat.payload.is_empty();
    match stat.kind {
        EntryKind::Regular | EntryKind::Symlink if empty => {
            reasons.push(ValidationErrorReason::PayloadEmpty)
        }
        EntryKind::Directory if !empty => reasons.push(ValidationErrorReason::PayloadNotEmpty),
        _ => {}
    }
    // Symlink payloads are raw targets, only regular payloads are integrity strings.
    if stat.kind.is_regular() && Integrity::parse(&stat.payload).is_err() {
        reasons.push(ValidationErrorReason::PayloadInvalidSri);
    }
    reasons
}

fn size_reasons(stat: &Stat) -> Option<ValidationErrorReason> {
    (!stat.kind.is_regular() && stat.size != 0).then_some(ValidationErrorReason::SizeInvalid)
}
