use afs_types::Stat;
use thiserror::Error;

/// Why an entry (or the root of a tree) failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationErrorReason {
    #[error("root node is missing")]
    RootNodeMissing,

    #[error("root node kind is not dir")]
    RootNodeKindIsNotDir,

    #[error("root node name is not empty")]
    RootNodeNameNotEmpty,

    #[error("node name is empty")]
    NodeNameEmpty,

    #[error("node name contains slash")]
    NodeNameContainsSlash,

    #[error("flat name must be rooted (start with slash)")]
    FlatNameNotRooted,

    #[error("tree name must not start with slash")]
    TreeNameRooted,

    #[error("path component is empty")]
    PathComponentEmpty,

    #[error("path component is '.'")]
    PathComponentDot,

    #[error("path component is '..'")]
    PathComponentDotDot,

    #[error("kind is invalid")]
    KindInvalid,

    #[error("size is invalid")]
    SizeInvalid,

    #[error("payload is empty")]
    PayloadEmpty,

    #[error("payload must be empty")]
    PayloadNotEmpty,

    #[error("payload is invalid SRI")]
    PayloadInvalidSri,
}

/// One violation found on one entry.
///
/// `dir` is the directory the entry was found in (empty in flat mode, where
/// the name carries the full path).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validating {:?}: {reason}", self.path())]
pub struct StatValidationError {
    pub dir: String,
    pub stat: Stat,
    pub reason: ValidationErrorReason,
}

impl StatValidationError {
    pub fn new(dir: &str, stat: &Stat, reason: ValidationErrorReason) -> Self {
        Self {
            dir: dir.to_string(),
            stat: stat.clone(),
            reason,
        }
    }

    /// Rooted path of the offending entry, with empty segments dropped.
    pub fn path(&self) -> String {
        let segments: Vec<&str> = self
            .dir
            .split('/')
            .chain(self.stat.name.split('/'))
            .filter(|s| !s.is_empty())
            .collect();
        format!("/{}", segments.join("/"))
    }
}

/// Every violation found in a tree or flat manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("validating tree: {}", self.summary())]
pub struct TreeValidationError {
    /// Problems with the root itself.
    pub root_errors: Vec<ValidationErrorReason>,
    /// Per-entry problems, in visit order.
    pub node_errors: Vec<StatValidationError>,
}

impl TreeValidationError {
    /// Total number of violations.
    pub fn len(&self) -> usize {
        self.root_errors.len() + self.node_errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root_errors.is_empty() && self.node_errors.is_empty()
    }

    /// All reasons, root violations first.
    pub fn reasons(&self) -> impl Iterator<Item = ValidationErrorReason> + '_ {
        self.root_errors
            .iter()
            .copied()
            .chain(self.node_errors.iter().map(|e| e.reason))
    }

    fn summary(&self) -> String {
        self.root_errors
            .iter()
            .map(ToString::to_string)
            .chain(self.node_errors.iter().map(ToString::to_string))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Result alias for whole-tree validation.
pub type ValidationResult<T> = Result<T, TreeValidationError>;
