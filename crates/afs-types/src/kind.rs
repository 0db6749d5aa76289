use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The kind of a filesystem entry.
///
/// Unknown kind tokens read from a manifest are kept as [`EntryKind::Other`]
/// so that they survive decoding and can be reported by validation instead
/// of failing the whole manifest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EntryKind {
    #[default]
    Directory,
    Regular,
    Symlink,
    /// Any token that is not one of the kinds above.
    Other(String),
}

impl EntryKind {
    pub const DIRECTORY: &'static str = "directory";
    pub const REGULAR: &'static str = "regular";
    pub const SYMLINK: &'static str = "symlink";

    /// The manifest token for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Directory => Self::DIRECTORY,
            Self::Regular => Self::REGULAR,
            Self::Symlink => Self::SYMLINK,
            Self::Other(token) => token,
        }
    }

    /// Returns `true` for the three recognised kinds.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory)
    }

    pub fn is_regular(&self) -> bool {
        matches!(self, Self::Regular)
    }

    pub fn is_symlink(&self) -> bool {
        matches!(self, Self::Symlink)
    }

    /// Map a host file type to an entry kind.
    ///
    /// Anything that is neither a directory nor a symlink is treated as a
    /// regular file.
    pub fn from_file_type(file_type: std::fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_symlink() {
            Self::Symlink
        } else {
            Self::Regular
        }
    }
}

impl From<&str> for EntryKind {
    fn from(token: &str) -> Self {
        match token {
            Self::DIRECTORY => Self::Directory,
            Self::REGULAR => Self::Regular,
            Self::SYMLINK => Self::Symlink,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntryKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntryKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Self::from(token.as_str()))
    }
}
