//! Entry metadata and its manifest encoding.
//!
//! The manifest form of a [`Stat`] is a flat JSON object:
//!
//! ```text
//! {"name": "/etc/passwd", "kind": "regular",
//!  "mtime": "2024-01-02T03:04:05Z", "uid": "0", "mode": "0644",
//!  "payload": "sha256-...", "size": "1024"}
//! ```
//!
//! - attribute fields are inlined next to `name` and `kind`
//! - `mtime` is an RFC 3339 UTC timestamp with second precision, omitted when unset
//! - `uid`, `gid`, `uname`, `gname`, `mode` and `xattrs` are omitted when empty
//! - `payload` is omitted when empty
//! - `size` is a decimal string, present only when the kind is regular

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{TypeError, TypeResult};
use crate::kind::EntryKind;

/// Optional attributes of an entry. Everything is absent by default.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeAttributes {
    /// Modification time. `None` is the zero value and is never encoded.
    pub mtime: Option<DateTime<Utc>>,
    /// Numeric owner, as text.
    pub uid: String,
    /// Numeric group, as text.
    pub gid: String,
    /// Owner name.
    pub uname: String,
    /// Group name.
    pub gname: String,
    /// Permission mode string.
    pub mode: String,
    /// Extended attributes.
    pub xattrs: BTreeMap<String, String>,
}

impl NodeAttributes {
    /// Returns `true` if no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Metadata for one entry.
///
/// In tree form `name` is the bare component name (empty for the root); in
/// flat form it is the full rooted path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stat {
    pub name: String,
    pub kind: EntryKind,
    pub attributes: NodeAttributes,
    /// Integrity string of the content for regular files, link target for
    /// symlinks, empty for directories.
    pub payload: String,
    /// Byte length of the content. Meaningful only for regular files.
    pub size: u64,
}

impl Stat {
    /// A directory entry with no attributes.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
            ..Default::default()
        }
    }

    /// A regular file referencing its content by integrity string.
    pub fn regular(name: impl Into<String>, payload: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Regular,
            payload: payload.into(),
            size,
            ..Default::default()
        }
    }

    /// A symlink pointing at `target`.
    pub fn symlink(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Symlink,
            payload: target.into(),
            ..Default::default()
        }
    }

    /// Replace the attributes.
    pub fn with_attributes(mut self, attributes: NodeAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Replace the name, keeping everything else.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Encode as a manifest JSON object.
    pub fn to_json(&self) -> TypeResult<String> {
        serde_json::to_string(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Decode from a manifest JSON object.
    pub fn from_json(json: &str) -> TypeResult<Self> {
        let record: ManifestRecord =
            serde_json::from_str(json).map_err(|e| TypeError::Serialization(e.to_string()))?;
        Self::try_from(record)
    }
}

/// The on-the-wire shape of a [`Stat`]. Every optional field is encoded only
/// when present.
#[derive(Serialize, Deserialize)]
struct ManifestRecord {
    name: String,
    kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mtime: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    uid: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    gid: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    uname: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    gname: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    mode: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    xattrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    payload: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<String>,
}

impl From<&Stat> for ManifestRecord {
    fn from(stat: &Stat) -> Self {
        let attributes = &stat.attributes;
        let size = match stat.kind {
            EntryKind::Regular => Some(stat.size.to_string()),
            _ => None,
        };
        Self {
            name: stat.name.clone(),
            kind: stat.kind.clone(),
            mtime: attributes
                .mtime
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
            uid: attributes.uid.clone(),
            gid: attributes.gid.clone(),
            uname: attributes.uname.clone(),
            gname: attributes.gname.clone(),
            mode: attributes.mode.clone(),
            xattrs: attributes.xattrs.clone(),
            payload: stat.payload.clone(),
            size,
        }
    }
}

impl TryFrom<ManifestRecord> for Stat {
    type Error = TypeError;

    fn try_from(record: ManifestRecord) -> Result<Self, Self::Error> {
        let mtime = match record.mtime.as_deref() {
            None | Some("") => None,
            Some(text) => Some(
                DateTime::parse_from_rfc3339(text)
                    .map_err(|_| TypeError::InvalidMtime(text.to_string()))?
                    .with_timezone(&Utc),
            ),
        };
        let size = match record.size.as_deref() {
            None | Some("") => 0,
            Some(text) => text
                .parse::<u64>()
                .map_err(|_| TypeError::InvalidSize(text.to_string()))?,
        };
        Ok(Self {
            name: record.name,
            kind: record.kind,
            attributes: NodeAttributes {
                mtime,
                uid: record.uid,
                gid: record.gid,
                uname: record.uname,
                gname: record.gname,
                mode: record.mode,
                xattrs: record.xattrs,
            },
            payload: record.payload,
            size,
        })
    }
}

impl Serialize for Stat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ManifestRecord::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Stat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = ManifestRecord::deserialize(deserializer)?;
        Self::try_from(record).map_err(serde::de::Error::custom)
    }
}
