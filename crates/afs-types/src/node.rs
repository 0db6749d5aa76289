use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};
use crate::kind::EntryKind;
use crate::stat::Stat;

/// A tree element: its own [`Stat`] plus exclusively owned children.
///
/// Children of one node have pairwise-distinct names and are kept sorted by
/// name, so structural equality and iteration order are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub stat: Stat,
    pub children: Vec<Node>,
}

impl Node {
    /// A leaf node.
    pub fn new(stat: Stat) -> Self {
        Self {
            stat,
            children: Vec::new(),
        }
    }

    /// A node with the given children, sorted by name.
    pub fn with_children(stat: Stat, children: Vec<Node>) -> Self {
        let mut node = Self { stat, children };
        node.sort_children();
        node
    }

    /// The node's own name (empty for the root).
    pub fn name(&self) -> &str {
        &self.stat.name
    }

    pub fn is_dir(&self) -> bool {
        self.stat.kind.is_dir()
    }

    /// Look up a direct child by exact name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.stat.name == name)
    }

    /// Look up a direct child by exact name, mutably.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.iter_mut().find(|c| c.stat.name == name)
    }

    /// Position of a direct child by exact name.
    pub fn child_position(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|c| c.stat.name == name)
    }

    /// Restore the sorted-by-name order of the children.
    pub fn sort_children(&mut self) {
        self.children.sort_by(|a, b| a.stat.name.cmp(&b.stat.name));
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }
}

/// Hierarchical form of a snapshot.
///
/// A well-formed tree has a root that is an unnamed directory. The root is
/// optional so that a missing root can be represented and reported by
/// validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    pub root: Option<Node>,
}

impl Tree {
    /// A tree holding only an unnamed root directory.
    pub fn new() -> Self {
        Self {
            root: Some(Node::new(Stat::directory(""))),
        }
    }

    /// A tree rooted at `root`.
    pub fn from_root(root: Node) -> Self {
        Self { root: Some(root) }
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// The root node, creating an unnamed root directory if there is none.
    pub fn root_mut(&mut self) -> &mut Node {
        self.root
            .get_or_insert_with(|| Node::new(Stat::directory("")))
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, Node::count)
    }

    /// Returns `true` if the tree has no root.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered manifest form of a snapshot.
///
/// The first record is the root directory (named `""` or `"/"`); every other
/// record carries its full rooted path as its name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flat {
    pub files: Vec<Stat>,
}

impl Flat {
    pub fn new(files: Vec<Stat>) -> Self {
        Self { files }
    }

    /// The root record, if any.
    pub fn root(&self) -> Option<&Stat> {
        self.files.first()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stat> {
        self.files.iter()
    }

    /// Records of regular files, in manifest order.
    pub fn regular_files(&self) -> impl Iterator<Item = &Stat> {
        self.files.iter().filter(|s| s.kind == EntryKind::Regular)
    }

    /// Encode as a manifest JSON document.
    pub fn to_json(&self) -> TypeResult<String> {
        serde_json::to_string(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Encode as an indented manifest JSON document.
    pub fn to_json_pretty(&self) -> TypeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Decode from a manifest JSON document.
    pub fn from_json(json: &str) -> TypeResult<Self> {
        serde_json::from_str(json).map_err(|e| TypeError::Serialization(e.to_string()))
    }
}

impl<'a> IntoIterator for &'a Flat {
    type Item = &'a Stat;
    type IntoIter = std::slice::Iter<'a, Stat>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
