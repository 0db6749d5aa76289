//! Path index over a tree.
//!
//! The [`PathIndex`] is owned separately from the tree it describes: it maps
//! every rooted path to the route of child positions that leads to the node,
//! so repeated lookups skip the per-level name scans of [`get`](crate::get).
//! The index is a snapshot; after the tree's structure changes it must be
//! rebuilt.

use std::collections::BTreeMap;

use afs_types::{Node, Tree};

use crate::path::{canonical, child_dir, join_rooted};

/// Snapshot mapping of rooted paths to child-position routes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathIndex {
    routes: BTreeMap<String, Vec<usize>>,
}

impl PathIndex {
    /// Index every node of `tree`.
    pub fn build(tree: &Tree) -> Self {
        let mut routes = BTreeMap::new();
        if let Some(root) = tree.root() {
            let mut stack: Vec<(String, Vec<usize>, &Node)> =
                vec![(String::new(), Vec::new(), root)];
            while let Some((dir, route, node)) = stack.pop() {
                let below = child_dir(&dir, node.name());
                for (idx, child) in node.children.iter().enumerate() {
                    let mut child_route = route.clone();
                    child_route.push(idx);
                    stack.push((below.clone(), child_route, child));
                }
                routes.insert(join_rooted(&dir, node.name()), route);
            }
        }
        Self { routes }
    }

    /// Look up `path` in `tree` through the index.
    ///
    /// Accepts the same path spellings as [`get`](crate::get). Returns
    /// `None` for unknown paths, and for routes the tree no longer has.
    pub fn resolve<'a>(&self, tree: &'a Tree, path: &str) -> Option<&'a Node> {
        let route = self.routes.get(&canonical(path))?;
        let mut node = tree.root()?;
        for &idx in route {
            node = node.children.get(idx)?;
        }
        Some(node)
    }

    /// Returns `true` if `path` was present when the index was built.
    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(&canonical(path))
    }

    /// Number of indexed paths.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Indexed paths in lexicographic order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }
}
