//! Conversion between the tree and flat forms, plus point lookups and deep
//! copies.

use afs_types::{Flat, Node, Stat, Tree};
use tracing::debug;

use crate::error::{TreeError, TreeResult};
use crate::path::{components, join_rooted, normalize_flat_name};
use crate::source::Source;
use crate::traverse::bfs;

/// Insert `stat` as the entry named `stat.name` inside directory `dir`.
///
/// Missing ancestor directories along `dir` are created with default
/// attributes. An existing sibling with the same name has its stat replaced
/// but keeps its children. If both `dir` and `stat.name` denote the root
/// (`""` or `"/"`), the root's own stat is replaced and its name kept empty.
pub fn insert(tree: &mut Tree, dir: &str, mut stat: Stat) {
    let root = tree.root_mut();
    let is_root_name = |s: &str| s.is_empty() || s == "/";
    if is_root_name(dir) && is_root_name(&stat.name) {
        stat.name.clear();
        root.stat = stat;
        return;
    }

    let mut parent = root;
    for base in components(dir) {
        let idx = ensure_child(parent, base, || Node::new(Stat::directory(base)));
        parent = &mut parent.children[idx];
    }

    match parent.child_mut(&stat.name) {
        Some(existing) => existing.stat = stat,
        None => {
            parent.children.push(Node::new(stat));
            parent.sort_children();
        }
    }
}

/// Index of the child named `name`, inserting `make()` in sorted position
/// when there is none.
fn ensure_child(parent: &mut Node, name: &str, make: impl FnOnce() -> Node) -> usize {
    if let Some(idx) = parent.child_position(name) {
        return idx;
    }
    parent.children.push(make());
    parent.sort_children();
    match parent
        .children
        .binary_search_by(|c| c.stat.name.as_str().cmp(name))
    {
        Ok(idx) | Err(idx) => idx,
    }
}

/// Resolve a slash-separated path to a node.
///
/// `"/"`, `"."` and `""` denote the root. Returns `None` if any component is
/// missing.
pub fn get<'a>(tree: &'a Tree, path: &str) -> Option<&'a Node> {
    let mut node = tree.root()?;
    for part in components(path) {
        node = node.child(part)?;
    }
    Some(node)
}

/// Mutable counterpart of [`get`].
pub fn get_mut<'a>(tree: &'a mut Tree, path: &str) -> Option<&'a mut Node> {
    let mut node = tree.root.as_mut()?;
    for part in components(path) {
        node = node.child_mut(part)?;
    }
    Some(node)
}

/// Flat form of a tree: a breadth-first listing, root first, with every
/// name rewritten to its full rooted path (`"/"` for the root).
pub fn flatten(tree: &Tree) -> Flat {
    let mut files = Vec::with_capacity(tree.len());
    if let Some(root) = tree.root() {
        bfs(root, |dir, node| {
            let mut stat = node.stat.clone();
            stat.name = join_rooted(dir, &node.stat.name);
            files.push(stat);
        });
    }
    Flat::new(files)
}

/// Tree form of a flat manifest.
///
/// Each record is split into its containing directory and bare name and
/// [`insert`]ed in order; the root record replaces the root's stat.
pub fn unflatten(flat: &Flat) -> Tree {
    let mut tree = Tree::new();
    for file in flat {
        insert_flat_record(&mut tree, file.clone());
    }
    debug!(records = flat.len(), nodes = tree.len(), "unflattened manifest");
    tree
}

/// Build a tree by draining a [`Source`].
///
/// Entry names are normalized exactly as in [`unflatten`]. The first source
/// error aborts the build and is returned; the end marker is not an error.
pub fn from_source<S: Source>(source: &mut S) -> TreeResult<Tree> {
    let mut tree = Tree::new();
    let mut entries = 0usize;
    while let Some(node) = source
        .next()
        .map_err(|e| TreeError::Source(Box::new(e)))?
    {
        insert_flat_record(&mut tree, node.stat);
        entries += 1;
    }
    debug!(entries, nodes = tree.len(), "built tree from source");
    Ok(tree)
}

fn insert_flat_record(tree: &mut Tree, mut stat: Stat) {
    let (dir, name) = normalize_flat_name(&stat.name);
    stat.name = name;
    insert(tree, &dir, stat);
}

/// Replace `dst` with an independent copy of the subtree rooted at `src`.
///
/// Nothing is shared between the two afterwards: every stat (including its
/// xattr map) and every child is freshly owned.
pub fn deep_copy_into(src: &Node, dst: &mut Node) {
    dst.stat = src.stat.clone();
    dst.children = src.children.iter().map(deep_copy).collect();
}

/// An independent copy of the subtree rooted at `src`.
pub fn deep_copy(src: &Node) -> Node {
    let mut copy = Node::default();
    deep_copy_into(src, &mut copy);
    copy
}
