//! Whole-tree walks.
//!
//! Both walks visit every node exactly once and hand the visitor the
//! slash-joined path of the node's named ancestors (empty for the root and
//! its direct children). Visitors run on the caller's thread in visit order
//! and must not change the tree's structure.

use std::collections::VecDeque;

use afs_types::Node;

use crate::path::child_dir;

/// Breadth-first walk: the root, then every depth level in full before the
/// next one, siblings in their stored (sorted) order.
///
/// This is the order [`flatten`](crate::flatten) emits records in.
pub fn bfs<'a, F>(root: &'a Node, mut visit: F)
where
    F: FnMut(&str, &'a Node),
{
    let mut queue: VecDeque<(String, &'a Node)> = VecDeque::new();
    queue.push_back((String::new(), root));

    while let Some((dir, node)) = queue.pop_front() {
        if !node.children.is_empty() {
            let below = child_dir(&dir, &node.stat.name);
            for child in &node.children {
                queue.push_back((below.clone(), child));
            }
        }
        visit(&dir, node);
    }
}

/// Depth-first pre-order walk: a node, then each of its subtrees in the
/// children's stored (sorted) order before the next sibling.
pub fn dfs<'a, F>(root: &'a Node, mut visit: F)
where
    F: FnMut(&str, &'a Node),
{
    let mut stack: Vec<(String, &'a Node)> = vec![(String::new(), root)];

    while let Some((dir, node)) = stack.pop() {
        visit(&dir, node);
        if !node.children.is_empty() {
            let below = child_dir(&dir, &node.stat.name);
            // Reversed so the first child is popped first.
            for child in node.children.iter().rev() {
                stack.push((below.clone(), child));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;
    use crate::path::join_rooted;
    use crate::testdata;

    fn visited_bfs(root: &Node) -> Vec<String> {
        let mut visited = Vec::new();
        bfs(root, |dir, node| visited.push(join_rooted(dir, node.name())));
        visited
    }

    fn visited_dfs(root: &Node) -> Vec<String> {
        let mut visited = Vec::new();
        dfs(root, |dir, node| visited.push(join_rooted(dir, node.name())));
        visited
    }

    #[test]
    fn bfs_visits_level_by_level() {
        let tree = testdata::tree();
        let expected = [
            "/",
            "/dev",
            "/etc",
            "/home",
            "/root",
            "/usr",
            "/etc/passwd",
            "/etc/resolv.conf",
            "/home/malte",
            "/usr/bin",
            "/usr/lib",
            "/usr/local",
            "/usr/sbin",
            "/home/malte/.cache",
            "/home/malte/.config",
            "/home/malte/.local",
            "/home/malte/.ssh",
            "/home/malte/Downloads",
            "/usr/bin/ls",
            "/usr/sbin/init",
        ];
        assert_eq!(visited_bfs(tree.root().unwrap()), expected);
    }

    #[test]
    fn dfs_visits_subtrees_in_sorted_order() {
        let tree = testdata::tree();
        let expected = [
            "/",
            "/dev",
            "/etc",
            "/etc/passwd",
            "/etc/resolv.conf",
            "/home",
            "/home/malte",
            "/home/malte/.cache",
            "/home/malte/.config",
            "/home/malte/.local",
            "/home/malte/.ssh",
            "/home/malte/Downloads",
            "/root",
            "/usr",
            "/usr/bin",
            "/usr/bin/ls",
            "/usr/lib",
            "/usr/local",
            "/usr/sbin",
            "/usr/sbin/init",
        ];
        assert_eq!(visited_dfs(tree.root().unwrap()), expected);
    }

    #[test]
    fn directory_paths_exclude_root_name() {
        let tree = testdata::tree();
        let mut dirs = Vec::new();
        bfs(tree.root().unwrap(), |dir, node| {
            if node.name() == "ls" || node.name() == "etc" || node.name().is_empty() {
                dirs.push((dir.to_string(), node.name().to_string()));
            }
        });
        assert_eq!(
            dirs,
            [
                (String::new(), String::new()),
                (String::new(), "etc".to_string()),
                ("usr/bin".to_string(), "ls".to_string()),
            ]
        );
    }

    #[test]
    fn single_node_tree() {
        let root = Node::new(afs_types::Stat::directory(""));
        assert_eq!(visited_bfs(&root), ["/"]);
        assert_eq!(visited_dfs(&root), ["/"]);
    }

    fn depth_of(path: &str) -> usize {
        path.matches('/').count() - usize::from(path == "/")
    }

    proptest! {
        #[test]
        fn walks_visit_the_same_nodes_once(tree in testdata::arb_tree()) {
            let root = tree.root().unwrap();
            let by_bfs = visited_bfs(root);
            let by_dfs = visited_dfs(root);

            prop_assert_eq!(by_bfs.len(), root.count());
            prop_assert_eq!(by_dfs.len(), root.count());

            let bfs_set: BTreeSet<_> = by_bfs.iter().cloned().collect();
            let dfs_set: BTreeSet<_> = by_dfs.iter().cloned().collect();
            prop_assert_eq!(bfs_set.len(), by_bfs.len());
            prop_assert_eq!(bfs_set, dfs_set);
        }

        #[test]
        fn bfs_depth_never_decreases(tree in testdata::arb_tree()) {
            let depths: Vec<usize> = visited_bfs(tree.root().unwrap())
                .iter()
                .map(|p| depth_of(p))
                .collect();
            prop_assert!(depths.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
