use std::collections::HashSet;
use std::io::Write;

use afs_cas::{CasError, CasReader};
use afs_sri::Integrity;
use afs_tree::bfs;
use afs_tree::path::join_rooted;
use afs_types::{Stat, Tree};
use tracing::{debug, info};

use crate::error::{RecorderError, RecorderResult};
use crate::stream::encode;

/// Record the content of every regular file in `tree` as a recorder stream.
///
/// Files are visited breadth-first; each one's payload is parsed as an
/// integrity string, opened from `cas`, and encoded with the file's `size`.
/// Content shared by several files is recorded once. Returns the number of
/// items written.
pub fn record_tree<C, W>(tree: &Tree, cas: &C, writer: &mut W) -> RecorderResult<u64>
where
    C: CasReader + ?Sized,
    W: Write + ?Sized,
{
    let mut files: Vec<(String, &Stat)> = Vec::new();
    if let Some(root) = tree.root() {
        bfs(root, |dir, node| {
            if node.stat.kind.is_regular() {
                files.push((join_rooted(dir, node.name()), &node.stat));
            }
        });
    }

    let mut recorded: HashSet<Integrity> = HashSet::new();
    for (path, stat) in files {
        let integrity = Integrity::parse(&stat.payload)?;
        if recorded.contains(&integrity) {
            debug!(path = %path, "content already recorded");
            continue;
        }
        let sri = integrity.to_string();
        let mut content = cas.open(&sri).map_err(|e| match e {
            CasError::NotFound(_) => RecorderError::PayloadMissing(format!("{path} ({sri})")),
            other => RecorderError::Cas(other),
        })?;
        encode(writer, &integrity, stat.size, &mut content)?;
        recorded.insert(integrity);
    }
    info!(items = recorded.len(), "recorded tree");
    Ok(recorded.len() as u64)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use afs_cas::{EmptyCas, InMemoryCas};
    use afs_sri::Algorithm;
    use afs_tree::insert;

    use super::*;
    use crate::recorder::Recorder;
    use crate::stream::decode_next;

    fn tree_with(files: &[(&str, &str, &[u8])], store: &InMemoryCas) -> Tree {
        let mut tree = Tree::new();
        for (dir, name, data) in files {
            let sri = store.insert_bytes(data).unwrap();
            insert(&mut tree, dir, Stat::regular(*name, sri, data.len() as u64));
        }
        tree
    }

    #[test]
    fn records_then_consumes_into_another_store() {
        let source = InMemoryCas::new();
        let mut tree = tree_with(
            &[
                ("etc", "passwd", b"root:x:0:0:root:/root:/bin/bash\n"),
                ("etc", "hostname", b"afs\n"),
                ("usr/bin", "ls", b"\x7fELF..."),
            ],
            &source,
        );
        insert(&mut tree, "usr/sbin", Stat::symlink("init", "../lib/systemd/systemd"));

        let mut stream = Vec::new();
        assert_eq!(record_tree(&tree, &source, &mut stream).unwrap(), 3);

        let dest = InMemoryCas::new();
        let written = Recorder::new(&dest, Cursor::new(stream)).consume().unwrap();
        assert_eq!(written, 3);
        assert_eq!(dest.all_keys(), source.all_keys());
    }

    #[test]
    fn items_follow_breadth_first_order() {
        let store = InMemoryCas::new();
        let tree = tree_with(&[("a/b", "deep", b"deep"), ("", "top", b"top")], &store);

        let mut stream = Vec::new();
        record_tree(&tree, &store, &mut stream).unwrap();
        let mut cursor = Cursor::new(stream);
        let (first, _) = decode_next(&mut cursor).unwrap().unwrap();
        assert_eq!(first, Integrity::from_bytes(Algorithm::Sha256, b"top"));
    }

    #[test]
    fn shared_content_recorded_once() {
        let store = InMemoryCas::new();
        let tree = tree_with(
            &[("bin", "sh", b"busybox"), ("bin", "ls", b"busybox"), ("sbin", "init", b"busybox")],
            &store,
        );
        let mut stream = Vec::new();
        assert_eq!(record_tree(&tree, &store, &mut stream).unwrap(), 1);
    }

    #[test]
    fn tree_without_files_needs_no_content() {
        let mut tree = Tree::new();
        insert(&mut tree, "", Stat::directory("etc"));
        insert(&mut tree, "etc", Stat::symlink("mtab", "/proc/mounts"));
        let mut stream = Vec::new();
        assert_eq!(record_tree(&tree, &EmptyCas, &mut stream).unwrap(), 0);
        assert!(stream.is_empty());
    }

    #[test]
    fn missing_content_names_the_file() {
        let store = InMemoryCas::new();
        let tree = tree_with(&[("etc", "passwd", b"x")], &store);
        let err = record_tree(&tree, &EmptyCas, &mut Vec::new()).unwrap_err();
        match err {
            RecorderError::PayloadMissing(what) => assert!(what.starts_with("/etc/passwd (sha256-")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn size_larger_than_content_is_an_error() {
        let store = InMemoryCas::new();
        let sri = store.insert_bytes(b"four").unwrap();
        let mut tree = Tree::new();
        insert(&mut tree, "", Stat::regular("file", sri, 10));
        let err = record_tree(&tree, &store, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, RecorderError::ShortPayload { expected: 10, actual: 4, .. }));
    }

    #[test]
    fn invalid_payload_is_an_error() {
        let mut tree = Tree::new();
        insert(&mut tree, "", Stat::regular("file", "not-an-sri", 1));
        let err = record_tree(&tree, &EmptyCas, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, RecorderError::InvalidIntegrity(_)));
    }
}
