//! Shared fixtures: a small Linux-like snapshot in both forms, and a
//! strategy for arbitrary well-formed trees.

use afs_types::{Flat, Node, NodeAttributes, Stat, Tree};
use chrono::DateTime;
use proptest::prelude::*;

use crate::convert::insert;

pub(crate) const SRI: &str = "sha256-tiBQcxLF6XVmo8bPr5kUT+/Big2n2UFAHfoPX1j7A2g=";

const PASSWD_SIZE: u64 = 1024;
const LS_SIZE: u64 = 138_208;

fn dir(name: &str, children: Vec<Node>) -> Node {
    Node::with_children(Stat::directory(name), children)
}

fn leaf(stat: Stat) -> Node {
    Node::new(stat)
}

pub(crate) fn tree() -> Tree {
    Tree::from_root(dir(
        "",
        vec![
            dir("dev", vec![]),
            dir(
                "etc",
                vec![
                    leaf(Stat::regular("passwd", SRI, PASSWD_SIZE)),
                    leaf(Stat::symlink(
                        "resolv.conf",
                        "../run/systemd/resolve/stub-resolv.conf",
                    )),
                ],
            ),
            dir(
                "home",
                vec![dir(
                    "malte",
                    vec![
                        dir(".cache", vec![]),
                        dir(".config", vec![]),
                        dir(".local", vec![]),
                        dir(".ssh", vec![]),
                        dir("Downloads", vec![]),
                    ],
                )],
            ),
            dir("root", vec![]),
            dir(
                "usr",
                vec![
                    dir("bin", vec![leaf(Stat::regular("ls", SRI, LS_SIZE))]),
                    dir("lib", vec![]),
                    dir("local", vec![]),
                    dir(
                        "sbin",
                        vec![leaf(Stat::symlink("init", "../lib/systemd/systemd"))],
                    ),
                ],
            ),
        ],
    ))
}

pub(crate) fn flat() -> Flat {
    Flat::new(vec![
        Stat::directory("/"),
        Stat::directory("/dev"),
        Stat::directory("/etc"),
        Stat::directory("/home"),
        Stat::directory("/root"),
        Stat::directory("/usr"),
        Stat::regular("/etc/passwd", SRI, PASSWD_SIZE),
        Stat::symlink("/etc/resolv.conf", "../run/systemd/resolve/stub-resolv.conf"),
        Stat::directory("/home/malte"),
        Stat::directory("/usr/bin"),
        Stat::directory("/usr/lib"),
        Stat::directory("/usr/local"),
        Stat::directory("/usr/sbin"),
        Stat::directory("/home/malte/.cache"),
        Stat::directory("/home/malte/.config"),
        Stat::directory("/home/malte/.local"),
        Stat::directory("/home/malte/.ssh"),
        Stat::directory("/home/malte/Downloads"),
        Stat::regular("/usr/bin/ls", SRI, LS_SIZE),
        Stat::symlink("/usr/sbin/init", "../lib/systemd/systemd"),
    ])
}

/// Attribute sets ranging from empty to fully populated. Timestamps have
/// whole-second precision.
pub(crate) fn arb_attributes() -> impl Strategy<Value = NodeAttributes> {
    let id = prop::sample::select(vec!["", "0", "1000"]);
    let user = prop::sample::select(vec!["", "root", "malte"]);
    (
        prop::option::of(0i64..4_102_444_800),
        (id.clone(), id, user.clone(), user),
        prop::sample::select(vec!["", "0755", "0644", "4755"]),
        prop::collection::btree_map(
            prop::sample::select(vec!["user.comment", "security.selinux"]).prop_map(String::from),
            "[a-z_:]{0,12}",
            0..3,
        ),
    )
        .prop_map(|(secs, (uid, gid, uname, gname), mode, xattrs)| NodeAttributes {
            mtime: secs.and_then(|s| DateTime::from_timestamp(s, 0)),
            uid: uid.into(),
            gid: gid.into(),
            uname: uname.into(),
            gname: gname.into(),
            mode: mode.into(),
            xattrs,
        })
}

/// Trees of nested `a`/`b`/`c` directories with `f0`..`f3` regular files and
/// `l0`/`l1` symlinks as leaves, every entry carrying arbitrary attributes.
/// Directory and leaf names never collide, so every generated tree is well
/// formed.
pub(crate) fn arb_tree() -> impl Strategy<Value = Tree> {
    let dir_name = prop::sample::select(vec!["a", "b", "c"]);
    let file_name = prop::sample::select(vec!["f0", "f1", "f2", "f3"]);
    let link_name = prop::sample::select(vec!["l0", "l1"]);
    let link_target = prop::sample::select(vec!["../f0", "/usr/bin/ls", "a/b"]);
    let entry = (
        prop::collection::vec(dir_name.clone(), 0..3),
        prop_oneof![
            dir_name.prop_map(Stat::directory),
            (file_name, 0u64..4096).prop_map(|(name, size)| Stat::regular(name, SRI, size)),
            (link_name, link_target).prop_map(|(name, target)| Stat::symlink(name, target)),
        ],
        arb_attributes(),
    );
    prop::collection::vec(entry, 0..16).prop_map(|entries| {
        let mut tree = Tree::new();
        for (parents, stat, attributes) in entries {
            insert(&mut tree, &parents.join("/"), stat.with_attributes(attributes));
        }
        tree
    })
}
