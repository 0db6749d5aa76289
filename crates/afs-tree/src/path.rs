//! Path rules shared by flatten, unflatten, and source ingestion.
//!
//! Round-tripping between the tree and flat forms depends on these three
//! functions agreeing with each other: [`join_rooted`] is what flatten
//! emits, and [`normalize_flat_name`] is its exact inverse.

/// Split a rooted flat name into its containing directory and bare name.
///
/// The directory is returned without a leading `/` (empty for entries
/// directly under the root); the name is the final path component. Both are
/// empty when the path denotes the root (`""` or `"/"`).
///
/// Trailing separators are ignored, so a directory listed as `/etc/` (as
/// archive sources emit them) lands at the same place as `/etc` instead of
/// becoming its own child.
///
/// ```
/// use afs_tree::path::normalize_flat_name;
///
/// assert_eq!(normalize_flat_name("/home/malte/.ssh"), ("home/malte".into(), ".ssh".into()));
/// assert_eq!(normalize_flat_name("/etc/"), (String::new(), "etc".into()));
/// assert_eq!(normalize_flat_name("/"), (String::new(), String::new()));
/// ```
pub fn normalize_flat_name(path: &str) -> (String, String) {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        None => (String::new(), trimmed.to_string()),
        Some(idx) => (
            trimmed[..idx].trim_start_matches('/').to_string(),
            trimmed[idx + 1..].to_string(),
        ),
    }
}

/// Join a traversal directory path and a node name into a rooted path.
///
/// Empty segments are skipped, so the unnamed root becomes `"/"`.
pub fn join_rooted(dir: &str, name: &str) -> String {
    let mut joined = String::with_capacity(dir.len() + name.len() + 2);
    for segment in dir.split('/').chain(std::iter::once(name)) {
        if segment.is_empty() {
            continue;
        }
        joined.push('/');
        joined.push_str(segment);
    }
    if joined.is_empty() {
        joined.push('/');
    }
    joined
}

/// Directory path handed to the children of a node during traversal.
///
/// The root's empty name never contributes a segment.
pub fn child_dir(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// Components of a lookup or insertion path.
///
/// A leading and any trailing separators are ignored; `""`, `"/"` and `"."`
/// yield no components (the root).
pub fn components(path: &str) -> Vec<&str> {
    if path == "." {
        return Vec::new();
    }
    let trimmed = path.strip_prefix('/').unwrap_or(path).trim_end_matches('/');
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').collect()
}

/// Canonical rooted form of a lookup path (`"/"` for the root).
pub fn canonical(path: &str) -> String {
    let parts = components(path);
    if parts.is_empty() {
        return "/".to_string();
    }
    let mut out = String::new();
    for part in parts {
        out.push('/');
        out.push_str(part);
    }
    out
}
