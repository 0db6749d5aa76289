use std::convert::Infallible;
use std::fmt;
use std::io::{self, Read};

use afs_types::Stat;

/// Lazily opens the content of a source entry.
pub type OpenFn = Box<dyn FnOnce() -> io::Result<Box<dyn Read + Send>> + Send>;

/// One entry yielded by a [`Source`].
///
/// `stat.name` is the entry's full path. `open` is present for entries with
/// content (regular files) and is only called if the consumer needs the
/// bytes.
pub struct SourceNode {
    pub stat: Stat,
    pub open: Option<OpenFn>,
}

impl SourceNode {
    /// An entry without content.
    pub fn new(stat: Stat) -> Self {
        Self { stat, open: None }
    }

    /// An entry whose content is opened by `open`.
    pub fn with_open(stat: Stat, open: OpenFn) -> Self {
        Self {
            stat,
            open: Some(open),
        }
    }

    /// An entry whose content is held in memory.
    pub fn with_content(stat: Stat, content: Vec<u8>) -> Self {
        Self::with_open(
            stat,
            Box::new(move || Ok(Box::new(io::Cursor::new(content)) as Box<dyn Read + Send>)),
        )
    }

    /// Open the content, if the entry has any.
    pub fn open(self) -> io::Result<Option<Box<dyn Read + Send>>> {
        match self.open {
            Some(open) => open().map(Some),
            None => Ok(None),
        }
    }
}

impl fmt::Debug for SourceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceNode")
            .field("stat", &self.stat)
            .field("has_content", &self.open.is_some())
            .finish()
    }
}

/// A single-pass, possibly unbounded stream of entries.
///
/// `next` returns `Ok(None)` once the stream is exhausted; that end marker is
/// not an error. Any `Err` aborts whoever is consuming the source.
pub trait Source {
    type Error: std::error::Error + Send + Sync + 'static;

    fn next(&mut self) -> Result<Option<SourceNode>, Self::Error>;
}

/// Adapts an iterator of entry results into a [`Source`].
pub struct IterSource<I> {
    inner: I,
}

impl<I> IterSource<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<I, E> Source for IterSource<I>
where
    I: Iterator<Item = Result<SourceNode, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn next(&mut self) -> Result<Option<SourceNode>, E> {
        self.inner.next().transpose()
    }
}

/// An infallible source over a fixed list of entries.
pub fn from_nodes(
    nodes: Vec<SourceNode>,
) -> IterSource<impl Iterator<Item = Result<SourceNode, Infallible>>> {
    IterSource::new(nodes.into_iter().map(Ok))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_content_opens_bytes() {
        let node = SourceNode::with_content(Stat::regular("/a", "x", 5), b"hello".to_vec());
        let mut reader = node.open().unwrap().unwrap();
        let mut buf = String::new();
        reader.read_to_string(&mut buf).unwrap();
        assert_eq!(buf, "hello");
    }

    #[test]
    fn directory_has_nothing_to_open() {
        let node = SourceNode::new(Stat::directory("/etc"));
        assert!(node.open().unwrap().is_none());
    }

    #[test]
    fn iter_source_ends_with_none() {
        let mut source = from_nodes(vec![SourceNode::new(Stat::directory("/etc"))]);
        assert!(source.next().unwrap().is_some());
        assert!(source.next().unwrap().is_none());
        assert!(source.next().unwrap().is_none());
    }

    #[test]
    fn iter_source_surfaces_errors() {
        let items: Vec<Result<SourceNode, io::Error>> =
            vec![Err(io::Error::other("boom"))];
        let mut source = IterSource::new(items.into_iter());
        assert_eq!(source.next().unwrap_err().to_string(), "boom");
    }

    #[test]
    fn debug_hides_open_fn() {
        let node = SourceNode::with_content(Stat::regular("/a", "x", 1), vec![1]);
        assert!(format!("{node:?}").contains("has_content: true"));
    }
}
