use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Slash-separated resource name of a document.
///
/// Paths are normalized on construction (no leading, trailing or repeated
/// slashes) and order segment by segment, so `a/b` sorts before `a-c` even
/// though `/` is greater than `-` bytewise.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath(Arc<str>);

impl DocumentPath {
    pub fn new(path: &str) -> Self {
        let normalized = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        Self(Arc::from(normalized))
    }

    /// Resolves a collection-relative path (`rooms/r1`) under a database
    /// resource name (`projects/p/databases/d`).
    pub fn resolve(
        database: &str,
        relative: &str,
    ) -> Self {
        Self::new(&format!("{database}/documents/{relative}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Last path segment
    pub fn id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }
}

impl Ord for DocumentPath {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.segments().cmp(other.segments())
    }
}

impl PartialOrd for DocumentPath {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for DocumentPath {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "DocumentPath({})", self.0)
    }
}

impl From<&str> for DocumentPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for DocumentPath {
    fn from(path: String) -> Self {
        Self::new(&path)
    }
}
