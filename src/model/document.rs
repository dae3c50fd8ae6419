use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use prost_types::Timestamp;

use super::DocumentPath;
use crate::proto;

/// Immutable version of a remote document as observed by a watch
#[derive(Clone)]
pub struct QueryDocument {
    inner: Arc<DocumentInner>,
}

struct DocumentInner {
    path: DocumentPath,
    document: proto::Document,
    read_time: Option<Timestamp>,
}

impl QueryDocument {
    pub fn from_proto(
        document: proto::Document,
        read_time: Option<Timestamp>,
    ) -> Self {
        Self {
            inner: Arc::new(DocumentInner {
                path: DocumentPath::new(&document.name),
                document,
                read_time,
            }),
        }
    }

    pub fn path(&self) -> &DocumentPath {
        &self.inner.path
    }

    pub fn id(&self) -> &str {
        self.inner.path.id()
    }

    pub fn update_time(&self) -> Option<&Timestamp> {
        self.inner.document.update_time.as_ref()
    }

    pub fn create_time(&self) -> Option<&Timestamp> {
        self.inner.document.create_time.as_ref()
    }

    /// Read time of the snapshot this version was materialized in
    pub fn read_time(&self) -> Option<&Timestamp> {
        self.inner.read_time.as_ref()
    }

    pub fn fields(&self) -> &HashMap<String, proto::Value> {
        &self.inner.document.fields
    }

    pub fn get(
        &self,
        field: &str,
    ) -> Option<&proto::Value> {
        self.inner.document.fields.get(field)
    }

    pub fn as_proto(&self) -> &proto::Document {
        &self.inner.document
    }

    /// Two versions of the same path differ when their update times differ
    pub(crate) fn same_version(
        &self,
        other: &proto::Document,
    ) -> bool {
        self.inner.document.update_time == other.update_time
    }
}

/// Versions are equal when path and content match, whichever snapshot they
/// were read in.
impl PartialEq for QueryDocument {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.inner.document == other.inner.document
    }
}

impl fmt::Debug for QueryDocument {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("QueryDocument")
            .field("path", &self.inner.path)
            .field("update_time", &self.inner.document.update_time)
            .field("fields", &self.inner.document.fields.len())
            .finish()
    }
}

type CompareFn = dyn Fn(&QueryDocument, &QueryDocument) -> Ordering + Send + Sync;

/// Sort order of a watched result set.
///
/// The wrapped function may leave documents tied; [`DocumentComparator::compare`]
/// always breaks ties by path so the order is total.
#[derive(Clone)]
pub struct DocumentComparator(Arc<CompareFn>);

impl DocumentComparator {
    pub fn new<F>(compare: F) -> Self
    where F: Fn(&QueryDocument, &QueryDocument) -> Ordering + Send + Sync + 'static {
        Self(Arc::new(compare))
    }

    /// Orders documents by path only
    pub fn by_path() -> Self {
        Self::new(|_, _| Ordering::Equal)
    }

    pub fn compare(
        &self,
        a: &QueryDocument,
        b: &QueryDocument,
    ) -> Ordering {
        (self.0)(a, b).then_with(|| a.path().cmp(b.path()))
    }
}

impl fmt::Debug for DocumentComparator {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("DocumentComparator")
    }
}
