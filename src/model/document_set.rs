use std::cmp::Ordering;

use im::OrdMap;
use im::Vector;

use super::DocumentComparator;
use super::DocumentPath;
use super::QueryDocument;

/// Persistent, sorted collection of documents keyed by path.
///
/// `add` and `remove` leave `self` untouched and return the next version.
/// Both the path index and the sorted sequence share structure with older
/// versions, so deriving a version costs O(log n).
#[derive(Clone)]
pub struct DocumentSet {
    comparator: DocumentComparator,
    by_path: OrdMap<DocumentPath, QueryDocument>,
    sorted: Vector<QueryDocument>,
}

impl DocumentSet {
    pub fn empty(comparator: DocumentComparator) -> Self {
        Self {
            comparator,
            by_path: OrdMap::new(),
            sorted: Vector::new(),
        }
    }

    pub fn comparator(&self) -> &DocumentComparator {
        &self.comparator
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn contains(
        &self,
        path: &DocumentPath,
    ) -> bool {
        self.by_path.contains_key(path)
    }

    pub fn get(
        &self,
        path: &DocumentPath,
    ) -> Option<&QueryDocument> {
        self.by_path.get(path)
    }

    /// Document at `index` in sort order
    pub fn at(
        &self,
        index: usize,
    ) -> Option<&QueryDocument> {
        self.sorted.get(index)
    }

    /// Position of `path` in sort order
    pub fn index_of(
        &self,
        path: &DocumentPath,
    ) -> Option<usize> {
        let document = self.by_path.get(path)?;
        self.position(document)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueryDocument> {
        self.sorted.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &DocumentPath> {
        self.sorted.iter().map(QueryDocument::path)
    }

    /// Returns a version containing `document`, replacing any document with
    /// the same path.
    pub fn add(
        &self,
        document: QueryDocument,
    ) -> Self {
        let mut next = self.remove(document.path());
        let index = next.insertion_point(&document);
        next.sorted.insert(index, document.clone());
        next.by_path.insert(document.path().clone(), document);
        next
    }

    /// Returns a version without `path`. Removing an absent path yields an
    /// identical set.
    pub fn remove(
        &self,
        path: &DocumentPath,
    ) -> Self {
        let mut next = self.clone();
        if let Some(existing) = next.by_path.remove(path) {
            if let Some(index) = self.position(&existing) {
                next.sorted.remove(index);
            }
        }
        next
    }

    fn position(
        &self,
        document: &QueryDocument,
    ) -> Option<usize> {
        self.sorted
            .binary_search_by(|probe| self.comparator.compare(probe, document))
            .ok()
    }

    fn insertion_point(
        &self,
        document: &QueryDocument,
    ) -> usize {
        match self
            .sorted
            .binary_search_by(|probe| match self.comparator.compare(probe, document) {
                Ordering::Equal => Ordering::Less,
                other => other,
            }) {
            Ok(index) | Err(index) => index,
        }
    }
}

impl std::fmt::Debug for DocumentSet {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_list().entries(self.paths()).finish()
    }
}

impl PartialEq for DocumentSet {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.sorted == other.sorted
    }
}
