use prost_types::Timestamp;

use super::ChangeSet;
use crate::model::DocumentPath;
use crate::model::DocumentSet;
use crate::model::QueryDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    Added,
    Modified,
    Removed,
}

/// One entry of a snapshot diff.
///
/// Indices refer to the document's position right after the change was
/// applied, walking removals, then additions, then modifications. An added
/// document has no `old_index`, a removed one has no `new_index`.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentChange {
    document: QueryDocument,
    change_type: ChangeType,
    old_index: Option<usize>,
    new_index: Option<usize>,
}

impl DocumentChange {
    pub fn document(&self) -> &QueryDocument {
        &self.document
    }

    pub fn change_type(&self) -> ChangeType {
        self.change_type
    }

    pub fn old_index(&self) -> Option<usize> {
        self.old_index
    }

    pub fn new_index(&self) -> Option<usize> {
        self.new_index
    }
}

/// Consistent view of the watched result set at `read_time`, plus the diff
/// from the previously emitted snapshot.
#[derive(Debug, Clone)]
pub struct QuerySnapshot {
    read_time: Timestamp,
    documents: DocumentSet,
    changes: Vec<DocumentChange>,
}

impl QuerySnapshot {
    pub(crate) fn new(
        read_time: Timestamp,
        documents: DocumentSet,
        changes: Vec<DocumentChange>,
    ) -> Self {
        Self {
            read_time,
            documents,
            changes,
        }
    }

    pub fn read_time(&self) -> &Timestamp {
        &self.read_time
    }

    pub fn documents(&self) -> &DocumentSet {
        &self.documents
    }

    pub fn changes(&self) -> &[DocumentChange] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueryDocument> {
        self.documents.iter()
    }

    pub fn get(
        &self,
        path: &DocumentPath,
    ) -> Option<&QueryDocument> {
        self.documents.get(path)
    }
}

/// Applies `change_set` to `documents` and returns the next version together
/// with the ordered diff.
pub(crate) fn apply_changes(
    documents: &DocumentSet,
    change_set: ChangeSet,
) -> (DocumentSet, Vec<DocumentChange>) {
    let comparator = documents.comparator().clone();
    let ChangeSet {
        mut deletes,
        mut adds,
        mut updates,
    } = change_set;
    deletes.sort_by(|a, b| comparator.compare(a, b));
    adds.sort_by(|a, b| comparator.compare(a, b));
    updates.sort_by(|a, b| comparator.compare(a, b));

    let mut next = documents.clone();
    let mut changes = Vec::with_capacity(deletes.len() + adds.len() + updates.len());

    for document in deletes {
        let old_index = next.index_of(document.path());
        next = next.remove(document.path());
        changes.push(DocumentChange {
            document,
            change_type: ChangeType::Removed,
            old_index,
            new_index: None,
        });
    }

    for document in adds {
        next = next.add(document.clone());
        let new_index = next.index_of(document.path());
        changes.push(DocumentChange {
            document,
            change_type: ChangeType::Added,
            old_index: None,
            new_index,
        });
    }

    for document in updates {
        let old_index = next.index_of(document.path());
        next = next.add(document.clone());
        let new_index = next.index_of(document.path());
        changes.push(DocumentChange {
            document,
            change_type: ChangeType::Modified,
            old_index,
            new_index,
        });
    }

    (next, changes)
}
