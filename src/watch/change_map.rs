use std::collections::HashMap;

use prost_types::Timestamp;

use crate::model::DocumentPath;
use crate::model::DocumentSet;
use crate::model::QueryDocument;
use crate::proto;

/// Latest known state of a path since the last materialized snapshot
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingChange {
    Upsert(proto::Document),
    Tombstone,
}

/// Changes accumulated between two snapshots, keyed by path. Later changes
/// to the same path overwrite earlier ones.
#[derive(Debug, Default)]
pub(crate) struct ChangeMap {
    changes: HashMap<DocumentPath, PendingChange>,
}

/// Accumulated changes classified against a document set. Each list is
/// unordered until applied.
#[derive(Debug, Default)]
pub(crate) struct ChangeSet {
    /// Versions currently in the set that must go
    pub(crate) deletes: Vec<QueryDocument>,
    /// New versions of paths the set does not contain
    pub(crate) adds: Vec<QueryDocument>,
    /// New versions of paths the set contains with a different update time
    pub(crate) updates: Vec<QueryDocument>,
}

impl ChangeMap {
    pub(crate) fn upsert(
        &mut self,
        document: proto::Document,
    ) {
        let path = DocumentPath::new(&document.name);
        self.changes.insert(path, PendingChange::Upsert(document));
    }

    pub(crate) fn tombstone(
        &mut self,
        path: DocumentPath,
    ) {
        self.changes.insert(path, PendingChange::Tombstone);
    }

    pub(crate) fn clear(&mut self) {
        self.changes.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.changes.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Size the result set would have if every pending change were applied
    pub(crate) fn projected_size(
        &self,
        documents: &DocumentSet,
    ) -> usize {
        let mut adds = 0;
        let mut deletes = 0;
        for (path, change) in &self.changes {
            match (change, documents.contains(path)) {
                (PendingChange::Upsert(_), false) => adds += 1,
                (PendingChange::Tombstone, true) => deletes += 1,
                _ => {}
            }
        }
        documents.len() + adds - deletes
    }

    /// Drains the pending changes and classifies them against `documents`.
    /// Tombstones for absent paths and upserts that repeat the stored update
    /// time are dropped.
    pub(crate) fn extract_changes(
        &mut self,
        documents: &DocumentSet,
        read_time: Option<Timestamp>,
    ) -> ChangeSet {
        let mut change_set = ChangeSet::default();

        for (path, change) in self.changes.drain() {
            match (change, documents.get(&path)) {
                (PendingChange::Tombstone, Some(existing)) => change_set.deletes.push(existing.clone()),
                (PendingChange::Tombstone, None) => {}
                (PendingChange::Upsert(document), None) => {
                    change_set.adds.push(QueryDocument::from_proto(document, read_time));
                }
                (PendingChange::Upsert(document), Some(existing)) => {
                    if !existing.same_version(&document) {
                        change_set.updates.push(QueryDocument::from_proto(document, read_time));
                    }
                }
            }
        }

        change_set
    }
}
