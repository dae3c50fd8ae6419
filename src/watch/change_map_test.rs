use super::*;
use crate::model::DocumentComparator;
use crate::model::DocumentPath;
use crate::model::DocumentSet;
use crate::test_utils::document;
use crate::test_utils::query_document;
use crate::test_utils::timestamp;

fn set_of(names: &[(&str, i64)]) -> DocumentSet {
    names.iter().fold(
        DocumentSet::empty(DocumentComparator::by_path()),
        |set, (name, version)| set.add(query_document(name, *version)),
    )
}

fn names(documents: &[crate::model::QueryDocument]) -> Vec<&str> {
    let mut names: Vec<&str> = documents.iter().map(|d| d.path().as_str()).collect();
    names.sort();
    names
}

#[test]
fn extract_classifies_against_current_set() {
    let current = set_of(&[("c/a", 1), ("c/b", 1), ("c/c", 1)]);
    let mut changes = ChangeMap::default();
    changes.tombstone(DocumentPath::new("c/a"));
    changes.tombstone(DocumentPath::new("c/missing"));
    changes.upsert(document("c/b", 2));
    changes.upsert(document("c/c", 1));
    changes.upsert(document("c/d", 1));

    let change_set = changes.extract_changes(&current, Some(timestamp(10)));

    assert_eq!(names(&change_set.deletes), vec!["c/a"]);
    assert_eq!(names(&change_set.adds), vec!["c/d"]);
    assert_eq!(names(&change_set.updates), vec!["c/b"]);
    assert!(changes.is_empty());
    assert_eq!(change_set.adds[0].read_time(), Some(&timestamp(10)));
}

#[test]
fn later_change_for_same_path_wins() {
    let current = set_of(&[("c/a", 1)]);
    let mut changes = ChangeMap::default();
    changes.upsert(document("c/a", 2));
    changes.tombstone(DocumentPath::new("c/a"));
    assert_eq!(changes.len(), 1);

    let change_set = changes.extract_changes(&current, None);
    assert_eq!(names(&change_set.deletes), vec!["c/a"]);
    assert!(change_set.updates.is_empty());
}

#[test]
fn projected_size_counts_adds_and_deletes() {
    let current = set_of(&[("c/a", 1), ("c/b", 1)]);
    let mut changes = ChangeMap::default();
    assert_eq!(changes.projected_size(&current), 2);

    changes.upsert(document("c/c", 1));
    changes.upsert(document("c/a", 5));
    changes.tombstone(DocumentPath::new("c/b"));
    changes.tombstone(DocumentPath::new("c/zzz"));

    assert_eq!(changes.projected_size(&current), 2);
    assert_eq!(changes.len(), 4);
}

#[test]
fn clear_drops_everything() {
    let mut changes = ChangeMap::default();
    changes.upsert(document("c/a", 1));
    changes.clear();

    assert!(changes.is_empty());
    let change_set = changes.extract_changes(&set_of(&[]), None);
    assert!(change_set.adds.is_empty());
}
