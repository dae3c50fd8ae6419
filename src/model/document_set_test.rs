use std::cmp::Ordering;

use proptest::prelude::*;

use super::*;
use crate::proto::value::ValueType;
use crate::test_utils::document_with_fields;
use crate::test_utils::integer_value;
use crate::test_utils::query_document;

fn rank(document: &QueryDocument) -> i64 {
    match document.get("rank").and_then(|v| v.value_type.as_ref()) {
        Some(ValueType::IntegerValue(n)) => *n,
        _ => 0,
    }
}

fn by_rank_desc() -> DocumentComparator {
    DocumentComparator::new(|a, b| rank(b).cmp(&rank(a)))
}

fn ranked(
    name: &str,
    value: i64,
) -> QueryDocument {
    QueryDocument::from_proto(
        document_with_fields(name, 1, vec![("rank", integer_value(value))]),
        None,
    )
}

fn paths(set: &DocumentSet) -> Vec<&str> {
    set.paths().map(DocumentPath::as_str).collect()
}

#[test]
fn add_keeps_path_order() {
    let set = DocumentSet::empty(DocumentComparator::by_path())
        .add(query_document("rooms/c", 1))
        .add(query_document("rooms/a", 1))
        .add(query_document("rooms/b", 1));

    assert_eq!(paths(&set), vec!["rooms/a", "rooms/b", "rooms/c"]);
    assert_eq!(set.index_of(&"rooms/b".into()), Some(1));
    assert_eq!(set.at(2).map(|d| d.id()), Some("c"));
}

#[test]
fn add_replaces_existing_path() {
    let set = DocumentSet::empty(by_rank_desc())
        .add(ranked("rooms/a", 1))
        .add(ranked("rooms/b", 2));
    assert_eq!(paths(&set), vec!["rooms/b", "rooms/a"]);

    let updated = set.add(ranked("rooms/a", 5));
    assert_eq!(updated.len(), 2);
    assert_eq!(paths(&updated), vec!["rooms/a", "rooms/b"]);
    assert_eq!(updated.get(&"rooms/a".into()).map(rank), Some(5));
}

#[test]
fn older_versions_are_unaffected() {
    let v1 = DocumentSet::empty(DocumentComparator::by_path()).add(query_document("rooms/a", 1));
    let v2 = v1.add(query_document("rooms/b", 1));
    let v3 = v2.remove(&"rooms/a".into());

    assert_eq!(paths(&v1), vec!["rooms/a"]);
    assert_eq!(paths(&v2), vec!["rooms/a", "rooms/b"]);
    assert_eq!(paths(&v3), vec!["rooms/b"]);
}

#[test]
fn remove_absent_path_is_noop() {
    let set = DocumentSet::empty(DocumentComparator::by_path()).add(query_document("rooms/a", 1));
    let same = set.remove(&"rooms/zzz".into());

    assert_eq!(same, set);
    assert!(!same.contains(&"rooms/zzz".into()));
    assert_eq!(same.index_of(&"rooms/zzz".into()), None);
}

#[test]
fn ties_break_by_path() {
    let set = DocumentSet::empty(by_rank_desc())
        .add(ranked("rooms/z", 3))
        .add(ranked("rooms/m", 3))
        .add(ranked("rooms/a", 3));

    assert_eq!(paths(&set), vec!["rooms/a", "rooms/m", "rooms/z"]);
}

proptest! {
    #[test]
    fn any_sequence_of_mutations_stays_sorted(
        ops in proptest::collection::vec((0usize..12, -5i64..5, any::<bool>()), 0..64)
    ) {
        let mut set = DocumentSet::empty(by_rank_desc());
        let mut expected = std::collections::BTreeMap::new();

        for (slot, value, insert) in ops {
            let name = format!("docs/d{slot}");
            if insert {
                set = set.add(ranked(&name, value));
                expected.insert(name, value);
            } else {
                set = set.remove(&DocumentPath::new(&name));
                expected.remove(&name);
            }
        }

        prop_assert_eq!(set.len(), expected.len());
        let docs: Vec<_> = set.iter().cloned().collect();
        for pair in docs.windows(2) {
            prop_assert_eq!(set.comparator().compare(&pair[0], &pair[1]), Ordering::Less);
        }
        for (index, document) in docs.iter().enumerate() {
            prop_assert_eq!(set.index_of(document.path()), Some(index));
            prop_assert_eq!(expected.get(document.path().as_str()).copied(), Some(rank(document)));
        }
    }
}
