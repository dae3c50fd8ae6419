use super::DocumentPath;

#[test]
fn normalizes_slashes() {
    let path = DocumentPath::new("/rooms//r1/");
    assert_eq!(path.as_str(), "rooms/r1");
    assert_eq!(path, DocumentPath::from("rooms/r1"));
    assert_eq!(path.id(), "r1");
}

#[test]
fn orders_by_segment() {
    let nested = DocumentPath::new("a/b");
    let sibling = DocumentPath::new("a-c");
    assert!(nested < sibling);
    assert!(nested.as_str() > sibling.as_str());

    assert!(DocumentPath::new("rooms/a") < DocumentPath::new("rooms/a/msgs/m1"));
}

#[test]
fn resolves_under_database() {
    let path = DocumentPath::resolve("projects/p/databases/(default)", "rooms/r1");
    assert_eq!(path.as_str(), "projects/p/databases/(default)/documents/rooms/r1");
    assert_eq!(path.to_string(), path.as_str());
}
