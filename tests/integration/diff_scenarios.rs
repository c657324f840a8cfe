//! End-to-end create/check scenarios through the monitor facade

use fileguard::{ApiError, StorageError};

use super::test_utils::Fixture;

/// Scenario A: create records both files; an immediate check is clean
#[test]
fn test_create_then_check_reports_no_changes() {
    let fixture = Fixture::with_hello_world();
    let monitor = fixture.monitor();

    let created = monitor.create(&fixture.data).unwrap();
    assert_eq!(created.snapshot.len(), 2);
    assert!(fixture.baseline.exists());

    let checked = monitor.check(&fixture.data).unwrap();
    assert!(checked.diff.is_clean());
    assert_eq!(
        checked.diff.unchanged,
        vec![fixture.key("a.txt"), fixture.key("b.txt")]
    );
}

/// Scenario B: a modified file is Changed and nothing else moves
#[test]
fn test_modified_file_is_changed() {
    let fixture = Fixture::with_hello_world();
    let monitor = fixture.monitor();
    monitor.create(&fixture.data).unwrap();

    fixture.write("a.txt", "HELLO");
    let diff = monitor.check(&fixture.data).unwrap().diff;

    assert_eq!(diff.changed, vec![fixture.key("a.txt")]);
    assert!(diff.new.is_empty());
    assert!(diff.deleted.is_empty());
    assert_eq!(diff.unchanged, vec![fixture.key("b.txt")]);
}

/// Scenario C: an added file is New
#[test]
fn test_added_file_is_new() {
    let fixture = Fixture::with_hello_world();
    let monitor = fixture.monitor();
    monitor.create(&fixture.data).unwrap();

    fixture.write("c.txt", "new");
    let diff = monitor.check(&fixture.data).unwrap().diff;

    assert_eq!(diff.new, vec![fixture.key("c.txt")]);
    assert!(diff.changed.is_empty());
    assert!(diff.deleted.is_empty());
    assert_eq!(diff.unchanged.len(), 2);
}

/// Scenario D: a removed file is Deleted
#[test]
fn test_removed_file_is_deleted() {
    let fixture = Fixture::with_hello_world();
    let monitor = fixture.monitor();
    monitor.create(&fixture.data).unwrap();

    fixture.remove("b.txt");
    let diff = monitor.check(&fixture.data).unwrap().diff;

    assert_eq!(diff.deleted, vec![fixture.key("b.txt")]);
    assert!(diff.new.is_empty());
    assert!(diff.changed.is_empty());
    assert_eq!(diff.unchanged, vec![fixture.key("a.txt")]);
}

/// Scenario E: check without a baseline fails with BaselineMissing
#[test]
fn test_check_without_baseline_fails() {
    let fixture = Fixture::with_hello_world();
    let err = fixture.monitor().check(&fixture.data).unwrap_err();

    match err {
        ApiError::StorageError(StorageError::BaselineMissing(path)) => {
            assert_eq!(path, fixture.baseline)
        }
        other => panic!("expected BaselineMissing, got {:?}", other),
    }
    assert!(!fixture.baseline.exists());
}

#[test]
fn test_missing_baseline_wins_over_missing_root() {
    let fixture = Fixture::new();
    let err = fixture
        .monitor()
        .check(&fixture.root().join("gone"))
        .unwrap_err();
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_recreate_replaces_baseline() {
    let fixture = Fixture::with_hello_world();
    let monitor = fixture.monitor();
    monitor.create(&fixture.data).unwrap();

    fixture.write("c.txt", "new");
    monitor.create(&fixture.data).unwrap();

    let checked = monitor.check(&fixture.data).unwrap();
    assert!(checked.diff.is_clean());
    assert_eq!(checked.diff.unchanged.len(), 3);
}

#[test]
fn test_combined_changes() {
    let fixture = Fixture::with_hello_world();
    fixture.write("keep.txt", "same");
    let monitor = fixture.monitor();
    monitor.create(&fixture.data).unwrap();

    fixture.write("a.txt", "HELLO");
    fixture.remove("b.txt");
    fixture.write("sub/c.txt", "new");
    let diff = monitor.check(&fixture.data).unwrap().diff;

    assert_eq!(diff.new, vec![fixture.key("sub/c.txt")]);
    assert_eq!(diff.changed, vec![fixture.key("a.txt")]);
    assert_eq!(diff.deleted, vec![fixture.key("b.txt")]);
    assert_eq!(diff.unchanged, vec![fixture.key("keep.txt")]);
}

/// Names that differ only in Unicode normalization are separate files
#[cfg(target_os = "linux")]
#[test]
fn test_nfc_and_nfd_names_are_tracked_separately() {
    let fixture = Fixture::new();
    let composed = "caf\u{e9}.txt";
    let decomposed = "cafe\u{301}.txt";
    fixture.write(composed, "composed");
    fixture.write(decomposed, "decomposed");

    let monitor = fixture.monitor();
    assert_eq!(monitor.create(&fixture.data).unwrap().snapshot.len(), 2);

    fixture.write(decomposed, "tampered");
    let diff = monitor.check(&fixture.data).unwrap().diff;

    assert_eq!(diff.changed, vec![fixture.key(decomposed)]);
    assert_eq!(diff.unchanged, vec![fixture.key(composed)]);
    assert!(diff.new.is_empty());
    assert!(diff.deleted.is_empty());
}
