//! Snapshot enumeration and baseline persistence tests

use fileguard::store::{Baseline, BaselineStore, JsonBaselineStore, Snapshot};
use fileguard::tree::builder::{enumerate, SnapshotBuilder};
use fileguard::{Digest, EntryState, HashAlgorithm, StorageError};
use std::fs;
use tempfile::TempDir;

use super::test_utils::Fixture;

const SHA256_HELLO: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";
const SHA256_WORLD: &str = "486ea46224d1bb4fb680f34f7c9ad96a8f24ec88be73ea8e5a6c65260e9cb8a7";

#[test]
fn test_enumerate_records_every_regular_file() {
    let fixture = Fixture::with_hello_world();
    fixture.write("nested/deeper/c.txt", "new");

    let snapshot = enumerate(&fixture.data).unwrap();

    assert_eq!(snapshot.len(), 3);
    assert_eq!(
        snapshot.get(&fixture.key("a.txt")).and_then(|s| s.digest()).map(|d| d.to_hex()),
        Some(SHA256_HELLO.to_string())
    );
    assert_eq!(
        snapshot.get(&fixture.key("b.txt")).and_then(|s| s.digest()).map(|d| d.to_hex()),
        Some(SHA256_WORLD.to_string())
    );
    assert!(snapshot.contains(&fixture.key("nested/deeper/c.txt")));
}

#[test]
fn test_enumerate_empty_directory() {
    let fixture = Fixture::new();
    let snapshot = enumerate(&fixture.data).unwrap();
    assert!(snapshot.is_empty());
}

#[test]
fn test_enumerate_is_deterministic() {
    let fixture = Fixture::with_hello_world();
    fixture.write("sub/x.bin", "xyz");

    let first = enumerate(&fixture.data).unwrap();
    let second = enumerate(&fixture.data).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_enumerate_missing_root() {
    let fixture = Fixture::new();
    let err = enumerate(&fixture.root().join("nope")).unwrap_err();
    assert!(matches!(err, StorageError::RootInaccessible { .. }));
}

#[test]
fn test_algorithm_changes_digests() {
    let fixture = Fixture::with_hello_world();

    let sha = SnapshotBuilder::new(fixture.data.clone()).build().unwrap();
    let blake = SnapshotBuilder::new(fixture.data.clone())
        .with_algorithm(HashAlgorithm::Blake3)
        .build()
        .unwrap();

    let key = fixture.key("a.txt");
    assert_ne!(sha.snapshot.get(&key), blake.snapshot.get(&key));
    assert_eq!(
        blake.snapshot.get(&key).and_then(|s| s.digest()).map(|d| *d.as_bytes()),
        Some(*blake3::hash(b"hello").as_bytes())
    );
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_isolated() {
    use std::os::unix::fs::PermissionsExt;

    let fixture = Fixture::with_hello_world();
    fixture.write("locked.txt", "secret");
    let locked = fixture.data.join("locked.txt");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores permission bits; nothing to observe.
    if fs::read(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
        return;
    }

    let snapshot = enumerate(&fixture.data).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    assert_eq!(snapshot.len(), 3);
    assert_eq!(
        snapshot.get(&fixture.key("locked.txt")),
        Some(&EntryState::Unreadable)
    );
    assert!(snapshot.get(&fixture.key("a.txt")).unwrap().digest().is_some());
}

#[test]
fn test_persist_then_load_round_trip() {
    let fixture = Fixture::with_hello_world();
    let store = JsonBaselineStore::new();

    let snapshot = enumerate(&fixture.data).unwrap();
    let baseline = Baseline::new(HashAlgorithm::Sha256, snapshot);
    store.persist(&baseline, &fixture.baseline).unwrap();
    let loaded = store.load(&fixture.baseline).unwrap();

    assert_eq!(loaded, baseline);
}

#[test]
fn test_baseline_document_shape() {
    let temp_dir = TempDir::new().unwrap();
    let baseline = temp_dir.path().join("baseline.json");
    let mut snapshot = Snapshot::new();
    snapshot.insert_digest("/data/a.txt", Digest::from_hex(SHA256_HELLO).unwrap());
    snapshot.insert("/data/locked.txt", EntryState::Unreadable);

    JsonBaselineStore::new()
        .persist(&Baseline::new(HashAlgorithm::Sha256, snapshot), &baseline)
        .unwrap();

    let text = fs::read_to_string(&baseline).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["/data/a.txt"], SHA256_HELLO);
    assert!(value["/data/locked.txt"].is_null());
    assert!(text.contains("\n    \"/data/a.txt\""));
}

#[test]
fn test_load_hand_written_baseline() {
    let temp_dir = TempDir::new().unwrap();
    let baseline = temp_dir.path().join("baseline.json");
    fs::write(
        &baseline,
        format!(r#"{{"/x/a.txt":"{}","/x/b.txt":"{}"}}"#, SHA256_HELLO, SHA256_WORLD),
    )
    .unwrap();

    let loaded = JsonBaselineStore::new().load(&baseline).unwrap();
    assert_eq!(loaded.algorithm, HashAlgorithm::Sha256);
    assert_eq!(loaded.snapshot.len(), 2);
    assert_eq!(
        loaded.snapshot.get("/x/b.txt").and_then(|s| s.digest()).map(|d| d.to_hex()),
        Some(SHA256_WORLD.to_string())
    );
}

#[test]
fn test_load_missing_and_corrupt() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonBaselineStore::new();

    let missing = temp_dir.path().join("missing.json");
    assert!(matches!(
        store.load(&missing),
        Err(StorageError::BaselineMissing(_))
    ));

    for (name, body) in [
        ("truncated.json", "{\"/a\": \"abc"),
        ("array.json", "[1, 2, 3]"),
        ("short.json", "{\"/a\": \"abcd\"}"),
        ("number.json", "{\"/a\": 42}"),
    ] {
        let path = temp_dir.path().join(name);
        fs::write(&path, body).unwrap();
        assert!(
            matches!(store.load(&path), Err(StorageError::BaselineCorrupt { .. })),
            "{} should be corrupt",
            name
        );
    }
}

#[test]
fn test_blake3_baseline_names_its_algorithm() {
    let fixture = Fixture::with_hello_world();
    let store = JsonBaselineStore::new();

    let enumeration = SnapshotBuilder::new(fixture.data.clone())
        .with_algorithm(HashAlgorithm::Blake3)
        .build()
        .unwrap();
    let baseline = Baseline::new(HashAlgorithm::Blake3, enumeration.snapshot);
    store.persist(&baseline, &fixture.baseline).unwrap();

    let text = fs::read_to_string(&fixture.baseline).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["algorithm"], "blake3");
    assert_eq!(value["files"].as_object().unwrap().len(), 2);

    assert_eq!(store.load(&fixture.baseline).unwrap(), baseline);
}
