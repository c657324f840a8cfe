//! Property-based tests for determinism and diff guarantees

use fileguard::store::{Baseline, BaselineStore, JsonBaselineStore, Snapshot};
use fileguard::tree::hasher;
use fileguard::{compare, Digest, EntryState, HashAlgorithm};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn entry_state() -> impl Strategy<Value = EntryState> {
    prop_oneof![
        4 => any::<[u8; 32]>().prop_map(|b| EntryState::Hashed(Digest::from_bytes(b))),
        1 => Just(EntryState::Unreadable),
    ]
}

fn snapshot() -> impl Strategy<Value = Snapshot> {
    prop::collection::btree_map(r#"(/[^/\x00]{1,8}){1,3}"#, entry_state(), 0..24)
        .prop_map(|entries| entries.into_iter().collect())
}

/// Same bytes always give the same digest, whatever the read size
#[test]
fn test_file_digest_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::new(ProptestConfig::with_cases(64));
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("content.bin");

    runner
        .run(
            &(prop::collection::vec(any::<u8>(), 0..4096), 1usize..512),
            |(content, chunk_size)| {
                fs::write(&file, &content).unwrap();

                let streamed =
                    hasher::digest_file_chunked(&file, HashAlgorithm::Sha256, chunk_size)
                        .unwrap();
                let again = hasher::digest_file(&file, HashAlgorithm::Sha256).unwrap();
                let in_memory = hasher::compute_content_hash(&content, HashAlgorithm::Sha256);

                prop_assert_eq!(streamed, again);
                prop_assert_eq!(streamed, in_memory);
                Ok(())
            },
        )
        .unwrap();
}

/// Persisting and loading a baseline gives it back unchanged, whatever
/// characters its paths contain
#[test]
fn test_persist_load_round_trip_property() {
    let mut runner = proptest::test_runner::TestRunner::new(ProptestConfig::with_cases(64));
    let temp_dir = TempDir::new().unwrap();
    let baseline = temp_dir.path().join("baseline.json");
    let store = JsonBaselineStore::new();

    runner
        .run(&(snapshot(), any::<bool>()), |(snapshot, blake3)| {
            let algorithm = if blake3 {
                HashAlgorithm::Blake3
            } else {
                HashAlgorithm::Sha256
            };
            let original = Baseline::new(algorithm, snapshot);
            store.persist(&original, &baseline).unwrap();
            let loaded = store.load(&baseline).unwrap();
            prop_assert_eq!(loaded, original);
            Ok(())
        })
        .unwrap();
}

proptest! {
    /// Every path of either snapshot lands in exactly one category
    #[test]
    fn test_diff_partitions_all_paths(current in snapshot(), baseline in snapshot()) {
        let diff = compare(&current, &baseline);

        let all: BTreeSet<&String> = current.paths().chain(baseline.paths()).collect();
        let total = diff.new.len() + diff.changed.len() + diff.deleted.len() + diff.unchanged.len();
        prop_assert_eq!(total, all.len());

        for path in &all {
            let hits = [&diff.new, &diff.changed, &diff.deleted, &diff.unchanged]
                .iter()
                .filter(|list| list.contains(*path))
                .count();
            prop_assert_eq!(hits, 1, "{} classified {} times", path, hits);
        }

        for path in &diff.new {
            prop_assert!(current.contains(path) && !baseline.contains(path));
        }
        for path in &diff.deleted {
            prop_assert!(baseline.contains(path) && !current.contains(path));
        }
        for path in &diff.changed {
            prop_assert_ne!(current.get(path), baseline.get(path));
        }
    }

    /// A snapshot compared with itself is entirely unchanged
    #[test]
    fn test_self_compare_is_clean(s in snapshot()) {
        let diff = compare(&s, &s);
        prop_assert!(diff.is_clean());
        prop_assert_eq!(diff.unchanged.len(), s.len());
    }

    /// Swapping the arguments swaps New and Deleted
    #[test]
    fn test_compare_is_symmetric(current in snapshot(), baseline in snapshot()) {
        let forward = compare(&current, &baseline);
        let backward = compare(&baseline, &current);
        prop_assert_eq!(forward.new, backward.deleted);
        prop_assert_eq!(forward.deleted, backward.new);
        prop_assert_eq!(forward.changed, backward.changed);
        prop_assert_eq!(forward.unchanged, backward.unchanged);
    }
}
