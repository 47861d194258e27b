mod common;

use std::fs;

use lexmap::cache::*;
use lexmap::graph::MappingIndex;
use lexmap::symbols::parse_symbol;
use lexmap::types::*;
use tempfile::TempDir;

use common::init_tracing;

fn sample_index() -> MappingIndex {
    let edge = |s: &str, sn, t: &str, tn, c| {
        MappingEdge::direct(
            parse_symbol(s, sn).unwrap(),
            parse_symbol(t, tn).unwrap(),
            c,
        )
    };
    MappingIndex::from_edges(vec![
        edge("give.01", Namespace::PropBank, "give-13.1", Namespace::VerbNet, 1.0),
        edge("give.01", Namespace::PropBank, "Giving", Namespace::FrameNet, 0.9),
        edge("give#2", Namespace::VerbNet, "give%2:40:00::", Namespace::WordNet, 0.75),
    ])
    .unwrap()
}

#[test]
fn test_save_then_load_restores_the_index() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mappings.json");
    let index = sample_index();

    save(&index, &path, Some("abc123")).unwrap();
    assert!(!path.with_extension("tmp").exists());

    match load(&path, Some("abc123")).unwrap() {
        CacheLoad::Hit(loaded) => {
            assert_eq!(loaded.edges(), index.edges());
            assert_eq!(loaded.len(), index.len());
        }
        CacheLoad::Miss(miss) => panic!("expected a hit, got {miss}"),
    }
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let outcome = load(&dir.path().join("absent.json"), None).unwrap();
    assert!(matches!(outcome, CacheLoad::Miss(CacheMiss::NotFound)));
}

#[test]
fn test_version_mismatch_is_a_miss() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mappings.json");
    fs::write(
        &path,
        r#"{"format_version": 99, "fingerprint": null, "edges": []}"#,
    )
    .unwrap();

    match load(&path, None).unwrap() {
        CacheLoad::Miss(CacheMiss::VersionMismatch { found, expected }) => {
            assert_eq!(found, 99);
            assert_eq!(expected, CACHE_FORMAT_VERSION);
        }
        other => panic!("expected VersionMismatch, got {other:?}"),
    }
}

#[test]
fn test_garbage_and_bad_edges_are_corrupt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mappings.json");

    fs::write(&path, "not json at all").unwrap();
    assert!(matches!(
        load(&path, None).unwrap(),
        CacheLoad::Miss(CacheMiss::Corrupt { .. })
    ));

    fs::write(
        &path,
        r#"{"format_version": 1, "fingerprint": null, "edges": [
            {"source": "give", "source_namespace": "propbank",
             "target": "give-13.1", "target_namespace": "verbnet", "confidence": 1.0}
        ]}"#,
    )
    .unwrap();
    match load(&path, None).unwrap() {
        CacheLoad::Miss(CacheMiss::Corrupt { reason }) => assert!(reason.contains("edge 0")),
        other => panic!("expected Corrupt, got {other:?}"),
    }
}

#[test]
fn test_fingerprint_mismatch_is_stale() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mappings.json");
    save(&sample_index(), &path, Some("old")).unwrap();

    assert!(matches!(
        load(&path, Some("new")).unwrap(),
        CacheLoad::Miss(CacheMiss::Stale)
    ));
    // Without an expectation any fingerprint is accepted.
    assert!(load(&path, None).unwrap().is_hit());
}

#[test]
fn test_invalidate_removes_file_and_tolerates_absence() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("mappings.json");
    save(&sample_index(), &path, None).unwrap();
    assert!(path.exists());

    invalidate(&path).unwrap();
    assert!(!path.exists());
    invalidate(&path).unwrap();
}
