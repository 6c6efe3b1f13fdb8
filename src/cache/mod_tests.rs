use std::path::Path;

use super::*;
use crate::filesystem::mock::MockFileSystem;

const CACHE: &str = "/project/projectStructure.cache.json";

fn records(fs: &MockFileSystem) -> Option<Vec<CacheRecord>> {
    fs.contents(CACHE)
        .map(|json| serde_json::from_str(&json).unwrap())
}

fn still_failing(_: &str) -> Result<bool> {
    Ok(true)
}

fn seeded(records: &[CacheRecord]) -> MockFileSystem {
    MockFileSystem::new().with_file(CACHE, &serde_json::to_string(records).unwrap())
}

#[test]
fn first_violation_creates_cache() {
    let fs = MockFileSystem::new().with_file("/project/src/a.ts", "");
    let cache = ErrorCache::new(JsonCacheFile::in_project(&fs, Path::new("/project")), &fs);

    assert!(cache.record_violation("/project/src/a.ts", "boom", still_failing).unwrap());
    assert_eq!(
        records(&fs).unwrap(),
        vec![CacheRecord::new("/project/src/a.ts", "boom")]
    );
}

#[test]
fn cache_file_is_pretty_printed_camel_case() {
    let fs = MockFileSystem::new();
    let store = JsonCacheFile::in_project(&fs, Path::new("/project"));

    store.write(&[CacheRecord::new("/project/a.ts", "m")]).unwrap();
    let json = fs.contents(CACHE).unwrap();
    assert!(json.contains("\n  {"));
    assert!(json.contains("\"errorMessage\": \"m\""));
}

#[test]
fn same_message_for_other_existing_file_is_suppressed() {
    let fs = seeded(&[CacheRecord::new("/project/src/bad/a.ts", "folder bad")])
        .with_file("/project/src/bad/a.ts", "")
        .with_file("/project/src/bad/b.ts", "");
    let cache = ErrorCache::new(JsonCacheFile::in_project(&fs, Path::new("/project")), &fs);

    assert!(!cache.record_violation("/project/src/bad/b.ts", "folder bad", still_failing).unwrap());
    assert!(cache.record_violation("/project/src/bad/a.ts", "folder bad", still_failing).unwrap());
    assert_eq!(records(&fs).unwrap().len(), 1);
}

#[test]
fn message_moves_when_recorded_file_was_deleted() {
    let fs = seeded(&[CacheRecord::new("/project/src/gone.ts", "shared")])
        .with_file("/project/src/new.ts", "");
    let cache = ErrorCache::new(JsonCacheFile::in_project(&fs, Path::new("/project")), &fs);

    assert!(cache.record_violation("/project/src/new.ts", "shared", still_failing).unwrap());
    assert_eq!(
        records(&fs).unwrap(),
        vec![CacheRecord::new("/project/src/new.ts", "shared")]
    );
}

#[test]
fn message_moves_when_recorded_file_no_longer_fails() {
    let fs = seeded(&[CacheRecord::new("/project/src/old.ts", "shared")])
        .with_file("/project/src/old.ts", "")
        .with_file("/project/src/new.ts", "");
    let cache = ErrorCache::new(JsonCacheFile::in_project(&fs, Path::new("/project")), &fs);

    let mut asked = Vec::new();
    let report = cache
        .record_violation("/project/src/new.ts", "shared", |recorded| {
            asked.push(recorded.to_string());
            Ok(false)
        })
        .unwrap();

    assert!(report);
    assert_eq!(asked, vec!["/project/src/old.ts".to_string()]);
    assert_eq!(
        records(&fs).unwrap(),
        vec![CacheRecord::new("/project/src/new.ts", "shared")]
    );
}

#[test]
fn same_file_is_reported_without_asking() {
    let fs = seeded(&[CacheRecord::new("/project/a.ts", "m")]).with_file("/project/a.ts", "");
    let cache = ErrorCache::new(JsonCacheFile::in_project(&fs, Path::new("/project")), &fs);

    let report = cache
        .record_violation("/project/a.ts", "m", |_| panic!("not consulted"))
        .unwrap();
    assert!(report);
}

#[test]
fn new_message_is_prepended() {
    let fs = seeded(&[CacheRecord::new("/project/a.ts", "old")])
        .with_file("/project/a.ts", "")
        .with_file("/project/b.ts", "");
    let cache = ErrorCache::new(JsonCacheFile::in_project(&fs, Path::new("/project")), &fs);

    assert!(cache.record_violation("/project/b.ts", "new", still_failing).unwrap());
    let stored = records(&fs).unwrap();
    assert_eq!(stored[0], CacheRecord::new("/project/b.ts", "new"));
    assert_eq!(stored[1], CacheRecord::new("/project/a.ts", "old"));
}

#[test]
fn success_prunes_deleted_files() {
    let fs = seeded(&[
        CacheRecord::new("/project/deleted.ts", "x"),
        CacheRecord::new("/project/kept.ts", "y"),
    ])
    .with_file("/project/kept.ts", "")
    .with_file("/project/clean.ts", "");
    let cache = ErrorCache::new(JsonCacheFile::in_project(&fs, Path::new("/project")), &fs);

    cache.record_success("/project/clean.ts").unwrap();
    assert_eq!(
        records(&fs).unwrap(),
        vec![CacheRecord::new("/project/kept.ts", "y")]
    );
}

#[test]
fn success_of_last_recorded_file_removes_cache() {
    let fs = seeded(&[CacheRecord::new("/project/a.ts", "x")]).with_file("/project/a.ts", "");
    let cache = ErrorCache::new(JsonCacheFile::in_project(&fs, Path::new("/project")), &fs);

    cache.record_success("/project/a.ts").unwrap();
    assert!(records(&fs).is_none());
}

#[test]
fn success_without_cache_is_noop() {
    let fs = MockFileSystem::new();
    let cache = ErrorCache::new(JsonCacheFile::in_project(&fs, Path::new("/project")), &fs);

    cache.record_success("/project/a.ts").unwrap();
    assert!(records(&fs).is_none());
}

#[test]
fn unreadable_cache_is_treated_as_absent() {
    let fs = MockFileSystem::new()
        .with_file(CACHE, "not json")
        .with_file("/project/a.ts", "");
    let cache = ErrorCache::new(JsonCacheFile::in_project(&fs, Path::new("/project")), &fs);

    assert!(cache.record_violation("/project/a.ts", "m", still_failing).unwrap());
    assert_eq!(records(&fs).unwrap().len(), 1);
}

#[test]
fn json_cache_file_roundtrip_with_tempdir() {
    let dir = tempfile::tempdir().unwrap();
    let fs = crate::filesystem::RealFileSystem;
    let store = JsonCacheFile::in_project(&fs, dir.path());

    assert!(store.read().unwrap().is_none());
    store.write(&[CacheRecord::new("a", "b")]).unwrap();
    assert_eq!(store.read().unwrap().unwrap().len(), 1);
    store.remove().unwrap();
    store.remove().unwrap();
    assert!(!store.path().exists());
}
