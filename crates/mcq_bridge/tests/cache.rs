use std::fs;
use std::sync::Arc;

use mcq_bridge::{
    CacheError, CacheStore, FileCacheStore, MemoryCacheStore, ResultCache, RESULT_CACHE_KEY,
};
use mcq_core::{McqOption, McqResponse, Question};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

fn sample() -> McqResponse {
    McqResponse {
        questions: vec![Question {
            prompt: "2+2?".to_string(),
            options: vec![
                McqOption {
                    label: "A".to_string(),
                    text: "3".to_string(),
                },
                McqOption {
                    label: "B".to_string(),
                    text: "4".to_string(),
                },
            ],
            correct_label: "B".to_string(),
            explanation: "basic arithmetic".to_string(),
        }],
    }
}

#[test]
fn memory_store_is_keyed() {
    let store = MemoryCacheStore::new();
    store.set("a", json!(1)).unwrap();
    store.set("b", json!(2)).unwrap();
    store.remove("a").unwrap();

    assert_eq!(store.get("a").unwrap(), None);
    assert_eq!(store.get("b").unwrap(), Some(json!(2)));
}

#[test]
fn result_cache_write_then_read() {
    let cache = ResultCache::new(Arc::new(MemoryCacheStore::new()));
    assert_eq!(cache.key(), RESULT_CACHE_KEY);
    assert_eq!(cache.read(), None);

    cache.write(&sample());
    assert_eq!(cache.read(), Some(sample()));

    cache.write(&McqResponse::default());
    assert_eq!(cache.read(), Some(McqResponse::default()));

    cache.clear();
    assert_eq!(cache.read(), None);
}

#[test]
fn result_cache_ignores_undecodable_slot() {
    mcq_logging::initialize_for_tests();
    let store = Arc::new(MemoryCacheStore::new());
    store.set(RESULT_CACHE_KEY, json!({"questions": "nope"})).unwrap();

    let cache = ResultCache::new(store);
    assert_eq!(cache.read(), None);
}

#[test]
fn caches_with_different_keys_do_not_share_slots() {
    let store: Arc<dyn CacheStore> = Arc::new(MemoryCacheStore::new());
    let mcq = ResultCache::new(store.clone());
    let other = ResultCache::with_key(store, "other");

    mcq.write(&sample());
    assert_eq!(other.read(), None);
}

#[test]
fn file_store_survives_new_instance() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("cache");

    ResultCache::new(Arc::new(FileCacheStore::new(dir.clone()))).write(&sample());
    assert!(dir.join("mcq.json").is_file());

    let reopened = ResultCache::new(Arc::new(FileCacheStore::new(dir.clone())));
    assert_eq!(reopened.read(), Some(sample()));

    reopened.clear();
    assert!(!dir.join("mcq.json").exists());
    assert_eq!(reopened.read(), None);
}

#[test]
fn file_store_remove_of_missing_slot_is_ok() {
    let temp = TempDir::new().unwrap();
    let store = FileCacheStore::new(temp.path().to_path_buf());

    store.remove("mcq").unwrap();
    assert_eq!(store.get("mcq").unwrap(), None);
}

#[test]
fn file_store_rejects_path_like_keys() {
    let temp = TempDir::new().unwrap();
    let store = FileCacheStore::new(temp.path().to_path_buf());

    let err = store.set("../escape", json!(1)).unwrap_err();
    assert!(matches!(err, CacheError::InvalidKey(_)));
}

#[test]
fn file_store_reports_corrupt_slot() {
    mcq_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("mcq.json"), "{not json").unwrap();
    let store = Arc::new(FileCacheStore::new(temp.path().to_path_buf()));

    assert!(matches!(store.get("mcq"), Err(CacheError::Json(_))));
    assert_eq!(ResultCache::new(store).read(), None);
}

#[test]
fn file_store_creates_missing_dir_and_replaces_slot() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("nested").join("cache");
    let store = FileCacheStore::new(dir.clone());

    store.set("mcq", json!({"questions": []})).unwrap();
    store.set("mcq", json!([])).unwrap();

    assert_eq!(store.get("mcq").unwrap(), Some(json!([])));
    let names: Vec<_> = fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("mcq.json")]);
}

#[test]
fn file_store_over_plain_file_fails_without_writing() {
    let temp = TempDir::new().unwrap();
    let not_a_dir = temp.path().join("not_a_dir");
    fs::write(&not_a_dir, "x").unwrap();
    let store = FileCacheStore::new(not_a_dir.clone());

    let err = store.set("mcq", json!(1)).unwrap_err();
    assert!(matches!(err, CacheError::NotADirectory(_)));
    assert_eq!(fs::read_to_string(&not_a_dir).unwrap(), "x");
    assert!(!temp.path().join("mcq.json").exists());
}
