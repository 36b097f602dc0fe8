use std::fs;
use std::path::PathBuf;

use mcq_view::{load_config, read_config, ConfigError, LogDestination, ViewConfig};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn missing_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let config = load_config(&temp.path().join("absent.ron"));

    assert_eq!(config, ViewConfig::default());
    assert_eq!(config.cache_key, "mcq");
    assert_eq!(config.cache_dir, None);
    assert_eq!(config.log_file, PathBuf::from("mcq_view.log"));
}

#[test]
fn partial_file_overrides_only_given_fields() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("view.ron");
    fs::write(
        &path,
        r#"(
            cache_dir: Some("/var/cache/mcq"),
            messages: (error_title: "Answering failed"),
            log_destination: Both,
            log_file: "/var/log/mcq.log",
        )"#,
    )
    .unwrap();

    let config = read_config(&path).unwrap();

    assert_eq!(config.cache_key, "mcq");
    assert_eq!(config.cache_dir, Some(PathBuf::from("/var/cache/mcq")));
    assert_eq!(config.messages.error_title, "Answering failed");
    assert_eq!(
        config.messages.start_progress,
        "Analyzing MCQ question from screenshots..."
    );
    assert_eq!(config.log_destination, LogDestination::Both);
    assert_eq!(config.log_file, PathBuf::from("/var/log/mcq.log"));
}

#[test]
fn unparsable_file_falls_back_to_defaults() {
    mcq_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("view.ron");
    fs::write(&path, "(cache_key: 42").unwrap();

    assert!(matches!(read_config(&path), Err(ConfigError::Parse(_))));
    assert_eq!(load_config(&path), ViewConfig::default());
}

#[test]
fn cache_dir_selects_file_store() {
    let temp = TempDir::new().unwrap();
    let config = ViewConfig {
        cache_key: "answers".to_string(),
        cache_dir: Some(temp.path().to_path_buf()),
        ..ViewConfig::default()
    };

    let cache = config.result_cache(config.cache_store());
    cache.write(&Default::default());

    assert_eq!(cache.key(), "answers");
    assert!(temp.path().join("answers.json").is_file());
}
