use std::fs;

use lexmap::config::*;
use lexmap::errors::LexMapError;
use tempfile::TempDir;

#[test]
fn test_default_config_values() {
    let config = LexMapConfig::default();
    assert_eq!(config.version, 1);
    assert_eq!(config.cache_file, "mappings.json");
    assert_eq!(config.parser_cache_size, 4096);
    assert_eq!(config.fuzzy_cache_size, 8192);
    assert_eq!(config.progress_interval, 1000);
    assert_eq!(config.default_threshold, 0.8);
    assert_eq!(config.max_hops, 2);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_data_dir_falls_back_to_per_user_root() {
    let config = LexMapConfig::default();
    assert!(config.data_dir.is_empty());

    let root = default_data_root();
    assert!(root.ends_with("lexmap"));
    assert_eq!(config.data_root(), root);
    assert_eq!(config.cache_path(), root.join(".lexmap").join("mappings.json"));

    let rooted = LexMapConfig::for_root(std::path::Path::new("/srv/lexicon"));
    assert_eq!(
        rooted.cache_path(),
        std::path::Path::new("/srv/lexicon/.lexmap/mappings.json")
    );
}

#[test]
fn test_save_reports_an_unwritable_data_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".lexmap"), "").unwrap();

    match save_config(dir.path(), &LexMapConfig::for_root(dir.path())) {
        Err(LexMapError::Config { message }) => {
            assert!(message.contains("lexmap directory"), "message: {message}")
        }
        other => panic!("expected a config error, got {other:?}"),
    }
}

#[test]
fn test_load_missing_config_returns_defaults() {
    let dir = TempDir::new().unwrap();
    let config = load_config(dir.path()).unwrap();

    assert_eq!(config.data_dir, dir.path().to_string_lossy());
    assert_eq!(config.parser_cache_size, 4096);
    assert_eq!(config.cache_path(), get_cache_path(dir.path()));
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let config = LexMapConfig {
        fuzzy_cache_size: 128,
        default_threshold: 0.65,
        max_hops: 3,
        ..LexMapConfig::for_root(dir.path())
    };

    save_config(dir.path(), &config).unwrap();
    assert!(get_config_path(dir.path()).exists());
    assert!(!get_config_path(dir.path()).with_extension("tmp").exists());

    let loaded = load_config(dir.path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_config_fills_defaults() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(get_data_dir(dir.path())).unwrap();
    fs::write(get_config_path(dir.path()), r#"{"max_hops": 4}"#).unwrap();

    let config = load_config(dir.path()).unwrap();
    assert_eq!(config.max_hops, 4);
    assert_eq!(config.progress_interval, 1000);
    assert_eq!(config.data_dir, dir.path().to_string_lossy());
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(get_data_dir(dir.path())).unwrap();

    fs::write(get_config_path(dir.path()), "{ not json").unwrap();
    assert!(matches!(
        load_config(dir.path()),
        Err(LexMapError::Config { .. })
    ));

    fs::write(
        get_config_path(dir.path()),
        r#"{"default_threshold": 1.5}"#,
    )
    .unwrap();
    assert!(matches!(
        load_config(dir.path()),
        Err(LexMapError::InvalidThreshold { .. })
    ));
}

#[test]
fn test_zero_cache_size_fails_validation() {
    let config = LexMapConfig {
        parser_cache_size: 0,
        ..LexMapConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(LexMapError::Config { .. })
    ));
}

#[test]
fn test_directory_helpers() {
    let root = std::path::Path::new("/tmp/project");
    assert_eq!(get_data_dir(root), root.join(".lexmap"));
    assert_eq!(get_config_path(root), root.join(".lexmap").join("config.json"));
    assert_eq!(get_cache_path(root), root.join(".lexmap").join("mappings.json"));
}
