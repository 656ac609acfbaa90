//! Unit tests for configuration loading

use std::fs;

use figment::Jail;
use weft_domain::Error;
use weft_infrastructure::config::{ConfigLoader, EngineConfig, validate_engine_config};

const UNUSED_PREFIX: &str = "WEFT_TEST_UNSET";

#[test]
fn test_defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.resolution.max_depth, 256);
    assert!(config.cache.enabled);
    assert_eq!(config.logging.level, "info");
    assert!(validate_engine_config(&config).is_ok());
}

#[test]
fn test_load_partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("weft.toml");
    fs::write(&path, "[resolution]\nmax_depth = 32\n").unwrap();

    let config = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix(UNUSED_PREFIX)
        .load()
        .unwrap();

    assert_eq!(config.resolution.max_depth, 32);
    assert!(config.cache.enabled);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let loader = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .with_env_prefix(UNUSED_PREFIX);

    assert_eq!(loader.load().unwrap(), EngineConfig::default());
    assert!(loader.config_path().is_some());
}

#[test]
fn test_zero_depth_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("weft.toml");
    fs::write(&path, "[resolution]\nmax_depth = 0\n").unwrap();

    let result = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix(UNUSED_PREFIX)
        .load();

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("weft.toml");
    fs::write(&path, "[logging]\nlevel = \"chatty\"\n").unwrap();

    let result = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix(UNUSED_PREFIX)
        .load();

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_malformed_file_is_a_configuration_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("weft.toml");
    fs::write(&path, "[resolution]\nmax_depth = \"deep\"\n").unwrap();

    let result = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix(UNUSED_PREFIX)
        .load();

    match result {
        Err(Error::Configuration { source, .. }) => assert!(source.is_some()),
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_save_and_reload_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("saved.toml");
    let mut config = EngineConfig::default();
    config.cache.enabled = false;
    config.logging.json_format = true;

    let loader = ConfigLoader::new().with_env_prefix(UNUSED_PREFIX);
    loader.save_to_file(&config, &path).unwrap();

    let reloaded = loader.with_config_path(&path).load().unwrap();
    assert_eq!(reloaded, config);
}

#[test]
fn test_environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "weft.toml",
            "[resolution]\nmax_depth = 32\n[cache]\nenabled = true\n",
        )?;
        jail.set_env("WEFT_RESOLUTION__MAX_DEPTH", 64);
        jail.set_env("WEFT_CACHE__ENABLED", false);

        let config = ConfigLoader::new().load().expect("config loads");

        assert_eq!(config.resolution.max_depth, 64);
        assert!(!config.cache.enabled);
        Ok(())
    });
}

#[test]
fn test_default_file_is_discovered_in_working_directory() {
    Jail::expect_with(|jail| {
        jail.create_file("weft.toml", "[logging]\nlevel = \"debug\"\n")?;

        let config = ConfigLoader::new()
            .with_env_prefix(UNUSED_PREFIX)
            .load()
            .expect("config loads");

        assert_eq!(config.logging.level, "debug");
        Ok(())
    });
}
