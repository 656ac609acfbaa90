//! Unit tests for logging helpers

use tracing::Level;
use weft_domain::Error;
use weft_infrastructure::config::LoggingConfig;
use weft_infrastructure::logging::{init_logging, parse_log_level};

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
}

#[test]
fn test_parse_invalid_log_level() {
    match parse_log_level("loud") {
        Err(Error::Configuration { message, .. }) => assert!(message.contains("loud")),
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_logging_config_defaults() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, "info");
    assert!(!config.json_format);
    assert!(config.file_output.is_none());
}

#[test]
fn test_invalid_level_fails_before_install() {
    let config = LoggingConfig {
        level: "chatty".to_string(),
        ..LoggingConfig::default()
    };
    assert!(matches!(
        init_logging(&config),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn test_second_install_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = LoggingConfig {
        level: "debug".to_string(),
        json_format: true,
        file_output: Some(dir.path().join("engine.log")),
    };

    // Only this test installs a subscriber, so the first call succeeds.
    init_logging(&config).unwrap();
    match init_logging(&LoggingConfig::default()) {
        Err(Error::Configuration { source, .. }) => assert!(source.is_some()),
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}
