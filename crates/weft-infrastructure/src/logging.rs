//! Structured logging with tracing
//!
//! Installs the global subscriber: an `EnvFilter` (overridable through
//! `WEFT_LOG`), plain or JSON stdout output, and an optional daily-rolling
//! log file.

use std::ffi::OsStr;
use std::path::Path;

use tracing::{Level, debug, info, warn};
use tracing_appender::rolling;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};
use weft_domain::error::{Error, Result};

pub use crate::config::LoggingConfig;
use crate::config::EngineConfig;
use crate::constants::{DEFAULT_LOG_FILE_PREFIX, LOG_FILTER_ENV};
use crate::error_ext::ErrorContext;

/// Subscriber every output layer is stacked on
type Filtered = Layered<EnvFilter, Registry>;

/// Output layer with its formatter erased
type OutputLayer = Box<dyn Layer<Filtered> + Send + Sync>;

/// Initialize logging with the provided configuration
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut outputs = vec![console_layer(config.json_format)];
    if let Some(path) = &config.file_output {
        outputs.push(file_layer(path, config.json_format));
    }

    Registry::default()
        .with(filter)
        .with(outputs)
        .try_init()
        .config_context("Failed to install tracing subscriber")?;

    info!(
        %level,
        json = config.json_format,
        file = ?config.file_output,
        "logging initialized"
    );
    Ok(())
}

fn console_layer(json: bool) -> OutputLayer {
    if json {
        fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    }
}

/// Daily-rolling file named after the stem of `path`
fn file_layer(path: &Path, json: bool) -> OutputLayer {
    let appender = rolling::daily(
        path.parent().unwrap_or_else(|| Path::new(".")),
        path.file_stem()
            .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE_PREFIX)),
    );
    if json {
        fmt::layer()
            .json()
            .with_writer(appender)
            .with_ansi(false)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .with_target(true)
            .boxed()
    }
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log whether a configuration file contributed to the engine settings
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!(path = %config_path.display(), "configuration file loaded");
    } else {
        warn!(path = %config_path.display(), "configuration file not found; using defaults");
    }
}

/// Log the effective engine settings
pub fn log_engine_config(config: &EngineConfig) {
    debug!(
        max_depth = config.resolution.max_depth,
        cache_enabled = config.cache.enabled,
        log_level = %config.logging.level,
        "engine configuration resolved"
    );
}
