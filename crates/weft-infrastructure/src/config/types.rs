//! Configuration types
//!
//! Every section deserializes with defaults, so a partial TOML file or a
//! single environment variable is enough to override one value.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use weft_domain::constants::DEFAULT_MAX_RESOLUTION_DEPTH;

use crate::constants::{DEFAULT_CACHE_ENABLED, DEFAULT_LOG_LEVEL};

/// Root engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Resolution limits
    pub resolution: ResolutionConfig,
    /// Descriptor cache
    pub cache: CacheConfig,
    /// Logging
    pub logging: LoggingConfig,
}

// ============================================================================
// Resolution Configuration
// ============================================================================

/// Resolution configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Maximum number of keys in flight in one resolution context
    pub max_depth: usize,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
        }
    }
}

// ============================================================================
// Cache Configuration
// ============================================================================

/// Descriptor cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Memoize built descriptors
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_CACHE_ENABLED,
        }
    }
}

// ============================================================================
// Logging Configuration
// ============================================================================

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable JSON output format
    pub json_format: bool,
    /// Log to a daily-rolling file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}
