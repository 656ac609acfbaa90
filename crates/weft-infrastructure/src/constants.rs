//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Engine constants are defined in `weft_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "weft.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "weft";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "WEFT";

/// Separator between nested keys in environment variable names
/// (`WEFT_RESOLUTION__MAX_DEPTH` → `resolution.max_depth`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable holding a `tracing` filter directive
pub const LOG_FILTER_ENV: &str = "WEFT_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File name prefix for rolling log files when none can be derived
pub const DEFAULT_LOG_FILE_PREFIX: &str = "weft";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Descriptor caching is on unless configured otherwise
pub const DEFAULT_CACHE_ENABLED: bool = true;
