//! Configuration
//!
//! [`EngineConfig`] is assembled by [`ConfigLoader`] from defaults, an
//! optional `weft.toml` and `WEFT_`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, validate_engine_config};
pub use types::{CacheConfig, EngineConfig, LoggingConfig, ResolutionConfig};
