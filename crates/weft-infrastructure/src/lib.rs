//! # Infrastructure Layer
//!
//! Technical concerns around the resolution engine.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-based configuration (defaults, `weft.toml`, `WEFT_*` env) |
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context extension for foreign errors |
//! | [`cache`] | Concurrent descriptor cache |
//! | [`provider`] | In-memory binding provider |
//! | [`constants`] | Infrastructure constants |
//!
//! ## Example
//!
//! ```ignore
//! let config = ConfigLoader::new().load()?;
//! init_logging(&config.logging)?;
//!
//! let provider = BindingProvider::from_config(Arc::new(registry), &config);
//! provider.bind_self("app.Service");
//! let service = provider.resolve_as::<Service>(&TypeIdentity::of("app.Service"))?;
//! ```

pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod provider;

pub use cache::DescriptorCache;
pub use config::{ConfigLoader, EngineConfig};
pub use error_ext::ErrorContext;
pub use logging::init_logging;
pub use provider::BindingProvider;
