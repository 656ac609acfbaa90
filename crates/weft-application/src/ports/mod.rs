//! Ports (interfaces) consumed by the engine

pub mod provider;

pub use provider::Provider;
