//! Domain Layer - Weft
//!
//! Core types shared by the resolution engine and its collaborators:
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | `TypeError`, `InjectionError`, `InvokeError` and the umbrella `Error` |
//! | [`value_objects`] | `TypeIdentity`, `Qualifier`, `RawType`, `Phase` |
//! | [`metadata`] | Explicit class/member metadata and the `TypeRegistry` |
//! | [`constants`] | Engine-wide constants |
//!
//! The metadata model replaces runtime reflection: every class that takes part
//! in injection is registered up front together with closures that construct
//! it, assign its fields and invoke its methods.

pub mod constants;
pub mod error;
pub mod metadata;
pub mod value_objects;

pub use error::{BoxError, Error, InjectionError, InvokeError, ProviderError, Result, TypeError};
