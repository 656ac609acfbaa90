//! Application Layer - Weft
//!
//! The resolution engine. Given a registered type it builds a
//! [`TypeDescriptor`](descriptor::TypeDescriptor) listing every injection
//! point, then resolves those points against a [`Provider`](ports::Provider).
//!
//! ## Flow
//!
//! ```text
//! build_descriptor(registry, "app.Service", Phase::Instance)
//!        │   GenericResolver  → TypeIdentity per injection point
//!        │   introspection    → optional / nullable / qualifier
//!        ▼
//! TypeDescriptor { creator, members }
//!        │
//!        ▼   create / inject (provider)
//! Dependency::resolve ── ResolutionStack::scoped ── Provider::get_instance
//! ```
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `weft-domain`: metadata, value objects and error types
//! - `tracing`: diagnostics

pub mod dependency;
pub mod descriptor;
pub mod generics;
pub mod introspection;
pub mod ports;
pub mod resolution_stack;

pub use dependency::Dependency;
pub use descriptor::{InjectionPoint, TypeDescriptor, build_descriptor};
pub use generics::GenericResolver;
pub use ports::Provider;
pub use resolution_stack::ResolutionStack;
