//! Provider Port
//!
//! The binding store the engine resolves dependencies against. The engine
//! never creates or caches instances on its own; scope lifecycle belongs to
//! implementations of this trait.
//!
//! A provider that builds instances through descriptors must pass the
//! `stack` it receives into `create_in` / `inject_in` so nested resolutions
//! share the caller's cycle detection.

use std::sync::Arc;

#[cfg(doc)]
use weft_domain::InjectionError;
use weft_domain::ProviderError;
use weft_domain::metadata::Instance;
use weft_domain::value_objects::TypeIdentity;

use crate::resolution_stack::ResolutionStack;

/// Source of bound instances
///
/// Implementations must be safe to query from several resolution contexts
/// at once.
pub trait Provider: Send + Sync {
    /// Whether any binding exists for `key`
    fn is_bound(&self, key: &TypeIdentity) -> bool;

    /// Instance for `key`
    ///
    /// `Ok(None)` means an existing binding produced nothing. An unbound key
    /// must fail, typically with [`InjectionError::MissingDependency`], so
    /// that nullable dependencies only accept absence from a real binding.
    fn get_instance(
        &self,
        key: &TypeIdentity,
        stack: &mut ResolutionStack,
    ) -> Result<Option<Instance>, ProviderError>;
}

impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn is_bound(&self, key: &TypeIdentity) -> bool {
        (**self).is_bound(key)
    }

    fn get_instance(
        &self,
        key: &TypeIdentity,
        stack: &mut ResolutionStack,
    ) -> Result<Option<Instance>, ProviderError> {
        (**self).get_instance(key, stack)
    }
}

impl<P: Provider + ?Sized> Provider for &P {
    fn is_bound(&self, key: &TypeIdentity) -> bool {
        (**self).is_bound(key)
    }

    fn get_instance(
        &self,
        key: &TypeIdentity,
        stack: &mut ResolutionStack,
    ) -> Result<Option<Instance>, ProviderError> {
        (**self).get_instance(key, stack)
    }
}
