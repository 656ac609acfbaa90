//! In-memory binding provider
//!
//! Binds keys to a fixed instance, a factory closure, or a registered type
//! that is materialized through its cached descriptor. Constructed bindings
//! produce a fresh instance per request; there is no scope lifecycle.
//!
//! ```text
//! resolve(key)
//!    └─ Dependency::resolve ── stack.enter(key)
//!          └─ get_instance(key)
//!                ├─ unbound      → MissingDependency
//!                ├─ Instance     → clone of the bound value
//!                ├─ Factory      → closure(self, stack)
//!                └─ Constructed  → descriptor.materialize_in(self, stack)
//! ```

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;
use tracing::debug;
use weft_application::introspection;
use weft_application::{Dependency, Provider, ResolutionStack};
use weft_domain::error::{Error, Result};
use weft_domain::metadata::{Instance, TypeRegistry};
use weft_domain::value_objects::{Phase, TypeIdentity};
use weft_domain::{InjectionError, ProviderError};

use crate::cache::DescriptorCache;
use crate::config::EngineConfig;

/// Closure producing the value of a factory binding
pub type FactoryFn = Arc<
    dyn Fn(&BindingProvider, &mut ResolutionStack) -> std::result::Result<Option<Instance>, ProviderError>
        + Send
        + Sync,
>;

/// Failure specific to binding resolution
#[derive(Error, Debug)]
pub enum BindingError {
    /// Type is marked as supplied from outside the engine
    #[error("Type {ty} is provided externally and cannot be constructed")]
    ProvidedExternally {
        /// Type name
        ty: String,
    },
}

/// What a key is bound to
#[derive(Clone)]
pub enum Binding {
    /// Shared instance handed out as is
    Instance(Instance),
    /// Closure invoked on every request
    Factory(FactoryFn),
    /// Registered type built through its descriptor on every request
    Constructed(String),
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(_) => f.write_str("Instance"),
            Self::Factory(_) => f.write_str("Factory"),
            Self::Constructed(ty) => f.debug_tuple("Constructed").field(ty).finish(),
        }
    }
}

/// Reference [`Provider`] backed by a concurrent map of bindings
pub struct BindingProvider {
    cache: Arc<DescriptorCache>,
    bindings: DashMap<TypeIdentity, Binding>,
    max_depth: usize,
}

impl BindingProvider {
    /// Provider building constructed bindings through `cache`
    pub fn new(cache: Arc<DescriptorCache>) -> Self {
        Self {
            cache,
            bindings: DashMap::new(),
            max_depth: weft_domain::constants::DEFAULT_MAX_RESOLUTION_DEPTH,
        }
    }

    /// Provider over `registry` configured by `config`
    pub fn from_config(registry: Arc<TypeRegistry>, config: &EngineConfig) -> Self {
        let cache = DescriptorCache::from_config(registry, &config.cache);
        Self::new(Arc::new(cache)).with_max_depth(config.resolution.max_depth)
    }

    /// Limit the depth of top-level resolutions started by this provider
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn cache(&self) -> &DescriptorCache {
        &self.cache
    }

    /// Bind `key` to a fixed value
    pub fn bind_instance<T: Any + Send + Sync>(&self, key: TypeIdentity, value: T) {
        self.bind(key, Binding::Instance(Arc::new(value)));
    }

    /// Bind `key` to an already shared value
    pub fn bind_shared(&self, key: TypeIdentity, value: Instance) {
        self.bind(key, Binding::Instance(value));
    }

    /// Bind `key` to a closure invoked on every request
    ///
    /// The closure receives this provider and the caller's stack so it can
    /// resolve further keys in the same context.
    pub fn bind_factory<F>(&self, key: TypeIdentity, factory: F)
    where
        F: Fn(&BindingProvider, &mut ResolutionStack) -> std::result::Result<Option<Instance>, ProviderError>
            + Send
            + Sync
            + 'static,
    {
        self.bind(key, Binding::Factory(Arc::new(factory)));
    }

    /// Bind `key` to a fresh instance of the registered type `type_name`
    pub fn bind_type<S: Into<String>>(&self, key: TypeIdentity, type_name: S) {
        self.bind(key, Binding::Constructed(type_name.into()));
    }

    /// Bind the registered type `type_name` to itself
    pub fn bind_self<S: Into<String>>(&self, type_name: S) {
        let type_name = type_name.into();
        self.bind(TypeIdentity::of(type_name.clone()), Binding::Constructed(type_name));
    }

    /// Bind `key`, replacing any previous binding
    pub fn bind(&self, key: TypeIdentity, binding: Binding) {
        debug!(key = %key, ?binding, "bound");
        self.bindings.insert(key, binding);
    }

    /// Remove the binding of `key`
    pub fn unbind(&self, key: &TypeIdentity) -> Option<Binding> {
        self.bindings.remove(key).map(|(_, binding)| binding)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Resolve `key` in a fresh resolution context
    pub fn resolve(&self, key: &TypeIdentity) -> std::result::Result<Instance, InjectionError> {
        let mut stack = ResolutionStack::with_max_depth(self.max_depth);
        Dependency::new(key.clone())
            .resolve(self, &mut stack)?
            .ok_or_else(|| InjectionError::missing(key))
    }

    /// Resolve `key` and downcast the value to `T`
    pub fn resolve_as<T: Any + Send + Sync>(&self, key: &TypeIdentity) -> Result<Arc<T>> {
        self.resolve(key)?
            .downcast::<T>()
            .map_err(|_| Error::internal(format!("{key} is not a {}", type_name::<T>())))
    }

    /// Inject the members of an existing instance of `type_name`
    pub fn inject(&self, type_name: &str, instance: &Instance) -> Result<()> {
        let descriptor = self.cache.descriptor(type_name, Phase::Instance)?;
        let mut stack = ResolutionStack::with_max_depth(self.max_depth);
        descriptor.inject_in(self, &mut stack, Some(instance))?;
        Ok(())
    }

    /// Inject the static members of `type_name`
    pub fn inject_static(&self, type_name: &str) -> Result<()> {
        let descriptor = self.cache.descriptor(type_name, Phase::Static)?;
        let mut stack = ResolutionStack::with_max_depth(self.max_depth);
        descriptor.inject_in(self, &mut stack, None)?;
        Ok(())
    }

    fn construct(
        &self,
        type_name: &str,
        stack: &mut ResolutionStack,
    ) -> std::result::Result<Instance, ProviderError> {
        let class = self
            .cache
            .registry()
            .get(type_name)
            .map_err(ProviderError::failed)?;
        if introspection::is_provided(class) {
            return Err(ProviderError::failed(BindingError::ProvidedExternally {
                ty: type_name.to_string(),
            }));
        }
        if introspection::is_singleton(class) {
            debug!(
                ty = type_name,
                "singleton-scoped type constructed without caching"
            );
        }

        let descriptor = self
            .cache
            .descriptor(type_name, Phase::Instance)
            .map_err(ProviderError::failed)?;
        Ok(descriptor.materialize_in(self, stack)?)
    }
}

impl Provider for BindingProvider {
    fn is_bound(&self, key: &TypeIdentity) -> bool {
        self.bindings.contains_key(key)
    }

    fn get_instance(
        &self,
        key: &TypeIdentity,
        stack: &mut ResolutionStack,
    ) -> std::result::Result<Option<Instance>, ProviderError> {
        // Clone out of the map so no shard lock is held while recursing.
        let binding = self.bindings.get(key).map(|entry| entry.value().clone());
        match binding {
            // Only an existing binding may produce nothing; an unbound key
            // is missing even for nullable dependencies.
            None => Err(InjectionError::missing(key).into()),
            Some(Binding::Instance(value)) => Ok(Some(value)),
            Some(Binding::Factory(factory)) => factory(self, stack),
            Some(Binding::Constructed(type_name)) => self.construct(&type_name, stack).map(Some),
        }
    }
}

impl fmt::Debug for BindingProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingProvider")
            .field("bindings", &self.bindings.len())
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}
