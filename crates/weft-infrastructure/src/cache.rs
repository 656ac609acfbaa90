//! Descriptor cache
//!
//! Descriptors are immutable once built, so one instance per (type, phase)
//! can be shared by every resolution on every thread. Failed builds are not
//! cached; the next request rebuilds and reports the error again.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, trace};
use weft_application::{TypeDescriptor, build_descriptor};
use weft_domain::TypeError;
use weft_domain::metadata::TypeRegistry;
use weft_domain::value_objects::Phase;

use crate::config::CacheConfig;

/// Concurrent memo of built descriptors over one registry
#[derive(Debug)]
pub struct DescriptorCache {
    registry: Arc<TypeRegistry>,
    enabled: bool,
    descriptors: DashMap<(String, Phase), Arc<TypeDescriptor>>,
}

impl DescriptorCache {
    /// Caching cache over `registry`
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self {
            registry,
            enabled: true,
            descriptors: DashMap::new(),
        }
    }

    /// Cache over `registry` honoring `config.enabled`
    pub fn from_config(registry: Arc<TypeRegistry>, config: &CacheConfig) -> Self {
        Self {
            enabled: config.enabled,
            ..Self::new(registry)
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Descriptor of `type_name` for `phase`, built on first request
    pub fn descriptor(
        &self,
        type_name: &str,
        phase: Phase,
    ) -> Result<Arc<TypeDescriptor>, TypeError> {
        if !self.enabled {
            return build_descriptor(&self.registry, type_name, phase).map(Arc::new);
        }

        let key = (type_name.to_string(), phase);
        if let Some(cached) = self.descriptors.get(&key) {
            trace!(ty = type_name, %phase, "descriptor cache hit");
            return Ok(Arc::clone(cached.value()));
        }

        let built = Arc::new(build_descriptor(&self.registry, type_name, phase)?);
        // A concurrent build of the same key may have landed first; keep that one.
        let entry = self.descriptors.entry(key).or_insert(built);
        debug!(ty = type_name, %phase, "descriptor cached");
        Ok(Arc::clone(entry.value()))
    }

    /// Number of cached descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Drop every cached descriptor
    pub fn clear(&self) {
        self.descriptors.clear();
    }
}
