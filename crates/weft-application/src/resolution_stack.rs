//! Cycle detection for one resolution context
//!
//! A [`ResolutionStack`] records the keys currently being resolved, in entry
//! order. It is created per top-level resolution and passed by `&mut` through
//! every nested call, so independent resolutions never share state.

use std::fmt;

use tracing::trace;
use weft_domain::InjectionError;
use weft_domain::constants::{CHAIN_SEPARATOR, DEFAULT_MAX_RESOLUTION_DEPTH};
use weft_domain::value_objects::TypeIdentity;

/// Ordered set of in-flight keys
#[derive(Debug, Clone)]
pub struct ResolutionStack {
    entries: Vec<(TypeIdentity, String)>,
    max_depth: usize,
}

impl Default for ResolutionStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionStack {
    /// Empty stack with the default depth limit
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_RESOLUTION_DEPTH)
    }

    /// Empty stack that refuses to grow past `max_depth` entries
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_depth,
        }
    }

    /// Record `key` as in flight
    ///
    /// Fails with `CircularDependency` when `key` is already in flight.
    pub fn enter(&mut self, key: &TypeIdentity) -> Result<(), InjectionError> {
        self.enter_with(key, key.to_string())
    }

    /// Record `key` as in flight through the binding described by `binding`
    pub fn enter_with<S: Into<String>>(
        &mut self,
        key: &TypeIdentity,
        binding: S,
    ) -> Result<(), InjectionError> {
        if self.contains(key) {
            return Err(InjectionError::CircularDependency {
                key: key.clone(),
                chain: self.chain(),
            });
        }
        if self.entries.len() >= self.max_depth {
            return Err(InjectionError::DepthExceeded {
                key: key.clone(),
                depth: self.max_depth,
            });
        }
        trace!(key = %key, depth = self.entries.len(), "enter");
        self.entries.push((key.clone(), binding.into()));
        Ok(())
    }

    /// Remove `key` once its resolution has finished
    pub fn exit(&mut self, key: &TypeIdentity) {
        if let Some(position) = self.entries.iter().rposition(|(entry, _)| entry == key) {
            self.entries.remove(position);
            trace!(key = %key, depth = self.entries.len(), "exit");
        }
    }

    /// Run `f` with `key` in flight; `key` is removed again on every path
    pub fn scoped<T, F>(&mut self, key: &TypeIdentity, f: F) -> Result<T, InjectionError>
    where
        F: FnOnce(&mut Self) -> Result<T, InjectionError>,
    {
        self.enter(key)?;
        let result = f(self);
        self.exit(key);
        result
    }

    /// In-flight keys, in entry order
    pub fn chain(&self) -> Vec<TypeIdentity> {
        self.entries.iter().map(|(key, _)| key.clone()).collect()
    }

    /// In-flight binding descriptions, in entry order
    pub fn bindings(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, binding)| binding.as_str())
    }

    pub fn contains(&self, key: &TypeIdentity) -> bool {
        self.entries.iter().any(|(entry, _)| entry == key)
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ResolutionStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .entries
            .iter()
            .map(|(key, _)| key.to_string())
            .collect::<Vec<_>>()
            .join(CHAIN_SEPARATOR);
        f.write_str(&rendered)
    }
}
