//! Type registry
//!
//! Holds every [`ClassMeta`] known to the engine. Descriptor construction
//! reads from it and never mutates it, so a populated registry can be shared
//! behind an `Arc` across threads.

use std::collections::HashMap;

use crate::error::TypeError;

use super::class::ClassMeta;

/// Registry of class metadata, keyed by qualified name
#[derive(Debug, Default)]
pub struct TypeRegistry {
    classes: HashMap<String, ClassMeta>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class; names must be unique
    pub fn register(&mut self, meta: ClassMeta) -> Result<(), TypeError> {
        if self.classes.contains_key(meta.name()) {
            return Err(TypeError::DuplicateType {
                name: meta.name().to_string(),
            });
        }
        self.classes.insert(meta.name().to_string(), meta);
        Ok(())
    }

    /// Builder-style [`TypeRegistry::register`]
    pub fn with(mut self, meta: ClassMeta) -> Result<Self, TypeError> {
        self.register(meta)?;
        Ok(self)
    }

    /// Look up a class by qualified name
    pub fn get(&self, name: &str) -> Result<&ClassMeta, TypeError> {
        self.classes
            .get(name)
            .ok_or_else(|| TypeError::unknown_type(name))
    }

    /// Look up a class, `None` when unregistered
    pub fn find(&self, name: &str) -> Option<&ClassMeta> {
        self.classes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
