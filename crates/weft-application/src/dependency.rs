//! Dependencies
//!
//! A [`Dependency`] is the key one injection point needs plus the policy for
//! an absent value:
//!
//! | optional | nullable | unbound key          | bound, provider returns nothing |
//! |----------|----------|----------------------|---------------------------------|
//! | no       | no       | `MissingDependency`  | `MissingDependency`             |
//! | yes      | any      | `None`, provider not called | `None`                   |
//! | no       | yes      | provider decides     | `None`                          |

use std::fmt;

use tracing::trace;
use weft_domain::metadata::Instance;
use weft_domain::value_objects::TypeIdentity;
use weft_domain::{InjectionError, ProviderError};

use crate::ports::Provider;
use crate::resolution_stack::ResolutionStack;

/// Key plus absence policy for one injection point
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dependency {
    key: TypeIdentity,
    optional: bool,
    nullable: bool,
}

impl Dependency {
    /// Required dependency on `key`
    pub fn new(key: TypeIdentity) -> Self {
        Self {
            key,
            optional: false,
            nullable: false,
        }
    }

    #[must_use]
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn key(&self) -> &TypeIdentity {
        &self.key
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Resolve against `provider`, tracking the key on `stack`
    pub fn resolve(
        &self,
        provider: &dyn Provider,
        stack: &mut ResolutionStack,
    ) -> Result<Option<Instance>, InjectionError> {
        if self.optional && !provider.is_bound(&self.key) {
            trace!(key = %self.key, "optional dependency is unbound");
            return Ok(None);
        }

        let value = stack.scoped(&self.key, |stack| {
            provider
                .get_instance(&self.key, stack)
                .map_err(|err| match err {
                    ProviderError::Injection(inner) => inner,
                    ProviderError::Failed(source) => InjectionError::Provider {
                        key: self.key.clone(),
                        source,
                    },
                })
        })?;

        match value {
            Some(value) => Ok(Some(value)),
            None if self.optional || self.nullable => {
                trace!(key = %self.key, "absent value accepted");
                Ok(None)
            }
            None => Err(InjectionError::missing(&self.key)),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)?;
        match (self.optional, self.nullable) {
            (true, true) => write!(f, " (optional, nullable)"),
            (true, false) => write!(f, " (optional)"),
            (false, true) => write!(f, " (nullable)"),
            (false, false) => Ok(()),
        }
    }
}
