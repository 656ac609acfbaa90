//! Member invocation
//!
//! Closures registered with metadata stand in for reflective construction,
//! field assignment and method calls. Values cross the engine type-erased as
//! [`Instance`] and are downcast back inside the closures.

use std::any::{Any, type_name};
use std::sync::Arc;

use crate::error::InvokeError;

/// Type-erased, shareable value
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Builds a new instance from resolved constructor arguments
pub type ConstructFn = Arc<dyn Fn(Args) -> Result<Instance, InvokeError> + Send + Sync>;

/// Assigns a field; the target is `None` for static fields, the value is
/// `None` to clear the field
pub type FieldSetFn =
    Arc<dyn Fn(Option<&Instance>, Option<Instance>) -> Result<(), InvokeError> + Send + Sync>;

/// Invokes a method; the target is `None` for static methods
pub type MethodFn = Arc<dyn Fn(Option<&Instance>, Args) -> Result<(), InvokeError> + Send + Sync>;

/// Resolved arguments for a constructor or method call
///
/// Absent arguments are `None`.
#[derive(Clone, Default)]
pub struct Args {
    values: Vec<Option<Instance>>,
}

impl Args {
    pub fn new(values: Vec<Option<Instance>>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether every argument is absent
    pub fn all_absent(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Raw argument at `index`
    pub fn raw(&self, index: usize) -> Result<Option<&Instance>, InvokeError> {
        self.values
            .get(index)
            .map(Option::as_ref)
            .ok_or_else(|| InvokeError::access(format!("no argument at position {index}")))
    }

    /// Argument at `index` downcast to `T`, `None` when absent
    pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Result<Option<Arc<T>>, InvokeError> {
        downcast_value(self.raw(index)?.cloned())
    }

    /// Argument at `index` downcast to `T`, failing when absent
    pub fn require<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>, InvokeError> {
        self.get(index)?.ok_or_else(|| {
            InvokeError::access(format!(
                "argument {index} of type {} is absent",
                type_name::<T>()
            ))
        })
    }
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.values.iter().map(Option::is_some))
            .finish()
    }
}

/// Downcast an optional value to `T`
pub fn downcast_value<T: Any + Send + Sync>(
    value: Option<Instance>,
) -> Result<Option<Arc<T>>, InvokeError> {
    value
        .map(|value| {
            value.downcast::<T>().map_err(|_| {
                InvokeError::access(format!("value is not a {}", type_name::<T>()))
            })
        })
        .transpose()
}

/// Downcast the receiver of an instance member to `T`
pub fn downcast_target<T: Any + Send + Sync>(target: Option<&Instance>) -> Result<&T, InvokeError> {
    target
        .ok_or_else(|| InvokeError::access(format!("missing receiver of type {}", type_name::<T>())))?
        .downcast_ref::<T>()
        .ok_or_else(|| InvokeError::access(format!("receiver is not a {}", type_name::<T>())))
}
