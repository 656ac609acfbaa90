//! Provider implementations

pub mod binding;

pub use binding::{Binding, BindingError, BindingProvider, FactoryFn};
