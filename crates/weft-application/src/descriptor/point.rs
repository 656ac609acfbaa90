//! Closed set of injection points

use weft_domain::InjectionError;
use weft_domain::metadata::Instance;

use super::constructor::ConstructorPoint;
use super::field::FieldPoint;
use super::method::MethodPoint;
use crate::dependency::Dependency;
use crate::ports::Provider;
use crate::resolution_stack::ResolutionStack;

/// A constructor, field or method that needs dependencies
#[derive(Debug, Clone)]
pub enum InjectionPoint {
    Constructor(ConstructorPoint),
    Field(FieldPoint),
    Method(MethodPoint),
}

impl InjectionPoint {
    /// Dependencies in parameter order; exactly one for fields
    pub fn dependencies(&self) -> &[Dependency] {
        match self {
            Self::Constructor(point) => point.dependencies(),
            Self::Field(point) => std::slice::from_ref(point.dependency()),
            Self::Method(point) => point.dependencies(),
        }
    }

    pub fn describe(&self) -> &str {
        match self {
            Self::Constructor(point) => point.describe(),
            Self::Field(point) => point.describe(),
            Self::Method(point) => point.describe(),
        }
    }

    /// Resolve this point's dependencies and apply them
    ///
    /// Constructors ignore `target` and return the new instance; fields and
    /// methods are applied to `target` and return `None`.
    pub fn resolve_and_apply(
        &self,
        provider: &dyn Provider,
        stack: &mut ResolutionStack,
        target: Option<&Instance>,
    ) -> Result<Option<Instance>, InjectionError> {
        match self {
            Self::Constructor(point) => point.create(provider, stack).map(Some),
            Self::Field(point) => point.apply(provider, stack, target).map(|()| None),
            Self::Method(point) => point.apply(provider, stack, target).map(|()| None),
        }
    }
}
