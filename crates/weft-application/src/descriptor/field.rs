//! Field injection point

use std::fmt;

use tracing::trace;
use weft_domain::metadata::{Annotated, ClassMeta, FieldMeta, FieldSetFn, Instance};
use weft_domain::value_objects::TypeIdentity;
use weft_domain::{InjectionError, TypeError};

use crate::dependency::Dependency;
use crate::generics::GenericResolver;
use crate::introspection;
use crate::ports::Provider;
use crate::resolution_stack::ResolutionStack;

/// Field with exactly one dependency
#[derive(Clone)]
pub struct FieldPoint {
    name: String,
    point: String,
    dependency: Dependency,
    setter: FieldSetFn,
}

impl FieldPoint {
    /// Field point for `field` declared in `class`
    pub fn build(
        resolver: &GenericResolver,
        class: &ClassMeta,
        field: &FieldMeta,
    ) -> Result<Self, TypeError> {
        if field.is_final() {
            return Err(TypeError::FieldNotInjectable {
                field: field.describe(),
            });
        }
        let ty = resolver.resolve(class.name(), field.ty())?;
        let qualifier = introspection::find_qualifier(field)?;
        let dependency = Dependency::new(TypeIdentity::new(ty, qualifier))
            .with_optional(introspection::is_optional(field))
            .with_nullable(introspection::is_nullable(field, field.ty())?);

        Ok(Self {
            name: field.name().to_string(),
            point: field.describe(),
            dependency,
            setter: field.setter().clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn describe(&self) -> &str {
        &self.point
    }

    pub fn dependency(&self) -> &Dependency {
        &self.dependency
    }

    /// Resolve the dependency and assign it
    ///
    /// An absent optional value leaves the field untouched; an absent nullable
    /// value clears it.
    pub fn apply(
        &self,
        provider: &dyn Provider,
        stack: &mut ResolutionStack,
        target: Option<&Instance>,
    ) -> Result<(), InjectionError> {
        let value = self.dependency.resolve(provider, stack)?;
        if value.is_none() && self.dependency.is_optional() {
            trace!(field = %self.point, "optional field left untouched");
            return Ok(());
        }
        (self.setter)(target, value).map_err(|err| InjectionError::from_invoke(&self.point, err))
    }
}

impl fmt::Debug for FieldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldPoint")
            .field("point", &self.point)
            .field("dependency", &self.dependency)
            .finish_non_exhaustive()
    }
}
