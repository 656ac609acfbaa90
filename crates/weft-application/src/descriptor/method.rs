//! Method injection point

use std::fmt;

use tracing::debug;
use weft_domain::metadata::{Annotated, ClassMeta, Instance, MethodFn, MethodMeta};
use weft_domain::{InjectionError, TypeError};

use super::parameters::{parameter_dependencies, resolve_args};
use super::signature::OverrideSignature;
use crate::dependency::Dependency;
use crate::generics::GenericResolver;
use crate::introspection;
use crate::ports::Provider;
use crate::resolution_stack::ResolutionStack;

/// Method with one dependency per parameter
#[derive(Clone)]
pub struct MethodPoint {
    name: String,
    point: String,
    signature: OverrideSignature,
    optional: bool,
    dependencies: Vec<Dependency>,
    invoker: MethodFn,
}

impl MethodPoint {
    /// Method point for `method` declared in `class`
    pub fn build(
        resolver: &GenericResolver,
        class: &ClassMeta,
        method: &MethodMeta,
    ) -> Result<Self, TypeError> {
        Ok(Self {
            name: method.name().to_string(),
            point: method.describe(),
            signature: OverrideSignature::of(class, method),
            optional: introspection::is_optional(method),
            dependencies: parameter_dependencies(resolver, class.name(), method)?,
            invoker: method.invoker().clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn describe(&self) -> &str {
        &self.point
    }

    pub fn signature(&self) -> &OverrideSignature {
        &self.signature
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Resolve the parameters and invoke the method
    ///
    /// An optional method whose arguments all resolved absent is not invoked.
    pub fn apply(
        &self,
        provider: &dyn Provider,
        stack: &mut ResolutionStack,
        target: Option<&Instance>,
    ) -> Result<(), InjectionError> {
        let args = resolve_args(&self.dependencies, provider, stack)?;
        if self.optional && !args.is_empty() && args.all_absent() {
            debug!(method = %self.point, "nothing to inject; optional method skipped");
            return Ok(());
        }
        (self.invoker)(target, args).map_err(|err| InjectionError::from_invoke(&self.point, err))
    }
}

impl fmt::Debug for MethodPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodPoint")
            .field("point", &self.point)
            .field("signature", &self.signature)
            .field("optional", &self.optional)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}
