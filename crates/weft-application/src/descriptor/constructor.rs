//! Creator point: the constructor used to materialize a type

use std::fmt;

use tracing::debug;
use weft_domain::metadata::{
    Annotated, ClassKind, ClassMeta, ConstructFn, ConstructorMeta, Executable, Instance, Nesting,
    Visibility,
};
use weft_domain::{InjectionError, TypeError};

use super::parameters::{parameter_dependencies, resolve_args};
use crate::dependency::Dependency;
use crate::generics::GenericResolver;
use crate::introspection;
use crate::ports::Provider;
use crate::resolution_stack::ResolutionStack;

/// Selected constructor with one dependency per parameter
#[derive(Clone)]
pub struct ConstructorPoint {
    owner: String,
    point: String,
    dependencies: Vec<Dependency>,
    construct: ConstructFn,
}

impl ConstructorPoint {
    /// Pick the creator constructor of `class`
    ///
    /// The single constructor marked for injection wins; without one, the
    /// public no-argument constructor is used.
    pub fn select(resolver: &GenericResolver, class: &ClassMeta) -> Result<Self, TypeError> {
        ensure_constructible(class)?;

        let marked: Vec<&ConstructorMeta> = class
            .constructors()
            .iter()
            .filter(|constructor| introspection::is_injectable(*constructor))
            .collect();

        let constructor = match marked.as_slice() {
            [only] => *only,
            [] => class
                .constructors()
                .iter()
                .find(|constructor| {
                    constructor.params().is_empty()
                        && constructor.visibility() == Visibility::Public
                })
                .ok_or_else(|| TypeError::NoUsableConstructor {
                    ty: class.name().to_string(),
                })?,
            many => {
                return Err(TypeError::AmbiguousConstructor {
                    ty: class.name().to_string(),
                    count: many.len(),
                });
            }
        };

        let dependencies = parameter_dependencies(resolver, class.name(), constructor)?;
        debug!(
            ty = class.name(),
            params = dependencies.len(),
            "selected creator constructor"
        );
        Ok(Self {
            owner: class.name().to_string(),
            point: constructor.describe(),
            dependencies,
            construct: constructor.constructor().clone(),
        })
    }

    /// Type this constructor builds
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn describe(&self) -> &str {
        &self.point
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Resolve the parameters and invoke the constructor
    pub fn create(
        &self,
        provider: &dyn Provider,
        stack: &mut ResolutionStack,
    ) -> Result<Instance, InjectionError> {
        let args = resolve_args(&self.dependencies, provider, stack)?;
        (self.construct)(args).map_err(|err| InjectionError::from_invoke(&self.point, err))
    }
}

impl fmt::Debug for ConstructorPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorPoint")
            .field("owner", &self.owner)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

fn ensure_constructible(class: &ClassMeta) -> Result<(), TypeError> {
    let ty = class.name().to_string();
    match class.kind() {
        ClassKind::Interface => Err(TypeError::InterfaceTarget { ty }),
        ClassKind::Primitive => Err(TypeError::PrimitiveTarget { ty }),
        ClassKind::Abstract => Err(TypeError::AbstractTarget { ty }),
        ClassKind::Concrete if class.nesting() == Nesting::Inner => {
            Err(TypeError::InnerClassTarget { ty })
        }
        ClassKind::Concrete => Ok(()),
    }
}
