//! Parameter dependencies shared by constructors and methods

use weft_domain::metadata::{Args, Executable};
use weft_domain::value_objects::TypeIdentity;
use weft_domain::{InjectionError, TypeError};

use crate::dependency::Dependency;
use crate::generics::GenericResolver;
use crate::introspection;
use crate::ports::Provider;
use crate::resolution_stack::ResolutionStack;

/// One dependency per parameter of `executable`, declared in `declaring`
///
/// An optional marker on the executable makes every parameter optional.
pub(crate) fn parameter_dependencies<E: Executable + ?Sized>(
    resolver: &GenericResolver,
    declaring: &str,
    executable: &E,
) -> Result<Vec<Dependency>, TypeError> {
    let qualifiers = introspection::parameter_qualifiers(executable)?;
    let all_optional = introspection::is_optional(executable);

    executable
        .params()
        .iter()
        .zip(qualifiers)
        .map(|(param, qualifier)| {
            let ty = resolver.resolve(declaring, param.ty())?;
            Ok(Dependency::new(TypeIdentity::new(ty, qualifier))
                .with_optional(all_optional || introspection::is_optional(param))
                .with_nullable(introspection::is_nullable(param, param.ty())?))
        })
        .collect()
}

/// Resolve every dependency in order
pub(crate) fn resolve_args(
    dependencies: &[Dependency],
    provider: &dyn Provider,
    stack: &mut ResolutionStack,
) -> Result<Args, InjectionError> {
    dependencies
        .iter()
        .map(|dependency| dependency.resolve(provider, stack))
        .collect::<Result<Vec<_>, _>>()
        .map(Args::new)
}
