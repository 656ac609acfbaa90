//! Capability introspection
//!
//! Side-effect-free predicates over declared elements. Everything the
//! descriptor builder needs to know about markers goes through here.

use weft_domain::TypeError;
use weft_domain::metadata::{Annotated, ClassMeta, Executable, Marker, TypeExpr};
use weft_domain::value_objects::Qualifier;

/// Whether the element opted in to injection
pub fn is_injectable<A: Annotated + ?Sized>(element: &A) -> bool {
    element.has_marker(&Marker::Inject)
}

pub fn is_optional<A: Annotated + ?Sized>(element: &A) -> bool {
    element.has_marker(&Marker::Optional)
}

/// Whether the element accepts an absent value
///
/// Primitives cannot represent absence, so a nullable primitive is rejected.
pub fn is_nullable<A: Annotated + ?Sized>(element: &A, ty: &TypeExpr) -> Result<bool, TypeError> {
    let nullable = element.has_marker(&Marker::Nullable);
    if nullable && ty.is_primitive() {
        return Err(TypeError::NullablePrimitive {
            element: element.describe(),
        });
    }
    Ok(nullable)
}

/// The element's single qualifier, if any
pub fn find_qualifier<A: Annotated + ?Sized>(element: &A) -> Result<Option<Qualifier>, TypeError> {
    let mut qualifiers = element.markers().iter().filter_map(|marker| match marker {
        Marker::Qualifier(qualifier) => Some(qualifier),
        _ => None,
    });
    let first = qualifiers.next().cloned();
    if qualifiers.next().is_some() {
        return Err(TypeError::MultipleQualifiers {
            element: element.describe(),
        });
    }
    Ok(first)
}

/// Effective qualifier of each parameter of `executable`
///
/// A qualifier on the executable itself applies to its only parameter. It is
/// rejected when the executable does not have exactly one parameter, or when
/// that parameter carries its own qualifier.
pub fn parameter_qualifiers<E: Executable + ?Sized>(
    executable: &E,
) -> Result<Vec<Option<Qualifier>>, TypeError> {
    let params = executable.params();
    let inherited = find_qualifier(executable)?;
    if inherited.is_some() && params.len() != 1 {
        return Err(TypeError::AmbiguousQualifierPlacement {
            element: executable.describe(),
            params: params.len(),
        });
    }

    params
        .iter()
        .map(|param| match (find_qualifier(param)?, &inherited) {
            (Some(_), Some(_)) => Err(TypeError::ConflictingQualifiers {
                element: executable.describe(),
            }),
            (own, inherited) => Ok(own.or_else(|| inherited.clone())),
        })
        .collect()
}

/// Whether providers should share one instance of the type
pub fn is_singleton(class: &ClassMeta) -> bool {
    class.has_marker(&Marker::Singleton)
}

/// Whether instances of the type come from outside the engine
pub fn is_provided(class: &ClassMeta) -> bool {
    class.has_marker(&Marker::Provided)
}
