//! Type Descriptors
//!
//! A [`TypeDescriptor`] lists every injection point of one type for one
//! [`Phase`]. It is built once, never mutated afterwards, and can be shared
//! across threads and reused for any number of resolutions.
//!
//! ## Member order
//!
//! Classes are visited from the topmost registered ancestor down to the
//! target. Within a class, fields come before methods. When a more-derived
//! class redeclares a method with the same [`OverrideSignature`], the
//! inherited entry is dropped; the redeclaration takes its place only if it
//! is itself marked for injection.

mod constructor;
mod field;
mod method;
mod parameters;
mod point;
mod signature;

use std::collections::HashMap;

use tracing::{debug, trace};
use weft_domain::constants::UNIVERSAL_ROOT;
use weft_domain::metadata::{ClassMeta, Instance, TypeExpr, TypeRegistry};
use weft_domain::value_objects::{Phase, TypeIdentity};
use weft_domain::{InjectionError, TypeError};

pub use constructor::ConstructorPoint;
pub use field::FieldPoint;
pub use method::MethodPoint;
pub use point::InjectionPoint;
pub use signature::OverrideSignature;

use crate::dependency::Dependency;
use crate::generics::GenericResolver;
use crate::introspection;
use crate::ports::Provider;
use crate::resolution_stack::ResolutionStack;

/// Build the descriptor of `type_name` for `phase`
///
/// Every structural problem is reported here; a descriptor that builds
/// successfully never raises a [`TypeError`] later.
pub fn build_descriptor(
    registry: &TypeRegistry,
    type_name: &str,
    phase: Phase,
) -> Result<TypeDescriptor, TypeError> {
    let class = registry.get(type_name)?;
    let resolver = GenericResolver::for_type(registry, type_name)?;

    let creator = match phase {
        Phase::Instance => Some(ConstructorPoint::select(&resolver, class)?),
        Phase::Static => None,
    };

    let mut collector = MemberCollector::new(phase);
    collector.visit(registry, &resolver, class)?;
    let members = collector.finish();

    debug!(
        ty = type_name,
        %phase,
        members = members.len(),
        "built type descriptor"
    );
    Ok(TypeDescriptor {
        ty: TypeIdentity::of(type_name),
        phase,
        creator,
        members,
    })
}

/// Ordered injection points of one type for one phase
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    ty: TypeIdentity,
    phase: Phase,
    creator: Option<ConstructorPoint>,
    members: Vec<InjectionPoint>,
}

impl TypeDescriptor {
    pub fn type_identity(&self) -> &TypeIdentity {
        &self.ty
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Creator constructor; present for instance-phase descriptors
    pub fn creator(&self) -> Option<&ConstructorPoint> {
        self.creator.as_ref()
    }

    /// Field and method points, in application order
    pub fn members(&self) -> &[InjectionPoint] {
        &self.members
    }

    /// Creator dependencies followed by member dependencies
    pub fn dependencies(&self) -> Vec<&Dependency> {
        self.creator
            .iter()
            .flat_map(ConstructorPoint::dependencies)
            .chain(self.members.iter().flat_map(InjectionPoint::dependencies))
            .collect()
    }

    /// Construct a new instance in a fresh resolution context
    pub fn create(&self, provider: &dyn Provider) -> Result<Instance, InjectionError> {
        self.create_in(provider, &mut ResolutionStack::new())
    }

    /// Construct a new instance within an existing resolution context
    pub fn create_in(
        &self,
        provider: &dyn Provider,
        stack: &mut ResolutionStack,
    ) -> Result<Instance, InjectionError> {
        let creator = self
            .creator
            .as_ref()
            .ok_or_else(|| InjectionError::NotConstructible {
                ty: self.ty.to_string(),
            })?;
        creator.create(provider, stack)
    }

    /// Apply every member point to `instance` in a fresh resolution context
    pub fn inject(&self, provider: &dyn Provider, instance: &Instance) -> Result<(), InjectionError> {
        self.inject_in(provider, &mut ResolutionStack::new(), Some(instance))
    }

    /// Apply the static members in a fresh resolution context
    pub fn inject_static(&self, provider: &dyn Provider) -> Result<(), InjectionError> {
        self.inject_in(provider, &mut ResolutionStack::new(), None)
    }

    /// Apply every member point in order within an existing resolution context
    pub fn inject_in(
        &self,
        provider: &dyn Provider,
        stack: &mut ResolutionStack,
        target: Option<&Instance>,
    ) -> Result<(), InjectionError> {
        if self.phase == Phase::Instance && target.is_none() {
            return Err(InjectionError::MissingInstance {
                ty: self.ty.to_string(),
            });
        }
        for member in &self.members {
            trace!(point = member.describe(), "applying injection point");
            member.resolve_and_apply(provider, stack, target)?;
        }
        Ok(())
    }

    /// Construct and populate a new instance in a fresh resolution context
    pub fn materialize(&self, provider: &dyn Provider) -> Result<Instance, InjectionError> {
        self.materialize_in(provider, &mut ResolutionStack::new())
    }

    /// Construct and populate a new instance within an existing context
    pub fn materialize_in(
        &self,
        provider: &dyn Provider,
        stack: &mut ResolutionStack,
    ) -> Result<Instance, InjectionError> {
        let instance = self.create_in(provider, stack)?;
        self.inject_in(provider, stack, Some(&instance))?;
        Ok(instance)
    }
}

/// Collects member points across a hierarchy with override suppression
struct MemberCollector {
    phase: Phase,
    slots: Vec<Option<InjectionPoint>>,
    overrides: HashMap<OverrideSignature, usize>,
}

impl MemberCollector {
    fn new(phase: Phase) -> Self {
        Self {
            phase,
            slots: Vec::new(),
            overrides: HashMap::new(),
        }
    }

    fn visit(
        &mut self,
        registry: &TypeRegistry,
        resolver: &GenericResolver,
        target: &ClassMeta,
    ) -> Result<(), TypeError> {
        for class in lineage(registry, target)?.into_iter().rev() {
            self.collect(resolver, class)?;
        }
        Ok(())
    }

    fn collect(&mut self, resolver: &GenericResolver, class: &ClassMeta) -> Result<(), TypeError> {
        for field in class.fields() {
            if self.phase.admits(field.is_static()) && introspection::is_injectable(field) {
                let point = FieldPoint::build(resolver, class, field)?;
                self.slots.push(Some(InjectionPoint::Field(point)));
            }
        }

        for method in class.methods() {
            if !self.phase.admits(method.is_static()) {
                continue;
            }
            let signature = OverrideSignature::of(class, method);
            let injectable = introspection::is_injectable(method);
            if let Some(slot) = self.overrides.remove(&signature) {
                self.slots[slot] = None;
                if !injectable {
                    debug!(
                        %signature,
                        class = class.name(),
                        "non-injectable override suppresses inherited injection"
                    );
                }
            }
            if injectable {
                let point = MethodPoint::build(resolver, class, method)?;
                self.overrides.insert(signature, self.slots.len());
                self.slots.push(Some(InjectionPoint::Method(point)));
            }
        }
        Ok(())
    }

    fn finish(self) -> Vec<InjectionPoint> {
        self.slots.into_iter().flatten().collect()
    }
}

/// `target` followed by its registered superclasses, most-derived first
///
/// Every superclass below the universal root must be registered. A chain that
/// revisits a class is rejected.
fn lineage<'r>(
    registry: &'r TypeRegistry,
    target: &'r ClassMeta,
) -> Result<Vec<&'r ClassMeta>, TypeError> {
    let mut chain = vec![target];
    let mut current = target;
    while let Some(TypeExpr::Class { name, .. }) = current.superclass()
        && name != UNIVERSAL_ROOT
    {
        if chain.iter().any(|seen| seen.name() == name) {
            let mut names: Vec<String> = chain.iter().map(|class| class.name().to_string()).collect();
            names.push(name.clone());
            return Err(TypeError::CyclicHierarchy { chain: names });
        }
        current = registry.get(name)?;
        chain.push(current);
    }
    Ok(chain)
}
