//! Generic type resolution
//!
//! Resolves declared [`TypeExpr`]s to concrete [`ResolvedType`]s from the
//! point of view of one target type. Type variables are substituted by
//! walking the target's supertype chain (superclass and interfaces) and
//! binding each ancestor's type parameters positionally to the arguments the
//! subtype supplied.
//!
//! ```text
//! class Repo<T>            { field store: Store<T> }
//! class UserRepo extends Repo<User>
//!
//! for_type("UserRepo"):  scopes = { UserRepo: {}, Repo: { T → User } }
//! resolve("Repo", Store<T>) → Store<User>
//! ```

use std::collections::HashMap;

use tracing::trace;
use weft_domain::TypeError;
use weft_domain::constants::UNIVERSAL_ROOT;
use weft_domain::metadata::{ClassMeta, TypeExpr, TypeRegistry};
use weft_domain::value_objects::{RawType, ResolvedType};

/// Type-variable bindings of each class in a target's supertype closure
#[derive(Debug, Clone)]
pub struct GenericResolver {
    target: String,
    scopes: HashMap<String, HashMap<String, ResolvedType>>,
}

impl GenericResolver {
    /// Collect bindings for every registered supertype of `target`
    ///
    /// The target's own type parameters stay unbound. Supertypes that are not
    /// registered contribute no bindings.
    pub fn for_type(registry: &TypeRegistry, target: &str) -> Result<Self, TypeError> {
        let class = registry.get(target)?;
        let mut scopes = HashMap::new();
        scopes.insert(class.name().to_string(), HashMap::new());
        Self::walk(registry, class, &mut scopes)?;
        Ok(Self {
            target: target.to_string(),
            scopes,
        })
    }

    fn walk(
        registry: &TypeRegistry,
        class: &ClassMeta,
        scopes: &mut HashMap<String, HashMap<String, ResolvedType>>,
    ) -> Result<(), TypeError> {
        for supertype in class.supertypes() {
            let TypeExpr::Class { name, args } = supertype else {
                return Err(TypeError::unsupported_type(
                    supertype.to_string(),
                    format!("supertype of {} must be a class", class.name()),
                ));
            };
            if name == UNIVERSAL_ROOT || scopes.contains_key(name) {
                continue;
            }
            let Some(parent) = registry.find(name) else {
                trace!(supertype = %name, "unregistered supertype contributes no bindings");
                continue;
            };

            // Arguments that cannot be resolved yet leave the parameter unbound;
            // members that actually use it fail when they are resolved.
            let bindings = parent
                .type_params()
                .iter()
                .zip(args)
                .filter_map(|(param, arg)| {
                    Self::resolve_in(scopes, class.name(), arg)
                        .ok()
                        .map(|resolved| (param.clone(), resolved))
                })
                .collect();
            scopes.insert(name.clone(), bindings);
            Self::walk(registry, parent, scopes)?;
        }
        Ok(())
    }

    /// Type the resolver was built for
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Bound variables of `class`, if it is part of the target's hierarchy
    pub fn bindings_of(&self, class: &str) -> Option<&HashMap<String, ResolvedType>> {
        self.scopes.get(class)
    }

    /// Resolve `expr` as written in a member of `declaring`
    pub fn resolve(&self, declaring: &str, expr: &TypeExpr) -> Result<ResolvedType, TypeError> {
        Self::resolve_in(&self.scopes, declaring, expr)
    }

    fn resolve_in(
        scopes: &HashMap<String, HashMap<String, ResolvedType>>,
        declaring: &str,
        expr: &TypeExpr,
    ) -> Result<ResolvedType, TypeError> {
        match expr {
            TypeExpr::Class { name, args } => {
                // Identity only needs the raw type; arguments that cannot be
                // resolved are kept in erased form.
                let args = args
                    .iter()
                    .map(|arg| {
                        Self::resolve_in(scopes, declaring, arg)
                            .unwrap_or_else(|_| ResolvedType::class(UNIVERSAL_ROOT))
                    })
                    .collect();
                Ok(ResolvedType::new(RawType::class(name.clone()), args))
            }
            TypeExpr::Var(variable) => scopes
                .get(declaring)
                .and_then(|bindings| bindings.get(variable))
                .cloned()
                .ok_or_else(|| TypeError::unresolved_variable(variable, declaring)),
            TypeExpr::Array(component) => {
                let raw = Self::component_raw(scopes, declaring, component).map_err(|err| {
                    TypeError::unsupported_type(
                        expr.to_string(),
                        format!("array component cannot be resolved ({err})"),
                    )
                })?;
                Ok(ResolvedType::raw(RawType::Array(Box::new(raw))))
            }
            TypeExpr::Primitive(kind) if kind.is_boxable() => {
                Ok(ResolvedType::raw(RawType::Boxed(*kind)))
            }
            TypeExpr::Primitive(kind) => Err(TypeError::unsupported_type(
                kind.name(),
                "primitive has no boxed form",
            )),
            TypeExpr::Wildcard => Err(TypeError::unsupported_type(
                "?",
                "wildcard has no raw type",
            )),
        }
    }

    fn component_raw(
        scopes: &HashMap<String, HashMap<String, ResolvedType>>,
        declaring: &str,
        component: &TypeExpr,
    ) -> Result<RawType, TypeError> {
        match component {
            TypeExpr::Primitive(kind) if kind.is_boxable() => Ok(RawType::Primitive(*kind)),
            other => Self::resolve_in(scopes, declaring, other)
                .map(|resolved| resolved.raw_type().clone()),
        }
    }
}
