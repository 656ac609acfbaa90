//! Type identities
//!
//! A [`TypeIdentity`] is the key an injection point asks a provider for. It is
//! built from a generics-resolved [`ResolvedType`] and an optional
//! [`Qualifier`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::Qualifier;

/// Primitive value kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    /// The empty type; it has no boxed form
    Unit,
}

impl PrimitiveKind {
    /// Source-level name of the primitive
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Unit => "()",
        }
    }

    /// Whether values of this kind can be boxed
    pub fn is_boxable(self) -> bool {
        !matches!(self, Self::Unit)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Erased, concrete type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawType {
    /// Registered or external class, by qualified name
    Class(String),
    /// Boxed form of a primitive
    Boxed(PrimitiveKind),
    /// Primitive array component; only appears inside [`RawType::Array`]
    Primitive(PrimitiveKind),
    /// Array of a component type
    Array(Box<RawType>),
}

impl RawType {
    /// Class raw type
    pub fn class<S: Into<String>>(name: S) -> Self {
        Self::Class(name.into())
    }

    /// Class name, if this is a class
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Self::Class(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(name) => f.write_str(name),
            Self::Boxed(kind) => write!(f, "box<{kind}>"),
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Array(component) => write!(f, "{component}[]"),
        }
    }
}

/// A raw type together with its resolved generic arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedType {
    raw: RawType,
    args: Vec<ResolvedType>,
}

impl ResolvedType {
    /// Resolved type from its parts
    pub fn new(raw: RawType, args: Vec<ResolvedType>) -> Self {
        Self { raw, args }
    }

    /// Non-generic resolved type
    pub fn raw(raw: RawType) -> Self {
        Self::new(raw, Vec::new())
    }

    /// Non-generic class
    pub fn class<S: Into<String>>(name: S) -> Self {
        Self::raw(RawType::class(name))
    }

    /// Erased raw type
    pub fn raw_type(&self) -> &RawType {
        &self.raw
    }

    /// Resolved generic arguments, positionally
    pub fn args(&self) -> &[ResolvedType] {
        &self.args
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)?;
        if !self.args.is_empty() {
            let args = self
                .args
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "<{args}>")?;
        }
        Ok(())
    }
}

/// Value Object: Type Identity
///
/// The type required at an injection point, optionally qualified.
///
/// ## Business Rules
///
/// - Equality and hashing use the raw type and the qualifier only
/// - Generic arguments are kept for diagnostics and nested resolution
/// - An unqualified identity never equals a qualified one
///
/// ## Example
///
/// ```rust
/// use weft_domain::value_objects::{Qualifier, ResolvedType, TypeIdentity};
///
/// let list_of_str = TypeIdentity::new(
///     ResolvedType::new(
///         weft_domain::value_objects::RawType::class("std.List"),
///         vec![ResolvedType::class("std.String")],
///     ),
///     None,
/// );
/// assert_eq!(list_of_str, TypeIdentity::of("std.List"));
/// assert_ne!(
///     TypeIdentity::of("std.List"),
///     TypeIdentity::of("std.List").qualified(Qualifier::named("a")),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TypeIdentity {
    ty: ResolvedType,
    qualifier: Option<Qualifier>,
}

impl TypeIdentity {
    /// Identity from a resolved type and optional qualifier
    pub fn new(ty: ResolvedType, qualifier: Option<Qualifier>) -> Self {
        Self { ty, qualifier }
    }

    /// Unqualified identity of a class
    pub fn of<S: Into<String>>(name: S) -> Self {
        Self::new(ResolvedType::class(name), None)
    }

    /// Unqualified identity of a boxed primitive
    pub fn boxed(kind: PrimitiveKind) -> Self {
        Self::new(ResolvedType::raw(RawType::Boxed(kind)), None)
    }

    /// Same type with the given qualifier
    #[must_use]
    pub fn qualified(mut self, qualifier: Qualifier) -> Self {
        self.qualifier = Some(qualifier);
        self
    }

    /// Resolved type
    pub fn resolved(&self) -> &ResolvedType {
        &self.ty
    }

    /// Erased raw type
    pub fn raw(&self) -> &RawType {
        self.ty.raw_type()
    }

    /// Qualifier, if any
    pub fn qualifier(&self) -> Option<&Qualifier> {
        self.qualifier.as_ref()
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.ty.raw_type() == other.ty.raw_type() && self.qualifier == other.qualifier
    }
}

impl Eq for TypeIdentity {}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.raw_type().hash(state);
        self.qualifier.hash(state);
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(qualifier) => write!(f, "{qualifier} {}", self.ty),
            None => write!(f, "{}", self.ty),
        }
    }
}
