//! Declared type expressions

use std::fmt;

use crate::constants::UNIVERSAL_ROOT;
use crate::value_objects::PrimitiveKind;

/// A type as written at a declaration site, before generic resolution
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// Class, possibly parameterized
    Class {
        /// Qualified class name
        name: String,
        /// Type arguments, positionally
        args: Vec<TypeExpr>,
    },
    /// Type variable
    Var(String),
    /// Array of a component type
    Array(Box<TypeExpr>),
    /// Primitive
    Primitive(PrimitiveKind),
    /// Unbounded wildcard argument
    Wildcard,
}

impl TypeExpr {
    /// Non-generic class
    pub fn class<S: Into<String>>(name: S) -> Self {
        Self::Class {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Parameterized class
    pub fn generic<S: Into<String>>(name: S, args: Vec<TypeExpr>) -> Self {
        Self::Class {
            name: name.into(),
            args,
        }
    }

    /// Type variable
    pub fn var<S: Into<String>>(name: S) -> Self {
        Self::Var(name.into())
    }

    /// Array of `component`
    pub fn array(component: TypeExpr) -> Self {
        Self::Array(Box::new(component))
    }

    /// Primitive
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Erased spelling used in override signatures
    pub fn erasure(&self) -> String {
        match self {
            Self::Class { name, .. } => name.clone(),
            Self::Var(_) | Self::Wildcard => UNIVERSAL_ROOT.to_string(),
            Self::Array(component) => format!("{}[]", component.erasure()),
            Self::Primitive(kind) => kind.name().to_string(),
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class { name, args } if args.is_empty() => f.write_str(name),
            Self::Class { name, args } => {
                let args = args
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{name}<{args}>")
            }
            Self::Var(name) => f.write_str(name),
            Self::Array(component) => write!(f, "{component}[]"),
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Wildcard => f.write_str("?"),
        }
    }
}
