//! Error handling types
//!
//! Two families matter to callers of the engine:
//!
//! - [`TypeError`]: structural problems found while building a descriptor.
//!   They are fatal and are always raised before any resolution happens.
//! - [`InjectionError`]: failures found while resolving a built descriptor
//!   against a provider.
//!
//! [`Error`] wraps both, plus the configuration and I/O failures of the
//! infrastructure layer.

use thiserror::Error;

use crate::constants::CHAIN_SEPARATOR;
use crate::value_objects::TypeIdentity;

/// Boxed error used for failures owned by collaborators
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Weft
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed type metadata
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Resolution failure
    #[error(transparent)]
    Injection(#[from] InjectionError),

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Structural violation discovered while building a type descriptor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// The type is not present in the registry
    #[error("Unknown type: {name}")]
    UnknownType {
        /// Requested type name
        name: String,
    },

    /// A type with the same name was registered twice
    #[error("Type already registered: {name}")]
    DuplicateType {
        /// Offending type name
        name: String,
    },

    /// A type variable could not be traced to a class-level declaration
    #[error("Cannot resolve type variable {variable} declared in {declaring}")]
    UnresolvedVariable {
        /// Variable name
        variable: String,
        /// Class whose member mentions the variable
        declaring: String,
    },

    /// No concrete raw type can be derived for a type expression
    #[error("Unsupported type {ty}: {reason}")]
    UnsupportedType {
        /// Rendered type expression
        ty: String,
        /// Why no raw type exists
        reason: String,
    },

    /// More than one qualifying marker on the same element
    #[error("Multiple qualifiers on {element}")]
    MultipleQualifiers {
        /// Element description
        element: String,
    },

    /// Executable-level qualifier on an executable without exactly one parameter
    #[error("Qualifier on {element} requires exactly one parameter, found {params}")]
    AmbiguousQualifierPlacement {
        /// Executable description
        element: String,
        /// Number of declared parameters
        params: usize,
    },

    /// Qualifier present on both an executable and its parameter
    #[error("Qualifier declared on both {element} and its parameter")]
    ConflictingQualifiers {
        /// Executable description
        element: String,
    },

    /// Nullable marker on an element whose type cannot hold absence
    #[error("Primitive element {element} cannot be nullable")]
    NullablePrimitive {
        /// Element description
        element: String,
    },

    /// Target type is an interface
    #[error("Cannot inject interface {ty}")]
    InterfaceTarget {
        /// Type name
        ty: String,
    },

    /// Target type is a primitive
    #[error("Cannot inject primitive {ty}")]
    PrimitiveTarget {
        /// Type name
        ty: String,
    },

    /// Target type is abstract
    #[error("Cannot inject abstract type {ty}")]
    AbstractTarget {
        /// Type name
        ty: String,
    },

    /// Target type is a nested type that needs an enclosing instance
    #[error("Cannot inject inner type {ty}; make it a static nested type")]
    InnerClassTarget {
        /// Type name
        ty: String,
    },

    /// More than one constructor marked for injection
    #[error("Type {ty} has {count} constructors marked for injection")]
    AmbiguousConstructor {
        /// Type name
        ty: String,
        /// Number of marked constructors
        count: usize,
    },

    /// Neither a marked constructor nor a public no-argument constructor exists
    #[error("Type {ty} has no injectable or public no-argument constructor")]
    NoUsableConstructor {
        /// Type name
        ty: String,
    },

    /// Final field marked for injection
    #[error("Field {field} is final and cannot be injected")]
    FieldNotInjectable {
        /// Field description
        field: String,
    },

    /// A superclass chain that leads back to one of its own members
    #[error("Cyclic class hierarchy: {}", .chain.join(CHAIN_SEPARATOR))]
    CyclicHierarchy {
        /// Class names from the target up to and including the repeated one
        chain: Vec<String>,
    },
}

impl TypeError {
    /// Create an unknown type error
    pub fn unknown_type<S: Into<String>>(name: S) -> Self {
        Self::UnknownType { name: name.into() }
    }

    /// Create an unresolved variable error
    pub fn unresolved_variable<V: Into<String>, D: Into<String>>(variable: V, declaring: D) -> Self {
        Self::UnresolvedVariable {
            variable: variable.into(),
            declaring: declaring.into(),
        }
    }

    /// Create an unsupported type error
    pub fn unsupported_type<T: Into<String>, R: Into<String>>(ty: T, reason: R) -> Self {
        Self::UnsupportedType {
            ty: ty.into(),
            reason: reason.into(),
        }
    }
}

/// Runtime failure discovered while resolving a descriptor
#[derive(Error, Debug)]
pub enum InjectionError {
    /// Required dependency resolved to nothing
    #[error("Missing dependency: {key}")]
    MissingDependency {
        /// Requested key
        key: TypeIdentity,
    },

    /// A key was requested while already in flight
    #[error("Circular dependency on {key}: {}", render_chain(.chain))]
    CircularDependency {
        /// Key that closed the cycle
        key: TypeIdentity,
        /// In-flight keys in entry order
        chain: Vec<TypeIdentity>,
    },

    /// The resolution stack grew past its configured limit
    #[error("Resolution depth {depth} exceeded while resolving {key}")]
    DepthExceeded {
        /// Key that would have exceeded the limit
        key: TypeIdentity,
        /// Configured limit
        depth: usize,
    },

    /// Provider-defined failure, attributed to the requesting key
    #[error("Provider failed for {key}: {source}")]
    Provider {
        /// Requested key
        key: TypeIdentity,
        /// Failure reported by the provider
        #[source]
        source: BoxError,
    },

    /// The constructor, setter or method itself failed
    #[error("Injection into {point} failed: {source}")]
    TargetFailed {
        /// Injection point description
        point: String,
        /// Failure raised by the target
        #[source]
        source: BoxError,
    },

    /// The injection point could not be invoked at all
    #[error("Cannot invoke {point}: {reason}")]
    InvocationFailed {
        /// Injection point description
        point: String,
        /// Why invocation was impossible
        reason: String,
    },

    /// Descriptor has no creator point
    #[error("Type {ty} has no creator in this descriptor")]
    NotConstructible {
        /// Type name
        ty: String,
    },

    /// Instance-phase injection attempted without a target instance
    #[error("Instance injection for {ty} requires a target instance")]
    MissingInstance {
        /// Type name
        ty: String,
    },
}

impl InjectionError {
    /// Create a missing dependency error
    pub fn missing(key: &TypeIdentity) -> Self {
        Self::MissingDependency { key: key.clone() }
    }

    /// Translate an invocation failure raised at `point`
    pub fn from_invoke<S: Into<String>>(point: S, err: InvokeError) -> Self {
        match err {
            InvokeError::Target(source) => Self::TargetFailed {
                point: point.into(),
                source,
            },
            InvokeError::Access(reason) => Self::InvocationFailed {
                point: point.into(),
                reason,
            },
        }
    }

    /// Keys involved in a circular dependency, if this is one
    pub fn cycle(&self) -> Option<&[TypeIdentity]> {
        match self {
            Self::CircularDependency { chain, .. } => Some(chain),
            _ => None,
        }
    }
}

/// Failure raised by a construct, set or invoke closure
#[derive(Error, Debug)]
pub enum InvokeError {
    /// The target code ran and failed
    #[error("{0}")]
    Target(BoxError),

    /// The target could not be invoked (wrong receiver, argument mismatch)
    #[error("{0}")]
    Access(String),
}

impl InvokeError {
    /// Wrap a failure raised by the target
    pub fn target<E: Into<BoxError>>(err: E) -> Self {
        Self::Target(err.into())
    }

    /// Report that the target could not be invoked
    pub fn access<S: Into<String>>(reason: S) -> Self {
        Self::Access(reason.into())
    }
}

/// Failure returned by a provider's `get_instance`
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Nested resolution failed; propagated unchanged
    #[error(transparent)]
    Injection(#[from] InjectionError),

    /// Provider-defined failure
    #[error("{0}")]
    Failed(BoxError),
}

impl ProviderError {
    /// Wrap a provider-defined failure
    pub fn failed<E: Into<BoxError>>(err: E) -> Self {
        Self::Failed(err.into())
    }
}

fn render_chain(chain: &[TypeIdentity]) -> String {
    chain
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(CHAIN_SEPARATOR)
}
