//! Declaration markers

use crate::value_objects::Qualifier;

use super::members::ParamMeta;

/// Marker attached to a class, member or parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Opt-in for injection
    Inject,
    /// Skip when unbound; keep defaults
    Optional,
    /// Accept an absent value from an existing binding
    Nullable,
    /// Type is singleton-scoped (enforced by providers)
    Singleton,
    /// Instances are supplied from outside the engine
    Provided,
    /// Binding qualifier
    Qualifier(Qualifier),
}

/// Anything that carries markers
pub trait Annotated {
    /// Markers in declaration order
    fn markers(&self) -> &[Marker];

    /// Human readable location used in diagnostics
    fn describe(&self) -> String;

    /// Whether `marker` is present
    fn has_marker(&self, marker: &Marker) -> bool {
        self.markers().contains(marker)
    }
}

/// A constructor or method
pub trait Executable: Annotated {
    /// Declared parameters
    fn params(&self) -> &[ParamMeta];
}
