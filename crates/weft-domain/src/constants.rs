//! Domain layer constants

/// Name of the universal base type. Hierarchy walks stop before it.
pub const UNIVERSAL_ROOT: &str = "Object";

/// Marker name used by [`crate::value_objects::Qualifier::named`]
pub const NAMED_QUALIFIER: &str = "Named";

/// Default maximum number of in-flight keys on a resolution stack
pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 256;

/// Separator used when rendering a resolution chain
pub const CHAIN_SEPARATOR: &str = " -> ";
