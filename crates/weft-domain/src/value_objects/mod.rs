//! Value Objects
//!
//! Immutable values created while building descriptors and used as keys
//! during resolution.

pub mod phase;
pub mod qualifier;
pub mod type_identity;

pub use phase::Phase;
pub use qualifier::Qualifier;
pub use type_identity::{PrimitiveKind, RawType, ResolvedType, TypeIdentity};
