//! Injection phase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which members a descriptor covers
///
/// Static and instance members are never mixed in one descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Static fields and methods, applied without an instance
    Static,
    /// Instance fields and methods plus the creator constructor
    Instance,
}

impl Phase {
    /// Whether a member with the given static-ness belongs to this phase
    pub fn admits(self, is_static: bool) -> bool {
        match self {
            Self::Static => is_static,
            Self::Instance => !is_static,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => write!(f, "static"),
            Self::Instance => write!(f, "instance"),
        }
    }
}
