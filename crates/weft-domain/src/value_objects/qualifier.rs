//! Binding qualifiers

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::NAMED_QUALIFIER;

/// Value Object: Qualifier
///
/// Narrows which binding satisfies a type. Two qualifiers are equal when both
/// the marker and its value are equal.
///
/// ## Example
///
/// ```rust
/// use weft_domain::value_objects::Qualifier;
///
/// let primary = Qualifier::named("primary");
/// assert_eq!(primary.to_string(), "@Named(\"primary\")");
/// assert_ne!(primary, Qualifier::marker("Primary"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qualifier {
    marker: String,
    value: Option<String>,
}

impl Qualifier {
    /// Qualifier carrying only a marker name
    pub fn marker<S: Into<String>>(marker: S) -> Self {
        Self {
            marker: marker.into(),
            value: None,
        }
    }

    /// Qualifier with a marker name and a value
    pub fn with_value<M: Into<String>, V: Into<String>>(marker: M, value: V) -> Self {
        Self {
            marker: marker.into(),
            value: Some(value.into()),
        }
    }

    /// The conventional `Named` qualifier
    pub fn named<V: Into<String>>(value: V) -> Self {
        Self::with_value(NAMED_QUALIFIER, value)
    }

    /// Marker name
    pub fn marker_name(&self) -> &str {
        &self.marker
    }

    /// Marker value, if any
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "@{}(\"{}\")", self.marker, value),
            None => write!(f, "@{}", self.marker),
        }
    }
}
