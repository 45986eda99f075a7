//! Three-state scalar attribute values.
//!
//! A scalar in an attribute tree is either absent from the configuration,
//! known, or not yet known (only during planning). Encoding emits a line for
//! known values only.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A scalar attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Attr<T> {
    /// Not present in the configuration.
    #[default]
    Unset,
    /// Value will only be known after apply.
    Unknown,
    /// A concrete value.
    Known(T),
}

impl<T> Attr<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Attr::Unset)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Attr::Known(_))
    }

    /// Borrow the known value, if any.
    pub fn known(&self) -> Option<&T> {
        match self {
            Attr::Known(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Attr<&T> {
        match self {
            Attr::Unset => Attr::Unset,
            Attr::Unknown => Attr::Unknown,
            Attr::Known(v) => Attr::Known(v),
        }
    }
}

impl Attr<String> {
    /// True when the value would produce a configuration line.
    ///
    /// Empty strings are treated like unset values.
    pub fn is_set(&self) -> bool {
        self.known().is_some_and(|s| !s.is_empty())
    }

    pub fn as_str(&self) -> Option<&str> {
        self.known().map(String::as_str).filter(|s| !s.is_empty())
    }
}

impl Attr<i64> {
    pub fn is_set(&self) -> bool {
        self.is_known()
    }
}

impl<T> From<T> for Attr<T> {
    fn from(value: T) -> Self {
        Attr::Known(value)
    }
}

impl From<&str> for Attr<String> {
    fn from(value: &str) -> Self {
        Attr::Known(value.to_string())
    }
}

impl<T> From<Option<T>> for Attr<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Attr::Known(v),
            None => Attr::Unset,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Attr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attr::Unset => write!(f, "<unset>"),
            Attr::Unknown => write!(f, "<unknown>"),
            Attr::Known(v) => write!(f, "{}", v),
        }
    }
}

// Unknown values never reach persisted state, so both non-known states
// serialize as null.
impl<T: Serialize> Serialize for Attr<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Attr::Known(v) => serializer.serialize_some(v),
            _ => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Attr<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Attr::from)
    }
}
