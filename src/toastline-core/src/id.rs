//! Toast identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a toast entry.
///
/// Producers may pick their own id (a number or a string) to update a toast
/// in place later; otherwise the store assigns the next free numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToastId {
    /// Numeric id (all store-generated ids are numeric)
    Num(u64),
    /// Producer-chosen name
    Name(String),
}

impl ToastId {
    /// Returns the numeric value if this is a numeric id.
    pub fn as_num(&self) -> Option<u64> {
        match self {
            Self::Num(n) => Some(*n),
            Self::Name(_) => None,
        }
    }
}

impl From<u64> for ToastId {
    fn from(value: u64) -> Self {
        Self::Num(value)
    }
}

impl From<&str> for ToastId {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

impl From<String> for ToastId {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

impl From<&ToastId> for ToastId {
    fn from(value: &ToastId) -> Self {
        value.clone()
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}
