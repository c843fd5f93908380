//! Tri-state optional string used for per-hat and process-wide model/backend
//! settings.
//!
//! The wire format distinguishes three states:
//! - key absent → [`Override::Unset`]
//! - key present but `null`, `""`, or whitespace-only → [`Override::Empty`]
//! - key present with text → [`Override::Value`] (trimmed)
//!
//! `Unset` and `Empty` are kept apart so the config round-trips faithfully,
//! but [`Override::value`] collapses both to `None`: either one means
//! "defer to the next layer".

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Override {
    #[default]
    Unset,
    Empty,
    Value(String),
}

impl Override {
    /// Normalise a raw wire value into one of the two present states.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else {
            Self::Value(trimmed.to_string())
        }
    }

    /// The configured text, or `None` when this layer defers.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Value(v) => Some(v.as_str()),
            Self::Unset | Self::Empty => None,
        }
    }

    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl From<&str> for Override {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for Override {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<Option<String>> for Override {
    fn from(raw: Option<String>) -> Self {
        raw.map_or(Self::Unset, Self::from)
    }
}

impl std::fmt::Display for Override {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unset => write!(f, "(unset)"),
            Self::Empty => write!(f, "(empty)"),
            Self::Value(v) => write!(f, "{v}"),
        }
    }
}

impl<'de> Deserialize<'de> for Override {
    /// Only called when the key is present; absent keys come from
    /// `#[serde(default)]` and stay [`Override::Unset`].
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<String>::deserialize(deserializer)? {
            None => Self::Empty,
            Some(raw) => Self::parse(&raw),
        })
    }
}

impl Serialize for Override {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unset => serializer.serialize_none(),
            Self::Empty => serializer.serialize_str(""),
            Self::Value(v) => serializer.serialize_str(v),
        }
    }
}
