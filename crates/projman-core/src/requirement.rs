//! # Requirement and SubItem Records
//!
//! Wire format is camelCase JSON. Decoding is deliberately lenient: unknown
//! keys are ignored and a missing key or an explicit `null` yields the zero
//! value of the field. Only syntax errors and type mismatches fail.

use serde::{Deserialize, Deserializer, Serialize};

/// Workflow status of a requirement or sub-item.
///
/// The three conventional values are typed; any other string is kept
/// verbatim in [`Status::Other`] so clients can round-trip values this
/// service does not know about. The empty string is the unset status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Pending,
    InProgress,
    Complete,
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Complete => "complete",
            Self::Other(s) => s,
        }
    }

    /// Whether no status was supplied.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Other(s) if s.is_empty())
    }

    /// Replace an unset status with [`Status::Pending`].
    pub fn or_pending(self) -> Self {
        if self.is_unset() {
            Self::Pending
        } else {
            self
        }
    }
}

/// The unset status (`""`), not `Pending`. Defaulting happens on creation.
impl Default for Status {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "in-progress" => Self::InProgress,
            "complete" => Self::Complete,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for Status {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A child task owned by exactly one [`Requirement`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubItem {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: Status,
}

/// A tracked unit of work with nested sub-items.
///
/// `created_at` and `updated_at` are opaque client-supplied strings; the
/// service never writes them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Requirement {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: Status,
    #[serde(deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub sub_items: Vec<SubItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
