//! Subject kind identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Names a family of subjects held by the directory (e.g. `user`).
///
/// Resolution walks the configured kinds in order, so new subject types
/// can be registered without touching the strategies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectKind(String);

impl SubjectKind {
    /// The default kind.
    pub const USER: &'static str = "user";

    /// Create a kind from its name. Names are case-insensitive.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().to_lowercase())
    }

    /// The `user` kind.
    pub fn user() -> Self {
        Self(Self::USER.to_string())
    }

    /// Return the kind name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SubjectKind {
    fn default() -> Self {
        Self::user()
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectKind {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
