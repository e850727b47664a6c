//! Subject role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a subject can hold. Authorization is enforced elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectRole {
    /// Platform administrator.
    Administrator,
    /// Verified professional account.
    Professional,
    /// Regular account.
    #[default]
    User,
}

impl SubjectRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Professional => "professional",
            Self::User => "user",
        }
    }
}

impl fmt::Display for SubjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubjectRole {
    type Err = warden_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "administrator" => Ok(Self::Administrator),
            "professional" => Ok(Self::Professional),
            "user" => Ok(Self::User),
            _ => Err(warden_core::AppError::validation(format!(
                "Invalid subject role: '{s}'. Expected one of: administrator, professional, user"
            ))),
        }
    }
}
