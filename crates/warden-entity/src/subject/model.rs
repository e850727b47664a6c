//! Subject entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::kind::SubjectKind;
use super::role::SubjectRole;
use super::status::SubjectStatus;

/// An authenticatable party known to the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Opaque unique identifier.
    pub id: String,
    /// Which registered subject family this record belongs to.
    #[serde(default)]
    pub kind: SubjectKind,
    /// Email address; unique, matched case-insensitively.
    pub email: String,
    /// Argon2 hash of the credential secret.
    #[serde(skip_serializing, default)]
    pub secret_hash: String,
    /// Subject role.
    #[serde(default)]
    pub role: SubjectRole,
    /// Account status.
    #[serde(default)]
    pub status: SubjectStatus,
    /// Last time a credential for this subject was resolved.
    #[serde(default)]
    pub last_session: Option<DateTime<Utc>>,
    /// When the subject was created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// When the subject was last updated.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Subject {
    /// Build a new subject with a fresh id and inactive status.
    pub fn new(kind: SubjectKind, email: impl Into<String>, secret_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            email: email.into(),
            secret_hash: secret_hash.into(),
            role: SubjectRole::default(),
            status: SubjectStatus::default(),
            last_session: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style status override.
    pub fn with_status(mut self, status: SubjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder-style role override.
    pub fn with_role(mut self, role: SubjectRole) -> Self {
        self.role = role;
        self
    }

    /// Check if the subject may complete login right now.
    pub fn can_login(&self) -> bool {
        self.status.can_login()
    }

    /// Email normalised for lookups.
    pub fn email_key(&self) -> String {
        self.email.to_lowercase()
    }
}
