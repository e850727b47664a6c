//! Lookup glue shared by the strategies, login, and reset flows.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use warden_core::config::AuthConfig;
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_entity::{Subject, SubjectKind};

use super::{SubjectAttribute, UserDirectory};

/// Resolves subjects across every registered subject kind, in order.
#[derive(Debug, Clone)]
pub struct SubjectResolver {
    /// Backing directory.
    directory: Arc<dyn UserDirectory>,
    /// Registered kinds, consulted in order.
    kinds: Vec<SubjectKind>,
}

impl SubjectResolver {
    /// Creates a resolver over explicit kinds.
    pub fn new(directory: Arc<dyn UserDirectory>, kinds: Vec<SubjectKind>) -> Self {
        Self { directory, kinds }
    }

    /// Creates a resolver over the kinds named in configuration.
    pub fn from_config(directory: Arc<dyn UserDirectory>, config: &AuthConfig) -> Self {
        let kinds = config
            .subject_kinds
            .iter()
            .map(|k| SubjectKind::new(k.as_str()))
            .collect();
        Self::new(directory, kinds)
    }

    /// The backing directory.
    pub fn directory(&self) -> &Arc<dyn UserDirectory> {
        &self.directory
    }

    /// The registered subject kinds.
    pub fn kinds(&self) -> &[SubjectKind] {
        &self.kinds
    }

    /// First subject with a matching email across all kinds.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Subject>> {
        self.find_by(SubjectAttribute::Email, email).await
    }

    /// First subject with a matching id across all kinds.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Subject>> {
        self.find_by(SubjectAttribute::Id, id).await
    }

    async fn find_by(&self, attr: SubjectAttribute, value: &str) -> AppResult<Option<Subject>> {
        for kind in &self.kinds {
            if let Some(subject) = self.directory.find_by_attribute(kind, attr, value).await? {
                return Ok(Some(subject));
            }
        }
        Ok(None)
    }

    /// Loads the subject a valid credential names and records the access.
    ///
    /// Fails with `UnknownSubject` when no registered kind holds the id.
    pub async fn resolve_credential_subject(&self, id: &str) -> AppResult<Subject> {
        let mut subject = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::unknown_subject("user_id not found"))?;

        let now = Utc::now();
        self.directory
            .touch_last_session(&subject.kind, &subject.id, now)
            .await?;
        subject.last_session = Some(now);

        debug!(subject_id = %subject.id, kind = %subject.kind, "Resolved subject");
        Ok(subject)
    }
}
