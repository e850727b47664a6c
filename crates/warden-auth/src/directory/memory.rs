//! In-memory subject directory backed by dashmap.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::info;

use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_entity::{Subject, SubjectKind};

use super::{SubjectAttribute, UserDirectory};

/// Directory holding subjects in process memory.
///
/// Used by the development server and by tests. Records are keyed by
/// `(kind, id)` with a secondary case-insensitive email index per kind.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    /// Subjects by `(kind, id)`.
    subjects: DashMap<(SubjectKind, String), Subject>,
    /// Subject ids by `(kind, lowercase email)`.
    emails: DashMap<(SubjectKind, String), String>,
}

impl MemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads subjects from a JSON array file.
    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::configuration(format!("Failed to read {}: {e}", path.display()))
        })?;
        let subjects: Vec<Subject> = serde_json::from_str(&raw)?;

        let directory = Self::new();
        for subject in subjects {
            directory.insert(subject)?;
        }
        info!(path = %path.display(), count = directory.len(), "Loaded subjects");
        Ok(directory)
    }

    /// Adds a subject. Ids and emails must be unique within a kind.
    pub fn insert(&self, subject: Subject) -> AppResult<()> {
        let id_key = (subject.kind.clone(), subject.id.clone());
        let email_key = (subject.kind.clone(), subject.email_key());

        match self.emails.entry(email_key) {
            Entry::Occupied(_) => {
                return Err(AppError::validation(format!(
                    "A {} with email '{}' already exists",
                    subject.kind, subject.email
                )));
            }
            Entry::Vacant(slot) => {
                if self.subjects.contains_key(&id_key) {
                    return Err(AppError::validation(format!(
                        "A {} with id '{}' already exists",
                        subject.kind, subject.id
                    )));
                }
                slot.insert(subject.id.clone());
            }
        }

        self.subjects.insert(id_key, subject);
        Ok(())
    }

    /// Removes a subject, returning it if present.
    pub fn remove(&self, kind: &SubjectKind, id: &str) -> Option<Subject> {
        let (_, subject) = self.subjects.remove(&(kind.clone(), id.to_string()))?;
        self.emails.remove(&(kind.clone(), subject.email_key()));
        Some(subject)
    }

    /// Number of subjects held.
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn find_by_attribute(
        &self,
        kind: &SubjectKind,
        attr: SubjectAttribute,
        value: &str,
    ) -> AppResult<Option<Subject>> {
        let id = match attr {
            SubjectAttribute::Id => value.to_string(),
            SubjectAttribute::Email => {
                match self.emails.get(&(kind.clone(), value.to_lowercase())) {
                    Some(id) => id.clone(),
                    None => return Ok(None),
                }
            }
        };

        Ok(self
            .subjects
            .get(&(kind.clone(), id))
            .map(|entry| entry.value().clone()))
    }

    async fn update_secret(
        &self,
        kind: &SubjectKind,
        id: &str,
        secret_hash: &str,
    ) -> AppResult<Subject> {
        let mut entry = self
            .subjects
            .get_mut(&(kind.clone(), id.to_string()))
            .ok_or_else(|| AppError::unknown_subject(format!("{kind} '{id}' not found")))?;

        entry.secret_hash = secret_hash.to_string();
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    async fn touch_last_session(
        &self,
        kind: &SubjectKind,
        id: &str,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        if let Some(mut entry) = self.subjects.get_mut(&(kind.clone(), id.to_string())) {
            entry.last_session = Some(at);
            entry.updated_at = at;
        }
        Ok(())
    }
}
