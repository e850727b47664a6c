//! Subject directory contract and adapters.
//!
//! The auth subsystem never queries storage directly; every read and write
//! of a [`Subject`] goes through a [`UserDirectory`].

pub mod memory;
pub mod resolver;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use warden_core::result::AppResult;
use warden_entity::{Subject, SubjectKind};

pub use memory::MemoryDirectory;
pub use resolver::SubjectResolver;

/// Attributes a subject can be looked up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectAttribute {
    /// The opaque subject id (exact match).
    Id,
    /// The email address (case-insensitive).
    Email,
}

impl fmt::Display for SubjectAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => write!(f, "id"),
            Self::Email => write!(f, "email"),
        }
    }
}

/// Persistence boundary for subjects.
///
/// Backend failures must be reported as `StoreUnavailable`, never as a
/// missing subject.
#[async_trait]
pub trait UserDirectory: Send + Sync + fmt::Debug + 'static {
    /// Find a subject of `kind` whose `attr` equals `value`.
    async fn find_by_attribute(
        &self,
        kind: &SubjectKind,
        attr: SubjectAttribute,
        value: &str,
    ) -> AppResult<Option<Subject>>;

    /// Find a subject of `kind` by id.
    async fn find_by_id(&self, kind: &SubjectKind, id: &str) -> AppResult<Option<Subject>> {
        self.find_by_attribute(kind, SubjectAttribute::Id, id).await
    }

    /// Atomically replace a subject's secret hash and return the updated record.
    ///
    /// Fails with `UnknownSubject` if the subject does not exist.
    async fn update_secret(
        &self,
        kind: &SubjectKind,
        id: &str,
        secret_hash: &str,
    ) -> AppResult<Subject>;

    /// Record that a credential for the subject was just resolved.
    async fn touch_last_session(
        &self,
        kind: &SubjectKind,
        id: &str,
        at: DateTime<Utc>,
    ) -> AppResult<()>;
}
