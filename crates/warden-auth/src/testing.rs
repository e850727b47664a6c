//! Store and directory doubles shared by the unit tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use warden_cache::memory::MemorySessionStore;
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_core::traits::SessionStore;
use warden_entity::{Subject, SubjectKind};

use crate::directory::{MemoryDirectory, SubjectAttribute, UserDirectory};

fn unreachable_backend() -> AppError {
    AppError::store_unavailable("Connection refused")
}

/// Session store whose backend is unreachable.
#[derive(Debug, Default)]
pub(crate) struct FailingStore;

#[async_trait]
impl SessionStore for FailingStore {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(unreachable_backend())
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<()> {
        Err(unreachable_backend())
    }

    async fn set_if_absent(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<bool> {
        Err(unreachable_backend())
    }

    async fn delete(&self, _key: &str) -> AppResult<()> {
        Err(unreachable_backend())
    }

    async fn exists(&self, _key: &str) -> AppResult<bool> {
        Err(unreachable_backend())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Err(unreachable_backend())
    }
}

/// In-memory store that yields to the scheduler before every call, the way a
/// networked backend suspends the caller.
#[derive(Debug, Default)]
pub(crate) struct YieldingStore {
    inner: MemorySessionStore,
}

#[async_trait]
impl SessionStore for YieldingStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        tokio::task::yield_now().await;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        tokio::task::yield_now().await;
        self.inner.set(key, value, ttl).await
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        tokio::task::yield_now().await;
        self.inner.set_if_absent(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        tokio::task::yield_now().await;
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        tokio::task::yield_now().await;
        self.inner.exists(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}

/// Memory directory whose reads or writes can be switched to fail.
#[derive(Debug, Default)]
pub(crate) struct FailingDirectory {
    inner: MemoryDirectory,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FailingDirectory {
    pub(crate) fn new(inner: MemoryDirectory) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub(crate) fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn inner(&self) -> &MemoryDirectory {
        &self.inner
    }

    fn check(&self, flag: &AtomicBool) -> AppResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(unreachable_backend());
        }
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for FailingDirectory {
    async fn find_by_attribute(
        &self,
        kind: &SubjectKind,
        attr: SubjectAttribute,
        value: &str,
    ) -> AppResult<Option<Subject>> {
        self.check(&self.fail_reads)?;
        self.inner.find_by_attribute(kind, attr, value).await
    }

    async fn update_secret(
        &self,
        kind: &SubjectKind,
        id: &str,
        secret_hash: &str,
    ) -> AppResult<Subject> {
        self.check(&self.fail_writes)?;
        self.inner.update_secret(kind, id, secret_hash).await
    }

    async fn touch_last_session(
        &self,
        kind: &SubjectKind,
        id: &str,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.check(&self.fail_writes)?;
        self.inner.touch_last_session(kind, id, at).await
    }
}
