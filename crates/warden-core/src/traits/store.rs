//! Session store trait for pluggable key-value backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Shared, process-external key-value store with per-entry TTL.
///
/// Implementations own their concurrency control: every call is atomic from
/// the caller's point of view. Backend failures are reported as
/// [`ErrorKind::StoreUnavailable`](crate::error::ErrorKind::StoreUnavailable).
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value that expires after `ttl`. Overwrites any existing value.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Set a value only if the key is absent. Returns whether this call wrote it.
    ///
    /// Of any number of concurrent callers for the same key, exactly one wins.
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool>;

    /// Delete a key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether a key exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
