//! Revocation list for stateless tokens.
//!
//! Signed tokens carry no server-side state, so logging out of a token
//! session or reusing a reset token cannot be refused without remembering
//! the token id. When enabled, the id is kept in the session store until the
//! token would have expired anyway.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use warden_cache::keys;
use warden_core::error::AppError;
use warden_core::traits::SessionStore;

use super::claims::TokenClaims;

/// Store-backed set of revoked token ids.
#[derive(Debug, Clone)]
pub struct RevocationList {
    /// Shared store holding `revoked:{jti}` markers.
    store: Arc<dyn SessionStore>,
}

impl RevocationList {
    /// Creates a revocation list over the given store.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Revokes the token described by `claims` until its expiry.
    pub async fn revoke(&self, claims: &TokenClaims) -> Result<(), AppError> {
        let ttl = marker_ttl(claims);
        self.store
            .set(&keys::revoked_token(&claims.jti), "revoked", ttl)
            .await?;
        debug!(jti = %claims.jti, ttl_secs = ttl.as_secs(), "Token revoked");
        Ok(())
    }

    /// Revokes the token only if nobody has yet. Returns whether this call did.
    ///
    /// Concurrent claims for the same token id have exactly one winner.
    pub async fn claim(&self, claims: &TokenClaims) -> Result<bool, AppError> {
        let ttl = marker_ttl(claims);
        let claimed = self
            .store
            .set_if_absent(&keys::revoked_token(&claims.jti), "revoked", ttl)
            .await?;
        debug!(jti = %claims.jti, claimed, "Token claim");
        Ok(claimed)
    }

    /// Drops a revocation marker, making the token usable again.
    pub async fn release(&self, jti: &str) -> Result<(), AppError> {
        self.store.delete(&keys::revoked_token(jti)).await
    }

    /// Checks whether a token id has been revoked.
    pub async fn is_revoked(&self, jti: &str) -> Result<bool, AppError> {
        self.store.exists(&keys::revoked_token(jti)).await
    }
}

/// A marker must outlive the request that wrote it, even for a token in its
/// final second.
fn marker_ttl(claims: &TokenClaims) -> Duration {
    Duration::from_secs(claims.remaining_ttl_seconds(Utc::now()).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::claims::TokenPurpose;
    use warden_cache::memory::MemorySessionStore;

    #[tokio::test]
    async fn test_revoke_then_check() {
        let list = RevocationList::new(Arc::new(MemorySessionStore::default()));
        let claims = TokenClaims {
            sub: Some("u1".to_string()),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 60,
            jti: "jti-1".to_string(),
            purpose: TokenPurpose::Reset,
        };

        assert!(!list.is_revoked("jti-1").await.unwrap());
        list.revoke(&claims).await.unwrap();
        assert!(list.is_revoked("jti-1").await.unwrap());
        assert!(!list.is_revoked("jti-2").await.unwrap());
    }

    #[tokio::test]
    async fn test_claim_once_then_release() {
        let list = RevocationList::new(Arc::new(MemorySessionStore::default()));
        let claims = TokenClaims {
            sub: Some("u1".to_string()),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 60,
            jti: "jti-1".to_string(),
            purpose: TokenPurpose::Reset,
        };

        assert!(list.claim(&claims).await.unwrap());
        assert!(!list.claim(&claims).await.unwrap());
        assert!(list.is_revoked("jti-1").await.unwrap());

        list.release("jti-1").await.unwrap();
        assert!(!list.is_revoked("jti-1").await.unwrap());
        assert!(list.claim(&claims).await.unwrap());
    }
}
