//! Server-tracked session strategy.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use warden_cache::keys;
use warden_core::config::{AuthConfig, StrategyKind};
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_core::traits::SessionStore;
use warden_entity::Subject;

use crate::context::RequestContext;
use crate::directory::SubjectResolver;

use super::AuthStrategy;

/// Resolves subjects from an opaque session key mapped in the session store.
///
/// A key is valid exactly while the store holds it, so logging out takes
/// effect immediately.
#[derive(Debug, Clone)]
pub struct SessionAuth {
    /// Holds `session:{key}` → subject id.
    store: Arc<dyn SessionStore>,
    /// Subject lookup.
    resolver: Arc<SubjectResolver>,
    /// Header carrying the session key.
    header_name: String,
    /// Session lifetime.
    ttl: Duration,
}

impl SessionAuth {
    /// Creates a session strategy from configuration.
    pub fn new(
        config: &AuthConfig,
        store: Arc<dyn SessionStore>,
        resolver: Arc<SubjectResolver>,
    ) -> Self {
        Self {
            store,
            resolver,
            header_name: config.header_name.clone(),
            ttl: Duration::from_secs(config.session_ttl_seconds),
        }
    }

    /// 64 hex characters from two v4 UUIDs.
    fn generate_key() -> String {
        format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
    }

    fn read_key<'a>(&self, ctx: &'a RequestContext) -> AppResult<&'a str> {
        ctx.header(&self.header_name)
            .ok_or_else(|| AppError::missing_credential(format!("Missing {}", self.header_name)))
    }
}

#[async_trait]
impl AuthStrategy for SessionAuth {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Session
    }

    fn credential_name(&self) -> &str {
        &self.header_name
    }

    async fn create_session(&self, subject_id: &str) -> AppResult<String> {
        if subject_id.trim().is_empty() {
            return Err(AppError::missing_subject("Missing user_id"));
        }

        let key = Self::generate_key();
        self.store
            .set(&keys::session(&key), subject_id, self.ttl)
            .await?;

        info!(subject_id, ttl_secs = self.ttl.as_secs(), "Session created");
        Ok(key)
    }

    async fn current_user(&self, ctx: &RequestContext) -> AppResult<Subject> {
        let key = self.read_key(ctx)?;

        // Unknown and expired keys look the same once the store has dropped them.
        let subject_id = self
            .store
            .get(&keys::session(key))
            .await?
            .ok_or_else(|| AppError::expired_credential("Session expired, please log in again."))?;

        self.resolver.resolve_credential_subject(&subject_id).await
    }

    async fn destroy_session(&self, ctx: &RequestContext) -> AppResult<()> {
        let key = self.read_key(ctx)?;
        self.store.delete(&keys::session(key)).await?;
        debug!("Session destroyed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use warden_cache::memory::MemorySessionStore;
    use warden_core::ErrorKind;
    use warden_entity::{Subject, SubjectKind, SubjectStatus};

    use crate::directory::MemoryDirectory;
    use crate::strategy::{CookieAuth, TokenAuth};
    use crate::testing::{FailingDirectory, FailingStore};
    use crate::token::{RevocationList, TokenCodec, TokenPurpose};

    struct Fixture {
        config: AuthConfig,
        store: Arc<dyn SessionStore>,
        resolver: Arc<SubjectResolver>,
        subject: Subject,
    }

    fn fixture(ttl_secs: u64) -> Fixture {
        let config = AuthConfig {
            secret_key: "test-secret".to_string(),
            session_ttl_seconds: ttl_secs,
            reset_ttl_seconds: ttl_secs.saturating_sub(1).max(1),
            ..AuthConfig::default()
        };
        let directory = MemoryDirectory::new();
        let subject = Subject::new(SubjectKind::user(), "ada@example.com", "hash")
            .with_status(SubjectStatus::Active);
        directory.insert(subject.clone()).unwrap();
        let resolver = Arc::new(SubjectResolver::from_config(Arc::new(directory), &config));
        Fixture {
            config,
            store: Arc::new(MemorySessionStore::default()),
            resolver,
            subject,
        }
    }

    fn token_auth(f: &Fixture, revocation: bool) -> TokenAuth {
        let codec = Arc::new(TokenCodec::new(&f.config));
        let revocation = revocation.then(|| RevocationList::new(f.store.clone()));
        TokenAuth::new(&f.config, codec, f.resolver.clone(), revocation)
    }

    fn strategies(f: &Fixture) -> Vec<Box<dyn AuthStrategy>> {
        vec![
            Box::new(token_auth(f, false)),
            Box::new(CookieAuth::new(token_auth(f, false))),
            Box::new(SessionAuth::new(&f.config, f.store.clone(), f.resolver.clone())),
        ]
    }

    fn carry(strategy: &dyn AuthStrategy, artifact: &str) -> RequestContext {
        let ctx = RequestContext::new();
        match strategy.kind() {
            StrategyKind::Cookie => ctx.with_cookie(strategy.credential_name(), artifact),
            _ => ctx.with_header(strategy.credential_name(), artifact),
        }
    }

    #[tokio::test]
    async fn test_every_strategy_round_trips_a_subject() {
        let f = fixture(60);
        for strategy in strategies(&f) {
            let artifact = strategy.create_session(&f.subject.id).await.unwrap();
            let resolved = strategy
                .current_user(&carry(strategy.as_ref(), &artifact))
                .await
                .unwrap();
            assert_eq!(resolved.id, f.subject.id, "{}", strategy.kind());
            assert!(resolved.last_session.is_some());
        }
    }

    #[tokio::test]
    async fn test_every_strategy_requires_a_credential() {
        let f = fixture(60);
        for strategy in strategies(&f) {
            let err = strategy
                .current_user(&RequestContext::new())
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::MissingCredential, "{}", strategy.kind());
        }
    }

    #[tokio::test]
    async fn test_every_strategy_rejects_empty_subject() {
        let f = fixture(60);
        for strategy in strategies(&f) {
            let err = strategy.create_session("").await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::MissingSubject);
        }
    }

    #[tokio::test]
    async fn test_every_strategy_reports_unknown_subject() {
        let f = fixture(60);
        for strategy in strategies(&f) {
            let artifact = strategy.create_session("no-such-id").await.unwrap();
            let err = strategy
                .current_user(&carry(strategy.as_ref(), &artifact))
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::UnknownSubject, "{}", strategy.kind());
        }
    }

    #[tokio::test]
    async fn test_session_key_shape() {
        let f = fixture(60);
        let auth = SessionAuth::new(&f.config, f.store.clone(), f.resolver.clone());
        let key = auth.create_session(&f.subject.id).await.unwrap();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(
            f.store.get(&keys::session(&key)).await.unwrap(),
            Some(f.subject.id.clone())
        );
    }

    #[tokio::test]
    async fn test_unknown_session_key_is_expired() {
        let f = fixture(60);
        let auth = SessionAuth::new(&f.config, f.store.clone(), f.resolver.clone());
        let ctx = RequestContext::new().with_header(auth.credential_name(), "deadbeef");
        let err = auth.current_user(&ctx).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExpiredCredential);
    }

    #[tokio::test]
    async fn test_destroy_session_is_immediate_and_idempotent() {
        let f = fixture(60);
        let auth = SessionAuth::new(&f.config, f.store.clone(), f.resolver.clone());
        let key = auth.create_session(&f.subject.id).await.unwrap();
        let ctx = RequestContext::new().with_header(auth.credential_name(), &key);

        auth.destroy_session(&ctx).await.unwrap();
        auth.destroy_session(&ctx).await.unwrap();

        let err = auth.current_user(&ctx).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExpiredCredential);
    }

    #[tokio::test]
    async fn test_destroy_session_requires_key() {
        let f = fixture(60);
        let auth = SessionAuth::new(&f.config, f.store.clone(), f.resolver.clone());
        let err = auth.destroy_session(&RequestContext::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingCredential);
    }

    #[tokio::test]
    async fn test_token_logout_without_revocation_keeps_token_valid() {
        let f = fixture(60);
        let auth = token_auth(&f, false);
        let token = auth.create_session(&f.subject.id).await.unwrap();
        let ctx = RequestContext::new().with_header(auth.credential_name(), &token);

        auth.destroy_session(&ctx).await.unwrap();
        assert!(auth.current_user(&ctx).await.is_ok());
    }

    #[tokio::test]
    async fn test_token_logout_with_revocation_rejects_token() {
        let f = fixture(60);
        let auth = token_auth(&f, true);
        let token = auth.create_session(&f.subject.id).await.unwrap();
        let ctx = RequestContext::new().with_header(auth.credential_name(), &token);

        auth.destroy_session(&ctx).await.unwrap();
        let err = auth.current_user(&ctx).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredential);
    }

    #[tokio::test]
    async fn test_cookie_logout_with_revocation_rejects_token() {
        let f = fixture(60);
        let auth = CookieAuth::new(token_auth(&f, true));
        let token = auth.create_session(&f.subject.id).await.unwrap();
        let ctx = RequestContext::new().with_cookie(auth.credential_name(), &token);

        auth.destroy_session(&ctx).await.unwrap();
        let err = auth.current_user(&ctx).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredential);
    }

    #[tokio::test]
    async fn test_every_strategy_expires() {
        let f = fixture(1);
        let mut issued = Vec::new();
        for strategy in strategies(&f) {
            let artifact = strategy.create_session(&f.subject.id).await.unwrap();
            issued.push((strategy, artifact));
        }

        tokio::time::sleep(Duration::from_millis(2100)).await;

        for (strategy, artifact) in issued {
            let err = strategy
                .current_user(&carry(strategy.as_ref(), &artifact))
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::ExpiredCredential, "{}", strategy.kind());
        }
    }

    #[tokio::test]
    async fn test_signed_token_without_subject() {
        #[derive(serde::Serialize)]
        struct NoSubject {
            iat: i64,
            exp: i64,
            jti: String,
            purpose: TokenPurpose,
        }

        let f = fixture(60);
        let now = chrono::Utc::now().timestamp();
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &NoSubject {
                iat: now,
                exp: now + 60,
                jti: "j".to_string(),
                purpose: TokenPurpose::Session,
            },
            &jsonwebtoken::EncodingKey::from_secret(f.config.secret_key.as_bytes()),
        )
        .unwrap();

        let token_auth = token_auth(&f, false);
        let cookie_auth = CookieAuth::new(token_auth.clone());
        let candidates: [&dyn AuthStrategy; 2] = [&token_auth, &cookie_auth];
        for strategy in candidates {
            let err = strategy
                .current_user(&carry(strategy, &token))
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::MissingSubject, "{}", strategy.kind());
        }
    }

    #[tokio::test]
    async fn test_session_store_failure_is_not_expiry() {
        let f = Fixture {
            store: Arc::new(FailingStore),
            ..fixture(60)
        };
        let auth = SessionAuth::new(&f.config, f.store.clone(), f.resolver.clone());

        let err = auth.create_session(&f.subject.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::StoreUnavailable);

        let ctx = RequestContext::new().with_header(auth.credential_name(), "deadbeef");
        let err = auth.current_user(&ctx).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::StoreUnavailable);

        let err = auth.destroy_session(&ctx).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::StoreUnavailable);
    }

    #[tokio::test]
    async fn test_revocation_store_failure_is_not_rejection() {
        let f = Fixture {
            store: Arc::new(FailingStore),
            ..fixture(60)
        };
        let auth = token_auth(&f, true);
        let token = auth.create_session(&f.subject.id).await.unwrap();
        let ctx = RequestContext::new().with_header(auth.credential_name(), &token);

        let err = auth.current_user(&ctx).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::StoreUnavailable);

        let err = auth.destroy_session(&ctx).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::StoreUnavailable);
    }

    #[tokio::test]
    async fn test_directory_failure_is_not_unknown_subject() {
        let f = fixture(60);
        let inner = MemoryDirectory::new();
        inner.insert(f.subject.clone()).unwrap();
        let directory = Arc::new(FailingDirectory::new(inner));
        let f = Fixture {
            resolver: Arc::new(SubjectResolver::from_config(directory.clone(), &f.config)),
            ..f
        };

        let mut issued = Vec::new();
        for strategy in strategies(&f) {
            let artifact = strategy.create_session(&f.subject.id).await.unwrap();
            issued.push((strategy, artifact));
        }

        directory.fail_reads();
        for (strategy, artifact) in issued {
            let err = strategy
                .current_user(&carry(strategy.as_ref(), &artifact))
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::StoreUnavailable, "{}", strategy.kind());
        }
    }
}
