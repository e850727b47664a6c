//! Process-wide strategy selection.

use std::sync::Arc;

use tracing::{debug, info, warn};

use warden_core::config::{AuthConfig, StrategyKind};
use warden_core::error::ErrorKind;
use warden_core::traits::SessionStore;
use warden_entity::Subject;

use crate::context::RequestContext;
use crate::directory::{SubjectResolver, UserDirectory};
use crate::strategy::{AuthStrategy, CookieAuth, SessionAuth, TokenAuth};
use crate::token::{RevocationList, TokenCodec};

/// Holds the one strategy this server instance authenticates with.
///
/// Built once at startup from [`AuthConfig`] and shared by `Arc`; nothing in
/// it changes afterwards.
#[derive(Debug, Clone)]
pub struct AuthDispatcher {
    /// Immutable auth configuration.
    config: Arc<AuthConfig>,
    /// Active strategy.
    strategy: Arc<dyn AuthStrategy>,
    /// Subject lookup shared with login and reset.
    resolver: Arc<SubjectResolver>,
    /// Token codec shared with the reset flow.
    codec: Arc<TokenCodec>,
    /// Revocation list, when enabled.
    revocation: Option<RevocationList>,
}

impl AuthDispatcher {
    /// Builds the configured strategy over the given store and directory.
    pub fn from_config(
        config: Arc<AuthConfig>,
        store: Arc<dyn SessionStore>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        let resolver = Arc::new(SubjectResolver::from_config(directory, &config));
        let codec = Arc::new(TokenCodec::new(&config));
        let revocation = config
            .revocation_enabled
            .then(|| RevocationList::new(store.clone()));

        let token_auth = || {
            TokenAuth::new(
                &config,
                codec.clone(),
                resolver.clone(),
                revocation.clone(),
            )
        };

        let strategy: Arc<dyn AuthStrategy> = match config.strategy {
            StrategyKind::Token => Arc::new(token_auth()),
            StrategyKind::Cookie => Arc::new(CookieAuth::new(token_auth())),
            StrategyKind::Session => {
                Arc::new(SessionAuth::new(&config, store.clone(), resolver.clone()))
            }
        };

        info!(
            strategy = %config.strategy,
            header = %config.header_name,
            revocation = config.revocation_enabled,
            "Auth strategy selected"
        );

        Self {
            config,
            strategy,
            resolver,
            codec,
            revocation,
        }
    }

    /// The active strategy kind.
    pub fn kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// The active strategy.
    pub fn strategy(&self) -> &Arc<dyn AuthStrategy> {
        &self.strategy
    }

    /// Auth configuration.
    pub fn config(&self) -> &Arc<AuthConfig> {
        &self.config
    }

    /// Subject resolver.
    pub fn resolver(&self) -> &Arc<SubjectResolver> {
        &self.resolver
    }

    /// Token codec.
    pub fn codec(&self) -> &Arc<TokenCodec> {
        &self.codec
    }

    /// Revocation list, if enabled.
    pub fn revocation(&self) -> Option<&RevocationList> {
        self.revocation.as_ref()
    }

    /// Resolves the request's subject, or `None` when it cannot be resolved.
    ///
    /// Called once per request. Failures are logged, never returned.
    pub async fn resolve(&self, ctx: &RequestContext) -> Option<Subject> {
        match self.strategy.current_user(ctx).await {
            Ok(subject) => Some(subject),
            Err(e) if e.kind == ErrorKind::MissingCredential => None,
            Err(e) if e.is_transient() => {
                warn!(strategy = %self.kind(), error = %e, "Session store unavailable");
                None
            }
            Err(e) => {
                debug!(strategy = %self.kind(), error = %e, "Credential rejected");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use warden_cache::memory::MemorySessionStore;
    use warden_entity::{SubjectKind, SubjectStatus};

    use crate::directory::MemoryDirectory;

    fn dispatcher(strategy: StrategyKind) -> (AuthDispatcher, Subject) {
        let directory = MemoryDirectory::new();
        let subject = Subject::new(SubjectKind::user(), "grace@example.com", "hash")
            .with_status(SubjectStatus::Active);
        directory.insert(subject.clone()).unwrap();

        let config = Arc::new(AuthConfig {
            strategy,
            secret_key: "dispatch-secret".to_string(),
            ..AuthConfig::default()
        });
        let dispatcher = AuthDispatcher::from_config(
            config,
            Arc::new(MemorySessionStore::default()),
            Arc::new(directory),
        );
        (dispatcher, subject)
    }

    #[test]
    fn test_selects_configured_strategy() {
        for kind in [StrategyKind::Token, StrategyKind::Cookie, StrategyKind::Session] {
            let (dispatcher, _) = dispatcher(kind);
            assert_eq!(dispatcher.kind(), kind);
            assert_eq!(dispatcher.strategy().credential_name(), "x-token");
        }
    }

    #[tokio::test]
    async fn test_resolve_swallows_failures() {
        let (dispatcher, subject) = dispatcher(StrategyKind::Session);
        assert!(dispatcher.resolve(&RequestContext::new()).await.is_none());

        let bogus = RequestContext::new().with_header("x-token", "nope");
        assert!(dispatcher.resolve(&bogus).await.is_none());

        let key = dispatcher.strategy().create_session(&subject.id).await.unwrap();
        let ctx = RequestContext::new().with_header("x-token", &key);
        assert_eq!(dispatcher.resolve(&ctx).await.unwrap().id, subject.id);
    }

    #[tokio::test]
    async fn test_resolve_swallows_store_failure() {
        let config = Arc::new(AuthConfig {
            strategy: StrategyKind::Session,
            secret_key: "dispatch-secret".to_string(),
            ..AuthConfig::default()
        });
        let dispatcher = AuthDispatcher::from_config(
            config,
            Arc::new(crate::testing::FailingStore),
            Arc::new(MemoryDirectory::new()),
        );

        let ctx = RequestContext::new().with_header("x-token", "deadbeef");
        assert!(dispatcher.resolve(&ctx).await.is_none());
    }
}

