//! Stateless signed-token strategy.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use warden_core::config::{AuthConfig, StrategyKind};
use warden_core::error::{AppError, ErrorKind};
use warden_core::result::AppResult;
use warden_entity::Subject;

use crate::context::RequestContext;
use crate::directory::SubjectResolver;
use crate::token::{RevocationList, TokenClaims, TokenCodec, TokenPurpose};

use super::AuthStrategy;

/// Resolves subjects from a signed token carried in a request header.
///
/// Validity is decided entirely by the token's signature and expiry. Without
/// a revocation list, logging out leaves the token usable until it expires.
#[derive(Debug, Clone)]
pub struct TokenAuth {
    /// Signs and verifies session tokens.
    codec: Arc<TokenCodec>,
    /// Subject lookup.
    resolver: Arc<SubjectResolver>,
    /// Header carrying the token.
    header_name: String,
    /// Session token lifetime.
    ttl: Duration,
    /// Revoked token ids, when revocation is enabled.
    revocation: Option<RevocationList>,
}

impl TokenAuth {
    /// Creates a token strategy from configuration.
    pub fn new(
        config: &AuthConfig,
        codec: Arc<TokenCodec>,
        resolver: Arc<SubjectResolver>,
        revocation: Option<RevocationList>,
    ) -> Self {
        Self {
            codec,
            resolver,
            header_name: config.header_name.clone(),
            ttl: Duration::from_secs(config.session_ttl_seconds),
            revocation,
        }
    }

    /// Signs a new session token for `subject_id`.
    pub(crate) fn issue(&self, subject_id: &str) -> AppResult<String> {
        if subject_id.trim().is_empty() {
            return Err(AppError::missing_subject("Missing user_id"));
        }
        let issued = self
            .codec
            .encode(subject_id, TokenPurpose::Session, self.ttl)?;
        debug!(subject_id, jti = %issued.jti, expires_at = %issued.expires_at, "Session token issued");
        Ok(issued.token)
    }

    /// Verifies a token and checks it against the revocation list.
    pub(crate) async fn verify(&self, token: &str) -> AppResult<TokenClaims> {
        let claims = self.codec.decode(token, TokenPurpose::Session)?;

        if let Some(revocation) = &self.revocation {
            if revocation.is_revoked(&claims.jti).await? {
                return Err(AppError::invalid_credential("Token has been revoked"));
            }
        }

        Ok(claims)
    }

    /// Resolves the subject a raw token names.
    pub(crate) async fn resolve(&self, token: &str) -> AppResult<Subject> {
        let claims = self.verify(token).await?;
        let subject_id = claims
            .subject_id()
            .ok_or_else(|| AppError::missing_subject("user_id not found"))?;
        self.resolver.resolve_credential_subject(subject_id).await
    }

    /// Revokes a raw token if revocation is enabled.
    ///
    /// A token that no longer verifies needs no revocation and is ignored.
    pub(crate) async fn revoke(&self, token: &str) -> AppResult<()> {
        let Some(revocation) = &self.revocation else {
            return Ok(());
        };

        match self.verify(token).await {
            Ok(claims) => {
                revocation.revoke(&claims).await?;
                info!(subject_id = ?claims.subject_id(), "Session token revoked");
                Ok(())
            }
            Err(e) if e.kind == ErrorKind::StoreUnavailable => Err(e),
            Err(_) => Ok(()),
        }
    }

    /// Whether logged-out tokens are remembered.
    pub(crate) fn revocation_enabled(&self) -> bool {
        self.revocation.is_some()
    }

    fn missing(&self) -> AppError {
        AppError::missing_credential(format!("Missing {}", self.header_name))
    }
}

#[async_trait]
impl AuthStrategy for TokenAuth {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Token
    }

    fn credential_name(&self) -> &str {
        &self.header_name
    }

    async fn create_session(&self, subject_id: &str) -> AppResult<String> {
        self.issue(subject_id)
    }

    async fn current_user(&self, ctx: &RequestContext) -> AppResult<Subject> {
        let token = ctx.header(&self.header_name).ok_or_else(|| self.missing())?;
        self.resolve(token).await
    }

    async fn destroy_session(&self, ctx: &RequestContext) -> AppResult<()> {
        if !self.revocation_enabled() {
            return Ok(());
        }
        let token = ctx.header(&self.header_name).ok_or_else(|| self.missing())?;
        self.revoke(token).await
    }
}
