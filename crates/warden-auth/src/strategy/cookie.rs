//! Signed-token strategy carried in a cookie.

use async_trait::async_trait;

use warden_core::config::StrategyKind;
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_entity::Subject;

use crate::context::RequestContext;

use super::AuthStrategy;
use super::token::TokenAuth;

/// Same token mechanism as [`TokenAuth`], read from a cookie instead of a header.
///
/// The cookie is named after the configured header name. Setting it on the
/// response, and its attributes, is the HTTP layer's job.
#[derive(Debug, Clone)]
pub struct CookieAuth {
    /// Token mechanism shared with the header strategy.
    tokens: TokenAuth,
}

impl CookieAuth {
    /// Wraps a token strategy so it reads its artifact from a cookie.
    pub fn new(tokens: TokenAuth) -> Self {
        Self { tokens }
    }

    fn read_cookie(&self, ctx: &RequestContext) -> AppResult<String> {
        let name = self.tokens.credential_name();
        ctx.cookie(name)
            .ok_or_else(|| AppError::missing_credential(format!("Missing {name} cookie")))
    }
}

#[async_trait]
impl AuthStrategy for CookieAuth {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Cookie
    }

    fn credential_name(&self) -> &str {
        self.tokens.credential_name()
    }

    async fn create_session(&self, subject_id: &str) -> AppResult<String> {
        self.tokens.issue(subject_id)
    }

    async fn current_user(&self, ctx: &RequestContext) -> AppResult<Subject> {
        let token = self.read_cookie(ctx)?;
        self.tokens.resolve(&token).await
    }

    async fn destroy_session(&self, ctx: &RequestContext) -> AppResult<()> {
        // Without revocation, logging out only clears the cookie, which
        // happens at the HTTP layer.
        if !self.tokens.revocation_enabled() {
            return Ok(());
        }
        let token = self.read_cookie(ctx)?;
        self.tokens.revoke(&token).await
    }
}
