//! Delivery of password reset tokens.

use async_trait::async_trait;
use tracing::info;

use warden_auth::IssuedToken;
use warden_core::result::AppResult;
use warden_entity::Subject;

/// Hands a freshly issued reset token to whatever delivers it to the subject.
#[async_trait]
pub trait ResetNotifier: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver `token` to `subject`.
    async fn notify(&self, subject: &Subject, token: &IssuedToken) -> AppResult<()>;
}

/// Notifier that only records that a token was issued.
///
/// The token itself is never written to the log.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

#[async_trait]
impl ResetNotifier for TracingNotifier {
    async fn notify(&self, subject: &Subject, token: &IssuedToken) -> AppResult<()> {
        info!(
            subject_id = %subject.id,
            email = %subject.email,
            expires_at = %token.expires_at,
            "Password reset requested"
        );
        Ok(())
    }
}
