//! Password reset: issue a short-lived reset token, then redeem it once.
//!
//! Every token problem on redemption (malformed, expired, reused, or naming
//! a subject that no longer exists) surfaces as `InvalidOrExpiredToken`.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use warden_core::config::AuthConfig;
use warden_core::error::{AppError, ErrorKind};
use warden_core::result::AppResult;
use warden_entity::Subject;

use crate::directory::SubjectResolver;
use crate::password::{PasswordHasher, PasswordValidator};
use crate::token::{IssuedToken, RevocationList, TokenClaims, TokenCodec, TokenPurpose};

/// Issues and redeems password reset tokens.
#[derive(Debug, Clone)]
pub struct PasswordResetFlow {
    /// Token codec shared with the session strategies.
    codec: Arc<TokenCodec>,
    /// Subject lookup across kinds.
    resolver: Arc<SubjectResolver>,
    /// Policy for the new secret.
    validator: PasswordValidator,
    /// Hashes the new secret.
    hasher: PasswordHasher,
    /// Reset token lifetime.
    ttl: Duration,
    /// Consumed token ids, when revocation is enabled.
    revocation: Option<RevocationList>,
}

impl PasswordResetFlow {
    /// Creates a reset flow.
    pub fn new(
        config: &AuthConfig,
        codec: Arc<TokenCodec>,
        resolver: Arc<SubjectResolver>,
        validator: PasswordValidator,
        revocation: Option<RevocationList>,
    ) -> Self {
        Self {
            codec,
            resolver,
            validator,
            hasher: PasswordHasher::new(),
            ttl: Duration::from_secs(config.reset_ttl_seconds),
            revocation,
        }
    }

    /// Signs a reset token for `subject`.
    ///
    /// Stateless: issuing a second token does not invalidate the first.
    pub fn issue_reset_token(&self, subject: &Subject) -> AppResult<IssuedToken> {
        if subject.id.is_empty() {
            return Err(AppError::missing_subject("Missing user_id"));
        }
        let issued = self.codec.encode(&subject.id, TokenPurpose::Reset, self.ttl)?;
        info!(subject_id = %subject.id, expires_at = %issued.expires_at, "Reset token issued");
        Ok(issued)
    }

    /// Consumes a reset token and replaces the subject's secret.
    ///
    /// Fails with `InvalidOrExpiredToken` for any token problem and with
    /// `Validation` when the new secret breaks the password policy.
    pub async fn redeem(&self, token: &str, new_secret: &str) -> AppResult<Subject> {
        let claims = self.verify(token).await?;
        let subject_id = claims
            .subject_id()
            .ok_or_else(AppError::invalid_or_expired_token)?;

        let subject = self
            .resolver
            .find_by_id(subject_id)
            .await?
            .ok_or_else(AppError::invalid_or_expired_token)?;

        self.validator.validate(new_secret)?;
        let secret_hash = self.hasher.hash_password(new_secret)?;

        // The token is consumed before the secret changes, so two concurrent
        // redemptions cannot both succeed.
        if let Some(revocation) = &self.revocation {
            if !revocation.claim(&claims).await? {
                debug!(jti = %claims.jti, "Reset token already redeemed");
                return Err(AppError::invalid_or_expired_token());
            }
        }

        let updated = match self
            .resolver
            .directory()
            .update_secret(&subject.kind, &subject.id, &secret_hash)
            .await
        {
            Ok(updated) => updated,
            Err(e) => {
                self.release(&claims).await;
                return Err(merge_token_error(e));
            }
        };

        info!(subject_id = %updated.id, kind = %updated.kind, "Password reset");
        Ok(updated)
    }

    async fn verify(&self, token: &str) -> AppResult<TokenClaims> {
        let claims = self
            .codec
            .decode(token, TokenPurpose::Reset)
            .map_err(merge_token_error)?;

        if let Some(revocation) = &self.revocation {
            if revocation.is_revoked(&claims.jti).await? {
                debug!(jti = %claims.jti, "Reset token reused");
                return Err(AppError::invalid_or_expired_token());
            }
        }

        Ok(claims)
    }

    /// Returns a claimed token to service after the secret update failed.
    async fn release(&self, claims: &TokenClaims) {
        if let Some(revocation) = &self.revocation {
            if let Err(e) = revocation.release(&claims.jti).await {
                warn!(jti = %claims.jti, error = %e, "Failed to release reset token");
            }
        }
    }
}

fn merge_token_error(e: AppError) -> AppError {
    match e.kind {
        ErrorKind::InvalidCredential | ErrorKind::ExpiredCredential | ErrorKind::UnknownSubject => {
            AppError::invalid_or_expired_token()
        }
        _ => e,
    }
}
