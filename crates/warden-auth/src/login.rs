//! Email and password login.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_entity::Subject;

use crate::directory::SubjectResolver;
use crate::password::PasswordHasher;
use crate::strategy::AuthStrategy;

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    /// The authenticated subject.
    pub subject: Subject,
    /// Credential artifact from the active strategy.
    pub credential: String,
}

/// Checks an email and secret and starts a session.
#[derive(Debug, Clone)]
pub struct Authenticator {
    /// Subject lookup across kinds.
    resolver: Arc<SubjectResolver>,
    /// Active strategy.
    strategy: Arc<dyn AuthStrategy>,
    /// Secret verification.
    hasher: PasswordHasher,
}

impl Authenticator {
    /// Creates an authenticator over the active strategy.
    pub fn new(resolver: Arc<SubjectResolver>, strategy: Arc<dyn AuthStrategy>) -> Self {
        Self {
            resolver,
            strategy,
            hasher: PasswordHasher::new(),
        }
    }

    /// Logs a subject in by email and secret.
    ///
    /// The status gate runs before the secret check, so an inactive account
    /// is reported as such even when the secret is right.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let subject = self
            .resolver
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !subject.can_login() {
            warn!(subject_id = %subject.id, status = %subject.status, "Login refused for inactive account");
            return Err(AppError::account_not_active(format!(
                "Unauthorized: User account status[{}]",
                subject.status
            )));
        }

        if subject.secret_hash.is_empty()
            || !self.hasher.verify_password(password, &subject.secret_hash)?
        {
            warn!(subject_id = %subject.id, "Login failed: incorrect password");
            return Err(AppError::incorrect_credential("Incorrect password"));
        }

        let credential = self.strategy.create_session(&subject.id).await?;

        info!(subject_id = %subject.id, strategy = %self.strategy.kind(), "Login succeeded");
        Ok(LoginOutcome {
            subject,
            credential,
        })
    }
}
