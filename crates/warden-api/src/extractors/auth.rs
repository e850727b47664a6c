//! `AuthSubject` extractor: requires the subject the middleware resolved.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use warden_core::error::AppError;
use warden_entity::Subject;

use crate::error::ApiError;
use crate::middleware::CurrentSubject;

/// Authenticated subject available in handlers.
#[derive(Debug, Clone)]
pub struct AuthSubject(pub Subject);

impl std::ops::Deref for AuthSubject {
    type Target = Subject;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthSubject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<CurrentSubject>() {
            Some(CurrentSubject(Some(subject))) => Ok(AuthSubject(subject.clone())),
            _ => Err(AppError::missing_credential("Unauthorized").into()),
        }
    }
}
