//! Credential strategies.
//!
//! Every strategy answers the same three questions: who is making this
//! request, how do I start a session for a subject, and how do I end the
//! session a request carries. How state is kept differs per strategy:
//!
//! - [`TokenAuth`]: signed token in a request header, no server state
//! - [`CookieAuth`]: the same signed token, carried in a cookie
//! - [`SessionAuth`]: opaque key in a request header, mapped in the session store

pub mod cookie;
pub mod session;
pub mod token;

use async_trait::async_trait;

use warden_core::config::StrategyKind;
use warden_core::result::AppResult;
use warden_entity::Subject;

use crate::context::RequestContext;

pub use cookie::CookieAuth;
pub use session::SessionAuth;
pub use token::TokenAuth;

/// Uniform contract over the credential strategies.
#[async_trait]
pub trait AuthStrategy: Send + Sync + std::fmt::Debug + 'static {
    /// Which strategy this is.
    fn kind(&self) -> StrategyKind;

    /// Header or cookie name the credential travels under.
    fn credential_name(&self) -> &str;

    /// Starts a session for `subject_id` and returns the credential artifact.
    ///
    /// Fails with `MissingSubject` if the id is empty.
    async fn create_session(&self, subject_id: &str) -> AppResult<String>;

    /// Resolves the subject the request's credential belongs to.
    ///
    /// Fails with `MissingCredential`, `InvalidCredential`,
    /// `ExpiredCredential`, `UnknownSubject`, `MissingSubject`, or
    /// `StoreUnavailable`. On success the subject's last-session timestamp
    /// has been advanced.
    async fn current_user(&self, ctx: &RequestContext) -> AppResult<Subject>;

    /// Ends the session the request carries, where server-side state exists.
    async fn destroy_session(&self, ctx: &RequestContext) -> AppResult<()>;
}
