//! # warden-auth
//!
//! Pluggable authentication and session handling for Warden.
//!
//! ## Modules
//!
//! - `context`: Request view the strategies read credentials from
//! - `directory`: Subject directory contract, in-memory adapter, and resolver
//! - `dispatcher`: Startup selection of the one active strategy
//! - `login`: Email and password login
//! - `password`: Argon2id password hashing and policy enforcement
//! - `reset`: Password reset token issue and redemption
//! - `strategy`: Token, cookie, and server-session strategies
//! - `token`: Signed token codec, claims, and revocation list

pub mod context;
pub mod directory;
pub mod dispatcher;
pub mod login;
pub mod password;
pub mod reset;
pub mod strategy;
pub mod token;

#[cfg(test)]
mod testing;

pub use context::RequestContext;
pub use directory::{MemoryDirectory, SubjectAttribute, SubjectResolver, UserDirectory};
pub use dispatcher::AuthDispatcher;
pub use login::{Authenticator, LoginOutcome};
pub use password::{PasswordHasher, PasswordValidator};
pub use reset::PasswordResetFlow;
pub use strategy::{AuthStrategy, CookieAuth, SessionAuth, TokenAuth};
pub use token::{IssuedToken, RevocationList, TokenClaims, TokenCodec, TokenPurpose};
