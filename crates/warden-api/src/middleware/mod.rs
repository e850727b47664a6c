//! HTTP middleware.

pub mod auth;
pub mod cors;

pub use auth::{CurrentSubject, resolve_subject};
