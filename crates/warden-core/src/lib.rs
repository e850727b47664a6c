//! # warden-core
//!
//! Core crate for Warden. Contains the configuration schemas, the
//! session store trait, and the unified error system shared by every
//! other Warden crate.
//!
//! This crate has **no** internal dependencies on other Warden crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
