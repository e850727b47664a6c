//! # warden-cache
//!
//! Session store implementations for Warden. Supports two modes:
//!
//! - **memory**: In-process store using [moka](https://crates.io/crates/moka)
//!   with per-entry expiry
//! - **redis**: Shared store using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at startup based on configuration.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::StoreManager;
