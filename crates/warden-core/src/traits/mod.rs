//! Core traits defined in `warden-core` and implemented by other crates.

pub mod store;

pub use store::SessionStore;
