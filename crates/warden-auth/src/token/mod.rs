//! Signed token encoding, decoding, claims, and revocation.

pub mod claims;
pub mod codec;
pub mod revocation;

pub use claims::{TokenClaims, TokenPurpose};
pub use codec::{IssuedToken, TokenCodec};
pub use revocation::RevocationList;
