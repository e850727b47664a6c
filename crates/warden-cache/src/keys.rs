//! Store key builders for every entry Warden writes.
//!
//! Backends add their own deployment prefix (see `RedisStoreConfig::key_prefix`);
//! these builders only namespace entries by purpose.

/// Key for a server-tracked session record.
pub fn session(session_key: &str) -> String {
    format!("session:{session_key}")
}

/// Key marking a token id as revoked.
pub fn revoked_token(jti: &str) -> String {
    format!("revoked:{jti}")
}
