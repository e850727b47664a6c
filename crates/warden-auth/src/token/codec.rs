//! Signed token encoding and decoding (HS256 JWT).

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use warden_core::config::AuthConfig;
use warden_core::error::AppError;

use super::claims::{TokenClaims, TokenPurpose};

/// A freshly signed token.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedToken {
    /// The compact signed token.
    pub token: String,
    /// Token id embedded as `jti`.
    pub jti: String,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

/// Stateless signer/verifier for session and reset tokens.
///
/// Verification checks the signature and then the expiry: a token is valid
/// strictly before its `exp` second and expired from that second on, with no
/// clock-skew leeway.
#[derive(Clone)]
pub struct TokenCodec {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Signature validation settings. Expiry is checked separately.
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::from_secret(config.secret_key.as_bytes())
    }

    /// Creates a codec from a raw shared secret.
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Signs a token for `subject_id` that expires `ttl` from now.
    pub fn encode(
        &self,
        subject_id: &str,
        purpose: TokenPurpose,
        ttl: Duration,
    ) -> Result<IssuedToken, AppError> {
        self.encode_at(subject_id, purpose, ttl, Utc::now())
    }

    /// Signs a token as if issued at `now`.
    pub fn encode_at(
        &self,
        subject_id: &str,
        purpose: TokenPurpose,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let exp = i64::try_from(ttl.as_secs())
            .ok()
            .and_then(|secs| now.timestamp().checked_add(secs))
            .ok_or_else(|| {
                AppError::configuration(format!("Token lifetime out of range: {}s", ttl.as_secs()))
            })?;
        let claims = TokenClaims {
            sub: Some(subject_id.to_string()),
            iat: now.timestamp(),
            exp,
            jti: Uuid::new_v4().to_string(),
            purpose,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok(IssuedToken {
            token,
            jti: claims.jti.clone(),
            expires_at: claims.expires_at(),
        })
    }

    /// Verifies a token for the expected purpose and returns its claims.
    pub fn decode(&self, token: &str, purpose: TokenPurpose) -> Result<TokenClaims, AppError> {
        self.decode_at(token, purpose, Utc::now())
    }

    /// Verifies a token as of `now`.
    ///
    /// Fails with `InvalidCredential` for anything malformed, badly signed,
    /// or minted for another purpose, and with `ExpiredCredential` once
    /// `now` has reached the token's expiry.
    pub fn decode_at(
        &self,
        token: &str,
        purpose: TokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<TokenClaims, AppError> {
        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => {
                    AppError::expired_credential("Expired Signature, please log in again.")
                }
                JwtErrorKind::InvalidSignature => {
                    AppError::invalid_credential("Invalid token signature")
                }
                _ => AppError::invalid_credential("Invalid token"),
            })?
            .claims;

        if now.timestamp() >= claims.exp {
            return Err(AppError::expired_credential(
                "Expired Signature, please log in again.",
            ));
        }

        if claims.purpose != purpose {
            return Err(AppError::invalid_credential("Invalid token type"));
        }

        Ok(claims)
    }
}
