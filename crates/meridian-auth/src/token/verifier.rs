//! Bearer token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use meridian_core::config::auth::AuthConfig;

use crate::error::AuthError;

use super::claims::IdentityClaims;

/// Validates bearer tokens against the server-held secret.
///
/// Verification is a pure function of (token, secret, now): no side
/// effects, no store access. Session liveness is deliberately someone
/// else's job — a token's own expiry claim cannot express "log this
/// session out immediately".
#[derive(Clone)]
pub struct CredentialVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl CredentialVerifier {
    /// Creates a new verifier from auth configuration.
    ///
    /// The signing secret and issuer are injected here and never read
    /// from ambient state.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew
        validation.set_issuer(&[&config.issuer]);

        Self {
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a bearer token string.
    ///
    /// The three failure modes are distinguished because callers surface
    /// different messages and the distinction itself is audit-relevant
    /// (an expired token is not a forged one):
    /// - [`AuthError::TokenExpired`] — good signature, expiry in the past
    /// - [`AuthError::TokenInvalid`] — signature or issuer check failed
    /// - [`AuthError::TokenMalformed`] — not parseable as a token at all
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, AuthError> {
        let token_data = decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::InvalidIssuer
                | jsonwebtoken::errors::ErrorKind::ImmatureSignature
                | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => AuthError::TokenInvalid,
                _ => AuthError::TokenMalformed,
            })?;

        Ok(token_data.claims)
    }
}
