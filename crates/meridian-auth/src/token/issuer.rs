//! Bearer token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use meridian_core::config::auth::AuthConfig;
use meridian_core::error::AppError;
use meridian_entity::user::UserRole;

use super::claims::IdentityClaims;

/// Creates signed bearer tokens for the login flow.
#[derive(Clone)]
pub struct TokenIssuer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token TTL in minutes.
    ttl_minutes: i64,
    /// Issuer claim stamped into every token.
    issuer: String,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_minutes", &self.ttl_minutes)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            ttl_minutes: config.token_ttl_minutes as i64,
            issuer: config.issuer.clone(),
        }
    }

    /// Generates a signed token for the given identity.
    ///
    /// Returns the token string and its expiry timestamp.
    pub fn issue(
        &self,
        user_id: Uuid,
        email: &str,
        role: UserRole,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::minutes(self.ttl_minutes);

        let claims = IdentityClaims {
            sub: user_id,
            email: email.to_string(),
            role,
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok((token, exp))
    }
}
