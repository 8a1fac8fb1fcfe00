//! Identity claims carried in every bearer token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use meridian_entity::user::UserRole;

/// Decoded token payload.
///
/// Values here are claims in the literal sense: nothing in this struct is
/// trusted until the verifier has checked the signature and expiry, and
/// even then the session store has the final word on whether the caller
/// is still logged in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Login email at the time of issuance.
    pub email: String,
    /// User role at the time of issuance.
    pub role: UserRole,
    /// Issuer identifier.
    pub iss: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl IdentityClaims {
    /// Return the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Return the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}
