//! Session entity model.
//!
//! A session is the server-side revocation authority for a bearer token:
//! a structurally valid, unexpired token is still rejected once its
//! session has been revoked. Sessions are never deleted — revocation sets
//! `revoked_at`, and the row is retained for the audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A server-side session record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// The user this session belongs to. A user may hold several
    /// concurrent sessions.
    pub user_id: Uuid,
    /// IP address from which the session was created.
    pub ip_address: Option<String>,
    /// User-Agent header value at creation.
    pub user_agent: Option<String>,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
    /// When the session was revoked (logout, admin revoke, password
    /// change). `None` while the session is live.
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Check whether the session is valid at the given instant:
    /// not revoked and not expired.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}

/// Data required to create a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSession {
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// IP address of the client.
    pub ip_address: Option<String>,
    /// User-Agent header.
    pub user_agent: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}
