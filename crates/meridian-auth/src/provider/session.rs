//! Session persistence seam.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use meridian_core::result::AppResult;
use meridian_entity::session::{NewSession, Session};

/// Backend for server-side session records.
///
/// Sessions are never deleted by this subsystem; revocation sets
/// `revoked_at` and the row is kept for the audit trail. Validity
/// comparisons take `now` explicitly so the store itself stays a pure
/// function of its inputs.
#[async_trait]
pub trait SessionProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the newest session for the user that is neither revoked nor
    /// expired at `now`, if any.
    async fn find_newest_active(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Session>>;

    /// Find a session by ID regardless of validity.
    async fn find_by_id(&self, session_id: Uuid) -> AppResult<Option<Session>>;

    /// Insert a new session record.
    async fn insert(&self, session: &NewSession) -> AppResult<Session>;

    /// Set `revoked_at = now` on the session. Revoking an already-revoked
    /// session is a no-op, not an error.
    async fn revoke(&self, session_id: Uuid, now: DateTime<Utc>) -> AppResult<()>;

    /// Revoke every live session the user holds. Returns the number of
    /// sessions revoked.
    async fn revoke_all_for_user(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<u64>;
}
