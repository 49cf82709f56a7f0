//! Signed-in browser sessions.
//!
//! A session is created after the identity provider accepts a password grant.
//! It holds the provider's access token so it never reaches the browser; the browser
//! only carries the opaque `SessionId`.

use chrono::{DateTime, Duration, Utc};
use luximo_core::SessionId;

use crate::auth::PasswordGrant;
use crate::user::User;

/// An active signed-in session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,
    /// The signed-in user.
    user: User,
    /// When the session was created.
    created_at: DateTime<Utc>,
    /// When the session expires.
    expires_at: DateTime<Utc>,
    /// Provider access token.
    access_token: Option<String>,
}

impl Session {
    /// Creates a new session valid for `duration`.
    #[must_use]
    pub fn new(id: SessionId, user: User, duration: Duration) -> Self {
        let now = Utc::now();
        Self {
            id,
            user,
            created_at: now,
            expires_at: now + duration,
            access_token: None,
        }
    }

    /// Creates a session from an accepted password grant.
    ///
    /// The session lasts `max_duration` or the provider's token lifetime,
    /// whichever is shorter.
    #[must_use]
    pub fn from_grant(id: SessionId, grant: PasswordGrant, max_duration: Duration) -> Self {
        let duration = grant.expires_in.min(max_duration);
        let mut session = Self::new(id, grant.user, duration);
        session.access_token = Some(grant.access_token);
        session
    }

    /// Returns the session ID.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the signed-in user.
    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Returns when the session was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the session expires.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Time left before expiry, zero once expired.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        (self.expires_at - Utc::now()).max(Duration::zero())
    }

    /// Returns the provider access token, if present.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Returns true if the session has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Returns true if the session is still valid (not expired).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User::new("sub-1".to_string(), "user@example.com".to_string())
    }

    fn test_grant(expires_in: Duration) -> PasswordGrant {
        PasswordGrant {
            user: test_user(),
            access_token: "access-token".to_string(),
            expires_in,
        }
    }

    #[test]
    fn new_session_has_correct_fields() {
        let id = SessionId::new();
        let before = Utc::now();
        let session = Session::new(id, test_user(), Duration::hours(1));
        let after = Utc::now();

        assert_eq!(session.id(), id);
        assert_eq!(session.user().email(), "user@example.com");
        assert!(session.created_at() >= before);
        assert!(session.created_at() <= after);
        assert_eq!(session.expires_at() - session.created_at(), Duration::hours(1));
        assert!(session.access_token().is_none());
    }

    #[test]
    fn session_is_valid_before_expiry() {
        let session = Session::new(SessionId::new(), test_user(), Duration::hours(1));
        assert!(session.is_valid());
        assert!(!session.is_expired());
        assert!(session.remaining() > Duration::minutes(59));
    }

    #[test]
    fn session_with_past_expiry_is_expired() {
        let session = Session::new(SessionId::new(), test_user(), Duration::seconds(-1));
        assert!(session.is_expired());
        assert_eq!(session.remaining(), Duration::zero());
    }

    #[test]
    fn from_grant_keeps_access_token() {
        let session = Session::from_grant(
            SessionId::new(),
            test_grant(Duration::hours(1)),
            Duration::hours(8),
        );
        assert_eq!(session.access_token(), Some("access-token"));
    }

    #[test]
    fn from_grant_is_capped_by_token_lifetime() {
        let session = Session::from_grant(
            SessionId::new(),
            test_grant(Duration::minutes(30)),
            Duration::hours(8),
        );
        assert_eq!(session.expires_at() - session.created_at(), Duration::minutes(30));
    }

    #[test]
    fn from_grant_is_capped_by_max_duration() {
        let session = Session::from_grant(
            SessionId::new(),
            test_grant(Duration::hours(24)),
            Duration::hours(8),
        );
        assert_eq!(session.expires_at() - session.created_at(), Duration::hours(8));
    }
}
