//! Domain error types for server operations.
//!
//! Each error logs its details where it is raised and converts to a
//! user-safe `ServerFnError` at the server function boundary.

use leptos::server_fn::error::ServerFnError;
use luximo_identity::AuthenticationError;
use std::fmt;

/// Session lookup errors.
#[derive(Debug)]
pub enum SessionError {
    /// No session cookie on the request.
    NotAuthenticated,
    /// The session cookie does not hold a session id.
    InvalidCookie { reason: String },
    /// The session does not exist or has expired.
    NotFound { session_id: String },
    /// Application state was not attached to the request.
    MissingState { details: String },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "not authenticated"),
            Self::InvalidCookie { reason } => write!(f, "invalid session cookie: {reason}"),
            Self::NotFound { session_id } => {
                write!(f, "session '{session_id}' not found or expired")
            }
            Self::MissingState { details } => {
                write!(f, "application state unavailable: {details}")
            }
        }
    }
}

impl std::error::Error for SessionError {}

impl SessionError {
    /// Whether the lookup failed because of the server rather than the request.
    #[must_use]
    pub fn is_server_fault(&self) -> bool {
        matches!(self, SessionError::MissingState { .. })
    }

    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        match &self {
            SessionError::NotAuthenticated
            | SessionError::InvalidCookie { .. }
            | SessionError::NotFound { .. } => ServerFnError::new("Not authenticated"),
            SessionError::MissingState { .. } => ServerFnError::new("Internal server error"),
        }
    }
}

/// Login errors.
#[derive(Debug)]
pub enum LoginError {
    /// The credentials were invalid or could not be verified.
    Authentication(AuthenticationError),
    /// The session cookie could not be written to the response.
    SessionCookie { details: String },
    /// Application state was not attached to the request.
    MissingState { details: String },
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authentication(err) => write!(f, "login failed: {err}"),
            Self::SessionCookie { details } => {
                write!(f, "failed to set session cookie: {details}")
            }
            Self::MissingState { details } => {
                write!(f, "application state unavailable: {details}")
            }
        }
    }
}

impl std::error::Error for LoginError {}

impl LoginError {
    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        match &self {
            LoginError::Authentication(err) => ServerFnError::new(err.user_message()),
            LoginError::SessionCookie { .. } | LoginError::MissingState { .. } => {
                ServerFnError::new("Internal server error")
            }
        }
    }
}
