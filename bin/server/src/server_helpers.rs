//! Helper functions for server functions with proper error handling and logging.
//!
//! This module provides the request-scoped plumbing server functions share:
//! reaching the application state, resolving the session cookie, and writing
//! session cookies to the response.

use crate::auth::{AppState, SESSION_COOKIE};
use crate::error::{LoginError, SessionError};
use axum::Extension;
use axum::http::{HeaderValue, header::SET_COOKIE};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use leptos::prelude::*;
use leptos_axum::ResponseOptions;
use luximo_core::SessionId;
use luximo_identity::Session;
use std::sync::Arc;
use time::Duration as TimeDuration;

/// Gets the application state attached to the request.
pub async fn get_app_state() -> Result<Arc<AppState>, ServerFnError> {
    let Extension(state): Extension<Arc<AppState>> = leptos_axum::extract().await?;
    Ok(state)
}

/// Resolves the session cookie to a live session.
///
/// Logs at debug level for the expected "not signed in" cases and returns
/// user-safe error types.
pub async fn get_authenticated_session() -> Result<Session, SessionError> {
    let raw_id = leptos_axum::extract::<CookieJar>()
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "Failed to extract cookie jar");
            SessionError::NotAuthenticated
        })?
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(SessionError::NotAuthenticated)?;

    let session_id: SessionId = raw_id.parse().map_err(|e| {
        tracing::debug!(error = %e, "Malformed session cookie");
        SessionError::InvalidCookie {
            reason: format!("{e}"),
        }
    })?;

    let state = get_app_state()
        .await
        .map_err(|e| SessionError::MissingState {
            details: e.to_string(),
        })?;

    state.sessions.find_by_id(session_id).await.ok_or_else(|| {
        tracing::debug!(%session_id, "Session not found or expired");
        SessionError::NotFound {
            session_id: session_id.to_string(),
        }
    })
}

/// Builds the cookie that carries `session`'s id until it expires.
pub fn session_cookie(session: &Session, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session.id().to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::seconds(session.remaining().num_seconds()))
        .build()
}

/// Adds the session cookie to the server function response.
pub fn set_session_cookie(session: &Session, secure: bool) -> Result<(), LoginError> {
    let cookie = session_cookie(session, secure);
    let value = HeaderValue::from_str(&cookie.to_string()).map_err(|e| LoginError::SessionCookie {
        details: e.to_string(),
    })?;
    let response = use_context::<ResponseOptions>().ok_or_else(|| LoginError::SessionCookie {
        details: "response options not available".to_string(),
    })?;
    response.append_header(SET_COOKIE, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use luximo_identity::User;

    fn test_session() -> Session {
        Session::new(
            SessionId::new(),
            User::new("sub-1".to_string(), "user@example.com".to_string()),
            Duration::minutes(60),
        )
    }

    #[test]
    fn session_cookie_is_locked_down() {
        let session = test_session();
        let cookie = session_cookie(&session, true);

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), session.id().to_string());
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn session_cookie_max_age_follows_session() {
        let cookie = session_cookie(&test_session(), false);
        let max_age = cookie.max_age().expect("max age");
        assert!(max_age <= TimeDuration::minutes(60));
        assert!(max_age > TimeDuration::minutes(59));
        assert_eq!(cookie.secure(), Some(false));
    }
}
