//! Plain HTTP authentication routes.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use luximo_core::SessionId;
use std::sync::Arc;
use time::Duration as TimeDuration;

use super::{AppState, SESSION_COOKIE};

/// Where the browser lands after signing out.
pub const AFTER_LOGOUT_PATH: &str = "/login";

/// Logs out the user by deleting their session.
///
/// The provider's access token is revoked as well. A failed revocation is
/// logged and the browser is still signed out.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        match cookie.value().parse::<SessionId>() {
            Ok(session_id) => {
                if let Some(session) = state.sessions.delete(session_id).await {
                    tracing::info!(%session_id, "User signed out");
                    if let Some(token) = session.access_token()
                        && let Err(e) = state.provider.sign_out(token).await
                    {
                        tracing::warn!(
                            %session_id,
                            error = %e.current_context(),
                            "Failed to revoke provider token on logout"
                        );
                    }
                }
            }
            Err(e) => tracing::debug!(error = %e, "Ignoring malformed session cookie on logout"),
        }
    }

    (jar.add(removal_cookie()), Redirect::to(AFTER_LOGOUT_PATH))
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(TimeDuration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionStore;
    use crate::config::SessionConfig;
    use async_trait::async_trait;
    use axum::http::{StatusCode, header};
    use chrono::Duration;
    use luximo_identity::{
        AuthenticationError, Credentials, IdentityProvider, PasswordGrant, Session, User,
    };
    use rootcause::Report;
    use std::sync::Mutex;

    /// Records revoked tokens; revocation fails when `revoke_fails` is set.
    #[derive(Default)]
    struct RecordingProvider {
        revoked: Mutex<Vec<String>>,
        revoke_fails: bool,
    }

    #[async_trait]
    impl IdentityProvider for RecordingProvider {
        async fn password_grant(
            &self,
            _credentials: &Credentials,
        ) -> Result<PasswordGrant, Report<AuthenticationError>> {
            Err(AuthenticationError::InvalidCredentials.into())
        }

        async fn sign_out(&self, access_token: &str) -> Result<(), Report<AuthenticationError>> {
            self.revoked
                .lock()
                .expect("revoked lock")
                .push(access_token.to_string());
            if self.revoke_fails {
                return Err(AuthenticationError::ProviderUnavailable {
                    reason: "down".to_string(),
                }
                .into());
            }
            Ok(())
        }
    }

    fn state_with(provider: Arc<RecordingProvider>) -> Arc<AppState> {
        Arc::new(AppState::new(
            provider,
            SessionStore::new(),
            SessionConfig::default(),
        ))
    }

    fn state() -> Arc<AppState> {
        state_with(Arc::new(RecordingProvider::default()))
    }

    fn granted_session(token: &str) -> Session {
        Session::from_grant(
            SessionId::new(),
            PasswordGrant {
                user: User::new("sub-1".to_string(), "user@example.com".to_string()),
                access_token: token.to_string(),
                expires_in: Duration::hours(1),
            },
            Duration::minutes(30),
        )
    }

    #[tokio::test]
    async fn logout_deletes_session_and_redirects_to_login() {
        let state = state();
        let session = Session::new(
            SessionId::new(),
            User::new("sub-1".to_string(), "user@example.com".to_string()),
            Duration::minutes(5),
        );
        let id = session.id();
        state.sessions.create(session).await;

        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, id.to_string()));
        let response = logout(State(state.clone()), jar).await.into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some(AFTER_LOGOUT_PATH)
        );
        assert!(response.headers().contains_key(header::SET_COOKIE));
        assert_eq!(state.sessions.count().await, 0);
    }

    #[tokio::test]
    async fn logout_revokes_provider_token() {
        let provider = Arc::new(RecordingProvider::default());
        let state = state_with(provider.clone());
        let session = granted_session("access-1");
        let id = session.id();
        state.sessions.create(session).await;

        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, id.to_string()));
        logout(State(state.clone()), jar).await.into_response();

        assert_eq!(*provider.revoked.lock().expect("revoked lock"), vec!["access-1"]);
        assert_eq!(state.sessions.count().await, 0);
    }

    #[tokio::test]
    async fn logout_succeeds_when_revocation_fails() {
        let provider = Arc::new(RecordingProvider {
            revoke_fails: true,
            ..RecordingProvider::default()
        });
        let state = state_with(provider.clone());
        let session = granted_session("access-2");
        let id = session.id();
        state.sessions.create(session).await;

        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, id.to_string()));
        let response = logout(State(state.clone()), jar).await.into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(response.headers().contains_key(header::SET_COOKIE));
        assert_eq!(provider.revoked.lock().expect("revoked lock").len(), 1);
        assert_eq!(state.sessions.count().await, 0);
    }

    #[tokio::test]
    async fn logout_of_unknown_session_revokes_nothing() {
        let provider = Arc::new(RecordingProvider::default());
        let state = state_with(provider.clone());

        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, SessionId::new().to_string()));
        logout(State(state), jar).await.into_response();

        assert!(provider.revoked.lock().expect("revoked lock").is_empty());
    }

    #[tokio::test]
    async fn logout_without_cookie_still_redirects() {
        let response = logout(State(state()), CookieJar::new()).await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
}
