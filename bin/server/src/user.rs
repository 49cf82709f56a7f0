//! User-related server functions for identity and session management.

use crate::types::UserInfo;
use leptos::prelude::*;

/// Server function to get the current user info.
#[server]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    use crate::server_helpers::get_authenticated_session;

    match get_authenticated_session().await {
        Ok(session) => Ok(Some(UserInfo::from(session.user()))),
        Err(e) if e.is_server_fault() => {
            tracing::error!(error = %e, "Application state missing from request");
            Ok(None)
        }
        Err(e) => {
            tracing::debug!(error = %e, "No authenticated session");
            Ok(None)
        }
    }
}

/// Server function that signs a user in with email and password.
///
/// The values are validated with the same rules as the login form, then
/// verified by the identity provider. On success a session is stored and its
/// id is set as an HttpOnly cookie.
#[server]
pub async fn login(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    use crate::error::LoginError;
    use crate::pages::login::LoginFormValues;
    use crate::server_helpers::{get_app_state, set_session_cookie};
    use luximo_core::{LoginAttemptId, SessionId};
    use luximo_identity::{AuthenticationError, Credentials, Session};

    let attempt = LoginAttemptId::new();
    let values = LoginFormValues { email, password };

    if let Err(err) = values.validate() {
        tracing::debug!(%attempt, error = %err, "Login rejected by validation");
        return Err(LoginError::Authentication(err).into_server_error());
    }

    let state = get_app_state().await.map_err(|e| {
        tracing::error!(%attempt, error = %e, "Application state missing from request");
        LoginError::MissingState {
            details: e.to_string(),
        }
        .into_server_error()
    })?;

    let credentials = Credentials::new(values.email, values.password);
    let grant = state
        .provider
        .password_grant(&credentials)
        .await
        .map_err(|report| {
            let err = report.current_context().clone();
            if err == AuthenticationError::InvalidCredentials {
                tracing::warn!(%attempt, "Login rejected by identity provider");
            } else {
                tracing::error!(%attempt, error = %report, "Identity provider request failed");
            }
            LoginError::Authentication(err).into_server_error()
        })?;

    let session = Session::from_grant(SessionId::new(), grant, state.session_config.duration());
    set_session_cookie(&session, state.session_config.secure_cookies).map_err(|e| {
        tracing::error!(%attempt, error = %e, "Failed to set session cookie");
        e.into_server_error()
    })?;

    let user = UserInfo::from(session.user());
    tracing::info!(
        %attempt,
        session_id = %session.id(),
        subject = %session.user().subject(),
        expires_at = %session.expires_at(),
        "User signed in"
    );
    state.sessions.create(session).await;

    Ok(user)
}
