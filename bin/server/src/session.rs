//! Client-side authentication state.
//!
//! `AuthContext` is provided once at the root of the app and read by pages via
//! [`use_auth`]. It exposes the signed-in user and a loading flag as signals,
//! and publishes a [`Notice`] whenever a login attempt fails, so pages that
//! call [`AuthSession::login`] do not render authentication errors themselves.

use crate::types::{Notice, UserInfo};
use crate::user::{get_current_user, login as login_request};
use async_trait::async_trait;
use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;
use luximo_identity::AuthenticationError;

/// Authentication state and the login operation, as seen by a page.
#[async_trait(?Send)]
pub trait AuthSession {
    /// The signed-in user, if any.
    fn user(&self) -> Signal<Option<UserInfo>>;

    /// True while the session is being loaded or a login is in flight.
    fn is_loading(&self) -> Signal<bool>;

    /// Signs in with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns the reason the login was not accepted. Implementations are
    /// expected to have surfaced it to the user already.
    async fn login(&self, email: String, password: String) -> Result<(), AuthenticationError>;
}

/// The app-wide authentication session.
#[derive(Clone, Copy)]
pub struct AuthContext {
    user: RwSignal<Option<UserInfo>>,
    is_loading: RwSignal<bool>,
    notice: RwSignal<Option<Notice>>,
}

impl AuthContext {
    /// Creates the context and starts loading the current user in the browser.
    #[must_use]
    pub fn new() -> Self {
        let auth = Self::with_state(None, true);

        // Effects only run after hydration, so the server render and the first
        // client render agree on the loading state.
        Effect::new(move |_| {
            spawn_local(async move {
                auth.refresh().await;
            });
        });

        auth
    }

    /// Creates a context with a fixed starting state and no background load.
    #[must_use]
    pub fn with_state(user: Option<UserInfo>, is_loading: bool) -> Self {
        Self {
            user: RwSignal::new(user),
            is_loading: RwSignal::new(is_loading),
            notice: RwSignal::new(None),
        }
    }

    /// Reloads the signed-in user from the server.
    pub async fn refresh(self) {
        self.is_loading.set(true);
        match get_current_user().await {
            Ok(user) => self.user.set(user),
            Err(e) => {
                logging::warn!("failed to load current user: {e}");
                self.user.set(None);
            }
        }
        self.is_loading.set(false);
    }

    /// The notice currently shown to the user (tracked).
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        self.notice.get()
    }

    /// Hides the current notice.
    pub fn dismiss_notice(&self) {
        self.notice.set(None);
    }

    /// Applies the server's answer to a login request.
    fn finish_login(
        &self,
        result: Result<UserInfo, ServerFnError>,
    ) -> Result<(), AuthenticationError> {
        self.is_loading.set(false);
        match result {
            Ok(user) => {
                self.notice
                    .set(Some(Notice::info(format!("Signed in as {}", user.label()))));
                self.user.set(Some(user));
                Ok(())
            }
            Err(e) => {
                let err = rejection_from(&e);
                logging::warn!("login failed: {err}");
                self.notice.set(Some(Notice::error(err.user_message())));
                Err(err)
            }
        }
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl AuthSession for AuthContext {
    fn user(&self) -> Signal<Option<UserInfo>> {
        self.user.into()
    }

    fn is_loading(&self) -> Signal<bool> {
        self.is_loading.into()
    }

    async fn login(&self, email: String, password: String) -> Result<(), AuthenticationError> {
        self.is_loading.set(true);
        self.notice.set(None);
        let result = login_request(email, password).await;
        self.finish_login(result)
    }
}

/// Maps a failed login request to the error the user should see.
fn rejection_from(error: &ServerFnError) -> AuthenticationError {
    match error {
        ServerFnError::ServerError(message) => AuthenticationError::from_user_message(message),
        other => AuthenticationError::ProviderUnavailable {
            reason: other.to_string(),
        },
    }
}

/// Provides a fresh [`AuthContext`] to the component tree.
pub fn provide_auth_context() -> AuthContext {
    let auth = AuthContext::new();
    provide_context(auth);
    auth
}

/// Returns the [`AuthContext`] provided by the app root.
///
/// # Panics
///
/// Panics if called outside a tree where [`provide_auth_context`] ran.
#[must_use]
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
