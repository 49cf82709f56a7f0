//! Authentication module for the Luximo server.
//!
//! This module provides:
//! - The GoTrue password grant client used by the login server function
//! - In-memory session storage keyed by the session cookie
//! - The logout route
//!
//! Provider tokens stay on the server. The browser only holds an opaque
//! session id in an HttpOnly cookie.

pub mod provider;
pub mod routes;
pub mod store;

use crate::config::SessionConfig;
use luximo_identity::IdentityProvider;
use std::sync::Arc;

pub use provider::GoTrueClient;
pub use routes::logout;
pub use store::SessionStore;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "session";

/// Shared application state.
pub struct AppState {
    /// Verifies credentials with the identity provider.
    pub provider: Arc<dyn IdentityProvider>,
    /// Signed-in sessions.
    pub sessions: SessionStore,
    /// Session configuration.
    pub session_config: SessionConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        sessions: SessionStore,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            provider,
            sessions,
            session_config,
        }
    }
}
