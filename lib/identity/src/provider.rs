//! Identity provider configuration and the verification seam.
//!
//! The platform delegates credential checks to an external, GoTrue-compatible
//! identity provider (e.g. Supabase Auth). The server talks to it through the
//! `IdentityProvider` trait so tests can substitute a fake.

use crate::auth::{Credentials, PasswordGrant};
use crate::error::AuthenticationError;
use async_trait::async_trait;
use rootcause::Report;
use serde::{Deserialize, Serialize};

/// Verifies credentials with the external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchanges an email/password pair for a password grant.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` when the provider rejects the pair and
    /// `ProviderUnavailable` / `InvalidResponse` when it cannot give a verdict.
    async fn password_grant(
        &self,
        credentials: &Credentials,
    ) -> Result<PasswordGrant, Report<AuthenticationError>>;

    /// Ends the provider-side session that issued `access_token`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderUnavailable` when the provider cannot be reached or
    /// refuses the request.
    async fn sign_out(&self, access_token: &str) -> Result<(), Report<AuthenticationError>>;
}

/// Configuration for the identity provider.
///
/// Fields with defaults can be omitted when loading from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Base URL of the provider project (e.g. "https://abc.supabase.co").
    url: String,
    /// Public (anon) API key sent in the `apikey` header.
    anon_key: String,
    /// Timeout for a single request to the provider, in seconds.
    #[serde(default = "default_request_timeout_seconds")]
    request_timeout_seconds: u64,
}

fn default_request_timeout_seconds() -> u64 {
    10
}

impl IdentityConfig {
    /// Creates a new configuration with defaults for optional fields.
    #[must_use]
    pub fn new(url: String, anon_key: String) -> Self {
        Self {
            url,
            anon_key,
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }

    /// Returns the provider base URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the anon API key.
    #[must_use]
    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    /// Returns the request timeout in seconds.
    #[must_use]
    pub fn request_timeout_seconds(&self) -> u64 {
        self.request_timeout_seconds
    }

    /// URL of the password grant endpoint.
    #[must_use]
    pub fn token_endpoint(&self) -> String {
        format!(
            "{}/auth/v1/token?grant_type=password",
            self.url.trim_end_matches('/')
        )
    }

    /// URL of the endpoint that revokes the caller's session.
    #[must_use]
    pub fn logout_endpoint(&self) -> String {
        format!("{}/auth/v1/logout", self.url.trim_end_matches('/'))
    }
}
