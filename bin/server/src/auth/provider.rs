//! GoTrue (Supabase Auth) password grant client.

use async_trait::async_trait;
use chrono::Duration as ChronoDuration;
use luximo_identity::{
    AuthenticationError, Credentials, IdentityConfig, IdentityProvider, PasswordGrant, User,
};
use reqwest::StatusCode;
use rootcause::Report;
use serde::Deserialize;
use std::time::Duration;

/// Client for a GoTrue-compatible identity provider.
pub struct GoTrueClient {
    config: IdentityConfig,
    http_client: reqwest::Client,
}

impl GoTrueClient {
    /// Creates a client for the configured provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: IdentityConfig) -> Result<Self, Report<AuthenticationError>> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds()))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthenticationError::ProviderUnavailable {
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl IdentityProvider for GoTrueClient {
    async fn password_grant(
        &self,
        credentials: &Credentials,
    ) -> Result<PasswordGrant, Report<AuthenticationError>> {
        let endpoint = self.config.token_endpoint();

        let response = self
            .http_client
            .post(&endpoint)
            .header("apikey", self.config.anon_key())
            .json(&TokenRequest {
                email: credentials.email(),
                password: credentials.password(),
            })
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, endpoint = %endpoint, "Identity provider request failed");
                AuthenticationError::ProviderUnavailable {
                    reason: if e.is_timeout() {
                        "request timed out".to_string()
                    } else {
                        e.to_string()
                    },
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthenticationError::InvalidResponse {
                reason: format!("failed to read response body: {e}"),
            })?;

        if let Some(err) = classify_status(status, &body) {
            tracing::debug!(%status, "Identity provider declined password grant");
            return Err(err.into());
        }

        Ok(parse_grant(&body)?)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), Report<AuthenticationError>> {
        let endpoint = self.config.logout_endpoint();

        let response = self
            .http_client
            .post(&endpoint)
            .header("apikey", self.config.anon_key())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthenticationError::ProviderUnavailable {
                reason: e.to_string(),
            })?;

        let status = response.status();
        // An expired or already revoked token leaves nothing to end.
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        Err(AuthenticationError::ProviderUnavailable {
            reason: format!("logout returned HTTP {status}"),
        }
        .into())
    }
}

#[derive(serde::Serialize)]
struct TokenRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    user: TokenUser,
}

#[derive(Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Error body returned by GoTrue.
#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default, alias = "msg", alias = "error_description")]
    message: Option<String>,
}

/// Maps a non-success status to an error, or `None` on success.
///
/// 400, 401 and 422 mean the provider looked at the credentials and said no.
/// Everything else means it could not give an answer.
fn classify_status(status: StatusCode, body: &str) -> Option<AuthenticationError> {
    if status.is_success() {
        return None;
    }

    let detail = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| status.to_string());

    Some(match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::UNPROCESSABLE_ENTITY => {
            AuthenticationError::InvalidCredentials
        }
        StatusCode::TOO_MANY_REQUESTS => AuthenticationError::Rejected {
            reason: "Too many sign-in attempts, please wait and try again".to_string(),
        },
        _ => AuthenticationError::ProviderUnavailable {
            reason: format!("HTTP {status}: {detail}"),
        },
    })
}

/// Parses a successful token response into a grant.
fn parse_grant(body: &str) -> Result<PasswordGrant, AuthenticationError> {
    let token: TokenResponse =
        serde_json::from_str(body).map_err(|e| AuthenticationError::InvalidResponse {
            reason: format!("malformed token response: {e}"),
        })?;

    let email = token
        .user
        .email
        .filter(|email| !email.is_empty())
        .ok_or_else(|| AuthenticationError::InvalidResponse {
            reason: "token response has no user email".to_string(),
        })?;

    let metadata = token.user.user_metadata;
    let user = User::new(token.user.id, email).with_display_name(metadata.full_name.or(metadata.name));

    let expires_in = ChronoDuration::try_seconds(token.expires_in.max(0)).ok_or_else(|| {
        AuthenticationError::InvalidResponse {
            reason: "expires_in out of range".to_string(),
        }
    })?;

    Ok(PasswordGrant {
        user,
        access_token: token.access_token,
        expires_in,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRANT_BODY: &str = r#"{
        "access_token": "eyJhbGciOi",
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "r-123",
        "user": {
            "id": "6f1c1f0e-0000-4000-8000-000000000001",
            "email": "user@example.com",
            "user_metadata": {"full_name": "Mila Petrova"}
        }
    }"#;

    #[test]
    fn success_status_is_not_an_error() {
        assert_eq!(classify_status(StatusCode::OK, GRANT_BODY), None);
    }

    #[test]
    fn rejected_credentials_are_invalid_credentials() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::UNPROCESSABLE_ENTITY,
        ] {
            assert_eq!(
                classify_status(status, body),
                Some(AuthenticationError::InvalidCredentials)
            );
        }
    }

    #[test]
    fn server_errors_mean_provider_unavailable() {
        let err = classify_status(StatusCode::BAD_GATEWAY, r#"{"msg":"upstream down"}"#);
        match err {
            Some(AuthenticationError::ProviderUnavailable { reason }) => {
                assert!(reason.contains("upstream down"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rate_limit_is_rejected_with_message() {
        let err = classify_status(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(matches!(err, Some(AuthenticationError::Rejected { .. })));
    }

    #[test]
    fn parse_grant_reads_user_and_tokens() {
        let grant = parse_grant(GRANT_BODY).expect("grant");
        assert_eq!(grant.user.email(), "user@example.com");
        assert_eq!(grant.user.display_name(), Some("Mila Petrova"));
        assert_eq!(grant.access_token, "eyJhbGciOi");
        assert_eq!(grant.expires_in, ChronoDuration::hours(1));
    }

    #[test]
    fn parse_grant_without_metadata_has_no_display_name() {
        let body = r#"{
            "access_token": "a",
            "expires_in": 60,
            "user": {"id": "u1", "email": "user@example.com"}
        }"#;
        let grant = parse_grant(body).expect("grant");
        assert_eq!(grant.user.display_name(), None);
        assert_eq!(grant.expires_in, ChronoDuration::minutes(1));
    }

    #[test]
    fn parse_grant_rejects_missing_email() {
        let body = r#"{"access_token": "a", "expires_in": 60, "user": {"id": "u1"}}"#;
        assert!(matches!(
            parse_grant(body),
            Err(AuthenticationError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn parse_grant_rejects_unrepresentable_lifetime() {
        let body = r#"{
            "access_token": "a",
            "expires_in": 9223372036854775807,
            "user": {"id": "u1", "email": "user@example.com"}
        }"#;
        assert_eq!(
            parse_grant(body).map(|grant| grant.expires_in),
            Err(AuthenticationError::InvalidResponse {
                reason: "expires_in out of range".to_string(),
            })
        );
    }

    #[test]
    fn parse_grant_treats_negative_lifetime_as_expired() {
        let body = r#"{
            "access_token": "a",
            "expires_in": -5,
            "user": {"id": "u1", "email": "user@example.com"}
        }"#;
        let grant = parse_grant(body).expect("grant");
        assert_eq!(grant.expires_in, ChronoDuration::zero());
    }

    #[test]
    fn parse_grant_rejects_garbage() {
        assert!(matches!(
            parse_grant("<html>oops</html>"),
            Err(AuthenticationError::InvalidResponse { .. })
        ));
    }
}
