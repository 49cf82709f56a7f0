//! Error types for the identity crate.
//!
//! Errors are designed for layered context using rootcause. The server wraps
//! an `AuthenticationError` in a `Report` when it crosses the provider
//! boundary and converts it to a user-safe message at the server function.

use std::fmt;

const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
const PROVIDER_UNAVAILABLE_MESSAGE: &str =
    "Identity provider unavailable, please try again later";

/// Why a login did not produce a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// The submitted values failed validation before reaching the provider.
    InvalidInput { field: String, message: String },
    /// The provider rejected the email/password combination.
    InvalidCredentials,
    /// The provider could not be reached or answered with a server error.
    ProviderUnavailable { reason: String },
    /// The provider answered with a body that could not be understood.
    InvalidResponse { reason: String },
    /// The login request was rejected before a provider verdict was known.
    Rejected { reason: String },
}

impl AuthenticationError {
    /// Message that is safe to show to the person signing in.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput { message, .. } => message.clone(),
            Self::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            Self::ProviderUnavailable { .. } | Self::InvalidResponse { .. } => {
                PROVIDER_UNAVAILABLE_MESSAGE.to_string()
            }
            Self::Rejected { reason } => reason.clone(),
        }
    }

    /// Recovers the error from a message produced by [`Self::user_message`].
    ///
    /// Used where only the message crosses a boundary. Messages that do not
    /// name a provider verdict become `Rejected`.
    #[must_use]
    pub fn from_user_message(message: &str) -> Self {
        match message {
            INVALID_CREDENTIALS_MESSAGE => Self::InvalidCredentials,
            PROVIDER_UNAVAILABLE_MESSAGE => Self::ProviderUnavailable {
                reason: message.to_string(),
            },
            _ => Self::Rejected {
                reason: message.to_string(),
            },
        }
    }
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "invalid {field}: {message}")
            }
            Self::InvalidCredentials => {
                write!(f, "invalid login credentials")
            }
            Self::ProviderUnavailable { reason } => {
                write!(f, "identity provider unavailable: {reason}")
            }
            Self::InvalidResponse { reason } => {
                write!(f, "invalid identity provider response: {reason}")
            }
            Self::Rejected { reason } => {
                write!(f, "login rejected: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthenticationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_display_names_field() {
        let err = AuthenticationError::InvalidInput {
            field: "email".to_string(),
            message: "invalid email address".to_string(),
        };
        assert_eq!(err.to_string(), "invalid email: invalid email address");
        assert_eq!(err.user_message(), "invalid email address");
    }

    #[test]
    fn invalid_credentials_user_message_is_generic() {
        let err = AuthenticationError::InvalidCredentials;
        assert_eq!(err.user_message(), "Invalid email or password");
    }

    #[test]
    fn provider_unavailable_hides_reason_from_user() {
        let err = AuthenticationError::ProviderUnavailable {
            reason: "connection refused (os error 111)".to_string(),
        };
        assert!(err.to_string().contains("connection refused"));
        assert!(!err.user_message().contains("os error"));
    }

    #[test]
    fn user_message_round_trips_provider_verdicts() {
        assert_eq!(
            AuthenticationError::from_user_message(
                &AuthenticationError::InvalidCredentials.user_message()
            ),
            AuthenticationError::InvalidCredentials
        );

        let unavailable = AuthenticationError::InvalidResponse {
            reason: "truncated body".to_string(),
        };
        assert!(matches!(
            AuthenticationError::from_user_message(&unavailable.user_message()),
            AuthenticationError::ProviderUnavailable { .. }
        ));

        assert_eq!(
            AuthenticationError::from_user_message("password must be at least 6 characters"),
            AuthenticationError::Rejected {
                reason: "password must be at least 6 characters".to_string()
            }
        );
    }

    #[test]
    fn rejected_passes_reason_through() {
        let err = AuthenticationError::Rejected {
            reason: "Too many attempts".to_string(),
        };
        assert!(err.to_string().contains("Too many attempts"));
        assert_eq!(err.user_message(), "Too many attempts");
    }
}
