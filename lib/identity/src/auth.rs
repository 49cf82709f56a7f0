//! Login input and output.

use crate::user::User;
use chrono::Duration;
use std::fmt;

/// An email/password pair submitted by the login form.
///
/// The password is never printed; `Debug` redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Creates a new set of credentials.
    #[must_use]
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// The result of a password grant accepted by the identity provider.
#[derive(Debug, Clone)]
pub struct PasswordGrant {
    /// The authenticated user.
    pub user: User,
    /// Provider access token.
    pub access_token: String,
    /// Lifetime of the access token as reported by the provider.
    pub expires_in: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_password() {
        let credentials = Credentials::new("user@example.com".to_string(), "secret1".to_string());
        let debug = format!("{credentials:?}");
        assert!(debug.contains("user@example.com"));
        assert!(!debug.contains("secret1"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn accessors_return_exact_values() {
        let credentials = Credentials::new("user@example.com".to_string(), " pass ".to_string());
        assert_eq!(credentials.email(), "user@example.com");
        assert_eq!(credentials.password(), " pass ");
    }
}
