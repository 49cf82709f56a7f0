//! The identity of a signed-in person.
//!
//! Users are owned by the external identity provider. The platform only keeps
//! what the provider returned on the last successful login.

use serde::{Deserialize, Serialize};

/// A person as known to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The provider's unique identifier for this user.
    subject: String,
    /// Email address used to sign in.
    email: String,
    /// Display name from the provider's user metadata, if any.
    display_name: Option<String>,
}

impl User {
    /// Creates a user with no display name.
    #[must_use]
    pub fn new(subject: String, email: String) -> Self {
        Self {
            subject,
            email,
            display_name: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: Option<String>) -> Self {
        self.display_name = display_name.filter(|name| !name.trim().is_empty());
        self
    }

    /// Returns the provider's identifier for this user.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the user's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the user's display name, if available.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Name to greet the user with: the display name, or the email otherwise.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name().unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User::new(
            "8d1f6c2e-0000-4000-8000-000000000001".to_string(),
            "user@example.com".to_string(),
        )
    }

    #[test]
    fn new_user_has_no_display_name() {
        let user = test_user();
        assert_eq!(user.email(), "user@example.com");
        assert!(user.display_name().is_none());
    }

    #[test]
    fn label_prefers_display_name() {
        let user = test_user().with_display_name(Some("Ivana".to_string()));
        assert_eq!(user.label(), "Ivana");
    }

    #[test]
    fn label_falls_back_to_email() {
        assert_eq!(test_user().label(), "user@example.com");
    }

    #[test]
    fn blank_display_name_is_dropped() {
        let user = test_user().with_display_name(Some("   ".to_string()));
        assert!(user.display_name().is_none());
    }

    #[test]
    fn user_serialization_roundtrip() {
        let user = test_user().with_display_name(Some("Ivana".to_string()));
        let json = serde_json::to_string(&user).expect("serialize");
        let parsed: User = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(user, parsed);
    }
}
