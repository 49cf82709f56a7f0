//! Shared types used across server functions and UI components.

use luximo_identity::User;

/// The signed-in user, as shown in the UI.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserInfo {
    pub email: String,
    pub display_name: Option<String>,
}

impl UserInfo {
    /// Name to greet the user with.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            email: user.email().to_string(),
            display_name: user.display_name().map(str::to_string),
        }
    }
}

/// Kind of a notice shown in the banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A message published by the auth session for the person using the app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_info_from_user_copies_identity() {
        let user = User::new("sub-1".to_string(), "user@example.com".to_string())
            .with_display_name(Some("Mila".to_string()));
        let info = UserInfo::from(&user);
        assert_eq!(info.email, "user@example.com");
        assert_eq!(info.label(), "Mila");
    }

    #[test]
    fn label_falls_back_to_email() {
        let info = UserInfo {
            email: "user@example.com".to_string(),
            display_name: None,
        };
        assert_eq!(info.label(), "user@example.com");
    }
}
