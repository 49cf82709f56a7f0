//! Identity types for luximo.
//!
//! This crate provides:
//! - `User`: the identity returned by the external identity provider
//! - `Session`: a signed-in browser session wrapping the provider's access token
//! - `Credentials` and `PasswordGrant`: the input and output of a login
//! - `IdentityProvider`: the seam the server uses to verify a password grant
//! - `AuthenticationError`: why a login did not succeed
//!
//! Credentials are never stored. They pass through `IdentityProvider` once and
//! only the resulting access token is kept in the `Session`.
//!
//! # Example
//!
//! ```
//! use chrono::Duration;
//! use luximo_core::SessionId;
//! use luximo_identity::{Session, User};
//!
//! let user = User::new("5f0c3a1e".to_string(), "ana@example.com".to_string())
//!     .with_display_name(Some("Ana".to_string()));
//!
//! let session = Session::new(SessionId::new(), user, Duration::hours(1));
//!
//! assert!(session.is_valid());
//! assert_eq!(session.user().label(), "Ana");
//! ```

pub mod auth;
pub mod error;
pub mod provider;
pub mod session;
pub mod user;

pub use auth::{Credentials, PasswordGrant};
pub use error::AuthenticationError;
pub use provider::{IdentityConfig, IdentityProvider};
pub use session::Session;
pub use user::User;
