//! Core types shared by the luximo crates.
//!
//! This crate provides the `Result` alias used for layered error reporting
//! and the strongly-typed identifiers handed out by the session layer.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{LoginAttemptId, ParseIdError, SessionId};
