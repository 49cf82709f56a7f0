//! Page components for the application.
//!
//! Each page is a Leptos component that renders a specific route.

pub mod dashboard;
pub mod home;
pub mod login;

pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use login::LoginPage;
