//! Luximo web server and UI.
//!
//! This crate provides the Leptos-based sign-in interface and the server
//! functions that back it.

#![allow(non_snake_case)]

pub mod app;
pub mod components;
pub mod error;
pub mod form;
pub mod pages;
pub mod session;
pub mod types;
pub mod user;

#[cfg(feature = "ssr")]
pub mod auth;
#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod server_helpers;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
