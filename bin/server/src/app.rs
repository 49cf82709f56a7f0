//! Main Leptos application component and routing.

use crate::components::NoticeBanner;
use crate::pages::{DashboardPage, HomePage, LoginPage};
use crate::session::provide_auth_context;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{A, Route, Router, Routes},
    path,
};

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_auth_context();

    view! {
        <Title text="Luximo"/>
        <Router>
            <header class="header">
                <A href="/" attr:class="logo">"Luximo"</A>
            </header>
            <NoticeBanner/>
            <main class="container">
                <Routes fallback=NotFound>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/login") view=LoginPage/>
                    <Route path=path!("/dashboard") view=DashboardPage/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"Page not found"</h1>
            <A href="/">"Back to home"</A>
        </div>
    }
}
