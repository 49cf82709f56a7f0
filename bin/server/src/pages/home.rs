//! Home page component.

use crate::pages::login::{DASHBOARD_PATH, LOGIN_PATH};
use crate::session::{AuthSession, use_auth};
use leptos::prelude::*;
use leptos_router::components::A;

/// The home page component.
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let user = auth.user();
    let is_loading = auth.is_loading();

    view! {
        <div class="home-page">
            <h1>"Luximo"</h1>
            {move || {
                if is_loading.get() {
                    return view! { <p>"Loading..."</p> }.into_any();
                }
                match user.get() {
                    Some(user_info) => view! {
                        <p>{format!("Welcome back, {}!", user_info.label())}</p>
                        <A href=DASHBOARD_PATH attr:class="cta-button">"Go to dashboard"</A>
                    }
                        .into_any(),
                    None => view! {
                        <p>"Please sign in to continue."</p>
                        <A href=LOGIN_PATH attr:class="cta-button">"Sign in"</A>
                    }
                        .into_any(),
                }
            }}
        </div>
    }
}
