//! Dashboard page component.

use crate::pages::login::LOGIN_PATH;
use crate::session::{AuthSession, use_auth};
use crate::types::UserInfo;
use leptos::prelude::*;
use leptos_router::components::Redirect;

/// Path of the route that ends the session.
pub const LOGOUT_PATH: &str = "/auth/logout";

/// What the dashboard route shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    Loading,
    Redirect(&'static str),
    Ready(UserInfo),
}

#[must_use]
pub fn dashboard_view(user: Option<&UserInfo>, is_loading: bool) -> DashboardView {
    match (user, is_loading) {
        (Some(user), _) => DashboardView::Ready(user.clone()),
        (None, true) => DashboardView::Loading,
        (None, false) => DashboardView::Redirect(LOGIN_PATH),
    }
}

/// Landing page for signed-in users. Anyone else is sent to the login page.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let user = auth.user();
    let is_loading = auth.is_loading();
    let view_state =
        Memo::new(move |_| user.with(|user| dashboard_view(user.as_ref(), is_loading.get())));

    move || match view_state.get() {
        DashboardView::Loading => view! { <p class="dashboard-loading">"Loading..."</p> }.into_any(),
        DashboardView::Redirect(path) => view! { <Redirect path=path /> }.into_any(),
        DashboardView::Ready(user_info) => view! {
            <div class="dashboard-page">
                <h1>"Dashboard"</h1>
                <p>{format!("Signed in as {}", user_info.label())}</p>
                <a href=LOGOUT_PATH rel="external" class="logout-button">"Sign out"</a>
            </div>
        }
            .into_any(),
    }
}
