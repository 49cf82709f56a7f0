//! Login page component.
//!
//! Collects an email and password, validates them with the form rules below,
//! and hands them to the [`AuthSession`]. A user who is already signed in is
//! sent to the dashboard instead.

use crate::components::{
    BackLink, Card, CardContent, CardFooter, CardHeader, FormItem, SubmitButton,
};
use crate::form::{Field, Form, Rule, is_email, validate};
use crate::session::{AuthContext, AuthSession, use_auth};
use crate::types::UserInfo;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;
use luximo_identity::AuthenticationError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

const PASSWORD_MIN_LENGTH: usize = 6;

/// Values submitted by the login form.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginFormValues {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginFormValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginFormValues")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl LoginFormValues {
    /// Applies the form rules outside of a reactive form.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError::InvalidInput`] for the first field that
    /// fails, email before password.
    pub fn validate(&self) -> Result<(), AuthenticationError> {
        validate(&self.email, &email_rules()).map_err(invalid_input("email"))?;
        validate(&self.password, &password_rules()).map_err(invalid_input("password"))?;
        Ok(())
    }
}

fn invalid_input(field: &'static str) -> impl Fn(&'static str) -> AuthenticationError {
    move |message| AuthenticationError::InvalidInput {
        field: field.to_string(),
        message: message.to_string(),
    }
}

pub fn email_rules() -> Vec<Rule> {
    vec![
        Rule::required("email is required"),
        Rule::pattern(is_email, "invalid email address"),
    ]
}

pub fn password_rules() -> Vec<Rule> {
    vec![
        Rule::required("password is required"),
        Rule::min_length(
            PASSWORD_MIN_LENGTH,
            "password must be at least 6 characters",
        ),
    ]
}

/// What the login route shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginView {
    /// Navigate away without rendering the form.
    Redirect(&'static str),
    Form,
}

#[must_use]
pub fn login_view(user: Option<&UserInfo>) -> LoginView {
    match user {
        Some(_) => LoginView::Redirect(DASHBOARD_PATH),
        None => LoginView::Form,
    }
}

/// Form controls are disabled while the session loads or a login is in flight.
#[must_use]
pub fn form_loading(is_loading: bool, is_submitting: bool) -> bool {
    is_loading || is_submitting
}

/// Holds the submitting flag up for as long as it lives.
struct SubmittingGuard {
    flag: RwSignal<bool>,
}

impl SubmittingGuard {
    fn acquire(flag: RwSignal<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for SubmittingGuard {
    fn drop(&mut self) {
        // The page may have been unmounted by a redirect while the call ran.
        self.flag.try_set(false);
    }
}

/// Starts a login attempt from the form, if one may start.
///
/// Returns `None` while the session loads, while another attempt is in
/// flight, or when a field fails validation. Otherwise `submitting` is raised
/// before this returns and stays raised until the returned future settles.
/// Failures are not returned: the session reports them to the user.
pub fn begin_submit<S>(
    session: S,
    form: Form,
    email: Field,
    password: Field,
    submitting: RwSignal<bool>,
) -> Option<impl Future<Output = ()> + 'static>
where
    S: AuthSession + 'static,
{
    if form_loading(session.is_loading().get_untracked(), submitting.get_untracked()) {
        return None;
    }

    let mut values = None;
    form.handle_submit(|| {
        values = Some(LoginFormValues {
            email: email.value_untracked(),
            password: password.value_untracked(),
        });
    });
    let values = values?;

    let guard = SubmittingGuard::acquire(submitting);
    Some(async move {
        let _guard = guard;
        let _ = session.login(values.email, values.password).await;
    })
}

/// Login page - sends signed-in users to the dashboard.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let user = auth.user();
    let view_state = Memo::new(move |_| user.with(|user| login_view(user.as_ref())));

    move || match view_state.get() {
        LoginView::Redirect(path) => view! { <Redirect path=path /> }.into_any(),
        LoginView::Form => view! { <LoginForm auth=auth /> }.into_any(),
    }
}

#[component]
fn LoginForm(auth: AuthContext) -> impl IntoView {
    let form = Form::new();
    let email = form.register("email", "", email_rules());
    let password = form.register("password", "", password_rules());

    let submitting = RwSignal::new(false);
    let is_loading = auth.is_loading();
    let loading = Signal::derive(move || form_loading(is_loading.get(), submitting.get()));

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if let Some(attempt) = begin_submit(auth, form, email, password, submitting) {
            spawn_local(attempt);
        }
    };

    view! {
        <div class="login-page">
            <Card class="login-card">
                <CardHeader>
                    <BackLink href=HOME_PATH>"Back to home"</BackLink>
                    <h1>"Sign in"</h1>
                    <p class="card-description">"Enter your email and password to continue."</p>
                </CardHeader>
                <form on:submit=on_submit novalidate>
                    <CardContent>
                        <FormItem
                            field=email
                            label="Email"
                            input_type="email"
                            placeholder="you@example.com"
                            autocomplete="email"
                            disabled=loading
                        />
                        <FormItem
                            field=password
                            label="Password"
                            input_type="password"
                            placeholder="••••••••"
                            autocomplete="current-password"
                            disabled=loading
                        />
                    </CardContent>
                    <CardFooter>
                        <SubmitButton loading=loading label="Sign in" loading_label="Signing in..." />
                        <p class="card-hint">"Use your Supabase account to sign in"</p>
                    </CardFooter>
                </form>
            </Card>
        </div>
    }
}
