//! Reusable UI building blocks.

use crate::form::Field;
use crate::session::use_auth;
use crate::types::NoticeKind;
use leptos::prelude::*;
use leptos_router::components::A;

/// A bordered panel.
#[component]
pub fn Card(children: Children, #[prop(optional, into)] class: String) -> impl IntoView {
    let class = if class.is_empty() {
        "card".to_string()
    } else {
        format!("card {class}")
    };

    view! { <div class=class>{children()}</div> }
}

#[component]
pub fn CardHeader(children: Children) -> impl IntoView {
    view! { <div class="card-header">{children()}</div> }
}

#[component]
pub fn CardContent(children: Children) -> impl IntoView {
    view! { <div class="card-content">{children()}</div> }
}

#[component]
pub fn CardFooter(children: Children) -> impl IntoView {
    view! { <div class="card-footer">{children()}</div> }
}

/// A labelled input bound to a form field, with its inline error message.
#[component]
pub fn FormItem(
    field: Field,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] autocomplete: &'static str,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    let name = field.name();
    let error_id = format!("{name}-error");
    let describedby = error_id.clone();

    view! {
        <div class="form-item" class=("has-error", move || field.error().is_some())>
            <label for=name>{label}</label>
            <input
                id=name
                name=name
                type=input_type
                placeholder=placeholder
                autocomplete=autocomplete
                prop:value=move || field.value()
                on:input=move |ev| field.set(event_target_value(&ev))
                disabled=move || disabled.get()
                aria-invalid=move || if field.error().is_some() { "true" } else { "false" }
                aria-describedby=describedby
            />
            {move || {
                field
                    .error()
                    .map(|message| {
                        view! {
                            <p class="form-error" id=error_id.clone()>
                                {message}
                            </p>
                        }
                    })
            }}
        </div>
    }
}

/// Primary submit button that shows a spinner while `loading`.
#[component]
pub fn SubmitButton(
    #[prop(into)] loading: Signal<bool>,
    label: &'static str,
    #[prop(default = "Loading...")] loading_label: &'static str,
) -> impl IntoView {
    view! {
        <button type="submit" class="submit-button" disabled=move || loading.get()>
            {move || {
                if loading.get() {
                    view! {
                        <span class="spinner" aria-hidden="true"></span>
                        <span>{loading_label}</span>
                    }
                        .into_any()
                } else {
                    view! { <span>{label}</span> }.into_any()
                }
            }}
        </button>
    }
}

/// Link back to another page, rendered above a card's heading.
#[component]
pub fn BackLink(href: &'static str, children: Children) -> impl IntoView {
    view! {
        <A href=href attr:class="back-link">
            <span aria-hidden="true">"← "</span>
            {children()}
        </A>
    }
}

/// Shows the auth session's current notice, if any.
#[component]
pub fn NoticeBanner() -> impl IntoView {
    let auth = use_auth();

    move || {
        auth.notice().map(|notice| {
            let class = match notice.kind {
                NoticeKind::Info => "notice notice-info",
                NoticeKind::Error => "notice notice-error",
            };
            let role = match notice.kind {
                NoticeKind::Info => "status",
                NoticeKind::Error => "alert",
            };
            view! {
                <div class=class role=role>
                    <span class="notice-message">{notice.message}</span>
                    <button
                        type="button"
                        class="notice-dismiss"
                        aria-label="Dismiss"
                        on:click=move |_| auth.dismiss_notice()
                    >
                        "×"
                    </button>
                </div>
            }
        })
    }
}
