//! Leptos rendering of [`LoginView`]. Every input event goes through the
//! view-model; the component only mirrors its snapshot into a signal.

use crate::{
    login::{AuthFailurePolicy, LoginMarkup, LoginView, SubmitOutcome},
    web::state::use_auth,
};
use leptos::{ev::SubmitEvent, prelude::*, task::spawn_local};
use std::sync::{Arc, Weak};
use tracing::{debug, info};

fn refresh(login: &LoginView, set_markup: WriteSignal<LoginMarkup>) {
    set_markup.set(login.render());
}

#[component]
pub fn LoginPage(#[prop(optional)] policy: AuthFailurePolicy) -> impl IntoView {
    let auth = use_auth();
    let login = Arc::new(LoginView::with_policy(auth.delegate, policy));
    let bindings = login.bindings().clone();
    let (markup, set_markup) = signal(login.render());

    // Loading changes while a submit is awaiting the delegate.
    {
        let weak: Weak<LoginView> = Arc::downgrade(&login);
        let mut changes = login.subscribe();
        spawn_local(async move {
            while changes.changed().await.is_ok() {
                let Some(login) = weak.upgrade() else { break };
                refresh(&login, set_markup);
            }
        });
    }

    let on_submit = {
        let login = Arc::clone(&login);
        move |event: SubmitEvent| {
            event.prevent_default();
            let login = Arc::clone(&login);
            spawn_local(async move {
                match login.submit().await {
                    SubmitOutcome::LoggedIn => info!("Login succeeded"),
                    SubmitOutcome::Invalid(errors) => {
                        debug!("Submit blocked by {} field error(s)", errors.len());
                    }
                    SubmitOutcome::Busy => debug!("Submit ignored while loading"),
                    SubmitOutcome::Failed(_) => {}
                }
                refresh(&login, set_markup);
            });
        }
    };

    let login_email = Arc::clone(&login);
    let login_password = Arc::clone(&login);
    let login_toggle = Arc::clone(&login);
    let login_remember_me = Arc::clone(&login);

    let email_id = bindings.email.id.clone();
    let password_id = bindings.password.id.clone();
    let remember_me_id = bindings.remember_me.id.clone();

    view! {
        <div class="login-container">
            <form class="login-form" novalidate=true on:submit=on_submit>
                <h2>"Login"</h2>
                {move || {
                    markup
                        .with(|m| m.auth_error.clone())
                        .map(|message| view! { <div class="auth-error" role="alert">{message}</div> })
                }}
                <div class="form-group">
                    <label for=email_id.clone()>"Email"</label>
                    <input
                        id=email_id
                        name=bindings.email.name.clone()
                        type="email"
                        autocomplete="email"
                        required=bindings.email.required
                        aria-invalid=move || markup.with(|m| m.email.error.is_some().then_some("true"))
                        on:input=move |event| {
                            login_email.set_email(event_target_value(&event));
                            refresh(&login_email, set_markup);
                        }
                    />
                    {move || {
                        markup
                            .with(|m| m.email.error.clone())
                            .map(|message| view! { <span class="error">{message}</span> })
                    }}
                </div>
                <div class="form-group">
                    <label for=password_id.clone()>"Password"</label>
                    <div class="password-input-container">
                        <input
                            id=password_id
                            name=bindings.password.name.clone()
                            type=move || markup.with(|m| m.password.input_type)
                            autocomplete="current-password"
                            required=bindings.password.required
                            minlength=bindings.password.min_length.map(|n| n.to_string())
                            aria-invalid=move || {
                                markup.with(|m| m.password.error.is_some().then_some("true"))
                            }
                            on:input=move |event| {
                                login_password.set_password(event_target_value(&event));
                                refresh(&login_password, set_markup);
                            }
                        />
                        <button
                            type="button"
                            class="toggle-password"
                            on:click=move |_| {
                                login_toggle.toggle_password_visibility();
                                refresh(&login_toggle, set_markup);
                            }
                        >
                            {move || markup.with(|m| m.toggle_label)}
                        </button>
                    </div>
                    {move || {
                        markup
                            .with(|m| m.password.error.clone())
                            .map(|message| view! { <span class="error">{message}</span> })
                    }}
                </div>
                <div class="form-group remember-me">
                    <input
                        id=remember_me_id.clone()
                        name=remember_me_id.clone()
                        type="checkbox"
                        prop:checked=move || markup.with(|m| m.remember_me)
                        on:change=move |event| {
                            login_remember_me.set_remember_me(event_target_checked(&event));
                            refresh(&login_remember_me, set_markup);
                        }
                    />
                    <label for=remember_me_id>"Remember me"</label>
                </div>
                <button
                    type="submit"
                    class="submit-button"
                    disabled=move || markup.with(|m| m.submit_disabled)
                >
                    {move || markup.with(|m| m.submit_label)}
                </button>
            </form>
        </div>
    }
}
