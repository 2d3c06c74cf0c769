//! Sign-in screen with sign-up and password-reset sub-modes.
//!
//! A successful sign-in needs no navigation here: the gateway emits
//! `SignedIn` and the session router moves to the dashboard.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::app::Services;
use crate::util::validation::{ValidationError, validate_email, validate_password};

pub const SIGN_UP_SENT: &str = "Check your email for confirmation link!";
pub const RESET_SENT: &str = "Password reset link sent to your email!";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
    Reset,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::SignIn => "Sign In",
            Self::SignUp => "Sign Up",
            Self::Reset => "Reset Password",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::SignIn => "Sign In",
            Self::SignUp => "Sign Up",
            Self::Reset => "Send Reset Link",
        }
    }

    pub fn needs_password(self) -> bool {
        self != Self::Reset
    }

    /// Check the form before any network call.
    pub fn validate(self, email: &str, password: &str) -> Result<(), ValidationError> {
        validate_email(email)?;
        if self == Self::SignUp {
            validate_password(password)?;
        } else if self == Self::SignIn && password.is_empty() {
            return Err(ValidationError::PasswordRequired);
        }
        Ok(())
    }
}

/// Inline feedback under the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let mode = RwSignal::new(AuthMode::SignIn);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let notice = RwSignal::new(None::<Notice>);

    let switch_to = move |next: AuthMode| {
        mode.set(next);
        notice.set(None);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let current = mode.get_untracked();
        let email_value = email.get_untracked().trim().to_owned();
        let password_value = password.get_untracked();
        if let Err(e) = current.validate(&email_value, &password_value) {
            notice.set(Some(Notice::Error(e.to_string())));
            return;
        }
        busy.set(true);
        notice.set(None);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::auth::AuthGateway as _;

            let auth = services.auth();
            let result = match current {
                AuthMode::SignIn => auth.sign_in_with_password(&email_value, &password_value).await.map(|_| None),
                AuthMode::SignUp => auth
                    .sign_up(&email_value, &password_value)
                    .await
                    .map(|()| Some(SIGN_UP_SENT)),
                AuthMode::Reset => auth.request_password_reset(&email_value).await.map(|()| Some(RESET_SENT)),
            };
            match result {
                Ok(Some(message)) => {
                    notice.set(Some(Notice::Info(message.to_owned())));
                    if current == AuthMode::Reset {
                        mode.set(AuthMode::SignIn);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    leptos::logging::warn!("auth: {} failed: {e}", current.title());
                    notice.set(Some(Notice::Error(e.user_message())));
                }
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (services, email_value, password_value);
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h2 class="auth-card__title">{move || mode.get().title()}</h2>
                <input
                    class="auth-input"
                    type="email"
                    placeholder="Email"
                    required
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <Show when=move || mode.get().needs_password()>
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </Show>
                <button class="btn btn--primary auth-card__submit" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Loading..." } else { mode.get().submit_label() }}
                </button>
                {move || {
                    notice
                        .get()
                        .map(|n| match n {
                            Notice::Info(text) => view! { <p class="auth-card__notice">{text}</p> }.into_any(),
                            Notice::Error(text) => {
                                view! { <p class="auth-card__notice auth-card__notice--error">{text}</p> }
                                    .into_any()
                            }
                        })
                }}
                <div class="auth-card__links">
                    <Show
                        when=move || mode.get() != AuthMode::Reset
                        fallback=move || {
                            view! {
                                <button type="button" class="link" on:click=move |_| switch_to(AuthMode::SignIn)>
                                    "Back to Sign In"
                                </button>
                            }
                        }
                    >
                        <p>
                            {move || {
                                if mode.get() == AuthMode::SignUp {
                                    "Already have an account?"
                                } else {
                                    "Don't have an account?"
                                }
                            }}
                            <button
                                type="button"
                                class="link"
                                on:click=move |_| {
                                    let next = if mode.get_untracked() == AuthMode::SignUp {
                                        AuthMode::SignIn
                                    } else {
                                        AuthMode::SignUp
                                    };
                                    switch_to(next);
                                }
                            >
                                {move || if mode.get() == AuthMode::SignUp { "Sign In" } else { "Sign Up" }}
                            </button>
                        </p>
                        <p>
                            <button type="button" class="link link--small" on:click=move |_| switch_to(AuthMode::Reset)>
                                "Forgot your password?"
                            </button>
                        </p>
                    </Show>
                </div>
            </form>
        </div>
    }
}
