//! Loading, processing and terminal error screens.

#[cfg(test)]
#[path = "status_test.rs"]
mod status_test;

use leptos::prelude::*;

use crate::app::Services;
use crate::net::error::{FailureKind, RouteError};
use crate::router::{Flow, RouterInput};

pub fn processing_message(flow: Flow) -> &'static str {
    match flow {
        Flow::Recovery => "Verifying your reset link...",
        Flow::Confirmation => "Confirming your email...",
    }
}

/// Second line under the error message.
pub fn error_hint(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::InvalidLink => "Request a new link from the sign-in screen.",
        FailureKind::Transient => "Check your connection and try the link again.",
        FailureKind::InvalidInput => "Check the details and try again.",
    }
}

#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="status-screen">
            <p class="status-screen__message">"Loading..."</p>
        </div>
    }
}

#[component]
pub fn ProcessingScreen(flow: Flow) -> impl IntoView {
    view! {
        <div class="status-screen">
            <div class="status-screen__spinner" aria-hidden="true"></div>
            <p class="status-screen__message">{processing_message(flow)}</p>
        </div>
    }
}

#[component]
pub fn ErrorScreen(error: RouteError) -> impl IntoView {
    let services = expect_context::<Services>();
    view! {
        <div class="status-screen status-screen--error">
            <h2>{error.message.clone()}</h2>
            <p class="status-screen__hint">{error_hint(error.kind)}</p>
            <button class="btn btn--primary" on:click=move |_| services.send(RouterInput::ReturnToSignIn)>
                "Back to Sign In"
            </button>
        </div>
    }
}
