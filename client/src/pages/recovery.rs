//! New-password form shown after a recovery link was exchanged.
//!
//! On success the gateway emits `UserUpdated`; the router clears the recovery
//! state and lands on the dashboard.

use leptos::prelude::*;

use crate::app::Services;
use crate::router::RouterInput;
use crate::util::validation::validate_new_password;

#[component]
pub fn RecoveryPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let new_password = password.get_untracked();
        if let Err(e) = validate_new_password(&new_password, &confirm.get_untracked()) {
            error.set(Some(e.to_string()));
            return;
        }
        busy.set(true);
        error.set(None);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::auth::AuthGateway as _;

            if let Err(e) = services.auth().update_password(&new_password).await {
                leptos::logging::warn!("recovery: password update failed: {e}");
                error.set(Some(e.user_message()));
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = new_password;
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h2 class="auth-card__title">"Set New Password"</h2>
                <input
                    class="auth-input"
                    type="password"
                    placeholder="New password"
                    autocomplete="new-password"
                    required
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Confirm new password"
                    autocomplete="new-password"
                    required
                    prop:value=move || confirm.get()
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
                <button class="btn btn--primary auth-card__submit" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Updating..." } else { "Update Password" }}
                </button>
                <Show when=move || error.get().is_some()>
                    <p class="auth-card__notice auth-card__notice--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class="auth-card__links">
                    <button
                        type="button"
                        class="link"
                        disabled=move || busy.get()
                        on:click=move |_| services.send(RouterInput::CancelRecovery)
                    >
                        "Cancel"
                    </button>
                </div>
            </form>
        </div>
    }
}
