//! Staff view of signed-up accounts; admins can change roles.

#[cfg(test)]
#[path = "profiles_panel_test.rs"]
mod profiles_panel_test;

use leptos::prelude::*;

use crate::app::Services;
use crate::net::types::Profile;
#[cfg(feature = "hydrate")]
use crate::pages::dashboard::load_profiles;
use crate::state::roster::RosterState;
use crate::util::roles::Role;

fn profile_label(profile: &Profile) -> String {
    match (profile.full_name.as_deref(), profile.email.as_deref()) {
        (Some(name), Some(email)) if !name.trim().is_empty() => format!("{name} <{email}>"),
        (_, Some(email)) => email.to_owned(),
        (Some(name), None) => name.to_owned(),
        (None, None) => profile.id.clone(),
    }
}

#[component]
pub fn ProfilesPanel(#[prop(into)] can_edit: Signal<bool>) -> impl IntoView {
    let services = expect_context::<Services>();
    let roster = expect_context::<RwSignal<RosterState>>();

    let change_role = move |user_id: String, role: Role| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::rest::update_profile_role(&services.auth(), &user_id, role.as_str()).await {
                Ok(()) => load_profiles(services, roster),
                Err(e) => {
                    leptos::logging::warn!("profiles: role update failed: {e}");
                    roster.update(|r| r.error = Some(e.user_message()));
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (user_id, role, services, roster);
    };

    view! {
        <section class="profiles-panel">
            <h2>"Accounts"</h2>
            <ul class="profiles-panel__list">
                {move || {
                    roster
                        .with(|r| r.profiles.clone())
                        .into_iter()
                        .map(|profile| {
                            let role = Role::parse(profile.role.as_deref());
                            let user_id = profile.id.clone();
                            view! {
                                <li class="profiles-panel__row">
                                    <span class="profiles-panel__name">{profile_label(&profile)}</span>
                                    <Show
                                        when=move || can_edit.get()
                                        fallback=move || view! { <span class="profiles-panel__role">{role.label()}</span> }
                                    >
                                        <select
                                            class="profiles-panel__role"
                                            on:change={
                                                let user_id = user_id.clone();
                                                move |ev| {
                                                    let next = Role::parse(Some(event_target_value(&ev).as_str()));
                                                    if next != role {
                                                        change_role(user_id.clone(), next);
                                                    }
                                                }
                                            }
                                        >
                                            {Role::ALL
                                                .into_iter()
                                                .map(|option| {
                                                    view! {
                                                        <option value=option.as_str() selected=option == role>
                                                            {option.label()}
                                                        </option>
                                                    }
                                                })
                                                .collect_view()}
                                        </select>
                                    </Show>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </section>
    }
}
