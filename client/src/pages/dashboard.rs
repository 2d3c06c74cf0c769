//! Member roster: the signed-in landing screen.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only rendered while the router shows `Dashboard`. Loads the student list
//! on mount and whenever the signed-in user changes. Any member may add, edit
//! and delete rows; staff also get the profiles and documents panels. Every
//! successful write is followed by a refetch.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::app::Services;
use crate::components::documents_panel::DocumentsPanel;
use crate::components::profiles_panel::ProfilesPanel;
use crate::components::student_card::StudentCardView;
use crate::components::student_form::StudentForm;
use crate::state::roster::RosterState;
use crate::state::session::SessionState;
use crate::util::roles::{CardActions, Role, project_student};

pub fn header_title(member_count_label: &str) -> String {
    format!("🥋 Taekwondo Club ({member_count_label})")
}

/// Identity line in the header.
pub fn identity_label(email: Option<&str>, role: Role) -> String {
    match email {
        Some(email) => format!("{email} · {}", role.label()),
        None => role.label().to_owned(),
    }
}

/// Refetch the student list into `roster`.
pub(crate) fn load_students(services: Services, roster: RwSignal<RosterState>) {
    roster.update(RosterState::begin_load);
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::rest::list_students(&services.auth()).await {
            Ok(students) => roster.update(|r| r.set_students(students)),
            Err(e) => {
                leptos::logging::warn!("dashboard: student list failed: {e}");
                roster.update(|r| r.fail(e.user_message()));
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = services;
}

pub(crate) fn load_profiles(services: Services, roster: RwSignal<RosterState>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::rest::list_profiles(&services.auth()).await {
            Ok(profiles) => roster.update(|r| r.profiles = profiles),
            Err(e) => {
                leptos::logging::warn!("dashboard: profile list failed: {e}");
                roster.update(|r| r.error = Some(e.user_message()));
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (services, roster);
}

pub(crate) fn load_documents(services: Services, roster: RwSignal<RosterState>, student_id: String) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::storage::list_documents(&services.auth(), &student_id).await {
            Ok(entries) => roster.update(|r| r.set_documents(&student_id, entries)),
            Err(e) => {
                leptos::logging::warn!("dashboard: document list failed: {e}");
                roster.update(|r| {
                    if r.documents_for.as_deref() == Some(student_id.as_str()) {
                        r.documents_error = Some(e.user_message());
                    }
                });
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (services, roster, student_id);
}

/// Fetch the signed-in user's role. Failures leave the user a `Member`.
pub(crate) fn load_role(services: Services, session: RwSignal<SessionState>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::rest::fetch_own_profile(&services.auth()).await {
            Ok(profile) => session.update(|s| s.apply_profile(profile.as_ref())),
            Err(e) => leptos::logging::warn!("dashboard: own profile fetch failed: {e}"),
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (services, session);
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let session = expect_context::<RwSignal<SessionState>>();
    let roster = expect_context::<RwSignal<RosterState>>();
    let role = Memo::new(move |_| session.with(|s| s.role));
    let pending_delete = RwSignal::new(None::<String>);
    let show_add = RwSignal::new(false);
    let editing = RwSignal::new(None::<String>);
    let user_id = Memo::new(move |_| session.with(|s| s.user.as_ref().map(|u| u.id.clone())));

    // Refetch whenever the signed-in user changes under this page.
    Effect::new(move || {
        user_id.track();
        load_students(services, roster);
    });
    Effect::new(move || {
        if role.get().is_staff() {
            load_profiles(services, roster);
        }
    });

    let on_sign_out = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::auth::AuthGateway as _;

            // The local session is cleared and `SignedOut` emitted even if this fails.
            if let Err(e) = services.auth().sign_out().await {
                leptos::logging::warn!("dashboard: sign out call failed: {e}");
            }
        });
    };

    let on_delete_request = Callback::new(move |id: String| pending_delete.set(Some(id)));
    let on_edit = Callback::new(move |id: String| {
        show_add.set(false);
        editing.set(Some(id));
    });
    let on_documents = Callback::new(move |id: String| {
        roster.update(|r| r.open_documents(&id));
        load_documents(services, roster, id);
    });
    let on_saved = Callback::new(move |()| {
        show_add.set(false);
        editing.set(None);
        load_students(services, roster);
    });

    let confirm_delete = move |_| {
        let Some(id) = pending_delete.get_untracked() else {
            return;
        };
        pending_delete.set(None);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::rest::delete_student(&services.auth(), &id).await {
                Ok(()) => {
                    roster.update(|r| {
                        if r.documents_for.as_deref() == Some(id.as_str()) {
                            r.close_documents();
                        }
                    });
                    load_students(services, roster);
                }
                Err(e) => {
                    leptos::logging::warn!("dashboard: delete failed: {e}");
                    roster.update(|r| r.error = Some(e.user_message()));
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    };

    let pending_name = move || {
        pending_delete
            .get()
            .and_then(|id| roster.with(|r| r.student(&id).map(crate::net::types::Student::full_name)))
            .unwrap_or_default()
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>{move || roster.with(|r| header_title(&r.member_count_label()))}</h1>
                <span class="dashboard-page__identity">
                    {move || session.with(|s| identity_label(s.email(), s.role))}
                </span>
                <button
                    class="btn"
                    on:click=move |_| {
                        editing.set(None);
                        show_add.update(|v| *v = !*v);
                    }
                >
                    {move || if show_add.get() { "Close" } else { "+ Add Member" }}
                </button>
                <button class="btn btn--danger" on:click=on_sign_out>
                    "Sign Out"
                </button>
            </header>

            <Show when=move || show_add.get()>
                <StudentForm on_saved=on_saved />
            </Show>

            {move || {
                editing
                    .get()
                    .and_then(|id| roster.with_untracked(|r| r.student(&id).cloned()))
                    .map(|student| {
                        view! {
                            <div class="dashboard-page__edit">
                                <h2>{format!("Edit {}", student.full_name())}</h2>
                                <StudentForm editing=student on_saved=on_saved />
                                <button class="btn" on:click=move |_| editing.set(None)>
                                    "Cancel"
                                </button>
                            </div>
                        }
                    })
            }}

            <Show when=move || roster.with(|r| r.error.is_some())>
                <p class="dashboard-page__error">{move || roster.with(|r| r.error.clone().unwrap_or_default())}</p>
            </Show>

            <Show when=move || pending_delete.get().is_some()>
                <div class="dialog">
                    <p>"Delete " {pending_name} "? This cannot be undone."</p>
                    <button class="btn btn--danger" on:click=confirm_delete>
                        "Delete"
                    </button>
                    <button class="btn" on:click=move |_| pending_delete.set(None)>
                        "Cancel"
                    </button>
                </div>
            </Show>

            <Show
                when=move || roster.with(|r| !r.students.is_empty())
                fallback=move || {
                    view! {
                        <div class="dashboard-page__empty">
                            {move || {
                                if roster.with(|r| r.loading) {
                                    view! { <p>"Loading members..."</p> }.into_any()
                                } else {
                                    view! {
                                        <h3>"No members yet"</h3>
                                        <p>"Members will appear here once added"</p>
                                    }
                                        .into_any()
                                }
                            }}
                        </div>
                    }
                }
            >
                <div class="dashboard-page__grid">
                    {move || {
                        let role = role.get();
                        roster
                            .with(|r| r.students.iter().map(|s| project_student(s, role)).collect::<Vec<_>>())
                            .into_iter()
                            .map(|card| {
                                view! {
                                    <StudentCardView
                                        card=card
                                        actions=CardActions::for_role(role)
                                        on_edit=on_edit
                                        on_delete=on_delete_request
                                        on_documents=on_documents
                                    />
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </Show>

            <Show when=move || role.get().is_staff() && roster.with(|r| r.documents_for.is_some())>
                <DocumentsPanel />
            </Show>

            <Show when=move || role.get().is_staff()>
                <ProfilesPanel can_edit=Signal::derive(move || role.get().can_manage_roles()) />
            </Show>
        </div>
    }
}
