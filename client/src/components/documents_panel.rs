//! Per-student document list with upload, download and delete.

use leptos::prelude::*;

use crate::app::Services;
use crate::net::storage::{display_name, entry_key};
use crate::pages::dashboard::load_documents;
use crate::state::roster::RosterState;

#[component]
pub fn DocumentsPanel() -> impl IntoView {
    let services = expect_context::<Services>();
    let roster = expect_context::<RwSignal<RosterState>>();
    let busy = RwSignal::new(false);

    let student_id = move || roster.with(|r| r.documents_for.clone());
    let title = move || {
        roster.with(|r| {
            r.documents_for
                .as_deref()
                .and_then(|id| r.student(id))
                .map_or_else(|| "Documents".to_owned(), |s| format!("Documents for {}", s.full_name()))
        })
    };

    let refresh = move || {
        if let Some(id) = student_id() {
            load_documents(services, roster, id);
        }
    };

    let on_upload = move |ev: leptos::ev::Event| {
        let Some(id) = roster.with_untracked(|r| r.documents_for.clone()) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast as _;

            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            input.set_value("");
            busy.set(true);
            leptos::task::spawn_local(async move {
                match crate::net::storage::upload_document(&services.auth(), &id, file).await {
                    Ok(_) => load_documents(services, roster, id),
                    Err(e) => {
                        leptos::logging::warn!("documents: upload failed: {e}");
                        roster.update(|r| r.documents_error = Some(e.user_message()));
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (ev, id);
    };

    let on_download = move |key: String, name: String| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::storage::download_document(&services.auth(), &key).await {
                Ok(url) => save_object_url(&url, &name),
                Err(e) => {
                    leptos::logging::warn!("documents: download failed: {e}");
                    roster.update(|r| r.documents_error = Some(e.user_message()));
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (key, name);
    };

    let on_delete = move |key: String| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::storage::delete_document(&services.auth(), &key).await {
                Ok(()) => refresh(),
                Err(e) => {
                    leptos::logging::warn!("documents: delete failed: {e}");
                    roster.update(|r| r.documents_error = Some(e.user_message()));
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (key, refresh);
    };

    view! {
        <section class="documents-panel">
            <header class="documents-panel__header">
                <h2>{title}</h2>
                <button class="btn btn--small" on:click=move |_| roster.update(RosterState::close_documents)>
                    "Close"
                </button>
            </header>
            <label class="btn btn--small documents-panel__upload" class:btn--disabled=move || busy.get()>
                {move || if busy.get() { "Uploading..." } else { "Upload file" }}
                <input type="file" hidden disabled=move || busy.get() on:change=on_upload />
            </label>
            <Show when=move || roster.with(|r| r.documents_error.is_some())>
                <p class="documents-panel__error">
                    {move || roster.with(|r| r.documents_error.clone().unwrap_or_default())}
                </p>
            </Show>
            <ul class="documents-panel__list">
                {move || {
                    let Some(id) = student_id() else {
                        return Vec::new();
                    };
                    roster
                        .with(|r| r.documents.clone())
                        .into_iter()
                        .map(|entry| {
                            let key = entry_key(&id, &entry);
                            let name = display_name(&entry.name).to_owned();
                            let download_key = key.clone();
                            let download_name = name.clone();
                            view! {
                                <li class="documents-panel__row">
                                    <span>{name}</span>
                                    <button
                                        class="btn btn--small"
                                        on:click=move |_| on_download(download_key.clone(), download_name.clone())
                                    >
                                        "Download"
                                    </button>
                                    <button class="btn btn--small btn--danger" on:click=move |_| on_delete(key.clone())>
                                        "Delete"
                                    </button>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </ul>
        </section>
    }
}

/// Offer an object URL as a file download, then revoke it.
#[cfg(feature = "hydrate")]
fn save_object_url(url: &str, name: &str) {
    use wasm_bindgen::JsCast as _;

    let anchor = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.create_element("a").ok())
        .and_then(|el| el.dyn_into::<web_sys::HtmlAnchorElement>().ok());
    if let Some(anchor) = anchor {
        anchor.set_href(url);
        anchor.set_download(name);
        anchor.click();
    }
    if let Err(e) = web_sys::Url::revoke_object_url(url) {
        leptos::logging::warn!("documents: revoke failed: {e:?}");
    }
}
