//! One member card in the dashboard grid.

use leptos::prelude::*;

use crate::util::roles::{CardActions, StudentCard};

#[component]
pub fn StudentCardView(
    card: StudentCard,
    actions: CardActions,
    on_edit: Callback<String>,
    on_delete: Callback<String>,
    on_documents: Callback<String>,
) -> impl IntoView {
    let edit_id = card.id.clone();
    let delete_id = card.id.clone();
    let documents_id = card.id.clone();

    view! {
        <div class="student-card">
            <h3 class="student-card__name">{card.title}</h3>
            <dl class="student-card__fields">
                {card
                    .fields
                    .into_iter()
                    .map(|(label, value)| {
                        view! {
                            <dt>{label}</dt>
                            <dd>{value}</dd>
                        }
                    })
                    .collect_view()}
            </dl>
            <div class="student-card__actions">
                <Show when=move || actions.documents>
                    <button class="btn btn--small" on:click={
                        let id = documents_id.clone();
                        move |_| on_documents.run(id.clone())
                    }>"Documents"</button>
                </Show>
                <Show when=move || actions.edit>
                    <button class="btn btn--small" on:click={
                        let id = edit_id.clone();
                        move |_| on_edit.run(id.clone())
                    }>"Edit"</button>
                </Show>
                <Show when=move || actions.delete>
                    <button class="btn btn--small btn--danger" on:click={
                        let id = delete_id.clone();
                        move |_| on_delete.run(id.clone())
                    }>"Delete"</button>
                </Show>
            </div>
        </div>
    }
}
