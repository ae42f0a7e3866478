//! Modal Component
//!
//! Backdrop plus dialog panel. Clicking the backdrop or the close button
//! runs `on_close`; the parent decides whether the modal is mounted.

use leptos::prelude::*;

#[component]
pub fn Modal(
    #[prop(into)] title: String,
    #[prop(into)] on_close: Callback<()>,
    #[prop(optional)] wide: bool,
    children: Children,
) -> impl IntoView {
    let panel_class = if wide { "modal-panel modal-wide" } else { "modal-panel" };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class=panel_class on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2>{title}</h2>
                    <button type="button" class="modal-close" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </div>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}
