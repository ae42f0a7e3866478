//! Revenue Target Modal
//!
//! Sets an organization objective and splits it across branches. Each
//! allocation is clamped to what the other branches leave of the total, so
//! the form can never over-distribute; submission still rejects a sum that
//! doesn't match the total.

use dashboard_domain::distribution::TargetDistribution;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{Modal, TextField};
use crate::context::use_app_context;
use crate::session::SessionHandle;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn RevenueTargetModal(session: SessionHandle, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let name = RwSignal::new(String::new());
    let start = RwSignal::new(String::new());
    let end = RwSignal::new(String::new());
    let distribution = RwSignal::new(TargetDistribution::default());
    let (submitting, set_submitting) = signal(false);

    // Rebuild the allocation rows when the branch list changes
    Effect::new(move |_| {
        let branches = store.branches().get();
        let total = distribution.with_untracked(|d| d.total_raw().to_string());
        let mut fresh = TargetDistribution::for_branches(branches.iter().map(|b| b.id.as_str()));
        fresh.set_total(&total);
        distribution.set(fresh);
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let request = distribution.with_untracked(|d| {
            d.submit(&name.get_untracked(), &start.get_untracked(), &end.get_untracked())
        });
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                ctx.toast_error(e.to_string());
                return;
            }
        };

        set_submitting.set(true);
        let client = session.client();
        spawn_local(async move {
            match api::revenue::create(&client, &request).await {
                Ok(reply) => {
                    ctx.toast_reply(reply, "Revenue target created");
                    ctx.reload();
                    on_close.run(());
                }
                Err(e) => ctx.report(session, &e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <Modal title="Set Organization Objective" on_close=on_close wide=true>
            <form class="revenue-form" on:submit=on_submit>
                <TextField label="Objective name" value=name />
                <div class="field-row">
                    <TextField label="Start date" value=start input_type="date" />
                    <TextField label="End date" value=end input_type="date" />
                </div>
                <label class="field">
                    <span class="field-label">"Total revenue target"</span>
                    <input
                        type="number"
                        min="0"
                        step="0.01"
                        prop:value=move || distribution.with(|d| d.total_raw().to_string())
                        on:input=move |ev| distribution.update(|d| d.set_total(&event_target_value(&ev)))
                    />
                </label>

                <h3>"Branch allocation"</h3>
                <div class="allocation-list">
                    <For
                        each=move || store.branches().get()
                        key=|b| b.id.clone()
                        children=move |branch| {
                            let id = branch.id.clone();
                            let edit_id = branch.id.clone();
                            view! {
                                <label class="field allocation-row">
                                    <span class="field-label">{branch.name.clone()}</span>
                                    <input
                                        type="number"
                                        min="0"
                                        step="0.01"
                                        prop:value=move || {
                                            distribution.with(|d| d.allocation(&id).unwrap_or_default().to_string())
                                        }
                                        on:input=move |ev| {
                                            distribution.update(|d| d.edit(&edit_id, &event_target_value(&ev)))
                                        }
                                    />
                                </label>
                            }
                        }
                    />
                </div>

                <div class="allocation-summary">
                    <span>"Distributed: " {move || format!("{:.2}", distribution.with(TargetDistribution::distributed))}</span>
                    <span>"Remaining: " {move || format!("{:.2}", distribution.with(TargetDistribution::remaining))}</span>
                </div>

                <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Saving..." } else { "Create objective" }}
                </button>
            </form>
        </Modal>
    }
}
