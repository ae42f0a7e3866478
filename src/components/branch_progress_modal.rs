//! Branch Progress Modal
//!
//! Lets a branch user pick a revenue target and report newly achieved
//! revenue. The preview shows the running total and percentage before
//! anything is sent.

use dashboard_domain::find_by_id;
use dashboard_domain::progress::BranchProgress;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::Modal;
use crate::context::use_app_context;
use crate::session::SessionHandle;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn BranchProgressModal(session: SessionHandle) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let branch_id = session.branch_id().unwrap_or_default();
    let progress = RwSignal::new(BranchProgress::new(branch_id.clone()));
    let (submitting, set_submitting) = signal(false);

    // Targets are refreshed every time the modal opens
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let client = session.client();
        spawn_local(async move {
            match api::revenue::all(&client).await {
                Ok(targets) => store.revenue_targets().set(targets),
                Err(e) => ctx.report(session, &e),
            }
        });
    });

    // The cached copy shows at once; the fresh detail replaces it so the
    // achieved figure includes reports made since the list was loaded.
    let on_select = move |ev: web_sys::Event| {
        let id = event_target_value(&ev);
        let cached = store.revenue_targets().with(|all| find_by_id(all, &id).cloned());
        progress.update(|p| match &cached {
            Some(target) => p.select(target),
            None => p.clear_selection(),
        });
        if cached.is_none() {
            return;
        }
        let client = session.client();
        spawn_local(async move {
            match api::revenue::detail(&client, &id).await {
                Ok(fresh) => {
                    let _ = progress.try_update(|p| p.refresh(&fresh));
                }
                Err(e) => tracing::warn!(revenue = %id, error = %e, "Revenue detail refresh failed"),
            }
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let update = match progress.with_untracked(|p| p.submission()) {
            Ok(update) => update,
            Err(e) => {
                ctx.toast_error(e.to_string());
                return;
            }
        };
        set_submitting.set(true);
        let client = session.client();
        spawn_local(async move {
            match api::revenue::update_progress(&client, &update).await {
                Ok(reply) => {
                    ctx.toast_reply(reply, "Branch progress updated");
                    ctx.progress_open.set(false);
                    ctx.reload();
                }
                Err(e) => ctx.report(session, &e),
            }
            set_submitting.set(false);
        });
    };

    let has_branch = !branch_id.is_empty();

    view! {
        <Modal title="Update Branch Progress" on_close=move |_| ctx.progress_open.set(false)>
            <Show
                when=move || has_branch
                fallback=|| view! { <p class="empty-state">"Your account is not assigned to a branch."</p> }
            >
                <form class="progress-form" on:submit=on_submit>
                    <label class="field">
                        <span class="field-label">"Revenue target"</span>
                        <select on:change=on_select>
                            <option value="">"Select a target"</option>
                            <For
                                each=move || store.revenue_targets().get()
                                key=|t| t.id.clone()
                                children=|t| view! { <option value=t.id.clone()>{t.revenue_name.clone()}</option> }
                            />
                        </select>
                    </label>

                    <div class="progress-figures">
                        <div>"Branch target: " {move || format!("{:.2}", progress.with(BranchProgress::target))}</div>
                        <div>"Achieved so far: " {move || format!("{:.2}", progress.with(BranchProgress::existing))}</div>
                    </div>

                    <label class="field">
                        <span class="field-label">"Newly achieved amount"</span>
                        <input
                            type="number"
                            min="0"
                            step="0.01"
                            on:input=move |ev| progress.update(|p| p.set_increment(&event_target_value(&ev)))
                        />
                    </label>

                    <div class="progress-preview">
                        <span>"New total: " {move || format!("{:.2}", progress.with(BranchProgress::preview_total))}</span>
                        <div class="progress-bar">
                            <div
                                class="progress-bar-fill"
                                style=move || format!("width: {:.2}%;", progress.with(BranchProgress::percentage))
                            ></div>
                        </div>
                        <span class="progress-label">{move || progress.with(BranchProgress::percentage_label)}</span>
                    </div>

                    <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Saving..." } else { "Submit" }}
                    </button>
                </form>
            </Show>
        </Modal>
    }
}
