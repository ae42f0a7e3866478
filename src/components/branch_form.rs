//! Branch create/edit modal

use dashboard_domain::forms::{validate_form, BranchForm};
use dashboard_domain::model::Branch;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{Modal, TextField};
use crate::context::use_app_context;
use crate::session::SessionHandle;

#[component]
pub fn BranchFormModal(
    session: SessionHandle,
    existing: Option<Branch>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let name = RwSignal::new(existing.as_ref().map(|b| b.name.clone()).unwrap_or_default());
    let description = RwSignal::new(existing.as_ref().map(|b| b.description.clone()).unwrap_or_default());
    let editing_id = StoredValue::new(existing.map(|b| b.id));
    let is_edit = editing_id.with_value(Option::is_some);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = BranchForm {
            name: name.get_untracked().trim().to_string(),
            description: description.get_untracked().trim().to_string(),
        };
        if let Err(e) = validate_form(&form) {
            ctx.toast_error(e.to_string());
            return;
        }
        let client = session.client();
        spawn_local(async move {
            let result = match editing_id.get_value() {
                Some(id) => api::branch::update(&client, &id, &form).await,
                None => api::branch::create(&client, &form).await,
            };
            match result {
                Ok(reply) => {
                    ctx.toast_reply(reply, if is_edit { "Branch updated" } else { "Branch created" });
                    ctx.reload();
                    on_close.run(());
                }
                Err(e) => ctx.report(session, &e),
            }
        });
    };

    view! {
        <Modal title=if is_edit { "Edit Branch" } else { "New Branch" } on_close=on_close>
            <form on:submit=on_submit>
                <TextField label="Name" value=name />
                <TextField label="Description" value=description />
                <button type="submit" class="primary-btn">{if is_edit { "Save" } else { "Create" }}</button>
            </form>
        </Modal>
    }
}
