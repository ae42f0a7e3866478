//! Department create/edit modal, scoped to one branch

use dashboard_domain::forms::{validate_form, DepartmentForm};
use dashboard_domain::model::Department;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{Modal, TextField};
use crate::context::use_app_context;
use crate::session::SessionHandle;

#[component]
pub fn DepartmentFormModal(
    session: SessionHandle,
    branch_id: String,
    existing: Option<Department>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let name = RwSignal::new(existing.as_ref().map(|d| d.name.clone()).unwrap_or_default());
    let description = RwSignal::new(existing.as_ref().map(|d| d.description.clone()).unwrap_or_default());
    let editing_id = StoredValue::new(existing.map(|d| d.id));
    let branch_id = StoredValue::new(branch_id);
    let is_edit = editing_id.with_value(Option::is_some);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = DepartmentForm {
            name: name.get_untracked().trim().to_string(),
            description: description.get_untracked().trim().to_string(),
            branch_id: branch_id.get_value(),
        };
        if let Err(e) = validate_form(&form) {
            ctx.toast_error(e.to_string());
            return;
        }
        let client = session.client();
        spawn_local(async move {
            let result = match editing_id.get_value() {
                Some(id) => api::department::update(&client, &id, &form).await,
                None => api::department::create(&client, &form).await,
            };
            match result {
                Ok(reply) => {
                    ctx.toast_reply(reply, if is_edit { "Department updated" } else { "Department created" });
                    ctx.reload();
                    on_close.run(());
                }
                Err(e) => ctx.report(session, &e),
            }
        });
    };

    view! {
        <Modal title=if is_edit { "Edit Department" } else { "New Department" } on_close=on_close>
            <form on:submit=on_submit>
                <TextField label="Name" value=name />
                <TextField label="Description" value=description />
                <button type="submit" class="primary-btn">{if is_edit { "Save" } else { "Create" }}</button>
            </form>
        </Modal>
    }
}
