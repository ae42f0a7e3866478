//! KPI create/edit modal

use dashboard_domain::forms::{validate_form, KpiForm};
use dashboard_domain::model::{Kpi, KpiType};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{Modal, SelectField, TextField};
use crate::context::use_app_context;
use crate::session::SessionHandle;

#[component]
pub fn KpiFormModal(
    session: SessionHandle,
    branch_id: String,
    existing: Option<Kpi>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let name = RwSignal::new(existing.as_ref().map(|k| k.name.clone()).unwrap_or_default());
    let kind = RwSignal::new(existing.as_ref().map(|k| k.kind.as_str().to_string()).unwrap_or_default());
    let editing_id = StoredValue::new(existing.map(|k| k.id));
    let branch_id = StoredValue::new(branch_id);
    let is_edit = editing_id.with_value(Option::is_some);

    let kind_options: Vec<(String, String)> = KpiType::ALL
        .iter()
        .map(|k| (k.as_str().to_string(), k.as_str().to_string()))
        .collect();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = KpiForm {
            name: name.get_untracked().trim().to_string(),
            kind: kind.get_untracked(),
            branch_id: branch_id.get_value(),
        };
        if let Err(e) = validate_form(&form) {
            ctx.toast_error(e.to_string());
            return;
        }
        let client = session.client();
        spawn_local(async move {
            let result = match editing_id.get_value() {
                Some(id) => api::kpi::update(&client, &id, &form).await,
                None => api::kpi::create(&client, &form).await,
            };
            match result {
                Ok(reply) => {
                    ctx.toast_reply(reply, if is_edit { "KPI updated" } else { "KPI created" });
                    ctx.reload();
                    on_close.run(());
                }
                Err(e) => ctx.report(session, &e),
            }
        });
    };

    view! {
        <Modal title=if is_edit { "Edit KPI" } else { "New KPI" } on_close=on_close>
            <form on:submit=on_submit>
                <TextField label="Name" value=name />
                <SelectField label="Type" value=kind options=kind_options placeholder="Choose a type" />
                <button type="submit" class="primary-btn">{if is_edit { "Save" } else { "Create" }}</button>
            </form>
        </Modal>
    }
}
