//! Sub-task creation modal

use dashboard_domain::forms::{validate_form, SubTaskForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{Modal, TextField};
use crate::context::use_app_context;
use crate::session::SessionHandle;

#[component]
pub fn SubTaskModal(session: SessionHandle, task_id: String, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let title = RwSignal::new(String::new());
    let date = RwSignal::new(String::new());
    let tag = RwSignal::new(String::new());
    let task_id = StoredValue::new(task_id);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = SubTaskForm {
            title: title.get_untracked().trim().to_string(),
            date: date.get_untracked(),
            tag: tag.get_untracked().trim().to_string(),
        };
        if let Err(e) = validate_form(&form) {
            ctx.toast_error(e.to_string());
            return;
        }
        let client = session.client();
        let id = task_id.get_value();
        spawn_local(async move {
            match api::task::create_subtask(&client, &id, &form).await {
                Ok(reply) => {
                    ctx.toast_reply(reply, "Sub-task added");
                    ctx.reload();
                    on_close.run(());
                }
                Err(e) => ctx.report(session, &e),
            }
        });
    };

    view! {
        <Modal title="Add Sub-task" on_close=on_close>
            <form class="subtask-form" on:submit=on_submit>
                <TextField label="Title" value=title />
                <TextField label="Date" value=date input_type="date" />
                <TextField label="Tag" value=tag />
                <button type="submit" class="primary-btn">"Add Sub-task"</button>
            </form>
        </Modal>
    }
}
