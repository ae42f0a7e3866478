//! Per-task action buttons shown on board cards and table rows

use dashboard_domain::catalog::names;
use dashboard_domain::model::Task;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::session::SessionHandle;

#[component]
pub fn TaskActions(
    task: Task,
    session: SessionHandle,
    on_edit: Callback<Task>,
    on_subtask: Callback<String>,
) -> impl IntoView {
    let ctx = use_app_context();
    let id = StoredValue::new(task.id.clone());
    let task = StoredValue::new(task);

    let duplicate = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        let client = session.client();
        let id = id.get_value();
        spawn_local(async move {
            match api::task::duplicate(&client, &id).await {
                Ok(reply) => {
                    ctx.toast_reply(reply, "Objective duplicated");
                    ctx.reload();
                }
                Err(e) => ctx.report(session, &e),
            }
        });
    };

    let trash = move |_| {
        let client = session.client();
        let id = id.get_value();
        spawn_local(async move {
            match api::task::trash(&client, &id).await {
                Ok(reply) => {
                    ctx.toast_reply(reply, "Objective moved to trash");
                    ctx.reload();
                }
                Err(e) => ctx.report(session, &e),
            }
        });
    };

    view! {
        <div class="task-actions" on:mousedown=|ev| ev.stop_propagation()>
            <Show when=move || session.can(names::UPDATE_TASK)>
                <button
                    class="icon-btn"
                    title="Edit"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_edit.run(task.get_value());
                    }
                >
                    "Edit"
                </button>
            </Show>
            <Show when=move || session.can(names::DUPLICATE_TASK)>
                <button class="icon-btn" title="Duplicate" on:click=duplicate>
                    "Duplicate"
                </button>
            </Show>
            <Show when=move || session.can(names::CREATE_SUBTASK)>
                <button
                    class="icon-btn"
                    title="Add sub-task"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_subtask.run(id.get_value());
                    }
                >
                    "Sub-task"
                </button>
            </Show>
            <Show when=move || session.can(names::TRASH_TASK)>
                <DeleteConfirmButton button_class="icon-btn danger" label="Trash" on_confirm=trash />
            </Show>
        </div>
    }
}
