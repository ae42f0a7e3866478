//! Trashed Objectives Page

use dashboard_domain::catalog::names;
use dashboard_domain::filter::{visible_tasks, TaskFilter};
use dashboard_domain::model::Task;
use dashboard_domain::util::format_date;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, TrashAction};
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::session::SessionHandle;

#[component]
pub fn TrashPage(session: SessionHandle) -> impl IntoView {
    let ctx = use_app_context();
    let tasks = RwSignal::new(Vec::<Task>::new());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let client = session.client();
        spawn_local(async move {
            match api::task::all(&client).await {
                Ok(loaded) => tasks.set(loaded),
                Err(e) => ctx.report(session, &e),
            }
        });
    });

    let trashed = Memo::new(move |_| {
        let Some(viewer) = session.user() else {
            return Vec::new();
        };
        tasks.with(|all| {
            visible_tasks(all, &viewer, &TaskFilter::trash())
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    // Bulk actions go out with an empty id segment
    let run = move |id: String, action: TrashAction| {
        let client = session.client();
        spawn_local(async move {
            match api::task::delete_restore(&client, &id, action).await {
                Ok(reply) => {
                    tracing::info!(task = %id, action = action.as_str(), "Trash action done");
                    ctx.toast_reply(reply, "Done");
                    ctx.reload();
                }
                Err(e) => ctx.report(session, &e),
            }
        });
    };

    view! {
        <div class="trash-page">
            <div class="page-toolbar">
                <h2>"Trashed Objectives"</h2>
                <Show when=move || !trashed.with(Vec::is_empty)>
                    <button class="secondary-btn" on:click=move |_| run(String::new(), TrashAction::RestoreAll)>
                        "Restore All"
                    </button>
                    <Show when=move || session.can(names::DELETE_TASK)>
                        <DeleteConfirmButton
                            button_class="danger-btn"
                            label="Delete All"
                            on_confirm=move |_| run(String::new(), TrashAction::DeleteAll)
                        />
                    </Show>
                </Show>
            </div>
            <table class="task-table">
                <thead>
                    <tr>
                        <th>"Title"</th>
                        <th>"Priority"</th>
                        <th>"Stage"</th>
                        <th>"Modified"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || trashed.get()
                        key=|task| task.id.clone()
                        children=move |task| {
                            let restore_id = task.id.clone();
                            let delete_id = task.id.clone();
                            view! {
                                <tr>
                                    <td>{task.title.clone()}</td>
                                    <td class=format!("priority priority-{}", task.priority.as_str())>
                                        {task.priority.as_str()}
                                    </td>
                                    <td>{task.stage.label()}</td>
                                    <td>{format_date(&task.date)}</td>
                                    <td class="row-actions">
                                        <button
                                            class="icon-btn"
                                            title="Restore"
                                            on:click=move |_| run(restore_id.clone(), TrashAction::Restore)
                                        >
                                            "Restore"
                                        </button>
                                        <Show when=move || session.can(names::DELETE_TASK)>
                                            {
                                                let delete_id = delete_id.clone();
                                                view! {
                                                    <DeleteConfirmButton
                                                        button_class="icon-btn danger"
                                                        on_confirm=move |_| run(delete_id.clone(), TrashAction::Delete)
                                                    />
                                                }
                                            }
                                        </Show>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Show when=move || trashed.with(Vec::is_empty)>
                <p class="empty-state">"Trash is empty."</p>
            </Show>
        </div>
    }
}
