//! List view of tasks

use dashboard_domain::catalog::names;
use dashboard_domain::model::Task;
use dashboard_domain::util::format_date;
use leptos::prelude::*;

use crate::components::TaskActions;
use crate::context::use_app_context;
use crate::pages::Page;
use crate::session::SessionHandle;

#[component]
pub fn TaskTable(
    session: SessionHandle,
    #[prop(into)] tasks: Signal<Vec<Task>>,
    #[prop(into, optional)] on_edit: Option<Callback<Task>>,
    #[prop(into, optional)] on_subtask: Option<Callback<String>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let with_actions = on_edit.is_some() && on_subtask.is_some();

    view! {
        <table class="task-table">
            <thead>
                <tr>
                    <th>"Title"</th>
                    <th>"Priority"</th>
                    <th>"Stage"</th>
                    <th>"KPI"</th>
                    <th>"Date"</th>
                    <th>"Team"</th>
                    {with_actions.then(|| view! { <th></th> })}
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || tasks.get()
                    key=|task| (task.id.clone(), task.stage, task.title.clone())
                    children=move |task| {
                        let id = task.id.clone();
                        let team = task
                            .team
                            .iter()
                            .filter_map(|m| m.name())
                            .collect::<Vec<_>>()
                            .join(", ");
                        let actions = on_edit.zip(on_subtask).map(|(on_edit, on_subtask)| {
                            view! {
                                <td>
                                    <TaskActions
                                        task=task.clone()
                                        session=session
                                        on_edit=on_edit
                                        on_subtask=on_subtask
                                    />
                                </td>
                            }
                        });
                        view! {
                            <tr
                                class="task-row"
                                on:click=move |_| {
                                    if session.can(names::VIEW_TASK_DETAILS) {
                                        ctx.navigate(Page::TaskDetail(id.clone()));
                                    }
                                }
                            >
                                <td class="task-title">{task.title.clone()}</td>
                                <td class=format!("priority priority-{}", task.priority.as_str())>
                                    {task.priority.as_str()}
                                </td>
                                <td>{task.stage.label()}</td>
                                <td>{task.kpi.as_ref().map(|k| k.name.clone()).unwrap_or_default()}</td>
                                <td>{format_date(&task.date)}</td>
                                <td>{team}</td>
                                {actions}
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
        <Show when=move || tasks.with(Vec::is_empty)>
            <p class="empty-state">"No objectives to show."</p>
        </Show>
    }
}
