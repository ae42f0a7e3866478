//! Task Board Component
//!
//! Kanban columns per stage with drag-and-drop between them. A drop is
//! checked by `plan_move`, applied to the local list right away, then sent
//! to the backend; a failed request puts the card back unless it has
//! moved again since.

use dashboard_domain::board::{apply_stage, plan_move, revert_stage, stage_shares};
use dashboard_domain::model::{Stage, Task};
use dashboard_domain::util::{format_date, get_initials};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;

use crate::api;
use crate::components::TaskActions;
use crate::context::use_app_context;
use crate::pages::Page;
use crate::session::SessionHandle;

fn priority_class(task: &Task) -> String {
    format!("priority priority-{}", task.priority.as_str())
}

#[component]
pub fn TaskBoard(
    session: SessionHandle,
    /// Every loaded task; drops mutate this list
    tasks: RwSignal<Vec<Task>>,
    /// What the current filter shows
    #[prop(into)]
    visible: Signal<Vec<Task>>,
    #[prop(into)] on_edit: Callback<Task>,
    #[prop(into)] on_subtask: Callback<String>,
) -> impl IntoView {
    let ctx = use_app_context();
    let dnd = create_dnd_signals::<String, Stage>();

    bind_global_mouseup(dnd, move |task_id: String, to: Stage| {
        let Some(from) = tasks.with_untracked(|all| all.iter().find(|t| t.id == task_id).map(|t| t.stage)) else {
            return;
        };

        let change = match plan_move(&session.permissions(), from, to) {
            Ok(Some(change)) => change,
            Ok(None) => return,
            Err(rejection) => {
                tracing::debug!(task = %task_id, ?from, ?to, "Stage move rejected");
                ctx.toast_error(rejection.to_string());
                return;
            }
        };

        tasks.update(|all| {
            apply_stage(all, &task_id, change.to);
        });

        let client = session.client();
        spawn_local(async move {
            match api::task::change_stage(&client, &task_id, change.to).await {
                Ok(reply) => ctx.toast_reply(reply, "Stage updated"),
                Err(e) => {
                    tracing::warn!(task = %task_id, error = %e, "Stage change failed, reverting");
                    let _ = tasks.try_update(|all| revert_stage(all, &task_id, change));
                    ctx.report(session, &e);
                }
            }
        });
    });

    let shares = Memo::new(move |_| visible.with(|v| stage_shares(v)));

    view! {
        <div class="task-board">
            {Stage::ALL
                .into_iter()
                .map(|stage| {
                    let on_enter = make_on_target_mouseenter(dnd, stage);
                    let on_leave = make_on_mouseleave(dnd);
                    let column_class = move || {
                        if dnd.is_target(&stage) {
                            "board-column drop-target"
                        } else {
                            "board-column"
                        }
                    };
                    let header = move || {
                        shares
                            .with(|all| all.iter().find(|s| s.stage == stage).copied())
                            .map(|s| format!("{} ({}) {}", stage.label(), s.count, s.label()))
                            .unwrap_or_else(|| stage.label().to_string())
                    };
                    let column_tasks = move || {
                        visible.with(|v| v.iter().filter(|t| t.stage == stage).cloned().collect::<Vec<_>>())
                    };

                    view! {
                        <section class=column_class on:mouseenter=on_enter on:mouseleave=on_leave>
                            <header class=format!("board-column-header stage-{}", stage.as_str().replace(' ', "-"))>
                                {header}
                            </header>
                            <For
                                each=column_tasks
                                key=|task| (task.id.clone(), task.stage, task.title.clone())
                                children=move |task| {
                                    view! {
                                        <TaskCard
                                            task=task
                                            session=session
                                            dnd=dnd
                                            on_edit=on_edit
                                            on_subtask=on_subtask
                                        />
                                    }
                                }
                            />
                        </section>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn TaskCard(
    task: Task,
    session: SessionHandle,
    dnd: DndSignals<String, Stage>,
    on_edit: Callback<Task>,
    on_subtask: Callback<String>,
) -> impl IntoView {
    let ctx = use_app_context();
    let id = task.id.clone();
    let on_mousedown = make_on_mousedown(dnd, id.clone());

    let drag_id = id.clone();
    let card_class = move || {
        if dnd.is_dragging(&drag_id) {
            "task-card dragging"
        } else {
            "task-card"
        }
    };

    let open_id = id.clone();
    let open = move |_| {
        if dnd.drag_just_ended.get_untracked() {
            return;
        }
        if session.can(dashboard_domain::catalog::names::VIEW_TASK_DETAILS) {
            ctx.navigate(Page::TaskDetail(open_id.clone()));
        }
    };

    view! {
        <article class=card_class on:mousedown=on_mousedown on:click=open>
            <div class="task-card-top">
                <span class=priority_class(&task)>{task.priority.as_str().to_uppercase()}</span>
                <TaskActions task=task.clone() session=session on_edit=on_edit on_subtask=on_subtask />
            </div>
            <h4 class="task-card-title">{task.title.clone()}</h4>
            <div class="task-card-date">{format_date(&task.date)}</div>
            {task.kpi.as_ref().map(|kpi| view! {
                <div class="task-card-kpi">{format!("{} ({})", kpi.name, kpi.kind.as_str())}</div>
            })}
            <div class="task-card-footer">
                <span class="task-card-subtasks">{format!("{} sub-tasks", task.sub_tasks.len())}</span>
                <div class="task-card-team">
                    {task
                        .team
                        .iter()
                        .map(|member| {
                            let initials = get_initials(member.name().unwrap_or(member.id()));
                            view! { <span class="avatar avatar-small">{initials}</span> }
                        })
                        .collect_view()}
                </div>
            </div>
        </article>
    }
}
