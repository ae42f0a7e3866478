//! Objectives Page
//!
//! Board and list views over the loaded tasks. The unfiltered objectives
//! page waits for a department choice; stage pages list straight away.

use dashboard_domain::catalog::names;
use dashboard_domain::filter::{visible_tasks, TaskFilter};
use dashboard_domain::model::{Department, Stage, Task};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{SubTaskModal, TaskBoard, TaskFormModal, TaskTable};
use crate::context::use_app_context;
use crate::session::SessionHandle;
use crate::store::{use_app_store, AppStateStoreFields};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Board,
    List,
}

/// What the task form modal is doing
#[derive(Debug, Clone, PartialEq)]
enum Editing {
    Closed,
    New,
    Existing(Task),
}

#[component]
pub fn TasksPage(session: SessionHandle, stage: Option<Stage>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let tasks = RwSignal::new(Vec::<Task>::new());
    let departments = RwSignal::new(Vec::<Department>::new());
    let department = RwSignal::new(String::new());
    let branch = RwSignal::new(String::new());
    let (mode, set_mode) = signal(ViewMode::Board);
    let editing = RwSignal::new(Editing::Closed);
    let subtask_for = RwSignal::new(None::<String>);
    let needs_department = stage.is_none();

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

    // Department choices: all of them for admins, the own branch otherwise
    Effect::new(move |_| {
        let client = session.client();
        let own_branch = session.branch_id();
        let is_admin = session.is_admin();
        spawn_local(async move {
            let loaded = match (is_admin, own_branch) {
                (false, Some(branch)) => api::department::for_branch(&client, &branch).await,
                _ => api::department::all(&client).await,
            };
            match loaded {
                Ok(loaded) => departments.set(loaded),
                Err(e) => ctx.report(session, &e),
            }
        });
    });

    let visible = Memo::new(move |_| {
        let Some(viewer) = session.user() else {
            return Vec::new();
        };
        let chosen = department.get();
        if needs_department && chosen.is_empty() {
            return Vec::new();
        }
        let mut filter = TaskFilter::for_stage(stage);
        if !chosen.is_empty() {
            filter = filter.with_department(chosen);
        }
        let chosen_branch = branch.get();
        if !chosen_branch.is_empty() {
            filter = filter.with_branch(chosen_branch);
        }
        tasks.with(|all| visible_tasks(all, &viewer, &filter).into_iter().cloned().collect::<Vec<_>>())
    });

    let on_edit = Callback::new(move |task: Task| editing.set(Editing::Existing(task)));
    let on_subtask = Callback::new(move |id: String| subtask_for.set(Some(id)));

    let tab_class = move |tab: ViewMode| if mode.get() == tab { "tab active" } else { "tab" };

    view! {
        <div class="tasks-page">
            <div class="page-toolbar">
                <div class="tabs">
                    <button class=move || tab_class(ViewMode::Board) on:click=move |_| set_mode.set(ViewMode::Board)>
                        "Board View"
                    </button>
                    <button class=move || tab_class(ViewMode::List) on:click=move |_| set_mode.set(ViewMode::List)>
                        "List View"
                    </button>
                </div>
                <Show when=move || session.is_admin()>
                    <select
                        class="branch-select"
                        prop:value=move || branch.get()
                        on:change=move |ev| branch.set(event_target_value(&ev))
                    >
                        <option value="">"All branches"</option>
                        <For
                            each=move || store.branches().get()
                            key=|b| b.id.clone()
                            children=|b| view! { <option value=b.id.clone()>{b.name.clone()}</option> }
                        />
                    </select>
                </Show>
                <select
                    class="department-select"
                    prop:value=move || department.get()
                    on:change=move |ev| department.set(event_target_value(&ev))
                >
                    <option value="">{if needs_department { "Select a department" } else { "All departments" }}</option>
                    <For
                        each=move || departments.get()
                        key=|d| d.id.clone()
                        children=|d| view! { <option value=d.name.clone()>{d.name.clone()}</option> }
                    />
                </select>
                <Show when=move || session.can(names::CREATE_TASKS)>
                    <button class="primary-btn" on:click=move |_| editing.set(Editing::New)>
                        "Create Objective"
                    </button>
                </Show>
            </div>

            <Show
                when=move || !(needs_department && department.with(String::is_empty))
                fallback=|| view! { <p class="empty-state">"Select a department to see its objectives."</p> }
            >
                {move || match mode.get() {
                    ViewMode::Board => view! {
                        <TaskBoard
                            session=session
                            tasks=tasks
                            visible=visible
                            on_edit=on_edit
                            on_subtask=on_subtask
                        />
                    }
                    .into_any(),
                    ViewMode::List => view! {
                        <TaskTable session=session tasks=visible on_edit=on_edit on_subtask=on_subtask />
                    }
                    .into_any(),
                }}
            </Show>

            {move || match editing.get() {
                Editing::Closed => None,
                Editing::New => Some(view! {
                    <TaskFormModal session=session existing=None on_close=move |_| editing.set(Editing::Closed) />
                }),
                Editing::Existing(task) => Some(view! {
                    <TaskFormModal
                        session=session
                        existing=Some(task)
                        on_close=move |_| editing.set(Editing::Closed)
                    />
                }),
            }}
            {move || subtask_for.get().map(|id| view! {
                <SubTaskModal session=session task_id=id on_close=move |_| subtask_for.set(None) />
            })}
        </div>
    }
}
