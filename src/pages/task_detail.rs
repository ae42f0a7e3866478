//! Task Detail Page
//!
//! Summary of one objective and its activity timeline. Users with the
//! activity permission can post progress; the achieved value travels in the
//! field matching the objective's KPI type.

use dashboard_domain::catalog::names;
use dashboard_domain::forms::{validate_form, ActivityForm};
use dashboard_domain::model::{Activity, KpiType, Task};
use dashboard_domain::util::{format_date, get_initials};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_app_context;
use crate::session::SessionHandle;

const ACTIVITY_KINDS: [&str; 6] = ["Started", "Completed", "In Progress", "Commented", "Bug", "Assigned"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Summary,
    Timeline,
}

fn target_label(task: &Task) -> Option<String> {
    let kpi = task.kpi.as_ref()?;
    match kpi.kind {
        KpiType::Monetary => task.monetary_value.map(|v| format!("{v:.2}")),
        KpiType::Percentage => task.percent_value.map(|v| format!("{v:.2}%")),
        KpiType::Metric => None,
    }
}

fn is_image(url: &str) -> bool {
    let path = url.split('?').next().unwrap_or(url).to_ascii_lowercase();
    [".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg"]
        .iter()
        .any(|ext| path.ends_with(ext))
}

#[component]
pub fn TaskDetailPage(session: SessionHandle, id: String) -> impl IntoView {
    let ctx = use_app_context();
    let task = RwSignal::new(None::<Task>);
    let (tab, set_tab) = signal(Tab::Summary);
    let id = StoredValue::new(id);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let client = session.client();
        let task_id = id.get_value();
        spawn_local(async move {
            match api::task::get(&client, &task_id).await {
                Ok(loaded) => task.set(Some(loaded)),
                Err(e) => {
                    tracing::warn!(task = %task_id, error = %e, "Task detail failed to load");
                    ctx.report(session, &e);
                }
            }
        });
    });

    let tab_class = move |t: Tab| if tab.get() == t { "tab active" } else { "tab" };

    view! {
        <div class="task-detail-page">
            <div class="tabs">
                <button class=move || tab_class(Tab::Summary) on:click=move |_| set_tab.set(Tab::Summary)>
                    "Task Detail"
                </button>
                <button class=move || tab_class(Tab::Timeline) on:click=move |_| set_tab.set(Tab::Timeline)>
                    "Activities/Timeline"
                </button>
            </div>
            {move || match task.get() {
                None => view! { <p class="empty-state">"Loading objective..."</p> }.into_any(),
                Some(loaded) => match tab.get() {
                    Tab::Summary => view! { <TaskSummary task=loaded /> }.into_any(),
                    Tab::Timeline => view! { <TaskTimeline session=session task=loaded /> }.into_any(),
                },
            }}
        </div>
    }
}

#[component]
fn TaskSummary(task: Task) -> impl IntoView {
    let kpi = task
        .kpi
        .as_ref()
        .map(|k| format!("{} ({})", k.name, k.kind.as_str()))
        .unwrap_or_else(|| "No KPI".to_string());
    let target = target_label(&task);

    view! {
        <section class="task-summary">
            <div class="task-summary-head">
                <span class=format!("priority priority-{}", task.priority.as_str())>
                    {format!("{} priority", task.priority.as_str().to_uppercase())}
                </span>
                <span class=format!("stage stage-{}", task.stage.as_str().replace(' ', "-"))>{task.stage.label()}</span>
            </div>
            <h2>{task.title.clone()}</h2>
            <p class="task-date">{format!("Created {}", format_date(&task.date))}</p>
            <div class="task-meta">
                <span>{format!("KPI: {kpi}")}</span>
                {target.map(|t| view! { <span>{format!("Target: {t}")}</span> })}
                <span>{format!("Assets: {}", task.assets.len())}</span>
                <span>{format!("Sub-tasks: {}", task.sub_tasks.len())}</span>
            </div>

            <h3>"Team"</h3>
            <ul class="team-list">
                {task
                    .team
                    .iter()
                    .map(|member| {
                        let name = member.name().unwrap_or(member.id()).to_string();
                        view! {
                            <li>
                                <span class="avatar">{get_initials(&name)}</span>
                                <span>{name}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>

            <h3>"Sub-tasks"</h3>
            <ul class="subtask-list">
                {task
                    .sub_tasks
                    .iter()
                    .map(|sub| {
                        view! {
                            <li>
                                <span class="subtask-date">{sub.date.as_ref().map(format_date).unwrap_or_default()}</span>
                                <span class="subtask-tag">{sub.tag.clone()}</span>
                                <span class="subtask-title">{sub.title.clone()}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>

            <h3>"Assets"</h3>
            <div class="asset-grid">
                {task
                    .assets
                    .iter()
                    .map(|url| {
                        if is_image(url) {
                            view! { <img class="asset" src=url.clone() alt="Asset" /> }.into_any()
                        } else {
                            view! { <a class="asset" href=url.clone() target="_blank">"Open file"</a> }.into_any()
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn TaskTimeline(session: SessionHandle, task: Task) -> impl IntoView {
    let ctx = use_app_context();
    let kind = RwSignal::new(ACTIVITY_KINDS[0].to_string());
    let text = RwSignal::new(String::new());
    let achieved = RwSignal::new(String::new());
    let (submitting, set_submitting) = signal(false);
    let kpi_kind = task.kpi.as_ref().map(|k| k.kind);
    let task = StoredValue::new(task);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let (task_id, form) = task.with_value(|t| {
            (
                t.id.clone(),
                ActivityForm::new(
                    &kind.get_untracked(),
                    &text.get_untracked(),
                    t.kpi.as_ref(),
                    &achieved.get_untracked(),
                ),
            )
        });
        if let Err(e) = validate_form(&form) {
            ctx.toast_error(e.to_string());
            return;
        }

        set_submitting.set(true);
        let client = session.client();
        spawn_local(async move {
            match api::task::post_activity(&client, &task_id, &form).await {
                Ok(reply) => {
                    ctx.toast_reply(reply, "Activity posted");
                    text.set(String::new());
                    achieved.set(String::new());
                    ctx.reload();
                }
                Err(e) => ctx.report(session, &e),
            }
            set_submitting.set(false);
        });
    };

    let achieved_label = match kpi_kind {
        Some(KpiType::Monetary) => Some("Monetary value achieved"),
        Some(KpiType::Percentage) => Some("Percentage achieved"),
        _ => None,
    };

    view! {
        <section class="task-timeline">
            <ol class="timeline">
                {task.with_value(|t| t.activities.iter().map(timeline_entry).collect_view())}
            </ol>

            <Show when=move || session.can(names::ADD_TASK_ACTIVITY)>
                <form class="activity-form" on:submit=on_submit>
                    <h3>"Add Activity"</h3>
                    <div class="activity-kinds">
                        {ACTIVITY_KINDS
                            .iter()
                            .map(|k| {
                                let value = k.to_string();
                                let checked_value = value.clone();
                                view! {
                                    <label class="checkbox">
                                        <input
                                            type="radio"
                                            name="activity-kind"
                                            prop:checked=move || kind.with(|current| *current == checked_value)
                                            on:change=move |_| kind.set(value.clone())
                                        />
                                        <span>{*k}</span>
                                    </label>
                                }
                            })
                            .collect_view()}
                    </div>
                    <textarea
                        rows="6"
                        placeholder="Type..."
                        prop:value=move || text.get()
                        on:input=move |ev| text.set(event_target_value(&ev))
                    ></textarea>
                    {achieved_label.map(|label| view! {
                        <label class="field">
                            <span class="field-label">{label}</span>
                            <input
                                type="number"
                                step="0.01"
                                prop:value=move || achieved.get()
                                on:input=move |ev| achieved.set(event_target_value(&ev))
                            />
                        </label>
                    })}
                    <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Submitting..." } else { "Submit" }}
                    </button>
                </form>
            </Show>
        </section>
    }
}

fn timeline_entry(activity: &Activity) -> impl IntoView {
    let by = activity
        .by
        .as_ref()
        .and_then(|r| r.name())
        .unwrap_or("Unknown")
        .to_string();
    let when = activity.date.as_ref().map(format_date).unwrap_or_default();
    view! {
        <li class=format!("timeline-entry activity-{}", activity.kind.replace(' ', "-"))>
            <div class="timeline-head">
                <span class="timeline-by">{by}</span>
                <span class="timeline-kind">{activity.kind.clone()}</span>
                <span class="timeline-date">{when}</span>
            </div>
            <p class="timeline-text">{activity.activity.clone()}</p>
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_assets_detected_by_extension() {
        assert!(is_image("https://host/o/photo.JPG?alt=media&token=x"));
        assert!(!is_image("https://host/o/report.pdf?alt=media"));
    }
}
