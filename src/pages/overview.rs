//! Organization Overview Page
//!
//! Revenue objectives across branches: the achieved-revenue line of one
//! objective against its total, an optional side-by-side comparison with a
//! second objective, and achieved/target per branch.

use chrono::{NaiveDate, Utc};
use dashboard_domain::analytics::{branch_performance, compare_series, revenue_series, DateRange, RevenuePoint};
use dashboard_domain::catalog::names;
use dashboard_domain::find_by_id;
use dashboard_domain::model::RevenueTarget;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{DeleteConfirmButton, RevenueChart, RevenueTargetModal};
use crate::context::use_app_context;
use crate::session::SessionHandle;
use crate::store::{store_remove_revenue_target, use_app_store, AppStateStoreFields};

const DEFAULT_COMPARE_DAYS: i64 = 30;

/// Objectives without dates cover everything
fn target_range(target: &RevenueTarget) -> DateRange {
    DateRange::new(
        target.start_date.map(|d| d.date_naive()).unwrap_or(NaiveDate::MIN),
        target.end_date.map(|d| d.date_naive()).unwrap_or(NaiveDate::MAX),
    )
}

fn period_label(target: &RevenueTarget) -> String {
    match (target.start_date, target.end_date) {
        (Some(start), Some(end)) => format!("{} to {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d")),
        _ => "No period set".to_string(),
    }
}

#[component]
pub fn OverviewPage(session: SessionHandle) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let selected = RwSignal::new(String::new());
    let compare_with = RwSignal::new(String::new());
    let compare_days = RwSignal::new(DEFAULT_COMPARE_DAYS.to_string());
    let (show_objective_form, set_show_objective_form) = signal(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let client = session.client();
        spawn_local(async move {
            match api::revenue::all(&client).await {
                Ok(targets) => {
                    tracing::debug!(count = targets.len(), "Loaded revenue targets");
                    if selected.get_untracked().is_empty() {
                        if let Some(first) = targets.first() {
                            selected.set(first.id.clone());
                        }
                    }
                    store.revenue_targets().set(targets);
                }
                Err(e) => ctx.report(session, &e),
            }
            match api::branch::list(&client).await {
                Ok(branches) => store.branches().set(branches),
                Err(e) => ctx.report(session, &e),
            }
        });
    });

    let current = Memo::new(move |_| {
        let id = selected.get();
        store.revenue_targets().with(|all| find_by_id(all, &id).cloned())
    });
    let other = Memo::new(move |_| {
        let id = compare_with.get();
        store.revenue_targets().with(|all| find_by_id(all, &id).cloned())
    });

    // With a comparison target both lines share a window from the first
    // objective's start; otherwise the objective's own period is drawn
    let series = Memo::new(move |_| -> (Vec<RevenuePoint>, Vec<RevenuePoint>) {
        let Some(first) = current.get() else {
            return (Vec::new(), Vec::new());
        };
        match other.get() {
            Some(second) => {
                let start = first
                    .start_date
                    .map(|d| d.date_naive())
                    .unwrap_or_else(|| Utc::now().date_naive());
                let days = compare_days.with(|raw| raw.trim().parse::<i64>().unwrap_or(DEFAULT_COMPARE_DAYS));
                compare_series(&first, &second, start, days)
            }
            None => (revenue_series(&first, target_range(&first)), Vec::new()),
        }
    });
    let primary = Signal::derive(move || series.with(|(a, _)| a.clone()));
    let secondary = Signal::derive(move || series.with(|(_, b)| b.clone()));
    let reference = Signal::derive(move || current.with(|t| t.as_ref().map(|t| t.total_target).unwrap_or_default()));

    let performance = Memo::new(move |_| {
        store
            .revenue_targets()
            .with(|targets| store.branches().with(|branches| branch_performance(targets, branches)))
    });

    let delete_target = move |id: String| {
        let client = session.client();
        spawn_local(async move {
            match api::revenue::delete(&client, &id).await {
                Ok(reply) => {
                    store_remove_revenue_target(&store, &id);
                    if selected.get_untracked() == id {
                        selected.set(String::new());
                    }
                    ctx.toast_reply(reply, "Objective deleted");
                }
                Err(e) => ctx.report(session, &e),
            }
        });
    };

    let target_options = move || {
        store.revenue_targets().with(|all| {
            all.iter()
                .map(|t| (t.id.clone(), t.revenue_name.clone()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="overview-page">
            <div class="page-toolbar">
                <select
                    class="target-select"
                    prop:value=move || selected.get()
                    on:change=move |ev| selected.set(event_target_value(&ev))
                >
                    <option value="">"Select an objective"</option>
                    {move || {
                        target_options()
                            .into_iter()
                            .map(|(id, name)| view! { <option value=id>{name}</option> })
                            .collect_view()
                    }}
                </select>
                <select
                    class="target-select"
                    prop:value=move || compare_with.get()
                    on:change=move |ev| compare_with.set(event_target_value(&ev))
                >
                    <option value="">"Compare with..."</option>
                    {move || {
                        let current_id = selected.get();
                        target_options()
                            .into_iter()
                            .filter(|(id, _)| *id != current_id)
                            .map(|(id, name)| view! { <option value=id>{name}</option> })
                            .collect_view()
                    }}
                </select>
                <Show when=move || !compare_with.with(String::is_empty)>
                    <label class="compare-days">
                        <span>"Days"</span>
                        <input
                            type="number"
                            min="1"
                            prop:value=move || compare_days.get()
                            on:input=move |ev| compare_days.set(event_target_value(&ev))
                        />
                    </label>
                </Show>
                <Show when=move || session.can(names::SET_ORGANISATION_OBJECTIVE)>
                    <button class="primary-btn" on:click=move |_| set_show_objective_form.set(true)>
                        "Set Objective"
                    </button>
                </Show>
            </div>

            {move || match current.get() {
                None => view! { <p class="empty-state">"No revenue objective selected."</p> }.into_any(),
                Some(target) => {
                    let id = target.id.clone();
                    let name = target.revenue_name.clone();
                    let legend_name = name.clone();
                    let period = period_label(&target);
                    let total = format!("Target: {:.2}", target.total_target);
                    view! {
                        <section class="objective-summary">
                            <div class="objective-heading">
                                <h2>{name}</h2>
                                <span class="objective-period">{period}</span>
                                <span class="objective-total">{total}</span>
                                <Show when=move || session.can(names::SET_ORGANISATION_OBJECTIVE)>
                                    {
                                        let id = id.clone();
                                        view! {
                                            <DeleteConfirmButton
                                                button_class="danger-btn"
                                                on_confirm=move |_| delete_target(id.clone())
                                            />
                                        }
                                    }
                                </Show>
                            </div>
                            <RevenueChart series=primary compare=secondary reference=reference />
                            <Show when=move || other.with(Option::is_some)>
                                <div class="chart-legend">
                                    <span class="legend-primary">{legend_name.clone()}</span>
                                    <span class="legend-secondary">
                                        {move || other.with(|o| o.as_ref().map(|o| o.revenue_name.clone()))}
                                    </span>
                                </div>
                            </Show>
                        </section>
                    }
                    .into_any()
                }
            }}

            <section class="branch-performance">
                <h3>"Branch performance"</h3>
                <table>
                    <thead>
                        <tr>
                            <th>"Branch"</th>
                            <th>"Achieved"</th>
                            <th>"Target"</th>
                            <th>"Performance"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            performance
                                .get()
                                .into_iter()
                                .map(|row| {
                                    let width = format!("width: {:.0}%", row.percent().clamp(0.0, 100.0));
                                    view! {
                                        <tr>
                                            <td>{row.name.clone()}</td>
                                            <td>{format!("{:.2}", row.achieved)}</td>
                                            <td>{format!("{:.2}", row.target)}</td>
                                            <td>
                                                <div class="progress-bar">
                                                    <div class="progress-fill" style=width></div>
                                                </div>
                                                <span>{row.label()}</span>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </section>

            <Show when=move || show_objective_form.get()>
                <RevenueTargetModal session=session on_close=move |_| set_show_objective_form.set(false) />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn target(start: Option<(i32, u32, u32)>, end: Option<(i32, u32, u32)>) -> RevenueTarget {
        let at = |(y, m, d): (i32, u32, u32)| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap();
        RevenueTarget {
            id: "r1".into(),
            revenue_name: "FY24".into(),
            start_date: start.map(at),
            end_date: end.map(at),
            total_target: 1000.0,
            target_branches: vec![],
        }
    }

    #[test]
    fn test_undated_target_covers_everything() {
        let range = target_range(&target(None, None));
        assert!(range.contains(NaiveDate::from_ymd_opt(1999, 1, 1).unwrap()));
        assert_eq!(period_label(&target(None, None)), "No period set");
    }

    #[test]
    fn test_period_label() {
        let t = target(Some((2024, 1, 1)), Some((2024, 12, 31)));
        assert_eq!(period_label(&t), "2024-01-01 to 2024-12-31");
        assert_eq!(target_range(&t).end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }
}
