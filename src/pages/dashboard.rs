//! Dashboard Page
//!
//! Per-stage totals of the objectives the user can see, plus the most
//! recent ones.

use dashboard_domain::board::stage_shares;
use dashboard_domain::filter::{visible_tasks, TaskFilter};
use dashboard_domain::model::Task;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, task::DashboardSummary};
use crate::components::TaskTable;
use crate::context::use_app_context;
use crate::session::SessionHandle;

#[component]
pub fn DashboardPage(session: SessionHandle) -> impl IntoView {
    let ctx = use_app_context();
    let tasks = RwSignal::new(Vec::<Task>::new());
    let summary = RwSignal::new(DashboardSummary::default());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let client = session.client();
        spawn_local(async move {
            match api::task::all(&client).await {
                Ok(loaded) => tasks.set(loaded),
                Err(e) => ctx.report(session, &e),
            }
            match api::task::dashboard(&client).await {
                Ok(loaded) => summary.set(loaded),
                Err(e) => tracing::debug!(error = %e, "Dashboard summary unavailable"),
            }
        });
    });

    let visible = Memo::new(move |_| {
        let Some(viewer) = session.user() else {
            return Vec::new();
        };
        tasks.with(|all| {
            visible_tasks(all, &viewer, &TaskFilter::default())
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    });
    // Admins get the backend's latest ten; everyone else their own newest
    let recent = Signal::derive(move || {
        let latest = summary.with(|s| s.recent.clone());
        if session.is_admin() && !latest.is_empty() {
            return latest;
        }
        visible.with(|v| v.iter().rev().take(10).cloned().collect::<Vec<_>>())
    });

    view! {
        <div class="dashboard-page">
            <div class="stat-cards">
                <div class="stat-card">
                    <span class="stat-label">"Total objectives"</span>
                    <span class="stat-value">{move || visible.with(Vec::len)}</span>
                </div>
                {move || {
                    visible
                        .with(|v| stage_shares(v))
                        .into_iter()
                        .map(|share| {
                            view! {
                                <div class=format!("stat-card stage-{}", share.stage.as_str().replace(' ', "-"))>
                                    <span class="stat-label">{share.stage.label()}</span>
                                    <span class="stat-value">{share.count}</span>
                                    <span class="stat-share">{share.label()}</span>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <Show when=move || session.is_admin()>
                <p class="dashboard-org-total">
                    {move || format!("{} objectives across the organization", summary.with(|s| s.total_tasks))}
                </p>
            </Show>
            <h3>"Recent objectives"</h3>
            <TaskTable session=session tasks=recent />
        </div>
    }
}
