//! Task Form Modal
//!
//! Create or edit an objective. A KPI must be chosen; the target value
//! field shown depends on the KPI type. Picked asset files are uploaded
//! before the task is saved.

use dashboard_domain::distribution::parse_amount;
use dashboard_domain::find_by_id;
use dashboard_domain::forms::{validate_form, TaskForm};
use dashboard_domain::model::{Department, Kpi, KpiType, Priority, Stage, Task, TaskKpi, User};
use dashboard_domain::util::date_formatter;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, upload::PickedFile, ApiClient, ApiResult};
use crate::components::{FileField, Modal, SelectField, TextField};
use crate::context::use_app_context;
use crate::session::SessionHandle;
use crate::store::{use_app_store, AppStateStoreFields};

#[derive(Debug, Clone, Default)]
struct Choices {
    kpis: Vec<Kpi>,
    departments: Vec<Department>,
    team: Vec<User>,
}

/// Admins pick from every branch; everyone else from their own
async fn load_choices(client: &ApiClient, is_admin: bool, branch_id: Option<String>) -> ApiResult<Choices> {
    let team = api::auth::team(client).await?;
    let (kpis, departments) = match (is_admin, branch_id) {
        (false, Some(branch)) => (
            api::kpi::for_branch(client, &branch).await?,
            api::department::for_branch(client, &branch).await?,
        ),
        _ => (api::kpi::all(client).await?, api::department::all(client).await?),
    };
    Ok(Choices { kpis, departments, team })
}

fn amount_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[component]
pub fn TaskFormModal(
    session: SessionHandle,
    /// `None` creates a new task
    existing: Option<Task>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let editing_id = existing.as_ref().map(|t| t.id.clone());
    let is_edit = editing_id.is_some();
    let existing_assets = existing.as_ref().map(|t| t.assets.clone()).unwrap_or_default();

    let title = RwSignal::new(existing.as_ref().map(|t| t.title.clone()).unwrap_or_default());
    let date = RwSignal::new(
        existing
            .as_ref()
            .map(|t| date_formatter(&t.date.to_rfc3339()))
            .unwrap_or_default(),
    );
    let stage = RwSignal::new(existing.as_ref().map(|t| t.stage).unwrap_or_default().as_str().to_string());
    let priority = RwSignal::new(existing.as_ref().map(|t| t.priority).unwrap_or_default().as_str().to_string());
    let kpi_id = RwSignal::new(
        existing
            .as_ref()
            .and_then(|t| t.kpi.as_ref())
            .map(|k| k.id.clone())
            .unwrap_or_default(),
    );
    let monetary = RwSignal::new(amount_text(existing.as_ref().and_then(|t| t.monetary_value)));
    let percent = RwSignal::new(amount_text(existing.as_ref().and_then(|t| t.percent_value)));
    let department = RwSignal::new(existing.as_ref().and_then(|t| t.department.clone()).unwrap_or_default());
    let branch = RwSignal::new(
        existing
            .as_ref()
            .and_then(|t| t.branch.clone())
            .or_else(|| session.branch_id())
            .unwrap_or_default(),
    );
    let team = RwSignal::new(
        existing
            .as_ref()
            .map(|t| t.team.iter().map(|m| m.id().to_string()).collect::<Vec<_>>())
            .unwrap_or_default(),
    );
    let assets = RwSignal::new(Vec::<PickedFile>::new());
    let choices = RwSignal::new(Choices::default());
    let (submitting, set_submitting) = signal(false);

    let client = session.client();
    let is_admin = session.is_admin();
    let own_branch = session.branch_id();
    spawn_local(async move {
        match load_choices(&client, is_admin, own_branch).await {
            Ok(loaded) => choices.set(loaded),
            Err(e) => ctx.report(session, &e),
        }
    });

    let selected_kpi = move || {
        let id = kpi_id.get();
        choices.with(|c| find_by_id(&c.kpis, &id).cloned())
    };
    let kpi_kind = move || selected_kpi().map(|k| k.kind);

    let kpi_options = Signal::derive(move || {
        choices.with(|c| {
            c.kpis
                .iter()
                .map(|k| (k.id.clone(), format!("{} ({})", k.name, k.kind.as_str())))
                .collect()
        })
    });
    let department_options = Signal::derive(move || {
        let branch_id = branch.get();
        choices.with(|c| {
            c.departments
                .iter()
                .filter(|d| branch_id.is_empty() || d.belongs_to(&branch_id))
                .map(|d| (d.name.clone(), d.name.clone()))
                .collect()
        })
    });
    let branch_options = Signal::derive(move || {
        store
            .branches()
            .with(|all| all.iter().map(|b| (b.id.clone(), b.name.clone())).collect())
    });
    let stage_options: Vec<(String, String)> = Stage::SELECTABLE
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect();
    let priority_options: Vec<(String, String)> = Priority::ALL
        .iter()
        .map(|p| (p.as_str().to_string(), p.as_str().to_string()))
        .collect();

    let editing_id = StoredValue::new(editing_id);
    let existing_assets = StoredValue::new(existing_assets);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let kpi = selected_kpi().map(|k| TaskKpi {
            id: k.id,
            name: k.name,
            kind: k.kind,
        });
        let kind = kpi.as_ref().map(|k| k.kind);
        let mut form = TaskForm {
            title: title.get_untracked().trim().to_string(),
            date: date.get_untracked(),
            stage: Stage::parse(&stage.get_untracked()).unwrap_or_default(),
            priority: Priority::parse(&priority.get_untracked()).unwrap_or_default(),
            team: team.get_untracked(),
            assets: existing_assets.get_value(),
            kpi,
            monetary_value: if kind == Some(KpiType::Monetary) { parse_amount(&monetary.get_untracked()) } else { 0.0 },
            percent_value: if kind == Some(KpiType::Percentage) { parse_amount(&percent.get_untracked()) } else { 0.0 },
            branch: branch.get_untracked(),
            department: department.get_untracked(),
        };
        if let Err(e) = validate_form(&form) {
            ctx.toast_error(e.to_string());
            return;
        }

        set_submitting.set(true);
        let client = session.client();
        let storage = session.storage();
        let files = assets.get_untracked();
        spawn_local(async move {
            let saved = async {
                form.assets.extend(storage.upload_all(files).await?);
                match editing_id.get_value() {
                    Some(id) => api::task::update(&client, &id, &form).await,
                    None => api::task::create(&client, &form).await,
                }
            }
            .await;
            match saved {
                Ok(reply) => {
                    ctx.toast_reply(reply, if is_edit { "Objective updated" } else { "Objective created" });
                    ctx.reload();
                    on_close.run(());
                }
                Err(e) => ctx.report(session, &e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <Modal title=if is_edit { "Update Objective" } else { "Add Objective" } on_close=on_close wide=true>
            <form class="task-form" on:submit=on_submit>
                <TextField label="Title" value=title />
                <div class="field-row">
                    <TextField label="Date" value=date input_type="date" />
                    <SelectField label="Stage" value=stage options=stage_options />
                    <SelectField label="Priority" value=priority options=priority_options />
                </div>

                <Show when=move || is_admin>
                    <SelectField label="Branch" value=branch options=branch_options />
                </Show>
                <SelectField label="Department" value=department options=department_options />
                <SelectField label="KPI" value=kpi_id options=kpi_options placeholder="Select a KPI" />

                <Show when=move || kpi_kind() == Some(KpiType::Monetary)>
                    <TextField label="Monetary target" value=monetary input_type="number" />
                </Show>
                <Show when=move || kpi_kind() == Some(KpiType::Percentage)>
                    <TextField label="Percentage target" value=percent input_type="number" />
                </Show>

                <fieldset class="team-picker">
                    <legend>"Assign team"</legend>
                    <For
                        each=move || choices.with(|c| c.team.clone())
                        key=|user| user.id.clone()
                        children=move |user| {
                            let id = user.id.clone();
                            let toggle_id = user.id.clone();
                            view! {
                                <label class="checkbox">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || team.with(|t| t.contains(&id))
                                        on:change=move |ev| {
                                            let checked = event_target_checked(&ev);
                                            team.update(|t| {
                                                t.retain(|m| m != &toggle_id);
                                                if checked {
                                                    t.push(toggle_id.clone());
                                                }
                                            });
                                        }
                                    />
                                    <span>{user.name.clone()}</span>
                                </label>
                            }
                        }
                    />
                </fieldset>

                <FileField label="Assets" files=assets multiple=true accept="*/*" />

                <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Saving..." } else { "Submit" }}
                </button>
            </form>
        </Modal>
    }
}
