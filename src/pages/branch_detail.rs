//! Branch Detail Page
//!
//! Departments, roles and KPIs of one branch, each with its own create,
//! edit and delete grants.

use dashboard_domain::catalog::names;
use dashboard_domain::model::{Branch, Department, Kpi, Role};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiClient, ApiResult, Message};
use crate::components::{DeleteConfirmButton, DepartmentFormModal, KpiFormModal, RoleFormModal};
use crate::context::use_app_context;
use crate::session::SessionHandle;
use crate::store::{store_upsert_branch, use_app_store};

#[derive(Debug, Clone, PartialEq)]
enum Dialog {
    Closed,
    Department(Option<Department>),
    Role(Option<Role>),
    Kpi(Option<Kpi>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Departments,
    Roles,
    Kpis,
}

impl Section {
    fn title(&self) -> &'static str {
        match self {
            Section::Departments => "Departments",
            Section::Roles => "Roles",
            Section::Kpis => "KPIs",
        }
    }

    fn blank_form(&self) -> Dialog {
        match self {
            Section::Departments => Dialog::Department(None),
            Section::Roles => Dialog::Role(None),
            Section::Kpis => Dialog::Kpi(None),
        }
    }

    /// View, create, update, delete
    fn grants(&self) -> [&'static str; 4] {
        match self {
            Section::Departments => [
                names::VIEW_DEPARTMENTS,
                names::CREATE_DEPARTMENTS,
                names::UPDATE_DEPARTMENTS,
                names::DELETE_DEPARTMENTS,
            ],
            Section::Roles => [names::VIEW_ROLES, names::CREATE_ROLES, names::UPDATE_ROLES, names::DELETE_ROLES],
            Section::Kpis => [names::VIEW_KPIS, names::CREATE_KPIS, names::UPDATE_KPIS, names::DELETE_KPIS],
        }
    }

    async fn delete(&self, client: &ApiClient, id: &str) -> ApiResult<Message> {
        match self {
            Section::Departments => api::department::delete(client, id).await,
            Section::Roles => api::role::delete(client, id).await,
            Section::Kpis => api::kpi::delete(client, id).await,
        }
    }
}

/// A row in one of the three lists
#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: String,
    name: String,
    detail: String,
    edit: Dialog,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct BranchData {
    departments: Vec<Department>,
    roles: Vec<Role>,
    kpis: Vec<Kpi>,
}

impl BranchData {
    fn rows(&self, section: Section) -> Vec<Row> {
        match section {
            Section::Departments => self
                .departments
                .iter()
                .map(|d| Row {
                    id: d.id.clone(),
                    name: d.name.clone(),
                    detail: d.description.clone(),
                    edit: Dialog::Department(Some(d.clone())),
                })
                .collect(),
            Section::Roles => self
                .roles
                .iter()
                .map(|r| Row {
                    id: r.id.clone(),
                    name: r.name.clone(),
                    detail: format!("{} permissions", r.permissions.iter().filter(|p| p.value).count()),
                    edit: Dialog::Role(Some(r.clone())),
                })
                .collect(),
            Section::Kpis => self
                .kpis
                .iter()
                .map(|k| Row {
                    id: k.id.clone(),
                    name: k.name.clone(),
                    detail: k.kind.as_str().to_string(),
                    edit: Dialog::Kpi(Some(k.clone())),
                })
                .collect(),
        }
    }
}

async fn load(client: &ApiClient, branch_id: &str) -> ApiResult<(Branch, BranchData)> {
    let branch = api::branch::detail(client, branch_id).await?;
    let data = BranchData {
        departments: api::department::for_branch(client, branch_id).await?,
        roles: api::role::for_branch(client, branch_id).await?,
        kpis: api::kpi::for_branch(client, branch_id).await?,
    };
    Ok((branch, data))
}

#[component]
pub fn BranchDetailPage(session: SessionHandle, id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let branch = RwSignal::new(None::<Branch>);
    let data = RwSignal::new(BranchData::default());
    let dialog = RwSignal::new(Dialog::Closed);
    let branch_id = StoredValue::new(id);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let client = session.client();
        let id = branch_id.get_value();
        spawn_local(async move {
            match load(&client, &id).await {
                Ok((loaded, lists)) => {
                    store_upsert_branch(&store, loaded.clone());
                    branch.set(Some(loaded));
                    data.set(lists);
                }
                Err(e) => {
                    tracing::warn!(branch = %id, error = %e, "Branch detail failed to load");
                    ctx.report(session, &e);
                }
            }
        });
    });

    let remove = move |section: Section, id: String| {
        let client = session.client();
        spawn_local(async move {
            match section.delete(&client, &id).await {
                Ok(reply) => {
                    ctx.toast_reply(reply, &format!("{} entry deleted", section.title()));
                    ctx.reload();
                }
                Err(e) => ctx.report(session, &e),
            }
        });
    };

    let close = move |_: ()| dialog.set(Dialog::Closed);

    let section_view = move |section: Section| {
        let [view_grant, create_grant, update_grant, delete_grant] = section.grants();
        view! {
            <Show when=move || session.can(view_grant)>
                <section class="branch-section">
                    <div class="section-header">
                        <h3>{section.title()}</h3>
                        <Show when=move || session.can(create_grant)>
                            <button class="secondary-btn" on:click=move |_| dialog.set(section.blank_form())>
                                "Add"
                            </button>
                        </Show>
                    </div>
                    <ul class="entity-list">
                        <For
                            each=move || data.with(|d| d.rows(section))
                            key=|row| (row.id.clone(), row.name.clone(), row.detail.clone())
                            children=move |row| {
                                let edit = row.edit.clone();
                                let delete_id = row.id.clone();
                                view! {
                                    <li class="entity-row">
                                        <span class="entity-name">{row.name.clone()}</span>
                                        <span class="entity-detail">{row.detail.clone()}</span>
                                        <Show when=move || session.can(update_grant)>
                                            {
                                                let edit = edit.clone();
                                                view! {
                                                    <button class="icon-btn" on:click=move |_| dialog.set(edit.clone())>
                                                        "Edit"
                                                    </button>
                                                }
                                            }
                                        </Show>
                                        <Show when=move || session.can(delete_grant)>
                                            {
                                                let delete_id = delete_id.clone();
                                                view! {
                                                    <DeleteConfirmButton
                                                        button_class="icon-btn danger"
                                                        on_confirm=move |_| remove(section, delete_id.clone())
                                                    />
                                                }
                                            }
                                        </Show>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </section>
            </Show>
        }
    };

    view! {
        <div class="branch-detail-page">
            {move || {
                branch
                    .get()
                    .map(|b| {
                        view! {
                            <div class="page-toolbar">
                                <h2>{b.name.clone()}</h2>
                                <p class="branch-description">{b.description.clone()}</p>
                            </div>
                        }
                    })
            }}
            {section_view(Section::Departments)}
            {section_view(Section::Roles)}
            {section_view(Section::Kpis)}

            {move || {
                let id = branch_id.get_value();
                match dialog.get() {
                    Dialog::Closed => None,
                    Dialog::Department(existing) => Some(view! {
                        <DepartmentFormModal session=session branch_id=id existing=existing on_close=close />
                    }.into_any()),
                    Dialog::Role(existing) => Some(view! {
                        <RoleFormModal session=session branch_id=id existing=existing on_close=close />
                    }.into_any()),
                    Dialog::Kpi(existing) => Some(view! {
                        <KpiFormModal session=session branch_id=id existing=existing on_close=close />
                    }.into_any()),
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_domain::model::{KpiType, PermissionGrant};

    #[test]
    fn test_role_rows_count_only_granted_permissions() {
        let data = BranchData {
            roles: vec![Role {
                id: "r1".into(),
                name: "Lead".into(),
                description: String::new(),
                branch: None,
                permissions: vec![
                    PermissionGrant::granted(names::VIEW_TASKS),
                    PermissionGrant {
                        name: names::DELETE_TASK.into(),
                        value: false,
                    },
                ],
            }],
            kpis: vec![Kpi {
                id: "k1".into(),
                name: "Sales".into(),
                kind: KpiType::Monetary,
                branch: None,
            }],
            ..BranchData::default()
        };

        let roles = data.rows(Section::Roles);
        assert_eq!(roles[0].detail, "1 permissions");
        assert_eq!(data.rows(Section::Kpis)[0].detail, "Monetary");
        assert!(data.rows(Section::Departments).is_empty());
    }

    #[test]
    fn test_each_section_has_four_distinct_grants() {
        for section in [Section::Departments, Section::Roles, Section::Kpis] {
            let grants = section.grants();
            assert!(grants.iter().all(|g| g.starts_with("can ")));
            assert_eq!(grants.iter().collect::<std::collections::HashSet<_>>().len(), 4);
        }
    }
}
