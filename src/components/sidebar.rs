//! Sidebar Navigation
//!
//! Each link declares a [`Gate`]; only links the signed-in user passes are
//! rendered.

use dashboard_domain::catalog::names;
use dashboard_domain::model::Stage;
use dashboard_domain::permissions::{visible, Gate, Gated};
use leptos::prelude::*;

use crate::context::use_app_context;
use crate::pages::Page;
use crate::session::SessionHandle;
use crate::store::{use_app_store, AppStateStoreFields};

#[derive(Debug, Clone, PartialEq)]
pub enum NavTarget {
    Page(Page),
    /// Opens the branch progress modal instead of navigating
    BranchProgress,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub label: &'static str,
    pub target: NavTarget,
    pub gate: Gate,
}

impl Gated for NavLink {
    fn gate(&self) -> Gate {
        self.gate
    }
}

fn link(label: &'static str, page: Page) -> NavLink {
    NavLink {
        label,
        gate: page.gate(),
        target: NavTarget::Page(page),
    }
}

pub fn nav_links() -> Vec<NavLink> {
    vec![
        link("Organization Overview", Page::Overview),
        link("Dashboard", Page::Dashboard),
        link("Objectives", Page::Tasks(None)),
        link("Completed", Page::Tasks(Some(Stage::Completed))),
        link("In Progress", Page::Tasks(Some(Stage::InProgress))),
        link("To Do", Page::Tasks(Some(Stage::Todo))),
        NavLink {
            label: "Branch Progress",
            target: NavTarget::BranchProgress,
            gate: Gate::requires(names::UPDATE_BRANCH_PROGRESS),
        },
        link("Employees", Page::Team),
        link("Trash", Page::Trash),
        link("Organization", Page::Organization),
    ]
}

#[component]
pub fn Sidebar(session: SessionHandle) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let links = StoredValue::new(nav_links());

    let visible_links = move || {
        let granted = session.permissions();
        let is_admin = session.is_admin();
        links.with_value(|all| visible(all, &granted, is_admin).into_iter().cloned().collect::<Vec<_>>())
    };

    view! {
        <aside class=move || if store.is_sidebar_open().get() { "sidebar open" } else { "sidebar" }>
            <div class="sidebar-brand">"Objectives"</div>
            <nav class="sidebar-links">
                {move || {
                    visible_links()
                        .into_iter()
                        .map(|nav| {
                            let target = nav.target.clone();
                            let active_target = nav.target.clone();
                            let is_active = move || match &active_target {
                                NavTarget::Page(page) => ctx.page.get() == *page,
                                NavTarget::BranchProgress => ctx.progress_open.get(),
                            };
                            view! {
                                <button
                                    class=move || if is_active() { "sidebar-link active" } else { "sidebar-link" }
                                    on:click=move |_| match &target {
                                        NavTarget::Page(page) => ctx.navigate(page.clone()),
                                        NavTarget::BranchProgress => ctx.progress_open.set(true),
                                    }
                                >
                                    {nav.label}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </nav>
        </aside>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_domain::permissions::GrantedPermissions;

    fn labels(granted: &GrantedPermissions, is_admin: bool) -> Vec<&'static str> {
        let links = nav_links();
        visible(&links, granted, is_admin).iter().map(|l| l.label).collect()
    }

    #[test]
    fn test_no_grants_only_shows_dashboard() {
        assert_eq!(labels(&GrantedPermissions::default(), false), vec!["Dashboard"]);
    }

    #[test]
    fn test_task_grants_show_objective_links() {
        let granted = GrantedPermissions::from_names([names::VIEW_TASKS, names::UPDATE_BRANCH_PROGRESS]);
        assert_eq!(
            labels(&granted, false),
            vec!["Dashboard", "Objectives", "Completed", "In Progress", "To Do", "Branch Progress"]
        );
    }

    #[test]
    fn test_employees_link_needs_admin_flag() {
        let granted = GrantedPermissions::default();
        assert!(!labels(&granted, false).contains(&"Employees"));
        assert!(labels(&granted, true).contains(&"Employees"));
    }

    #[test]
    fn test_every_gate_names_a_catalog_permission() {
        let catalog = dashboard_domain::catalog::PermissionCatalog::bundled().unwrap();
        for link in nav_links() {
            if let Some(name) = link.gate.permission {
                assert!(catalog.contains(name), "{name} missing from catalog");
            }
        }
    }
}
