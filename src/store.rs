//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The session
//! lives here; pages read it through [`crate::session::SessionHandle`].

use dashboard_domain::model::{Branch, RevenueTarget};
use dashboard_domain::session::Session;
use dashboard_domain::{remove_by_id, replace_by_id};
use leptos::prelude::*;
use reactive_stores::Store;

#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Logged-in user, `None` on the login screen
    pub session: Option<Session>,
    pub is_sidebar_open: bool,
    /// Branch list shared by the overview, organization page and forms
    pub branches: Vec<Branch>,
    pub revenue_targets: Vec<RevenueTarget>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            is_sidebar_open: true,
            ..Default::default()
        }
    }
}

pub type AppStore = Store<AppState>;

pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace a branch by id, appending it when new
pub fn store_upsert_branch(store: &AppStore, branch: Branch) {
    let field = store.branches();
    let mut branches = field.write();
    if let Some(previous) = replace_by_id(&mut branches, branch.clone()) {
        tracing::trace!(id = %previous.id, "Branch replaced in store");
    } else {
        branches.push(branch);
    }
}

pub fn store_remove_branch(store: &AppStore, branch_id: &str) {
    remove_by_id(&mut store.branches().write(), branch_id);
}

pub fn store_remove_revenue_target(store: &AppStore, revenue_id: &str) {
    remove_by_id(&mut store.revenue_targets().write(), revenue_id);
}

pub fn toggle_sidebar(store: &AppStore) {
    store.is_sidebar_open().update(|open| *open = !*open);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(id: &str, name: &str) -> Branch {
        Branch {
            id: id.into(),
            name: name.into(),
            description: String::new(),
        }
    }

    #[test]
    fn test_upsert_replaces_then_appends() {
        let owner = Owner::new();
        owner.set();
        let store = Store::new(AppState::new());

        store_upsert_branch(&store, branch("b1", "Lagos"));
        store_upsert_branch(&store, branch("b1", "Lagos Island"));
        store_upsert_branch(&store, branch("b2", "Abuja"));

        let names: Vec<String> = store.branches().with_untracked(|all| all.iter().map(|b| b.name.clone()).collect());
        assert_eq!(names, vec!["Lagos Island", "Abuja"]);

        store_remove_branch(&store, "b1");
        assert_eq!(store.branches().with_untracked(Vec::len), 1);
    }
}
