//! Pages
//!
//! The app has no router; the current [`Page`] lives in `AppContext` and is
//! mirrored to the location hash so a reload lands on the same view.

mod branch_detail;
mod dashboard;
mod login;
mod organization;
mod overview;
mod task_detail;
mod tasks;
mod trash;
mod users;

pub use branch_detail::BranchDetailPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use organization::OrganizationPage;
pub use overview::OverviewPage;
pub use task_detail::TaskDetailPage;
pub use tasks::TasksPage;
pub use trash::TrashPage;
pub use users::UsersPage;

use dashboard_domain::catalog::names;
use dashboard_domain::model::Stage;
use dashboard_domain::permissions::Gate;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
    Overview,
    #[default]
    Dashboard,
    /// Objectives, optionally narrowed to one stage
    Tasks(Option<Stage>),
    TaskDetail(String),
    Team,
    Trash,
    Organization,
    BranchDetail(String),
}

impl Page {
    pub fn path(&self) -> String {
        match self {
            Page::Overview => "/overview".to_string(),
            Page::Dashboard => "/dashboard".to_string(),
            Page::Tasks(None) => "/tasks".to_string(),
            Page::Tasks(Some(stage)) => format!("/tasks/{}", stage.as_str().replace(' ', "-")),
            Page::TaskDetail(id) => format!("/task/{id}"),
            Page::Team => "/team".to_string(),
            Page::Trash => "/trashed".to_string(),
            Page::Organization => "/organization".to_string(),
            Page::BranchDetail(id) => format!("/branch/{id}"),
        }
    }

    /// Unknown paths fall back to the dashboard
    pub fn from_path(path: &str) -> Self {
        let segments: Vec<&str> = path.trim_start_matches('#').split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["overview"] => Page::Overview,
            ["tasks"] => Page::Tasks(None),
            ["tasks", stage] => Page::Tasks(Stage::parse(stage)),
            ["task", id] => Page::TaskDetail(id.to_string()),
            ["team"] => Page::Team,
            ["trashed"] => Page::Trash,
            ["organization"] => Page::Organization,
            ["branch", id] => Page::BranchDetail(id.to_string()),
            _ => Page::Dashboard,
        }
    }

    /// Who may open the page, whether from the sidebar or a typed hash
    pub fn gate(&self) -> Gate {
        match self {
            Page::Overview => Gate::requires(names::ACCESS_ORGANISATION_DASHBOARD),
            Page::Dashboard => Gate::open(),
            Page::Tasks(_) => Gate::requires(names::VIEW_TASKS),
            Page::TaskDetail(_) => Gate::requires(names::VIEW_TASK_DETAILS),
            Page::Team => Gate::admin_only(),
            Page::Trash => Gate::requires(names::DELETE_TASK),
            Page::Organization => Gate::requires(names::VIEW_TEAM_LIST),
            Page::BranchDetail(_) => Gate::requires(names::VIEW_BRANCH_DETAILS),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Page::Overview => "Organization Overview".to_string(),
            Page::Dashboard => "Dashboard".to_string(),
            Page::Tasks(None) => "Objectives".to_string(),
            Page::Tasks(Some(stage)) => format!("{} Objectives", stage.label()),
            Page::TaskDetail(_) => "Objective".to_string(),
            Page::Team => "Employees".to_string(),
            Page::Trash => "Trash".to_string(),
            Page::Organization => "Organization".to_string(),
            Page::BranchDetail(_) => "Branch".to_string(),
        }
    }
}

pub fn read_location() -> Page {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .map(|hash| Page::from_path(&hash))
        .unwrap_or_default()
}

pub fn write_location(page: &Page) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_hash(&page.path()) {
            tracing::debug!(error = ?e, "Could not update location hash");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        let pages = [
            Page::Overview,
            Page::Dashboard,
            Page::Tasks(None),
            Page::Tasks(Some(Stage::InProgress)),
            Page::TaskDetail("t1".into()),
            Page::Team,
            Page::Trash,
            Page::Organization,
            Page::BranchDetail("b1".into()),
        ];
        for page in pages {
            assert_eq!(Page::from_path(&page.path()), page);
        }
        assert_eq!(Page::Tasks(Some(Stage::InProgress)).path(), "/tasks/in-progress");
    }

    #[test]
    fn test_detail_pages_have_their_own_grants() {
        assert_eq!(Page::Dashboard.gate(), Gate::open());
        assert_eq!(
            Page::TaskDetail("t1".into()).gate(),
            Gate::requires(names::VIEW_TASK_DETAILS)
        );
        assert_eq!(Page::Tasks(Some(Stage::Todo)).gate(), Page::Tasks(None).gate());
    }

    #[test]
    fn test_unknown_hash_lands_on_dashboard() {
        assert_eq!(Page::from_path(""), Page::Dashboard);
        assert_eq!(Page::from_path("#/settings"), Page::Dashboard);
        assert_eq!(Page::from_path("#/tasks/completed"), Page::Tasks(Some(Stage::Completed)));
    }
}
