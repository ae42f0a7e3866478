//! Task visibility for list and board views

use crate::model::{Stage, Task, User};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Only tasks in this stage
    pub stage: Option<Stage>,
    /// Branch id; only narrows what the viewer may already see
    pub branch: Option<String>,
    /// Department name; `None` means no department restriction
    pub department: Option<String>,
    /// List trashed tasks instead of live ones
    pub trashed: bool,
}

impl TaskFilter {
    pub fn for_stage(stage: Option<Stage>) -> Self {
        Self {
            stage,
            ..Self::default()
        }
    }

    pub fn trash() -> Self {
        Self {
            trashed: true,
            ..Self::default()
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    fn matches(&self, task: &Task) -> bool {
        task.is_trashed == self.trashed
            && self.stage.is_none_or(|s| task.stage == s)
            && self.branch.as_deref().is_none_or(|b| task.branch.as_deref() == Some(b))
            && self
                .department
                .as_deref()
                .is_none_or(|d| task.department.as_deref() == Some(d))
    }
}

/// Tasks `viewer` may see under `filter`.
///
/// Admins see every branch; everyone else only tasks of their own branch.
pub fn visible_tasks<'a>(tasks: &'a [Task], viewer: &User, filter: &TaskFilter) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| viewer.is_admin || (task.branch.is_some() && task.branch == viewer.branch))
        .filter(|task| filter.matches(task))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(id: &str, branch: &str, department: &str, stage: Stage) -> Task {
        Task {
            id: id.into(),
            title: id.into(),
            date: Utc::now(),
            stage,
            priority: Default::default(),
            team: vec![],
            assets: vec![],
            kpi: None,
            monetary_value: None,
            percent_value: None,
            sub_tasks: vec![],
            activities: vec![],
            branch: Some(branch.into()),
            department: Some(department.into()),
            is_trashed: false,
        }
    }

    fn viewer(branch: &str, is_admin: bool) -> User {
        serde_json::from_value(serde_json::json!({
            "_id": "u1",
            "name": "Viewer",
            "branch": branch,
            "isAdmin": is_admin,
        }))
        .unwrap()
    }

    fn ids(tasks: Vec<&Task>) -> Vec<&str> {
        tasks.into_iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_branch_scoping() {
        let tasks = vec![
            task("a", "b1", "Sales", Stage::Todo),
            task("b", "b2", "Sales", Stage::Todo),
            task("c", "b1", "Ops", Stage::Completed),
        ];
        let sales = TaskFilter::default().with_department("Sales");

        assert_eq!(ids(visible_tasks(&tasks, &viewer("b1", false), &sales)), vec!["a"]);
        assert_eq!(ids(visible_tasks(&tasks, &viewer("b1", true), &sales)), vec!["a", "b"]);
        assert_eq!(
            ids(visible_tasks(&tasks, &viewer("b1", false), &TaskFilter::for_stage(Some(Stage::Completed)))),
            vec!["c"]
        );
    }

    #[test]
    fn test_branch_filter_narrows_admin_view() {
        let tasks = vec![task("a", "b1", "Sales", Stage::Todo), task("b", "b2", "Sales", Stage::Todo)];
        let only_b2 = TaskFilter::default().with_branch("b2");

        assert_eq!(ids(visible_tasks(&tasks, &viewer("b1", true), &only_b2)), vec!["b"]);
        assert!(visible_tasks(&tasks, &viewer("b1", false), &only_b2).is_empty());
    }

    #[test]
    fn test_trash_view() {
        let mut trashed = task("t", "b1", "Sales", Stage::Todo);
        trashed.is_trashed = true;
        let tasks = vec![task("a", "b1", "Sales", Stage::Todo), trashed];

        let admin = viewer("b1", true);
        assert_eq!(ids(visible_tasks(&tasks, &admin, &TaskFilter::trash())), vec!["t"]);
        assert_eq!(ids(visible_tasks(&tasks, &admin, &TaskFilter::default())), vec!["a"]);
    }
}
