//! Permission Catalog
//!
//! The set of permission names a role can grant lives in
//! `permissions.toml`, grouped for display. Views and the role form both read
//! from here instead of repeating string literals.

use serde::Deserialize;

use crate::model::{PermissionGrant, Role};
use crate::{DomainError, DomainResult};

const BUNDLED: &str = include_str!("../permissions.toml");

/// Names referenced directly by views
pub mod names {
    pub const ACCESS_ORGANISATION_DASHBOARD: &str = "can access organisation dashboard";
    pub const SET_ORGANISATION_OBJECTIVE: &str = "can set organisation objective";
    pub const UPDATE_BRANCH_PROGRESS: &str = "can update branch progress";

    pub const CREATE_TASKS: &str = "can create tasks";
    pub const DUPLICATE_TASK: &str = "can duplicate task";
    pub const ADD_TASK_ACTIVITY: &str = "can add task activity";
    pub const VIEW_ALL_TASKS: &str = "can view all tasks";
    pub const VIEW_TASKS: &str = "can view tasks";
    pub const VIEW_TASK_DETAILS: &str = "can view task details";
    pub const EVALUATE_PERFORMANCE: &str = "can evaluate performance";
    pub const CREATE_SUBTASK: &str = "can create subtask";
    pub const UPDATE_TASK: &str = "can update task";
    pub const CHANGE_TASK_STAGE: &str = "can change task stage";
    pub const TRASH_TASK: &str = "can trash task";
    pub const DELETE_TASK: &str = "can delete task";

    pub const CREATE_BRANCHES: &str = "can create branches";
    pub const VIEW_BRANCHES: &str = "can view branches";
    pub const VIEW_ALL_BRANCHES: &str = "can view all branches";
    pub const VIEW_BRANCH_DETAILS: &str = "can view branch details";
    pub const UPDATE_BRANCHES: &str = "can update branches";
    pub const DELETE_BRANCHES: &str = "can delete branches";

    pub const CREATE_DEPARTMENTS: &str = "can create departments";
    pub const VIEW_DEPARTMENTS: &str = "can view departments";
    pub const UPDATE_DEPARTMENTS: &str = "can update departments";
    pub const DELETE_DEPARTMENTS: &str = "can delete departments";

    pub const CREATE_KPIS: &str = "can create KPIs";
    pub const VIEW_KPIS: &str = "can view KPIs";
    pub const UPDATE_KPIS: &str = "can update KPIs";
    pub const DELETE_KPIS: &str = "can delete KPIs";

    pub const CREATE_ROLES: &str = "can create roles";
    pub const VIEW_ROLES: &str = "can view roles";
    pub const UPDATE_ROLES: &str = "can update roles";
    pub const DELETE_ROLES: &str = "can delete roles";

    pub const VIEW_TEAM_LIST: &str = "can view team list";
    pub const VIEW_DASHBOARD: &str = "can view dashboard";
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PermissionGroup {
    pub title: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "group")]
    groups: Vec<PermissionGroup>,
}

/// One checkbox in the role form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionToggle {
    pub name: String,
    pub checked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionCatalog {
    groups: Vec<PermissionGroup>,
}

impl PermissionCatalog {
    /// Catalog compiled into the crate
    pub fn bundled() -> DomainResult<Self> {
        Self::from_toml(BUNDLED)
    }

    pub fn from_toml(source: &str) -> DomainResult<Self> {
        let file: CatalogFile = toml::from_str(source).map_err(|e| DomainError::Catalog(e.to_string()))?;

        let mut seen: Vec<&str> = Vec::new();
        for group in &file.groups {
            for name in &group.permissions {
                if seen.contains(&name.as_str()) {
                    return Err(DomainError::Catalog(format!("duplicate permission `{name}`")));
                }
                seen.push(name);
            }
        }

        Ok(Self { groups: file.groups })
    }

    pub fn groups(&self) -> &[PermissionGroup] {
        &self.groups
    }

    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().flat_map(|g| g.permissions.iter().map(String::as_str))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.all_names().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.permissions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Initial checkbox state for editing `role`
    pub fn toggles_for(&self, role: &Role) -> Vec<PermissionToggle> {
        self.toggles_from_grants(&role.permissions)
    }

    pub fn toggles_from_grants(&self, grants: &[PermissionGrant]) -> Vec<PermissionToggle> {
        self.all_names()
            .map(|name| PermissionToggle {
                name: name.to_string(),
                checked: grants.iter().any(|g| g.name == name && g.value),
            })
            .collect()
    }

    pub fn blank_toggles(&self) -> Vec<PermissionToggle> {
        self.toggles_from_grants(&[])
    }
}

/// Grants sent to the server: only the checked ones
pub fn selected_grants(toggles: &[PermissionToggle]) -> Vec<PermissionGrant> {
    toggles
        .iter()
        .filter(|t| t.checked)
        .map(|t| PermissionGrant::granted(t.name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = PermissionCatalog::bundled().unwrap();
        assert_eq!(catalog.groups().len(), 8);
        assert_eq!(catalog.len(), 46);
        assert_eq!(catalog.groups()[0].title, "Organisation");
    }

    #[test]
    fn test_view_constants_are_in_catalog() {
        let catalog = PermissionCatalog::bundled().unwrap();
        for name in [
            names::ACCESS_ORGANISATION_DASHBOARD,
            names::SET_ORGANISATION_OBJECTIVE,
            names::UPDATE_BRANCH_PROGRESS,
            names::CREATE_TASKS,
            names::DUPLICATE_TASK,
            names::ADD_TASK_ACTIVITY,
            names::VIEW_ALL_TASKS,
            names::VIEW_TASKS,
            names::VIEW_TASK_DETAILS,
            names::EVALUATE_PERFORMANCE,
            names::CREATE_SUBTASK,
            names::UPDATE_TASK,
            names::CHANGE_TASK_STAGE,
            names::TRASH_TASK,
            names::DELETE_TASK,
            names::CREATE_BRANCHES,
            names::VIEW_BRANCHES,
            names::VIEW_ALL_BRANCHES,
            names::VIEW_BRANCH_DETAILS,
            names::UPDATE_BRANCHES,
            names::DELETE_BRANCHES,
            names::CREATE_DEPARTMENTS,
            names::VIEW_DEPARTMENTS,
            names::UPDATE_DEPARTMENTS,
            names::DELETE_DEPARTMENTS,
            names::CREATE_KPIS,
            names::VIEW_KPIS,
            names::UPDATE_KPIS,
            names::DELETE_KPIS,
            names::CREATE_ROLES,
            names::VIEW_ROLES,
            names::UPDATE_ROLES,
            names::DELETE_ROLES,
            names::VIEW_TEAM_LIST,
            names::VIEW_DASHBOARD,
        ] {
            assert!(catalog.contains(name), "{name} missing from catalog");
        }
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let source = r#"
            [[group]]
            title = "A"
            permissions = ["can view tasks"]

            [[group]]
            title = "B"
            permissions = ["can view tasks"]
        "#;
        assert!(matches!(PermissionCatalog::from_toml(source), Err(DomainError::Catalog(_))));
    }

    #[test]
    fn test_role_toggles_round_trip_to_grants() {
        let catalog = PermissionCatalog::bundled().unwrap();
        let role = Role {
            id: "r1".to_string(),
            name: "Lead".to_string(),
            description: String::new(),
            branch: None,
            permissions: vec![
                PermissionGrant::granted(names::VIEW_TASKS),
                PermissionGrant::granted("not in the catalog"),
                PermissionGrant {
                    name: names::DELETE_TASK.to_string(),
                    value: false,
                },
            ],
        };

        let mut toggles = catalog.toggles_for(&role);
        assert_eq!(toggles.len(), catalog.len());
        assert_eq!(toggles.iter().filter(|t| t.checked).count(), 1);

        if let Some(t) = toggles.iter_mut().find(|t| t.name == names::CHANGE_TASK_STAGE) {
            t.checked = true;
        }
        let grants = selected_grants(&toggles);
        let granted: Vec<&str> = grants.iter().map(|g| g.name.as_str()).collect();
        // Catalog order, not click order
        assert_eq!(granted, vec![names::VIEW_TASKS, names::CHANGE_TASK_STAGE]);
        assert!(grants.iter().all(|g| g.value));
    }
}
