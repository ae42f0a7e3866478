//! Permission Gating
//!
//! Client-side visibility rules. A gated element is shown only when the
//! logged-in user holds the permission it names. This is advisory: the
//! backend enforces the real checks.

use crate::model::PermissionGrant;

/// Flat, ordered list of the permission names a user holds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantedPermissions {
    names: Vec<String>,
}

impl GrantedPermissions {
    /// Keep names whose value is true, in order, without duplicates
    pub fn from_grants(grants: &[PermissionGrant]) -> Self {
        let mut names: Vec<String> = Vec::with_capacity(grants.len());
        for grant in grants.iter().filter(|g| g.value) {
            if !names.contains(&grant.name) {
                names.push(grant.name.clone());
            }
        }
        Self { names }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let grants: Vec<PermissionGrant> = names.into_iter().map(PermissionGrant::granted).collect();
        Self::from_grants(&grants)
    }

    pub fn allows(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Visibility requirement declared by a link or action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gate {
    pub permission: Option<&'static str>,
    pub admin_only: bool,
}

impl Gate {
    /// Always visible
    pub const fn open() -> Self {
        Self {
            permission: None,
            admin_only: false,
        }
    }

    pub const fn requires(name: &'static str) -> Self {
        Self {
            permission: Some(name),
            admin_only: false,
        }
    }

    pub const fn admin_only() -> Self {
        Self {
            permission: None,
            admin_only: true,
        }
    }

    pub fn permits(&self, granted: &GrantedPermissions, is_admin: bool) -> bool {
        if self.admin_only && !is_admin {
            return false;
        }
        match self.permission {
            Some(name) => granted.allows(name),
            None => true,
        }
    }
}

/// Anything that declares a [`Gate`]
pub trait Gated {
    fn gate(&self) -> Gate;
}

/// Filter a gated list down to what the user may see
pub fn visible<'a, T: Gated>(items: &'a [T], granted: &GrantedPermissions, is_admin: bool) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| item.gate().permits(granted, is_admin))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Link(&'static str, Gate);

    impl Gated for Link {
        fn gate(&self) -> Gate {
            self.1
        }
    }

    fn grant(name: &str, value: bool) -> PermissionGrant {
        PermissionGrant {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_from_grants_keeps_order_and_drops_false() {
        let granted = GrantedPermissions::from_grants(&[
            grant("can view tasks", true),
            grant("can delete task", false),
            grant("can view team list", true),
            grant("can view tasks", true),
        ]);
        assert_eq!(granted.names(), &["can view tasks".to_string(), "can view team list".to_string()]);
        assert!(!granted.allows("can delete task"));
    }

    #[test]
    fn test_visibility_matches_membership() {
        let links = [
            Link("overview", Gate::open()),
            Link("tasks", Gate::requires("can view tasks")),
            Link("team", Gate::requires("can view team list")),
            Link("settings", Gate::admin_only()),
        ];
        let catalog = ["can view tasks", "can view team list", "can view dashboard"];

        // Every subset of the catalog, admin and non-admin
        for mask in 0..(1u32 << catalog.len()) {
            let names: Vec<&str> = catalog
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, n)| *n)
                .collect();
            let granted = GrantedPermissions::from_names(names.iter().copied());

            for is_admin in [false, true] {
                let shown: Vec<&str> = visible(&links, &granted, is_admin).iter().map(|l| l.0).collect();
                for link in &links {
                    let expected = match link.1.permission {
                        Some(required) => names.contains(&required),
                        None => !link.1.admin_only || is_admin,
                    };
                    assert_eq!(shown.contains(&link.0), expected, "{} mask={mask} admin={is_admin}", link.0);
                }
            }
        }
    }

    #[test]
    fn test_empty_grants_only_show_open_links() {
        let links = [Link("overview", Gate::open()), Link("tasks", Gate::requires("can view tasks"))];
        let shown = visible(&links, &GrantedPermissions::default(), false);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, "overview");
    }
}
