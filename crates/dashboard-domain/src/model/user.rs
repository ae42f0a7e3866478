use serde::{Deserialize, Serialize};

use super::Reference;

/// A named boolean capability grant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    pub name: String,
    #[serde(default)]
    pub value: bool,
}

impl PermissionGrant {
    pub fn granted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A member of the organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub gender: String,
    /// Branch id the user belongs to
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub role: Option<Reference>,
    #[serde(default)]
    pub permissions: Vec<PermissionGrant>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, rename = "profilePictureURL")]
    pub profile_picture_url: Option<String>,
}

/// The logged-in user as returned by the login endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(flatten)]
    pub user: User,
    /// Bearer token (JWT)
    #[serde(default)]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_user_round_trips_through_storage_shape() {
        let json = r#"{
            "_id": "u1",
            "name": "Jane Doe",
            "title": "Manager",
            "email": "jane@example.com",
            "branch": "b1",
            "role": {"_id": "r1", "name": "Branch Lead"},
            "isAdmin": false,
            "permissions": [{"name": "can view tasks", "value": true}],
            "profilePictureURL": "https://cdn.example.com/jane.png",
            "token": "abc.def.ghi"
        }"#;
        let auth: AuthUser = serde_json::from_str(json).unwrap();
        assert_eq!(auth.user.id, "u1");
        assert_eq!(auth.user.branch.as_deref(), Some("b1"));
        assert_eq!(auth.user.role.as_ref().and_then(|r| r.name()), Some("Branch Lead"));
        assert!(auth.user.is_active);
        assert_eq!(auth.token.as_deref(), Some("abc.def.ghi"));

        let stored = serde_json::to_value(&auth).unwrap();
        assert_eq!(stored["_id"], "u1");
        assert_eq!(stored["isAdmin"], false);
        assert_eq!(stored["profilePictureURL"], "https://cdn.example.com/jane.png");
        assert_eq!(stored["token"], "abc.def.ghi");
    }
}
