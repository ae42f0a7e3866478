//! REST Endpoint Table
//!
//! Every backend route the app calls, as a method plus a path relative to
//! the API base URL.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Method;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Branch,
    Department,
    Kpi,
    Role,
    Task,
    Revenue,
}

impl Resource {
    pub fn prefix(&self) -> &'static str {
        match self {
            Resource::User => "user",
            Resource::Branch => "branch",
            Resource::Department => "department",
            Resource::Kpi => "kpi",
            Resource::Role => "role",
            Resource::Task => "task",
            Resource::Revenue => "revenue",
        }
    }
}

/// `actionType` for `task/delete-restore`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrashAction {
    Delete,
    DeleteAll,
    Restore,
    RestoreAll,
}

impl TrashAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrashAction::Delete => "delete",
            TrashAction::DeleteAll => "deleteAll",
            TrashAction::Restore => "restore",
            TrashAction::RestoreAll => "restoreAll",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
}

fn segment(id: &str) -> String {
    utf8_percent_encode(id, SEGMENT).to_string()
}

impl Endpoint {
    fn new(method: Method, resource: Resource, tail: &str) -> Self {
        let path = if tail.is_empty() {
            resource.prefix().to_string()
        } else {
            format!("{}/{}", resource.prefix(), tail)
        };
        Self { method, path }
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.path)
    }

    // ========================
    // Shared CRUD routes
    // ========================

    pub fn create(resource: Resource) -> Self {
        Self::new(Method::POST, resource, "create")
    }

    pub fn update(resource: Resource, id: &str) -> Self {
        Self::new(Method::PUT, resource, &format!("update/{}", segment(id)))
    }

    pub fn delete(resource: Resource, id: &str) -> Self {
        Self::new(Method::DELETE, resource, &format!("delete/{}", segment(id)))
    }

    pub fn detail(resource: Resource, id: &str) -> Self {
        Self::new(Method::GET, resource, &format!("detail/{}", segment(id)))
    }

    pub fn all(resource: Resource) -> Self {
        Self::new(Method::GET, resource, "all")
    }

    /// Department, KPI and role lists scoped to a branch (`{branchId}` body)
    pub fn for_branch(resource: Resource) -> Self {
        Self::new(Method::POST, resource, "get")
    }

    pub fn branches() -> Self {
        Self::new(Method::GET, Resource::Branch, "get")
    }

    // ========================
    // User
    // ========================

    pub fn login() -> Self {
        Self::new(Method::POST, Resource::User, "login")
    }

    pub fn logout() -> Self {
        Self::new(Method::POST, Resource::User, "logout")
    }

    pub fn register() -> Self {
        Self::new(Method::POST, Resource::User, "register")
    }

    pub fn profile() -> Self {
        Self::new(Method::PUT, Resource::User, "profile")
    }

    pub fn team() -> Self {
        Self::new(Method::GET, Resource::User, "get-team")
    }

    /// Activate or deactivate
    pub fn user_status(id: &str) -> Self {
        Self::new(Method::PUT, Resource::User, &segment(id))
    }

    pub fn delete_user(id: &str) -> Self {
        Self::new(Method::DELETE, Resource::User, &segment(id))
    }

    // ========================
    // Task
    // ========================

    pub fn task(id: &str) -> Self {
        Self::new(Method::GET, Resource::Task, &segment(id))
    }

    pub fn duplicate_task(id: &str) -> Self {
        Self::new(Method::POST, Resource::Task, &format!("duplicate/{}", segment(id)))
    }

    pub fn create_subtask(id: &str) -> Self {
        Self::new(Method::PUT, Resource::Task, &format!("create-subtask/{}", segment(id)))
    }

    pub fn post_activity(id: &str) -> Self {
        Self::new(Method::POST, Resource::Task, &format!("activity/{}", segment(id)))
    }

    pub fn trash_task(id: &str) -> Self {
        Self::new(Method::PUT, Resource::Task, &segment(id))
    }

    pub fn delete_restore(id: &str, action: TrashAction) -> Self {
        Self::new(
            Method::DELETE,
            Resource::Task,
            &format!("delete-restore/{}?actionType={}", segment(id), action.as_str()),
        )
    }

    pub fn task_dashboard() -> Self {
        Self::new(Method::GET, Resource::Task, "dashboard")
    }

    pub fn performance() -> Self {
        Self::new(Method::POST, Resource::Task, "performance/evaluation")
    }

    pub fn change_stage(id: &str) -> Self {
        Self::new(Method::PUT, Resource::Task, &format!("change-stage/{}", segment(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(e: Endpoint) -> (String, String) {
        (e.method.to_string(), e.path)
    }

    fn expect(method: &str, path: &str) -> (String, String) {
        (method.to_string(), path.to_string())
    }

    #[test]
    fn test_user_routes() {
        assert_eq!(route(Endpoint::login()), expect("POST", "user/login"));
        assert_eq!(route(Endpoint::logout()), expect("POST", "user/logout"));
        assert_eq!(route(Endpoint::register()), expect("POST", "user/register"));
        assert_eq!(route(Endpoint::profile()), expect("PUT", "user/profile"));
        assert_eq!(route(Endpoint::team()), expect("GET", "user/get-team"));
        assert_eq!(route(Endpoint::user_status("u1")), expect("PUT", "user/u1"));
        assert_eq!(route(Endpoint::delete_user("u1")), expect("DELETE", "user/u1"));
    }

    #[test]
    fn test_branch_and_scoped_routes() {
        assert_eq!(route(Endpoint::create(Resource::Branch)), expect("POST", "branch/create"));
        assert_eq!(route(Endpoint::update(Resource::Branch, "b1")), expect("PUT", "branch/update/b1"));
        assert_eq!(route(Endpoint::delete(Resource::Branch, "b1")), expect("DELETE", "branch/delete/b1"));
        assert_eq!(route(Endpoint::detail(Resource::Branch, "b1")), expect("GET", "branch/detail/b1"));
        assert_eq!(route(Endpoint::branches()), expect("GET", "branch/get"));

        for (resource, prefix) in [
            (Resource::Department, "department"),
            (Resource::Kpi, "kpi"),
            (Resource::Role, "role"),
        ] {
            assert_eq!(route(Endpoint::create(resource)), expect("POST", &format!("{prefix}/create")));
            assert_eq!(route(Endpoint::update(resource, "x")), expect("PUT", &format!("{prefix}/update/x")));
            assert_eq!(route(Endpoint::delete(resource, "x")), expect("DELETE", &format!("{prefix}/delete/x")));
            assert_eq!(route(Endpoint::for_branch(resource)), expect("POST", &format!("{prefix}/get")));
            assert_eq!(route(Endpoint::all(resource)), expect("GET", &format!("{prefix}/all")));
        }
    }

    #[test]
    fn test_task_routes() {
        assert_eq!(route(Endpoint::create(Resource::Task)), expect("POST", "task/create"));
        assert_eq!(route(Endpoint::duplicate_task("t1")), expect("POST", "task/duplicate/t1"));
        assert_eq!(route(Endpoint::update(Resource::Task, "t1")), expect("PUT", "task/update/t1"));
        assert_eq!(route(Endpoint::all(Resource::Task)), expect("GET", "task/all"));
        assert_eq!(route(Endpoint::task("t1")), expect("GET", "task/t1"));
        assert_eq!(route(Endpoint::create_subtask("t1")), expect("PUT", "task/create-subtask/t1"));
        assert_eq!(route(Endpoint::post_activity("t1")), expect("POST", "task/activity/t1"));
        assert_eq!(route(Endpoint::trash_task("t1")), expect("PUT", "task/t1"));
        assert_eq!(
            route(Endpoint::delete_restore("t1", TrashAction::RestoreAll)),
            expect("DELETE", "task/delete-restore/t1?actionType=restoreAll")
        );
        assert_eq!(route(Endpoint::task_dashboard()), expect("GET", "task/dashboard"));
        assert_eq!(route(Endpoint::performance()), expect("POST", "task/performance/evaluation"));
        assert_eq!(route(Endpoint::change_stage("t1")), expect("PUT", "task/change-stage/t1"));
    }

    #[test]
    fn test_revenue_routes() {
        assert_eq!(route(Endpoint::create(Resource::Revenue)), expect("POST", "revenue/create"));
        assert_eq!(route(Endpoint::update(Resource::Revenue, "r1")), expect("PUT", "revenue/update/r1"));
        assert_eq!(route(Endpoint::delete(Resource::Revenue, "r1")), expect("DELETE", "revenue/delete/r1"));
        assert_eq!(route(Endpoint::detail(Resource::Revenue, "r1")), expect("GET", "revenue/detail/r1"));
        assert_eq!(route(Endpoint::all(Resource::Revenue)), expect("GET", "revenue/all"));
    }

    #[test]
    fn test_url_joins_base_and_escapes_ids() {
        let endpoint = Endpoint::task("a/b c");
        assert_eq!(endpoint.path, "task/a%2Fb%20c");
        assert_eq!(
            Endpoint::team().url("http://localhost:8800/api/"),
            "http://localhost:8800/api/user/get-team"
        );
    }
}
