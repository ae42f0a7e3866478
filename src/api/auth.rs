//! User Routes
//!
//! Login/logout, registration, profile updates and team management.

use dashboard_domain::forms::{LoginForm, UserForm};
use dashboard_domain::model::{AuthUser, User};
use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiResult, Endpoint, Message};

/// Reply to `user/register`
#[derive(Debug, Clone, Deserialize)]
pub struct Registered {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Reply to `user/profile`
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdated {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Serialize)]
struct UserUpdateArgs<'a> {
    #[serde(rename = "_id")]
    id: &'a str,
    #[serde(flatten)]
    form: &'a UserForm,
}

#[derive(Serialize)]
struct UserStatusArgs<'a> {
    id: &'a str,
    #[serde(rename = "isActive")]
    is_active: bool,
}

pub async fn login(client: &ApiClient, form: &LoginForm) -> ApiResult<AuthUser> {
    client.send(Endpoint::login(), form).await
}

pub async fn logout(client: &ApiClient) -> ApiResult<Message> {
    client.call(Endpoint::logout()).await
}

pub async fn register(client: &ApiClient, form: &UserForm) -> ApiResult<Registered> {
    client.send(Endpoint::register(), form).await
}

pub async fn update_profile(client: &ApiClient, id: &str, form: &UserForm) -> ApiResult<ProfileUpdated> {
    client.send(Endpoint::profile(), &UserUpdateArgs { id, form }).await
}

pub async fn team(client: &ApiClient) -> ApiResult<Vec<User>> {
    client.call(Endpoint::team()).await
}

pub async fn set_active(client: &ApiClient, id: &str, is_active: bool) -> ApiResult<Message> {
    client
        .send(Endpoint::user_status(id), &UserStatusArgs { id, is_active })
        .await
}

pub async fn delete_user(client: &ApiClient, id: &str) -> ApiResult<Message> {
    client.call(Endpoint::delete_user(id)).await
}
