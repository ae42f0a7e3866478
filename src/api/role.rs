use dashboard_domain::forms::RoleForm;
use dashboard_domain::model::Role;

use super::{list_for_branch, ApiClient, ApiResult, Endpoint, Message, Resource};

pub async fn for_branch(client: &ApiClient, branch_id: &str) -> ApiResult<Vec<Role>> {
    list_for_branch(client, Resource::Role, branch_id).await
}

pub async fn all(client: &ApiClient) -> ApiResult<Vec<Role>> {
    client.call(Endpoint::all(Resource::Role)).await
}

pub async fn create(client: &ApiClient, form: &RoleForm) -> ApiResult<Message> {
    client.send(Endpoint::create(Resource::Role), form).await
}

pub async fn update(client: &ApiClient, id: &str, form: &RoleForm) -> ApiResult<Message> {
    client.send(Endpoint::update(Resource::Role, id), form).await
}

pub async fn delete(client: &ApiClient, id: &str) -> ApiResult<Message> {
    client.call(Endpoint::delete(Resource::Role, id)).await
}
