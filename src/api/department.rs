use dashboard_domain::forms::DepartmentForm;
use dashboard_domain::model::Department;

use super::{list_for_branch, ApiClient, ApiResult, Endpoint, Message, Resource};

pub async fn for_branch(client: &ApiClient, branch_id: &str) -> ApiResult<Vec<Department>> {
    list_for_branch(client, Resource::Department, branch_id).await
}

pub async fn all(client: &ApiClient) -> ApiResult<Vec<Department>> {
    client.call(Endpoint::all(Resource::Department)).await
}

pub async fn create(client: &ApiClient, form: &DepartmentForm) -> ApiResult<Message> {
    client.send(Endpoint::create(Resource::Department), form).await
}

pub async fn update(client: &ApiClient, id: &str, form: &DepartmentForm) -> ApiResult<Message> {
    client.send(Endpoint::update(Resource::Department, id), form).await
}

pub async fn delete(client: &ApiClient, id: &str) -> ApiResult<Message> {
    client.call(Endpoint::delete(Resource::Department, id)).await
}
