use dashboard_domain::forms::BranchForm;
use dashboard_domain::model::Branch;

use super::{ApiClient, ApiResult, Endpoint, Message, Resource};

pub async fn list(client: &ApiClient) -> ApiResult<Vec<Branch>> {
    client.call(Endpoint::branches()).await
}

pub async fn detail(client: &ApiClient, id: &str) -> ApiResult<Branch> {
    client.call(Endpoint::detail(Resource::Branch, id)).await
}

pub async fn create(client: &ApiClient, form: &BranchForm) -> ApiResult<Message> {
    client.send(Endpoint::create(Resource::Branch), form).await
}

pub async fn update(client: &ApiClient, id: &str, form: &BranchForm) -> ApiResult<Message> {
    client.send(Endpoint::update(Resource::Branch, id), form).await
}

pub async fn delete(client: &ApiClient, id: &str) -> ApiResult<Message> {
    client.call(Endpoint::delete(Resource::Branch, id)).await
}
