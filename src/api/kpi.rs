use dashboard_domain::forms::KpiForm;
use dashboard_domain::model::Kpi;

use super::{list_for_branch, ApiClient, ApiResult, Endpoint, Message, Resource};

pub async fn for_branch(client: &ApiClient, branch_id: &str) -> ApiResult<Vec<Kpi>> {
    list_for_branch(client, Resource::Kpi, branch_id).await
}

pub async fn all(client: &ApiClient) -> ApiResult<Vec<Kpi>> {
    client.call(Endpoint::all(Resource::Kpi)).await
}

pub async fn create(client: &ApiClient, form: &KpiForm) -> ApiResult<Message> {
    client.send(Endpoint::create(Resource::Kpi), form).await
}

pub async fn update(client: &ApiClient, id: &str, form: &KpiForm) -> ApiResult<Message> {
    client.send(Endpoint::update(Resource::Kpi, id), form).await
}

pub async fn delete(client: &ApiClient, id: &str) -> ApiResult<Message> {
    client.call(Endpoint::delete(Resource::Kpi, id)).await
}
