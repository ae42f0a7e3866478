use dashboard_domain::distribution::NewRevenueTarget;
use dashboard_domain::model::RevenueTarget;
use dashboard_domain::progress::ProgressUpdate;
use serde::Deserialize;

use super::{ApiClient, ApiResult, Endpoint, Message, Resource};

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

pub async fn all(client: &ApiClient) -> ApiResult<Vec<RevenueTarget>> {
    let reply: Envelope<Vec<RevenueTarget>> = client.call(Endpoint::all(Resource::Revenue)).await?;
    Ok(reply.data)
}

pub async fn detail(client: &ApiClient, id: &str) -> ApiResult<RevenueTarget> {
    let reply: Envelope<RevenueTarget> = client.call(Endpoint::detail(Resource::Revenue, id)).await?;
    Ok(reply.data)
}

pub async fn create(client: &ApiClient, target: &NewRevenueTarget) -> ApiResult<Message> {
    client.send(Endpoint::create(Resource::Revenue), target).await
}

/// Report achieved revenue for one branch; the backend adds the increment
pub async fn update_progress(client: &ApiClient, update: &ProgressUpdate) -> ApiResult<Message> {
    client
        .send(Endpoint::update(Resource::Revenue, &update.revenue_id), update)
        .await
}

pub async fn delete(client: &ApiClient, id: &str) -> ApiResult<Message> {
    client.call(Endpoint::delete(Resource::Revenue, id)).await
}
