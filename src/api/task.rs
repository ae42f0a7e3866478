//! Task Routes

use dashboard_domain::forms::{ActivityForm, SubTaskForm, TaskForm};
use dashboard_domain::model::{Stage, Task};
use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiResult, Endpoint, Message, Resource, TrashAction};

#[derive(Deserialize)]
struct TaskList {
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Deserialize)]
struct SingleTask {
    task: Task,
}

/// Reply to `task/dashboard`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_tasks: usize,
    #[serde(default, rename = "last10Task")]
    pub recent: Vec<Task>,
}

/// Attendance figures from `task/performance/evaluation`
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    #[serde(default)]
    pub days_present: u32,
    #[serde(default)]
    pub days_absent: u32,
    #[serde(default)]
    pub hours_worked: f64,
}

#[derive(Deserialize)]
struct PerformanceReply {
    #[serde(default)]
    performance: Option<Performance>,
}

#[derive(Serialize)]
struct UserIdArgs<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
}

#[derive(Serialize)]
struct StageArgs<'a> {
    id: &'a str,
    stage: Stage,
}

#[derive(Serialize)]
struct Empty {}

pub async fn all(client: &ApiClient) -> ApiResult<Vec<Task>> {
    let list: TaskList = client.call(Endpoint::all(Resource::Task)).await?;
    Ok(list.tasks)
}

pub async fn get(client: &ApiClient, id: &str) -> ApiResult<Task> {
    let reply: SingleTask = client.call(Endpoint::task(id)).await?;
    Ok(reply.task)
}

pub async fn create(client: &ApiClient, form: &TaskForm) -> ApiResult<Message> {
    client.send(Endpoint::create(Resource::Task), form).await
}

pub async fn update(client: &ApiClient, id: &str, form: &TaskForm) -> ApiResult<Message> {
    client.send(Endpoint::update(Resource::Task, id), form).await
}

pub async fn duplicate(client: &ApiClient, id: &str) -> ApiResult<Message> {
    client.send(Endpoint::duplicate_task(id), &Empty {}).await
}

pub async fn create_subtask(client: &ApiClient, id: &str, form: &SubTaskForm) -> ApiResult<Message> {
    client.send(Endpoint::create_subtask(id), form).await
}

pub async fn post_activity(client: &ApiClient, id: &str, form: &ActivityForm) -> ApiResult<Message> {
    client.send(Endpoint::post_activity(id), form).await
}

pub async fn trash(client: &ApiClient, id: &str) -> ApiResult<Message> {
    client.send(Endpoint::trash_task(id), &Empty {}).await
}

pub async fn delete_restore(client: &ApiClient, id: &str, action: TrashAction) -> ApiResult<Message> {
    client.call(Endpoint::delete_restore(id, action)).await
}

pub async fn dashboard(client: &ApiClient) -> ApiResult<DashboardSummary> {
    client.call(Endpoint::task_dashboard()).await
}

pub async fn performance(client: &ApiClient, user_id: &str) -> ApiResult<Option<Performance>> {
    let reply: PerformanceReply = client.send(Endpoint::performance(), &UserIdArgs { user_id }).await?;
    Ok(reply.performance)
}

pub async fn change_stage(client: &ApiClient, id: &str, stage: Stage) -> ApiResult<Message> {
    client.send(Endpoint::change_stage(id), &StageArgs { id, stage }).await
}
