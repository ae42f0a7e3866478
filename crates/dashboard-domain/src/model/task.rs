//! Task (Objective) Entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{KpiType, Reference};

/// Board column a task sits in.
///
/// `Overdue` is derived by the backend and never set by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Stage {
    #[default]
    Todo,
    InProgress,
    Completed,
    Overdue,
}

impl Stage {
    /// Board column order
    pub const ALL: [Stage; 4] = [Stage::Todo, Stage::InProgress, Stage::Completed, Stage::Overdue];

    /// Stages a user may pick in the task form
    pub const SELECTABLE: [Stage; 3] = [Stage::Todo, Stage::InProgress, Stage::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Todo => "todo",
            Stage::InProgress => "in progress",
            Stage::Completed => "completed",
            Stage::Overdue => "overdue",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Todo => "Todo",
            Stage::InProgress => "In progress",
            Stage::Completed => "Completed",
            Stage::Overdue => "Overdue",
        }
    }

    /// Case-insensitive; accepts `in-progress` as written in page links
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', " ").as_str() {
            "todo" => Some(Stage::Todo),
            "in progress" => Some(Stage::InProgress),
            "completed" => Some(Stage::Completed),
            "overdue" => Some(Stage::Overdue),
            _ => None,
        }
    }
}

impl From<Stage> for String {
    fn from(stage: Stage) -> Self {
        stage.as_str().to_string()
    }
}

impl TryFrom<String> for Stage {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Stage::parse(&value).ok_or_else(|| format!("unknown task stage `{value}`"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Priority {
    High,
    Medium,
    #[default]
    Normal,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::High, Priority::Medium, Priority::Normal, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "normal" => Some(Priority::Normal),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.as_str().to_string()
    }
}

impl TryFrom<String> for Priority {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Priority::parse(&value).ok_or_else(|| format!("unknown priority `{value}`"))
    }
}

/// KPI snapshot stored on the task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskKpi {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: KpiType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTask {
    pub title: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tag: String,
}

/// Timeline entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// `commented`, `todo`, `in progress`, `completed`, ...
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub activity: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub by: Option<Reference>,
}

/// A trackable unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub stage: Stage,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub team: Vec<Reference>,
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default)]
    pub kpi: Option<TaskKpi>,
    #[serde(default)]
    pub monetary_value: Option<f64>,
    #[serde(default)]
    pub percent_value: Option<f64>,
    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    /// Branch id
    #[serde(default)]
    pub branch: Option<String>,
    /// Department name
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub is_trashed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_parsing() {
        assert_eq!(Stage::parse("IN PROGRESS"), Some(Stage::InProgress));
        assert_eq!(Stage::parse("in-progress"), Some(Stage::InProgress));
        assert_eq!(Stage::parse(" Todo "), Some(Stage::Todo));
        assert_eq!(Stage::parse("archived"), None);
        assert_eq!(String::from(Stage::InProgress), "in progress");
    }

    #[test]
    fn test_task_deserialization() {
        let json = r#"{
            "_id": "t1",
            "title": "Close Q3 deals",
            "date": "2024-07-01T00:00:00.000Z",
            "stage": "in progress",
            "priority": "high",
            "team": [{"_id": "u1", "name": "Jane Doe"}, "u2"],
            "kpi": {"id": "k1", "name": "Revenue", "type": "Monetary"},
            "monetaryValue": 5000,
            "subTasks": [{"title": "Call client", "tag": "sales"}],
            "activities": [{"type": "commented", "activity": "Kick-off done"}],
            "branch": "b1",
            "department": "Sales"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.stage, Stage::InProgress);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.team.len(), 2);
        assert_eq!(task.kpi.as_ref().map(|k| k.kind), Some(KpiType::Monetary));
        assert_eq!(task.monetary_value, Some(5000.0));
        assert!(!task.is_trashed);
    }

    #[test]
    fn test_unknown_stage_is_rejected() {
        let json = r#"{"_id":"t1","title":"x","date":"2024-07-01T00:00:00Z","stage":"someday"}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }
}
