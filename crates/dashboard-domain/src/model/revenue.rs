use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One progress report recorded by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievedEntry {
    pub date: DateTime<Utc>,
    pub value: f64,
}

/// A branch's share of a revenue target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetBranch {
    /// Branch id
    pub id: String,
    pub target: f64,
    #[serde(default)]
    pub achieved: f64,
    #[serde(default)]
    pub achieved_history: Vec<AchievedEntry>,
}

/// Organization-wide monetary goal distributed across branches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueTarget {
    #[serde(rename = "_id")]
    pub id: String,
    pub revenue_name: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    pub total_target: f64,
    #[serde(default)]
    pub target_branches: Vec<TargetBranch>,
}

impl RevenueTarget {
    pub fn allocation_for(&self, branch_id: &str) -> Option<&TargetBranch> {
        self.target_branches.iter().find(|tb| tb.id == branch_id)
    }
}
