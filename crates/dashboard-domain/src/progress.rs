//! Branch Progress
//!
//! A branch reports achieved revenue against its share of a target. The user
//! enters an increment; the backend adds it to the running total.

use serde::Serialize;
use thiserror::Error;

use crate::distribution::parse_amount;
use crate::model::RevenueTarget;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProgressError {
    #[error("Please select a target first")]
    NoTargetSelected,

    #[error("Please enter an amount greater than zero")]
    NonPositiveAmount,
}

/// Request body for `revenue/update/:id`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub revenue_id: String,
    pub branch_id: String,
    /// Increment, not the new total
    pub achieved: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct Selected {
    revenue_id: String,
    target: f64,
    existing: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BranchProgress {
    branch_id: String,
    selected: Option<Selected>,
    increment: String,
}

impl BranchProgress {
    pub fn new(branch_id: impl Into<String>) -> Self {
        Self {
            branch_id: branch_id.into(),
            selected: None,
            increment: String::new(),
        }
    }

    /// Load the branch's current standing in `target` and clear the input
    pub fn select(&mut self, target: &RevenueTarget) {
        let allocation = target.allocation_for(&self.branch_id);
        self.selected = Some(Selected {
            revenue_id: target.id.clone(),
            target: allocation.map(|a| a.target).unwrap_or(0.0),
            existing: allocation.map(|a| a.achieved).unwrap_or(0.0),
        });
        self.increment.clear();
    }

    /// Take newer figures for the selected target, keeping the typed amount.
    /// Returns false when `target` is no longer the selection.
    pub fn refresh(&mut self, target: &RevenueTarget) -> bool {
        if self.selected_revenue_id() != Some(target.id.as_str()) {
            return false;
        }
        let increment = std::mem::take(&mut self.increment);
        self.select(target);
        self.increment = increment;
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.increment.clear();
    }

    pub fn selected_revenue_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|s| s.revenue_id.as_str())
    }

    pub fn set_increment(&mut self, raw: &str) {
        self.increment = raw.to_string();
    }

    pub fn increment(&self) -> f64 {
        parse_amount(&self.increment)
    }

    pub fn existing(&self) -> f64 {
        self.selected.as_ref().map(|s| s.existing).unwrap_or(0.0)
    }

    pub fn target(&self) -> f64 {
        self.selected.as_ref().map(|s| s.target).unwrap_or(0.0)
    }

    pub fn preview_total(&self) -> f64 {
        self.existing() + self.increment()
    }

    /// Capped at 100; 0 without a positive target
    pub fn percentage(&self) -> f64 {
        let target = self.target();
        if target <= 0.0 {
            return 0.0;
        }
        (self.preview_total() / target * 100.0).min(100.0)
    }

    pub fn percentage_label(&self) -> String {
        format!("{:.2}%", self.percentage())
    }

    pub fn submission(&self) -> Result<ProgressUpdate, ProgressError> {
        let selected = self.selected.as_ref().ok_or(ProgressError::NoTargetSelected)?;
        let achieved = self.increment();
        if achieved <= 0.0 {
            return Err(ProgressError::NonPositiveAmount);
        }
        Ok(ProgressUpdate {
            revenue_id: selected.revenue_id.clone(),
            branch_id: self.branch_id.clone(),
            achieved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TargetBranch;

    fn target() -> RevenueTarget {
        RevenueTarget {
            id: "rev1".into(),
            revenue_name: "FY24".into(),
            start_date: None,
            end_date: None,
            total_target: 1500.0,
            target_branches: vec![
                TargetBranch {
                    id: "b1".into(),
                    target: 500.0,
                    achieved: 200.0,
                    achieved_history: vec![],
                },
                TargetBranch {
                    id: "b2".into(),
                    target: 1000.0,
                    achieved: 0.0,
                    achieved_history: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_preview_and_percentage() {
        let mut progress = BranchProgress::new("b1");
        progress.select(&target());
        progress.set_increment("150");
        assert_eq!(progress.preview_total(), 350.0);
        assert_eq!(progress.percentage_label(), "70.00%");

        progress.set_increment("10000");
        assert_eq!(progress.percentage(), 100.0);

        progress.set_increment("oops");
        assert_eq!(progress.preview_total(), 200.0);
    }

    #[test]
    fn test_refresh_keeps_typed_amount() {
        let mut progress = BranchProgress::new("b1");
        progress.select(&target());
        progress.set_increment("50");

        let mut newer = target();
        newer.target_branches[0].achieved = 300.0;
        assert!(progress.refresh(&newer));
        assert_eq!(progress.existing(), 300.0);
        assert_eq!(progress.preview_total(), 350.0);

        newer.id = "rev2".into();
        assert!(!progress.refresh(&newer));
        assert_eq!(progress.selected_revenue_id(), Some("rev1"));
    }

    #[test]
    fn test_submission_sends_increment() {
        let mut progress = BranchProgress::new("b1");
        assert_eq!(progress.submission(), Err(ProgressError::NoTargetSelected));

        progress.select(&target());
        assert_eq!(progress.submission(), Err(ProgressError::NonPositiveAmount));

        progress.set_increment("150");
        let update = progress.submission().unwrap();
        assert_eq!(update.achieved, 150.0);

        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body["revenueId"], "rev1");
        assert_eq!(body["branchId"], "b1");
    }

    #[test]
    fn test_branch_without_allocation_shows_zero() {
        let mut progress = BranchProgress::new("b9");
        progress.select(&target());
        progress.set_increment("50");
        assert_eq!(progress.target(), 0.0);
        assert_eq!(progress.percentage(), 0.0);
    }
}
