//! Task Board Rules
//!
//! Which drag-and-drop moves between stage columns are allowed, plus the
//! per-column share shown in column headers.

use thiserror::Error;

use crate::catalog::names;
use crate::model::{Stage, Task};
use crate::permissions::GrantedPermissions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("You do not have permission to change objective stages.")]
    MissingPermission,

    #[error("You cannot move objectives to the Overdue column.")]
    IntoOverdue,

    #[error("You cannot move objectives out of the Overdue column.")]
    OutOfOverdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageChange {
    pub from: Stage,
    pub to: Stage,
}

/// Decide what a drop from `from` onto `to` does.
///
/// `Ok(None)` means nothing changes (dropped on its own column).
pub fn plan_move(granted: &GrantedPermissions, from: Stage, to: Stage) -> Result<Option<StageChange>, MoveRejection> {
    if !granted.allows(names::CHANGE_TASK_STAGE) {
        return Err(MoveRejection::MissingPermission);
    }
    if from == to {
        return Ok(None);
    }
    if to == Stage::Overdue {
        return Err(MoveRejection::IntoOverdue);
    }
    if from == Stage::Overdue {
        return Err(MoveRejection::OutOfOverdue);
    }
    Ok(Some(StageChange { from, to }))
}

/// Set the stage of task `id`, returning the stage it had before
pub fn apply_stage(tasks: &mut [Task], id: &str, stage: Stage) -> Option<Stage> {
    tasks
        .iter_mut()
        .find(|t| t.id == id)
        .map(|t| std::mem::replace(&mut t.stage, stage))
}

/// Undo a stage change that the backend refused.
///
/// The card goes back to `change.from` only while it still sits at
/// `change.to`; a later move of the same card wins over a late failure.
pub fn revert_stage(tasks: &mut [Task], id: &str, change: StageChange) -> bool {
    match tasks.iter_mut().find(|t| t.id == id) {
        Some(task) if task.stage == change.to => {
            task.stage = change.from;
            true
        }
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageShare {
    pub stage: Stage,
    pub count: usize,
    pub percent: f64,
}

impl StageShare {
    pub fn label(&self) -> String {
        format!("{:.2}%", self.percent)
    }
}

pub fn stage_shares(tasks: &[Task]) -> Vec<StageShare> {
    let total = tasks.len();
    Stage::ALL
        .iter()
        .map(|stage| {
            let count = tasks.iter().filter(|t| t.stage == *stage).count();
            let percent = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            };
            StageShare {
                stage: *stage,
                count,
                percent,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(id: &str, stage: Stage) -> Task {
        Task {
            id: id.into(),
            title: format!("Task {id}"),
            date: Utc::now(),
            stage,
            priority: Default::default(),
            team: vec![],
            assets: vec![],
            kpi: None,
            monetary_value: None,
            percent_value: None,
            sub_tasks: vec![],
            activities: vec![],
            branch: None,
            department: None,
            is_trashed: false,
        }
    }

    fn stage_changer() -> GrantedPermissions {
        GrantedPermissions::from_names([names::CHANGE_TASK_STAGE])
    }

    #[test]
    fn test_permission_is_checked_first() {
        let none = GrantedPermissions::default();
        assert_eq!(plan_move(&none, Stage::Todo, Stage::InProgress), Err(MoveRejection::MissingPermission));
        assert_eq!(plan_move(&none, Stage::Todo, Stage::Todo), Err(MoveRejection::MissingPermission));
        assert_eq!(plan_move(&none, Stage::Todo, Stage::Overdue), Err(MoveRejection::MissingPermission));
    }

    #[test]
    fn test_overdue_column_is_sealed() {
        let granted = stage_changer();
        assert_eq!(plan_move(&granted, Stage::Todo, Stage::Overdue), Err(MoveRejection::IntoOverdue));
        assert_eq!(plan_move(&granted, Stage::Overdue, Stage::Completed), Err(MoveRejection::OutOfOverdue));
        assert_eq!(plan_move(&granted, Stage::Overdue, Stage::Overdue), Ok(None));
    }

    #[test]
    fn test_valid_move_and_rollback() {
        let granted = stage_changer();
        let mut tasks = vec![task("a", Stage::Todo), task("b", Stage::Completed)];

        let change = plan_move(&granted, Stage::Todo, Stage::InProgress).unwrap().unwrap();
        let previous = apply_stage(&mut tasks, "a", change.to);
        assert_eq!(previous, Some(Stage::Todo));
        assert_eq!(tasks[0].stage, Stage::InProgress);

        // Backend refused: put it back
        assert!(revert_stage(&mut tasks, "a", change));
        assert_eq!(tasks[0].stage, Stage::Todo);

        assert_eq!(apply_stage(&mut tasks, "missing", Stage::Completed), None);
    }

    #[test]
    fn test_rejected_move_leaves_card_in_place() {
        let granted = stage_changer();
        let mut tasks = vec![task("a", Stage::Todo)];
        if let Ok(Some(change)) = plan_move(&granted, Stage::Todo, Stage::Overdue) {
            apply_stage(&mut tasks, "a", change.to);
        }
        assert_eq!(tasks[0].stage, Stage::Todo);
    }

    #[test]
    fn test_stage_shares() {
        assert!(stage_shares(&[]).iter().all(|s| s.count == 0 && s.percent == 0.0));

        let tasks = vec![
            task("a", Stage::Todo),
            task("b", Stage::Todo),
            task("c", Stage::Completed),
        ];
        let shares = stage_shares(&tasks);
        assert_eq!(shares[0].count, 2);
        assert_eq!(shares[0].label(), "66.67%");
        assert_eq!(shares[2].label(), "33.33%");
        assert_eq!(shares[3].label(), "0.00%");
    }

    #[test]
    fn test_late_failure_does_not_undo_a_newer_move() {
        let granted = stage_changer();
        let mut tasks = vec![task("a", Stage::Todo)];

        let first = plan_move(&granted, Stage::Todo, Stage::InProgress).unwrap().unwrap();
        apply_stage(&mut tasks, "a", first.to);
        let second = plan_move(&granted, Stage::InProgress, Stage::Completed).unwrap().unwrap();
        apply_stage(&mut tasks, "a", second.to);

        // First request fails after the second move landed
        assert!(!revert_stage(&mut tasks, "a", first));
        assert_eq!(tasks[0].stage, Stage::Completed);

        assert!(revert_stage(&mut tasks, "a", second));
        assert_eq!(tasks[0].stage, Stage::InProgress);
        assert!(!revert_stage(&mut tasks, "missing", second));
    }
}
