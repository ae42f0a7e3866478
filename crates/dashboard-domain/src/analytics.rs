//! Overview Analytics
//!
//! Series and aggregates drawn on the overview page: achieved revenue over
//! time, a two-target comparison, and per-branch performance.

use chrono::{Duration, NaiveDate};

use crate::model::{Branch, RevenueTarget};

/// One achieved-revenue report on a day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevenuePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Every branch's history flattened, sorted by date, limited to `range`
pub fn revenue_series(target: &RevenueTarget, range: DateRange) -> Vec<RevenuePoint> {
    let mut points: Vec<RevenuePoint> = target
        .target_branches
        .iter()
        .flat_map(|tb| tb.achieved_history.iter())
        .map(|entry| RevenuePoint {
            date: entry.date.date_naive(),
            value: entry.value,
        })
        .filter(|p| range.contains(p.date))
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

/// `[start, start + days]`
pub fn comparison_window(start: NaiveDate, days: i64) -> DateRange {
    let end = start
        .checked_add_signed(Duration::days(days.max(0)))
        .unwrap_or(NaiveDate::MAX);
    DateRange::new(start, end)
}

/// Both targets' series over the same window
pub fn compare_series(
    first: &RevenueTarget,
    second: &RevenueTarget,
    start: NaiveDate,
    days: i64,
) -> (Vec<RevenuePoint>, Vec<RevenuePoint>) {
    let window = comparison_window(start, days);
    (revenue_series(first, window), revenue_series(second, window))
}

#[derive(Debug, Clone, PartialEq)]
pub struct BranchPerformance {
    pub name: String,
    pub achieved: f64,
    pub target: f64,
}

impl BranchPerformance {
    pub fn percent(&self) -> f64 {
        self.achieved / self.target * 100.0
    }

    pub fn label(&self) -> String {
        format!("{:.2}%", self.percent())
    }
}

/// Achieved and target summed per branch name across all targets.
///
/// Allocations for unknown branches are skipped. A zero target is treated
/// as 1 so the ratio stays finite.
pub fn branch_performance(targets: &[RevenueTarget], branches: &[Branch]) -> Vec<BranchPerformance> {
    let mut rows: Vec<BranchPerformance> = Vec::new();

    for allocation in targets.iter().flat_map(|t| t.target_branches.iter()) {
        let Some(branch) = branches.iter().find(|b| b.id == allocation.id) else {
            tracing::debug!(branch_id = %allocation.id, "No branch for revenue allocation");
            continue;
        };

        match rows.iter_mut().find(|r| r.name == branch.name) {
            Some(row) => {
                row.achieved += allocation.achieved;
                row.target += allocation.target;
            }
            None => rows.push(BranchPerformance {
                name: branch.name.clone(),
                achieved: allocation.achieved,
                target: allocation.target,
            }),
        }
    }

    for row in &mut rows {
        if row.target == 0.0 {
            row.target = 1.0;
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::total_of;
    use crate::model::{AchievedEntry, TargetBranch};
    use chrono::{TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(y: i32, m: u32, d: u32, value: f64) -> AchievedEntry {
        AchievedEntry {
            date: Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap(),
            value,
        }
    }

    fn target(id: &str, branches: Vec<TargetBranch>) -> RevenueTarget {
        RevenueTarget {
            id: id.into(),
            revenue_name: id.into(),
            start_date: None,
            end_date: None,
            total_target: total_of(branches.iter().map(|b| b.target)),
            target_branches: branches,
        }
    }

    fn allocation(id: &str, target: f64, history: Vec<AchievedEntry>) -> TargetBranch {
        TargetBranch {
            id: id.into(),
            target,
            achieved: total_of(history.iter().map(|h| h.value)),
            achieved_history: history,
        }
    }

    fn branch(id: &str, name: &str) -> Branch {
        Branch {
            id: id.into(),
            name: name.into(),
            description: String::new(),
        }
    }

    #[test]
    fn test_series_is_sorted_and_range_inclusive() {
        let t = target(
            "fy24",
            vec![
                allocation("b1", 100.0, vec![entry(2024, 3, 1, 10.0), entry(2024, 1, 1, 5.0)]),
                allocation("b2", 100.0, vec![entry(2024, 2, 1, 7.0), entry(2025, 1, 1, 99.0)]),
            ],
        );
        let series = revenue_series(&t, DateRange::new(day(2024, 1, 1), day(2024, 3, 1)));
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![5.0, 7.0, 10.0]);
    }

    #[test]
    fn test_comparison_uses_shared_window() {
        let first = target("a", vec![allocation("b1", 1.0, vec![entry(2024, 1, 5, 1.0), entry(2024, 2, 5, 2.0)])]);
        let second = target("b", vec![allocation("b1", 1.0, vec![entry(2024, 1, 9, 3.0)])]);

        let (a, b) = compare_series(&first, &second, day(2024, 1, 1), 10);
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        assert_eq!(comparison_window(day(2024, 1, 1), 10).end, day(2024, 1, 11));
    }

    #[test]
    fn test_branch_performance_aggregates_by_name() {
        let targets = vec![
            target("a", vec![allocation("b1", 200.0, vec![entry(2024, 1, 1, 50.0)]), allocation("zz", 10.0, vec![])]),
            target("b", vec![allocation("b1", 300.0, vec![entry(2024, 1, 1, 75.0)]), allocation("b2", 0.0, vec![])]),
        ];
        let rows = branch_performance(&targets, &[branch("b1", "Lagos"), branch("b2", "Abuja")]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Lagos");
        assert_eq!(rows[0].achieved, 125.0);
        assert_eq!(rows[0].target, 500.0);
        assert_eq!(rows[0].label(), "25.00%");
        assert_eq!(rows[1].target, 1.0);
        assert_eq!(rows[1].label(), "0.00%");
    }
}
