//! Revenue Target Distribution
//!
//! Editing state for splitting an organization-wide revenue target across
//! branches. Allocations are kept as the raw text the user typed; a branch
//! can never be given more than the headroom left by the others.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Allowed deviation between the allocation sum and the total
pub const DISTRIBUTION_TOLERANCE: f64 = 0.01;

/// Lenient numeric parse: empty or unparseable text counts as zero
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Sum starting from `+0.0`; `Iterator::sum` of nothing is `-0.0`
pub fn total_of(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().fold(0.0, |acc, v| acc + v)
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RevenueError {
    #[error("Please enter a valid total revenue target")]
    InvalidTotal,

    #[error("Please fill out all fields")]
    MissingFields,

    #[error("`{0}` is not a valid date")]
    InvalidDate(String),

    #[error("The end date cannot be before the start date")]
    InvertedRange,

    #[error("Branch targets cannot be negative")]
    NegativeAllocation,

    #[error("The sum of branch targets must equal the total target")]
    SumMismatch,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchAllocation {
    pub id: String,
    pub target: f64,
}

/// Request body for `revenue/create`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRevenueTarget {
    pub revenue_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_target: f64,
    pub target_branches: Vec<BranchAllocation>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetDistribution {
    total: String,
    /// (branch id, raw allocation), in branch list order
    allocations: Vec<(String, String)>,
}

impl TargetDistribution {
    /// One empty allocation per branch
    pub fn for_branches<'a, I>(branch_ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            total: String::new(),
            allocations: branch_ids.into_iter().map(|id| (id.to_string(), String::new())).collect(),
        }
    }

    pub fn total_raw(&self) -> &str {
        &self.total
    }

    pub fn total(&self) -> f64 {
        parse_amount(&self.total)
    }

    pub fn set_total(&mut self, raw: &str) {
        self.total = raw.to_string();
    }

    pub fn allocation(&self, branch_id: &str) -> Option<&str> {
        self.allocations
            .iter()
            .find(|(id, _)| id == branch_id)
            .map(|(_, raw)| raw.as_str())
    }

    pub fn allocations(&self) -> &[(String, String)] {
        &self.allocations
    }

    /// Store a new raw allocation for `branch_id`, clamped to the headroom
    /// left by every other branch. Unknown branches are ignored.
    pub fn edit(&mut self, branch_id: &str, raw: &str) {
        let others = total_of(
            self.allocations
                .iter()
                .filter(|(id, _)| id != branch_id)
                .map(|(_, v)| parse_amount(v)),
        );
        let headroom = (self.total() - others).max(0.0);

        let Some(slot) = self.allocations.iter_mut().find(|(id, _)| id == branch_id) else {
            return;
        };

        if !raw.trim().is_empty() && parse_amount(raw) > headroom {
            slot.1 = headroom.to_string();
        } else {
            slot.1 = raw.to_string();
        }
    }

    pub fn distributed(&self) -> f64 {
        total_of(self.allocations.iter().map(|(_, v)| parse_amount(v)))
    }

    pub fn remaining(&self) -> f64 {
        (self.total() - self.distributed()).max(0.0)
    }

    /// Validate and build the create request. Checks run in a fixed order and
    /// the first failure is returned.
    pub fn submit(&self, name: &str, start: &str, end: &str) -> Result<NewRevenueTarget, RevenueError> {
        let total = self.total();
        if total <= 0.0 {
            return Err(RevenueError::InvalidTotal);
        }

        let (name, start, end) = (name.trim(), start.trim(), end.trim());
        if name.is_empty() || start.is_empty() || end.is_empty() {
            return Err(RevenueError::MissingFields);
        }

        let start_date = parse_date(start)?;
        let end_date = parse_date(end)?;
        if end_date < start_date {
            return Err(RevenueError::InvertedRange);
        }

        let target_branches: Vec<BranchAllocation> = self
            .allocations
            .iter()
            .map(|(id, raw)| BranchAllocation {
                id: id.clone(),
                target: parse_amount(raw),
            })
            .collect();

        if target_branches.iter().any(|b| b.target < 0.0) {
            return Err(RevenueError::NegativeAllocation);
        }

        let distributed = total_of(target_branches.iter().map(|b| b.target));
        if (distributed - total).abs() > DISTRIBUTION_TOLERANCE {
            return Err(RevenueError::SumMismatch);
        }

        Ok(NewRevenueTarget {
            revenue_name: name.to_string(),
            start_date,
            end_date,
            total_target: total,
            target_branches,
        })
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, RevenueError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| RevenueError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_branches(total: &str, a: &str, b: &str) -> TargetDistribution {
        let mut dist = TargetDistribution::for_branches(["A", "B"]);
        dist.set_total(total);
        dist.edit("A", a);
        dist.edit("B", b);
        dist
    }

    #[test]
    fn test_exact_split_submits() {
        let dist = two_branches("1000", "400", "600");
        let target = dist.submit("FY24", "2024-01-01", "2024-12-31").unwrap();
        assert_eq!(target.total_target, 1000.0);
        assert_eq!(
            target.target_branches,
            vec![
                BranchAllocation { id: "A".into(), target: 400.0 },
                BranchAllocation { id: "B".into(), target: 600.0 },
            ]
        );

        let body = serde_json::to_value(&target).unwrap();
        assert_eq!(body["revenueName"], "FY24");
        assert_eq!(body["startDate"], "2024-01-01");
        assert_eq!(body["targetBranches"][1]["target"], 600.0);
    }

    #[test]
    fn test_short_split_is_rejected() {
        let dist = two_branches("1000", "400", "500");
        assert_eq!(dist.remaining(), 100.0);
        assert_eq!(
            dist.submit("FY24", "2024-01-01", "2024-12-31"),
            Err(RevenueError::SumMismatch)
        );
        assert_eq!(
            RevenueError::SumMismatch.to_string(),
            "The sum of branch targets must equal the total target"
        );
    }

    #[test]
    fn test_empty_distribution_reads_as_positive_zero() {
        let dist = TargetDistribution::for_branches(std::iter::empty::<&str>());
        assert_eq!(format!("{:.2}", dist.distributed()), "0.00");
        assert_eq!(format!("{:.2}", dist.remaining()), "0.00");
        assert_eq!(format!("{:.2}", total_of([])), "0.00");
    }

    #[test]
    fn test_edit_clamps_to_headroom() {
        let mut dist = two_branches("1000", "700", "");
        dist.edit("B", "450");
        assert_eq!(dist.allocation("B"), Some("300"));

        dist.edit("B", "");
        assert_eq!(dist.allocation("B"), Some(""));
        assert_eq!(dist.distributed(), 700.0);

        dist.edit("B", "abc");
        assert_eq!(dist.allocation("B"), Some("abc"));
        assert_eq!(dist.distributed(), 700.0);
    }

    #[test]
    fn test_submit_check_order() {
        let dist = two_branches("0", "", "");
        assert_eq!(dist.submit("", "", ""), Err(RevenueError::InvalidTotal));

        let dist = two_branches("1000", "1000", "");
        assert_eq!(dist.submit("FY24", "", "2024-12-31"), Err(RevenueError::MissingFields));
        assert_eq!(
            dist.submit("FY24", "2024-13-01", "2024-12-31"),
            Err(RevenueError::InvalidDate("2024-13-01".into()))
        );
        assert_eq!(
            dist.submit("FY24", "2024-12-31", "2024-01-01"),
            Err(RevenueError::InvertedRange)
        );

        let mut dist = TargetDistribution::for_branches(["A", "B"]);
        dist.set_total("1000");
        dist.edit("A", "-100");
        dist.edit("B", "1000");
        assert_eq!(
            dist.submit("FY24", "2024-01-01", "2024-12-31"),
            Err(RevenueError::NegativeAllocation)
        );
    }

    #[test]
    fn test_random_edit_sequences_never_exceed_total() {
        // Small LCG so the sequence is deterministic
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move || {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            (seed >> 33) as u32
        };

        for _ in 0..200 {
            let ids = ["A", "B", "C", "D"];
            let total = (next() % 10_000) as f64 + (next() % 100) as f64 / 100.0;
            let mut dist = TargetDistribution::for_branches(ids);
            dist.set_total(&total.to_string());

            for _ in 0..30 {
                let id = ids[(next() % ids.len() as u32) as usize];
                let raw = match next() % 5 {
                    0 => String::new(),
                    1 => "not a number".to_string(),
                    _ => format!("{}.{:02}", next() % 12_000, next() % 100),
                };
                dist.edit(id, &raw);
                assert!(
                    dist.distributed() <= total + 1e-6,
                    "distributed {} exceeds total {}",
                    dist.distributed(),
                    total
                );
            }
        }
    }
}
