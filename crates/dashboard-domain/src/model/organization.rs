use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{PermissionGrant, Reference};
use crate::DomainError;

/// An organizational sub-unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub branch: Option<Reference>,
}

impl Department {
    pub fn belongs_to(&self, branch_id: &str) -> bool {
        self.branch.as_ref().is_some_and(|b| b.id() == branch_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub branch: Option<Reference>,
    /// Ordered grants; the server stores only the selected ones
    #[serde(default)]
    pub permissions: Vec<PermissionGrant>,
}

/// KPI measurement kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum KpiType {
    Monetary,
    Percentage,
    #[default]
    Metric,
}

impl KpiType {
    pub const ALL: [KpiType; 3] = [KpiType::Monetary, KpiType::Percentage, KpiType::Metric];

    pub fn as_str(&self) -> &'static str {
        match self {
            KpiType::Monetary => "Monetary",
            KpiType::Percentage => "Percentage",
            KpiType::Metric => "Metric",
        }
    }
}

/// Case-insensitive, surrounding whitespace ignored
impl FromStr for KpiType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KpiType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::parse("KPI type", s))
    }
}

/// A named, typed target metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: KpiType,
    #[serde(default)]
    pub branch: Option<Reference>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_branch_membership() {
        let dept: Department = serde_json::from_str(
            r#"{"_id":"d1","name":"Sales","branch":{"_id":"b1","name":"Abuja"}}"#,
        )
        .unwrap();
        assert!(dept.belongs_to("b1"));
        assert!(!dept.belongs_to("b2"));

        let orphan: Department = serde_json::from_str(r#"{"_id":"d2","name":"Ops"}"#).unwrap();
        assert!(!orphan.belongs_to("b1"));
    }

    #[test]
    fn test_kpi_type_serialization() {
        let kpi: Kpi = serde_json::from_str(r#"{"_id":"k1","name":"Sales","type":"Monetary","branch":"b1"}"#).unwrap();
        assert_eq!(kpi.kind, KpiType::Monetary);
        assert_eq!(kpi.branch.as_ref().map(|b| b.id()), Some("b1"));
        assert_eq!(" percentage".parse::<KpiType>(), Ok(KpiType::Percentage));
        assert_eq!("MONETARY".parse::<KpiType>(), Ok(KpiType::Monetary));
        assert!("anything".parse::<KpiType>().is_err());
        assert_eq!(serde_json::to_string(&KpiType::Percentage).unwrap(), r#""Percentage""#);
    }
}
