use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::vehicle::join_ids;
use crate::error::DashboardError;

/// One slice of the yearly expense breakdown.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExpenseCategory {
    pub name: String,
    pub amount: f64,
    /// Share of the total, 0-100. Sets close to ~100 but not exactly.
    pub percentage: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Rejected,
}

impl ExpenseStatus {
    pub const ALL: [ExpenseStatus; 3] = [
        ExpenseStatus::Pending,
        ExpenseStatus::Approved,
        ExpenseStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExpenseStatus::Pending => "pending",
            ExpenseStatus::Approved => "approved",
            ExpenseStatus::Rejected => "rejected",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExpenseStatus::Pending => "En attente",
            ExpenseStatus::Approved => "Approuvée",
            ExpenseStatus::Rejected => "Rejetée",
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseStatus {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| DashboardError::InvalidFilter {
                field: "status",
                value: s.to_string(),
                expected: join_ids(ExpenseStatus::ALL.iter().map(|st| st.as_str())),
            })
    }
}

/// A single recorded expense. `category` refers to an [`ExpenseCategory`]
/// name by convention only.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExpenseTransaction {
    pub id: String,
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub agency_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<String>,
    pub created_by: String,
    pub status: ExpenseStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_status_parse() {
        assert_eq!("approved".parse::<ExpenseStatus>().unwrap(), ExpenseStatus::Approved);
        assert_eq!(ExpenseStatus::Rejected.label(), "Rejetée");
        assert!("paid".parse::<ExpenseStatus>().is_err());
    }
}
