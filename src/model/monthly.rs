use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

const MONTH_NAMES: [&str; 12] = [
    "Janvier", "Février", "Mars", "Avril", "Mai", "Juin", "Juillet", "Août", "Septembre",
    "Octobre", "Novembre", "Décembre",
];

const MONTH_SHORT: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Juin", "Juil", "Août", "Sep", "Oct", "Nov", "Déc",
];

/// One month of the fiscal-year series.
///
/// Records built with [`MonthlyRecord::new`] (and every deserialized record)
/// satisfy `profit == revenue - expenses`. Projected records are the only
/// exception: each field is rounded on its own, see
/// [`crate::engine::projection::project_series`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MonthlyRow", into = "MonthlyRow")]
pub struct MonthlyRecord {
    month: u32,
    revenue: i64,
    expenses: i64,
    profit: i64,
    rentals: u32,
}

impl MonthlyRecord {
    pub fn new(month: u32, revenue: i64, expenses: i64, rentals: u32) -> Self {
        Self {
            month,
            revenue,
            expenses,
            profit: revenue - expenses,
            rentals,
        }
    }

    /// Builds a record whose fields were scaled independently.
    pub(crate) fn scaled(month: u32, revenue: i64, expenses: i64, profit: i64, rentals: u32) -> Self {
        Self {
            month,
            revenue,
            expenses,
            profit,
            rentals,
        }
    }

    /// Calendar month, 1 = January.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn revenue(&self) -> i64 {
        self.revenue
    }

    pub fn expenses(&self) -> i64 {
        self.expenses
    }

    pub fn profit(&self) -> i64 {
        self.profit
    }

    pub fn rentals(&self) -> u32 {
        self.rentals
    }

    pub fn month_name(&self) -> &'static str {
        month_index(self.month).map_or("?", |i| MONTH_NAMES[i])
    }

    pub fn month_short(&self) -> &'static str {
        month_index(self.month).map_or("?", |i| MONTH_SHORT[i])
    }
}

fn month_index(month: u32) -> Option<usize> {
    (1..=12).contains(&month).then(|| month as usize - 1)
}

/// On-disk shape of a monthly record. `profit` is optional and, when given,
/// must agree with revenue and expenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MonthlyRow {
    month: u32,
    revenue: i64,
    expenses: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profit: Option<i64>,
    rentals: u32,
}

impl TryFrom<MonthlyRow> for MonthlyRecord {
    type Error = DashboardError;

    fn try_from(row: MonthlyRow) -> Result<Self, Self::Error> {
        if month_index(row.month).is_none() {
            return Err(DashboardError::InvalidInput(format!(
                "month {} is outside 1..=12",
                row.month
            )));
        }
        if row.revenue < 0 || row.expenses < 0 {
            return Err(DashboardError::InvalidInput(format!(
                "month {} has negative revenue or expenses",
                row.month
            )));
        }
        let record = MonthlyRecord::new(row.month, row.revenue, row.expenses, row.rentals);
        if let Some(profit) = row.profit {
            if profit != record.profit {
                return Err(DashboardError::InvalidInput(format!(
                    "month {}: profit {} does not equal revenue - expenses ({})",
                    row.month, profit, record.profit
                )));
            }
        }
        Ok(record)
    }
}

impl From<MonthlyRecord> for MonthlyRow {
    fn from(record: MonthlyRecord) -> Self {
        Self {
            month: record.month,
            revenue: record.revenue,
            expenses: record.expenses,
            profit: Some(record.profit),
            rentals: record.rentals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profit_is_derived() {
        let record = MonthlyRecord::new(1, 285_000, 198_000, 342);
        assert_eq!(record.profit(), 87_000);
        assert_eq!(record.month_name(), "Janvier");
        assert_eq!(record.month_short(), "Jan");
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_profit() {
        let ok: MonthlyRecord =
            toml::from_str("month = 2\nrevenue = 10\nexpenses = 4\nrentals = 1\n").unwrap();
        assert_eq!(ok.profit(), 6);

        let bad = toml::from_str::<MonthlyRecord>(
            "month = 2\nrevenue = 10\nexpenses = 4\nprofit = 7\nrentals = 1\n",
        );
        assert!(bad.is_err());

        let out_of_range =
            toml::from_str::<MonthlyRecord>("month = 13\nrevenue = 1\nexpenses = 0\nrentals = 0\n");
        assert!(out_of_range.is_err());
    }

    #[test]
    fn test_deserialize_rejects_extreme_rows() {
        let negative = toml::from_str::<MonthlyRecord>(
            "month = 1\nrevenue = 10\nexpenses = -4\nrentals = 1\n",
        );
        assert!(negative.is_err());

        // the largest revenue still loads
        let huge = format!(
            "month = 1\nrevenue = {}\nexpenses = 0\nrentals = 1\n",
            i64::MAX
        );
        let ok: MonthlyRecord = toml::from_str(&huge).unwrap();
        assert_eq!(ok.profit(), i64::MAX);
    }
}
