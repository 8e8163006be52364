mod sample;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{DashboardError, Result};
use crate::model::{
    Agency, AgencySelection, ExpenseCategory, ExpenseTransaction, MonthlyRecord, UserProfile,
    Vehicle, ALL_AGENCIES,
};

/// How far category percentages may drift from 100 before we complain.
const PERCENTAGE_TOLERANCE: f64 = 0.5;

/// Everything the dashboard reads. Immutable once loaded.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Dataset {
    pub agencies: Vec<Agency>,
    pub vehicles: Vec<Vehicle>,
    /// The canonical all-agency series, in calendar order.
    pub monthly: Vec<MonthlyRecord>,
    #[serde(default)]
    pub expense_categories: Vec<ExpenseCategory>,
    #[serde(default)]
    pub expenses: Vec<ExpenseTransaction>,
    #[serde(default)]
    pub users: Vec<UserProfile>,
}

impl Dataset {
    /// Built-in demo data for the rental network.
    pub fn sample() -> Self {
        sample::build()
    }

    /// Check cross-record constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let mut agency_ids = HashSet::new();
        for agency in &self.agencies {
            if agency.id.eq_ignore_ascii_case(ALL_AGENCIES) {
                return Err(invalid(format!(
                    "'{ALL_AGENCIES}' is reserved and cannot be used as an agency id"
                )));
            }
            if !agency_ids.insert(agency.id.as_str()) {
                return Err(invalid(format!("duplicate agency id '{}'", agency.id)));
            }
        }

        let mut previous_month = 0;
        for record in &self.monthly {
            if record.month() <= previous_month {
                return Err(invalid(format!(
                    "monthly records must be in strictly increasing month order (month {} after {})",
                    record.month(),
                    previous_month
                )));
            }
            previous_month = record.month();
            if record.revenue() < 0 || record.expenses() < 0 {
                return Err(invalid(format!(
                    "month {} has negative revenue or expenses",
                    record.month()
                )));
            }
        }

        for vehicle in &self.vehicles {
            if !agency_ids.contains(vehicle.agency_id.as_str()) {
                return Err(invalid(format!(
                    "vehicle '{}' references unknown agency '{}'",
                    vehicle.id, vehicle.agency_id
                )));
            }
            if vehicle.total_revenue < 0 {
                return Err(invalid(format!("vehicle '{}' has negative revenue", vehicle.id)));
            }
        }

        for expense in &self.expenses {
            if !agency_ids.contains(expense.agency_id.as_str()) {
                return Err(invalid(format!(
                    "expense '{}' references unknown agency '{}'",
                    expense.id, expense.agency_id
                )));
            }
            if expense.amount.is_nan() || expense.amount <= 0.0 {
                return Err(invalid(format!(
                    "expense '{}' must have a positive amount",
                    expense.id
                )));
            }
        }

        for user in &self.users {
            if !agency_ids.contains(user.agency_id.as_str()) {
                return Err(invalid(format!(
                    "user '{}' references unknown agency '{}'",
                    user.id, user.agency_id
                )));
            }
        }

        let mut category_names = HashSet::new();
        for category in &self.expense_categories {
            if !category_names.insert(category.name.as_str()) {
                return Err(invalid(format!("duplicate expense category '{}'", category.name)));
            }
            if category.amount < 0.0 {
                return Err(invalid(format!(
                    "expense category '{}' has a negative amount",
                    category.name
                )));
            }
        }

        if !self.expense_categories.is_empty() {
            let total: f64 = self.expense_categories.iter().map(|c| c.percentage).sum();
            if (total - 100.0).abs() > PERCENTAGE_TOLERANCE {
                warn!(total, "expense category percentages do not add up to 100");
            }
        }

        Ok(())
    }

    /// Agency display name, or the id itself when unknown.
    pub fn agency_name<'a>(&'a self, agency_id: &'a str) -> &'a str {
        self.agencies
            .iter()
            .find(|a| a.id == agency_id)
            .map_or(agency_id, |a| a.name.as_str())
    }

    /// "Brand Model (PLATE)", or the id itself when unknown.
    pub fn vehicle_label(&self, vehicle_id: &str) -> String {
        self.vehicles
            .iter()
            .find(|v| v.id == vehicle_id)
            .map_or_else(|| vehicle_id.to_string(), Vehicle::label)
    }

    pub fn vehicles_for(&self, selection: &AgencySelection) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| selection.matches(&v.agency_id))
            .collect()
    }

    pub fn expenses_for(&self, selection: &AgencySelection) -> Vec<&ExpenseTransaction> {
        self.expenses
            .iter()
            .filter(|e| selection.matches(&e.agency_id))
            .collect()
    }
}

fn invalid(message: String) -> DashboardError {
    DashboardError::InvalidInput(message)
}

/// Load and validate a dataset TOML file
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Err(DashboardError::DatasetNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let dataset: Dataset = toml::from_str(&content).map_err(|e| DashboardError::DatasetParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    dataset.validate()?;
    debug!(
        path = %path.display(),
        agencies = dataset.agencies.len(),
        vehicles = dataset.vehicles.len(),
        months = dataset.monthly.len(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Serialize a dataset as TOML, e.g. for `init`
pub fn dataset_to_toml(dataset: &Dataset) -> Result<String> {
    toml::to_string_pretty(dataset).map_err(|e| DashboardError::Serialize(format!("dataset: {e}")))
}
