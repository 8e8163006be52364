use serde::Serialize;

use crate::model::{
    AgencySelection, ExpenseStatus, ExpenseTransaction, Role, UserProfile, Vehicle, VehicleStatus,
};

/// Fleet page filters. Empty search and `None` fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct VehicleFilter {
    pub search: String,
    pub agency: AgencySelection,
    pub status: Option<VehicleStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub search: String,
    pub agency: AgencySelection,
    pub category: Option<String>,
    pub status: Option<ExpenseStatus>,
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Vehicles matching every active filter, in input order.
pub fn filter_vehicles<'a>(vehicles: &'a [Vehicle], filter: &VehicleFilter) -> Vec<&'a Vehicle> {
    let needle = filter.search.to_lowercase();
    vehicles
        .iter()
        .filter(|v| needle.is_empty() || contains_ci(&v.search_text(), &needle))
        .filter(|v| filter.agency.matches(&v.agency_id))
        .filter(|v| filter.status.map_or(true, |s| v.status == s))
        .collect()
}

/// Expenses matching every active filter, in input order. Search looks
/// at the description and the category.
pub fn filter_expenses<'a>(
    expenses: &'a [ExpenseTransaction],
    filter: &ExpenseFilter,
) -> Vec<&'a ExpenseTransaction> {
    let needle = filter.search.to_lowercase();
    expenses
        .iter()
        .filter(|e| {
            needle.is_empty()
                || contains_ci(&e.description, &needle)
                || contains_ci(&e.category, &needle)
        })
        .filter(|e| filter.agency.matches(&e.agency_id))
        .filter(|e| filter.category.as_deref().map_or(true, |c| e.category == c))
        .filter(|e| filter.status.map_or(true, |s| e.status == s))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FleetSummary {
    pub total: usize,
    pub available: usize,
    pub rented: usize,
    pub maintenance: usize,
    pub out_of_service: usize,
    pub total_revenue: i64,
}

pub fn fleet_summary<'a>(vehicles: impl IntoIterator<Item = &'a Vehicle>) -> FleetSummary {
    vehicles
        .into_iter()
        .fold(FleetSummary::default(), |mut acc, v| {
            acc.total += 1;
            acc.total_revenue += v.total_revenue;
            match v.status {
                VehicleStatus::Available => acc.available += 1,
                VehicleStatus::Rented => acc.rented += 1,
                VehicleStatus::Maintenance => acc.maintenance += 1,
                VehicleStatus::OutOfService => acc.out_of_service += 1,
            }
            acc
        })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpenseSummary {
    pub total: f64,
    pub pending: f64,
    pub approved: f64,
    pub rejected: f64,
    pub count: usize,
}

pub fn expense_summary<'a>(
    expenses: impl IntoIterator<Item = &'a ExpenseTransaction>,
) -> ExpenseSummary {
    expenses
        .into_iter()
        .fold(ExpenseSummary::default(), |mut acc, e| {
            acc.total += e.amount;
            acc.count += 1;
            match e.status {
                ExpenseStatus::Pending => acc.pending += e.amount,
                ExpenseStatus::Approved => acc.approved += e.amount,
                ExpenseStatus::Rejected => acc.rejected += e.amount,
            }
            acc
        })
}

/// Users per role, every role listed even when nobody holds it.
pub fn role_counts(users: &[UserProfile]) -> Vec<(Role, usize)> {
    Role::ALL
        .into_iter()
        .map(|role| (role, users.iter().filter(|u| u.role == role).count()))
        .collect()
}
