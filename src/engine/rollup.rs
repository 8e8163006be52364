use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::hash::Hash;

use super::kpi::ratio;
use crate::model::{ExpenseCategory, ExpenseTransaction, Vehicle, VehicleCategory};

/// Group `records` by `key_fn`, folding each record into its group's
/// accumulator. Groups come out in the order their key was first seen.
pub fn rollup<T, K, A, KF, VF>(records: impl IntoIterator<Item = T>, key_fn: KF, mut fold: VF) -> Vec<(K, A)>
where
    K: Eq + Hash + Clone,
    A: Default,
    KF: Fn(&T) -> K,
    VF: FnMut(&mut A, &T),
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, A)> = Vec::new();

    for record in records {
        let key = key_fn(&record);
        let idx = *positions.entry(key.clone()).or_insert_with(|| {
            groups.push((key, A::default()));
            groups.len() - 1
        });
        fold(&mut groups[idx].1, &record);
    }

    groups
}

/// Items sorted by `key` descending. Equal keys keep their input order
/// (`sort_by_key` is a stable sort).
pub fn rank_by<T, F>(items: &[T], key: F) -> Vec<&T>
where
    F: Fn(&T) -> i64,
{
    let mut ranked: Vec<&T> = items.iter().collect();
    ranked.sort_by_key(|item| Reverse(key(*item)));
    ranked
}

pub fn top_n_by<T, F>(items: &[T], n: usize, key: F) -> Vec<&T>
where
    F: Fn(&T) -> i64,
{
    let mut ranked = rank_by(items, key);
    ranked.truncate(n);
    ranked
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRevenue {
    pub category: VehicleCategory,
    pub revenue: i64,
    pub vehicle_count: usize,
    pub rentals: u64,
}

impl CategoryRevenue {
    /// Revenue per vehicle. A category only exists once a vehicle has
    /// been counted into it, so the count is never zero.
    pub fn avg_revenue(&self) -> f64 {
        self.revenue as f64 / self.vehicle_count as f64
    }
}

#[derive(Default)]
struct CategoryAcc {
    revenue: i64,
    count: usize,
    rentals: u64,
}

pub fn category_breakdown<'a>(vehicles: impl IntoIterator<Item = &'a Vehicle>) -> Vec<CategoryRevenue> {
    rollup(vehicles, |v| v.category, |acc: &mut CategoryAcc, v| {
        acc.revenue += v.total_revenue;
        acc.count += 1;
        acc.rentals += u64::from(v.total_rentals);
    })
    .into_iter()
    .map(|(category, acc)| CategoryRevenue {
        category,
        revenue: acc.revenue,
        vehicle_count: acc.count,
        rentals: acc.rentals,
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgencyRevenue {
    pub agency_id: String,
    pub revenue: i64,
}

pub fn agency_revenue<'a>(vehicles: impl IntoIterator<Item = &'a Vehicle>) -> Vec<AgencyRevenue> {
    rollup(vehicles, |v| v.agency_id.clone(), |revenue: &mut i64, v| {
        *revenue += v.total_revenue;
    })
    .into_iter()
    .map(|(agency_id, revenue)| AgencyRevenue { agency_id, revenue })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub amount: f64,
    pub count: usize,
}

pub fn expenses_by_category<'a>(
    expenses: impl IntoIterator<Item = &'a ExpenseTransaction>,
) -> Vec<CategorySpend> {
    rollup(expenses, |e| e.category.clone(), |acc: &mut (f64, usize), e| {
        acc.0 += e.amount;
        acc.1 += 1;
    })
    .into_iter()
    .map(|(category, (amount, count))| CategorySpend {
        category,
        amount,
        count,
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRanking<'a> {
    pub vehicle: &'a Vehicle,
    pub avg_per_rental: Option<f64>,
}

/// The `n` best earners, best first, with their revenue per rental.
pub fn vehicle_rankings(vehicles: &[Vehicle], n: usize) -> Vec<VehicleRanking<'_>> {
    top_vehicles(vehicles, n)
        .into_iter()
        .map(|vehicle| VehicleRanking {
            vehicle,
            avg_per_rental: ratio(vehicle.total_revenue as f64, f64::from(vehicle.total_rentals)),
        })
        .collect()
}

pub fn top_vehicles(vehicles: &[Vehicle], n: usize) -> Vec<&Vehicle> {
    top_n_by(vehicles, n, |v| v.total_revenue)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub amount: f64,
    /// Share recomputed from amounts, 0-100.
    pub share: Option<f64>,
    /// Share as stored with the category.
    pub reported_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShares {
    pub total: f64,
    pub shares: Vec<CategoryShare>,
}

pub fn category_shares(categories: &[ExpenseCategory]) -> CategoryShares {
    let total: f64 = categories.iter().map(|c| c.amount).sum();
    let shares = categories
        .iter()
        .map(|c| CategoryShare {
            name: c.name.clone(),
            amount: c.amount,
            share: ratio(c.amount, total).map(|r| r * 100.0),
            reported_percentage: c.percentage,
        })
        .collect();
    CategoryShares { total, shares }
}
