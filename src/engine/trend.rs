use serde::Serialize;

use super::kpi::{compute_kpis, growth_rate, KpiOptions, KpiSnapshot};
use super::projection::project_series;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::model::{Agency, AgencySelection, MonthlyRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

/// A month next to how its profit moved since the month before.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    pub record: MonthlyRecord,
    /// `None` for the first month or when the previous month made no profit.
    pub profit_growth: Option<f64>,
    pub trend: Trend,
}

pub fn monthly_evolution(series: &[MonthlyRecord]) -> Vec<MonthlyTrend> {
    let mut previous: Option<i64> = None;
    series
        .iter()
        .map(|record| {
            let current = record.profit();
            let (profit_growth, trend) = match previous {
                Some(prev) if prev != 0 => {
                    let trend = match current.cmp(&prev) {
                        std::cmp::Ordering::Greater => Trend::Up,
                        std::cmp::Ordering::Less => Trend::Down,
                        std::cmp::Ordering::Equal => Trend::Flat,
                    };
                    (growth_rate(current as f64, prev as f64), trend)
                }
                _ => (None, Trend::Flat),
            };
            previous = Some(current);
            MonthlyTrend {
                record: record.clone(),
                profit_growth,
                trend,
            }
        })
        .collect()
}

/// One month of revenue, split across agencies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthComparison {
    pub month: u32,
    /// `(agency id, projected revenue)` in agency order.
    pub revenues: Vec<(String, i64)>,
}

/// Month x agency matrix of projected revenue.
pub fn agency_comparison(canonical: &[MonthlyRecord], agencies: &[Agency]) -> Vec<MonthComparison> {
    let projected: Vec<(&str, Vec<MonthlyRecord>)> = agencies
        .iter()
        .map(|a| {
            let selection = AgencySelection::Agency(a.id.clone());
            (a.id.as_str(), project_series(canonical, &selection))
        })
        .collect();

    canonical
        .iter()
        .enumerate()
        .map(|(i, month)| MonthComparison {
            month: month.month(),
            revenues: projected
                .iter()
                .map(|(id, series)| (id.to_string(), series[i].revenue()))
                .collect(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgencySummary {
    pub agency_id: String,
    pub name: String,
    pub city: String,
    pub kpis: KpiSnapshot,
    pub vehicle_count: usize,
}

/// KPIs and fleet size for every agency of the dataset.
pub fn agency_summaries(dataset: &Dataset, options: &KpiOptions) -> Result<Vec<AgencySummary>> {
    dataset
        .agencies
        .iter()
        .map(|agency| {
            let selection = AgencySelection::Agency(agency.id.clone());
            let series = project_series(&dataset.monthly, &selection);
            Ok(AgencySummary {
                agency_id: agency.id.clone(),
                name: agency.name.clone(),
                city: agency.city.clone(),
                kpis: compute_kpis(&series, options)?,
                vehicle_count: dataset.vehicles_for(&selection).len(),
            })
        })
        .collect()
}
