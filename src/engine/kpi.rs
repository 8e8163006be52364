use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::model::MonthlyRecord;

/// Fleet utilization shown on the dashboard. Not derived from vehicle
/// occupancy yet; it is a fixed figure until rental-day data exists.
pub const FLEET_UTILIZATION_PLACEHOLDER: f64 = 78.5;

/// Months compared at each end of the series for growth figures.
pub const DEFAULT_GROWTH_MONTHS: usize = 6;

/// Size of the earlier/later halves used for growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowSetting", into = "WindowSetting")]
pub enum GrowthWindow {
    /// Always compare the first `n` months with the last `n` months.
    Fixed(usize),
    /// Use half the series length (rounded down).
    Half,
}

impl Default for GrowthWindow {
    fn default() -> Self {
        GrowthWindow::Fixed(DEFAULT_GROWTH_MONTHS)
    }
}

impl GrowthWindow {
    pub fn months(self, series_len: usize) -> usize {
        match self {
            GrowthWindow::Fixed(n) => n,
            GrowthWindow::Half => series_len / 2,
        }
    }
}

impl FromStr for GrowthWindow {
    type Err = DashboardError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("half") {
            return Ok(GrowthWindow::Half);
        }
        match s.parse::<usize>() {
            Ok(n) if n > 0 => Ok(GrowthWindow::Fixed(n)),
            _ => Err(DashboardError::InvalidFilter {
                field: "growth-window",
                value: s.to_string(),
                expected: "a positive number of months, half".to_string(),
            }),
        }
    }
}

impl fmt::Display for GrowthWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrowthWindow::Fixed(n) => write!(f, "{n}"),
            GrowthWindow::Half => f.write_str("half"),
        }
    }
}

/// `growth_window = 6` or `growth_window = "half"` in config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum WindowSetting {
    Months(usize),
    Keyword(String),
}

impl TryFrom<WindowSetting> for GrowthWindow {
    type Error = DashboardError;

    fn try_from(setting: WindowSetting) -> std::result::Result<Self, Self::Error> {
        match setting {
            WindowSetting::Months(0) => Err(DashboardError::InvalidInput(
                "growth_window must be at least 1 month".to_string(),
            )),
            WindowSetting::Months(n) => Ok(GrowthWindow::Fixed(n)),
            WindowSetting::Keyword(s) => s.parse(),
        }
    }
}

impl From<GrowthWindow> for WindowSetting {
    fn from(window: GrowthWindow) -> Self {
        match window {
            GrowthWindow::Fixed(n) => WindowSetting::Months(n),
            GrowthWindow::Half => WindowSetting::Keyword("half".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KpiOptions {
    pub growth_window: GrowthWindow,
    pub fleet_utilization: f64,
}

impl Default for KpiOptions {
    fn default() -> Self {
        Self {
            growth_window: GrowthWindow::default(),
            fleet_utilization: FLEET_UTILIZATION_PLACEHOLDER,
        }
    }
}

/// Summary metrics of one monthly series. Ratios are `None` when their
/// denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSnapshot {
    pub total_revenue: i64,
    pub total_expenses: i64,
    pub net_profit: i64,
    pub profit_margin: Option<f64>,
    pub total_rentals: u64,
    pub avg_revenue_per_rental: Option<f64>,
    pub fleet_utilization: f64,
    pub revenue_growth: Option<f64>,
    pub expense_growth: Option<f64>,
}

/// `numerator / denominator`, or `None` for a zero denominator
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Percentage change from `previous` to `current`
pub fn growth_rate(current: f64, previous: f64) -> Option<f64> {
    ratio(current - previous, previous).map(|r| r * 100.0)
}

/// Sum of one field over `records`, or `InvalidInput` if it overflows.
fn checked_total(
    records: &[MonthlyRecord],
    name: &str,
    field: fn(&MonthlyRecord) -> i64,
) -> Result<i64> {
    records.iter().map(field).try_fold(0i64, |acc, v| {
        acc.checked_add(v).ok_or_else(|| {
            DashboardError::InvalidInput(format!("total {name} does not fit in 64 bits"))
        })
    })
}

/// Compute the dashboard KPIs of a chronological monthly series.
///
/// The series must be non-empty and hold at least two full growth windows
/// (12 months with the default window of 6).
pub fn compute_kpis(series: &[MonthlyRecord], options: &KpiOptions) -> Result<KpiSnapshot> {
    if series.is_empty() {
        return Err(DashboardError::InvalidInput(
            "monthly series must be non-empty".to_string(),
        ));
    }

    let len = series.len();
    let window = options.growth_window.months(len);
    if window == 0 || len < window * 2 {
        return Err(DashboardError::InvalidInput(format!(
            "growth window of {window} month(s) needs at least {} months, got {len}",
            (window * 2).max(2)
        )));
    }

    let total_revenue = checked_total(series, "revenue", MonthlyRecord::revenue)?;
    let total_expenses = checked_total(series, "expenses", MonthlyRecord::expenses)?;
    let total_rentals: u64 = series.iter().map(|m| u64::from(m.rentals())).sum();
    let net_profit = total_revenue.checked_sub(total_expenses).ok_or_else(|| {
        DashboardError::InvalidInput("net profit does not fit in 64 bits".to_string())
    })?;

    let earlier = &series[..window];
    let later = &series[len - window..];

    let snapshot = KpiSnapshot {
        total_revenue,
        total_expenses,
        net_profit,
        profit_margin: ratio(net_profit as f64, total_revenue as f64).map(|r| r * 100.0),
        total_rentals,
        avg_revenue_per_rental: ratio(total_revenue as f64, total_rentals as f64),
        fleet_utilization: options.fleet_utilization,
        revenue_growth: growth_rate(
            checked_total(later, "revenue", MonthlyRecord::revenue)? as f64,
            checked_total(earlier, "revenue", MonthlyRecord::revenue)? as f64,
        ),
        expense_growth: growth_rate(
            checked_total(later, "expenses", MonthlyRecord::expenses)? as f64,
            checked_total(earlier, "expenses", MonthlyRecord::expenses)? as f64,
        ),
    };

    debug!(months = len, window, net_profit, "computed KPIs");
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn flat_series(len: u32, revenue: i64, expenses: i64, rentals: u32) -> Vec<MonthlyRecord> {
        (1..=len)
            .map(|m| MonthlyRecord::new(m, revenue, expenses, rentals))
            .collect()
    }

    #[test]
    fn test_full_year_totals() {
        let series = Dataset::sample().monthly;
        let kpis = compute_kpis(&series, &KpiOptions::default()).unwrap();

        assert_eq!(kpis.total_revenue, 4_583_000);
        assert_eq!(kpis.total_expenses, 2_863_000);
        assert_eq!(kpis.net_profit, 1_720_000);
        assert_eq!(kpis.total_rentals, 5_600);
        assert!((kpis.profit_margin.unwrap() - 37.5300).abs() < 1e-3);
        assert!((kpis.avg_revenue_per_rental.unwrap() - 818.3929).abs() < 1e-3);
        assert_eq!(kpis.fleet_utilization, FLEET_UTILIZATION_PLACEHOLDER);
    }

    #[test]
    fn test_net_profit_matches_record_profits() {
        let series = Dataset::sample().monthly;
        let kpis = compute_kpis(&series, &KpiOptions::default()).unwrap();
        let profit_sum: i64 = series.iter().map(MonthlyRecord::profit).sum();
        assert_eq!(kpis.net_profit, profit_sum);
    }

    #[test]
    fn test_growth_compares_first_and_last_six_months() {
        let series = Dataset::sample().monthly;
        let kpis = compute_kpis(&series, &KpiOptions::default()).unwrap();

        // Jan-Jun revenue 2,030,000 vs Jul-Dec 2,553,000
        let expected = (2_553_000.0 - 2_030_000.0) / 2_030_000.0 * 100.0;
        assert!((kpis.revenue_growth.unwrap() - expected).abs() < 1e-9);

        // Jan-Jun expenses 1,313,000 vs Jul-Dec 1,550,000
        let expected = (1_550_000.0 - 1_313_000.0) / 1_313_000.0 * 100.0;
        assert!((kpis.expense_growth.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_series_is_invalid_input() {
        let err = compute_kpis(&[], &KpiOptions::default()).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput(_)));
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn test_short_series_rejected_with_fixed_window() {
        let series = flat_series(5, 100, 50, 1);
        let err = compute_kpis(&series, &KpiOptions::default()).unwrap_err();
        assert!(err.to_string().contains("at least 12 months"));

        let series = flat_series(11, 100, 50, 1);
        assert!(compute_kpis(&series, &KpiOptions::default()).is_err());
    }

    #[test]
    fn test_half_window_handles_short_series() {
        let options = KpiOptions {
            growth_window: GrowthWindow::Half,
            ..KpiOptions::default()
        };
        let series = vec![
            MonthlyRecord::new(1, 100, 80, 2),
            MonthlyRecord::new(2, 100, 80, 2),
            MonthlyRecord::new(3, 999, 0, 0),
            MonthlyRecord::new(4, 150, 60, 3),
            MonthlyRecord::new(5, 150, 60, 3),
        ];
        let kpis = compute_kpis(&series, &options).unwrap();
        // window of 2; the middle month belongs to neither half
        assert!((kpis.revenue_growth.unwrap() - 50.0).abs() < 1e-9);
        assert!((kpis.expense_growth.unwrap() + 25.0).abs() < 1e-9);

        let single = flat_series(1, 100, 50, 1);
        assert!(compute_kpis(&single, &options).is_err());
    }

    #[test]
    fn test_zero_denominators_are_undefined() {
        let series = flat_series(12, 0, 0, 0);
        let kpis = compute_kpis(&series, &KpiOptions::default()).unwrap();
        assert_eq!(kpis.profit_margin, None);
        assert_eq!(kpis.avg_revenue_per_rental, None);
        assert_eq!(kpis.revenue_growth, None);
        assert_eq!(kpis.expense_growth, None);
        assert_eq!(kpis.net_profit, 0);
    }

    #[test]
    fn test_overflowing_totals_are_invalid_input() {
        let mut series = flat_series(12, 0, 0, 1);
        series[0] = MonthlyRecord::new(1, i64::MAX, 0, 1);
        series[1] = MonthlyRecord::new(2, 1, 0, 1);
        let err = compute_kpis(&series, &KpiOptions::default()).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput(_)));
        assert!(err.to_string().contains("total revenue"));
    }

    #[test]
    fn test_growth_window_parsing() {
        assert_eq!("half".parse::<GrowthWindow>().unwrap(), GrowthWindow::Half);
        assert_eq!("3".parse::<GrowthWindow>().unwrap(), GrowthWindow::Fixed(3));
        assert!("0".parse::<GrowthWindow>().is_err());
        assert!("weekly".parse::<GrowthWindow>().is_err());
    }

    #[test]
    fn test_snapshot_serializes_undefined_as_null() {
        let series = flat_series(12, 0, 0, 0);
        let kpis = compute_kpis(&series, &KpiOptions::default()).unwrap();
        let json = serde_json::to_value(&kpis).unwrap();
        assert!(json["profit_margin"].is_null());
        assert_eq!(json["fleet_utilization"], 78.5);
    }
}
