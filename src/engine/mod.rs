//! Pure derivations over the dataset: KPIs, per-agency projection,
//! rollups, trends and filters. Nothing here mutates its inputs or keeps
//! state between calls.

pub mod kpi;
pub mod projection;
pub mod query;
pub mod rollup;
pub mod trend;
pub mod view;

pub use kpi::{
    compute_kpis, growth_rate, ratio, GrowthWindow, KpiOptions, KpiSnapshot,
    FLEET_UTILIZATION_PLACEHOLDER,
};
pub use projection::{agency_multiplier, project_series, DEFAULT_MULTIPLIER};
pub use query::{
    expense_summary, filter_expenses, filter_vehicles, fleet_summary, role_counts, ExpenseFilter,
    ExpenseSummary, FleetSummary, VehicleFilter,
};
pub use rollup::{
    agency_revenue, category_breakdown, category_shares, expenses_by_category, rank_by, rollup,
    top_n_by, top_vehicles, vehicle_rankings, AgencyRevenue, CategoryRevenue, CategoryShare,
    CategoryShares, CategorySpend, VehicleRanking,
};
pub use trend::{
    agency_comparison, agency_summaries, monthly_evolution, AgencySummary, MonthComparison,
    MonthlyTrend, Trend,
};
pub use view::{DashboardView, Selection};
