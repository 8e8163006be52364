use serde::Serialize;

use super::kpi::{compute_kpis, KpiOptions, KpiSnapshot};
use super::projection::project_series;
use super::trend::{monthly_evolution, MonthlyTrend};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::model::{AgencySelection, MonthlyRecord};

/// What the user is currently looking at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub agency: AgencySelection,
}

impl Selection {
    pub fn agency(agency: AgencySelection) -> Self {
        Self { agency }
    }
}

/// Everything the main dashboard shows for one selection. Built fresh
/// from the dataset each time; nothing is kept between selections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub agency: String,
    pub agency_name: String,
    pub series: Vec<MonthlyRecord>,
    pub kpis: KpiSnapshot,
    pub evolution: Vec<MonthlyTrend>,
}

impl DashboardView {
    pub fn build(dataset: &Dataset, selection: &Selection, options: &KpiOptions) -> Result<Self> {
        let series = project_series(&dataset.monthly, &selection.agency);
        let kpis = compute_kpis(&series, options)?;
        let evolution = monthly_evolution(&series);

        let agency_name = match &selection.agency {
            AgencySelection::All => "Toutes les agences".to_string(),
            AgencySelection::Agency(id) => dataset.agency_name(id).to_string(),
        };

        Ok(Self {
            agency: selection.agency.to_string(),
            agency_name,
            series,
            kpis,
            evolution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;

    #[test]
    fn test_view_for_all_agencies() {
        let dataset = Dataset::sample();
        let view = DashboardView::build(&dataset, &Selection::default(), &KpiOptions::default()).unwrap();
        assert_eq!(view.agency, "all");
        assert_eq!(view.agency_name, "Toutes les agences");
        assert_eq!(view.series, dataset.monthly);
        assert_eq!(view.kpis.net_profit, 1_720_000);
        assert_eq!(view.evolution.len(), 12);
    }

    #[test]
    fn test_view_for_one_agency() {
        let dataset = Dataset::sample();
        let selection = Selection::agency(AgencySelection::Agency("paris".to_string()));
        let view = DashboardView::build(&dataset, &selection, &KpiOptions::default()).unwrap();
        assert_eq!(view.agency_name, "Paris Centre");
        assert_eq!(view.series[0].revenue(), 370_500);
        assert_eq!(view.kpis.total_revenue, 5_957_900);
    }

    #[test]
    fn test_view_propagates_invalid_series() {
        let mut dataset = Dataset::sample();
        dataset.monthly.truncate(4);
        let err = DashboardView::build(&dataset, &Selection::default(), &KpiOptions::default())
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput(_)));
    }
}
