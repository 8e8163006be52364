use serde::{Deserialize, Serialize};

use crate::engine::{GrowthWindow, KpiOptions, FLEET_UTILIZATION_PLACEHOLDER};
use crate::format::FormatSettings;

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct DashboardConfig {
    #[serde(default)]
    pub format: FormatSettings,
    #[serde(default)]
    pub kpi: KpiSettings,
    #[serde(default)]
    pub fleet: FleetSettings,
    #[serde(default)]
    pub data: DataSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct KpiSettings {
    #[serde(default)]
    pub growth_window: GrowthWindow,
    #[serde(default = "default_fleet_utilization")]
    pub fleet_utilization: f64,
}

fn default_fleet_utilization() -> f64 {
    FLEET_UTILIZATION_PLACEHOLDER
}

impl Default for KpiSettings {
    fn default() -> Self {
        Self {
            growth_window: GrowthWindow::default(),
            fleet_utilization: default_fleet_utilization(),
        }
    }
}

impl KpiSettings {
    pub fn options(&self) -> KpiOptions {
        KpiOptions {
            growth_window: self.growth_window,
            fleet_utilization: self.fleet_utilization,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FleetSettings {
    #[serde(default = "default_top_vehicles")]
    pub top_vehicles: usize,
}

fn default_top_vehicles() -> usize {
    10
}

impl Default for FleetSettings {
    fn default() -> Self {
        Self {
            top_vehicles: default_top_vehicles(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct DataSettings {
    /// Dataset file; the built-in sample is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
}
