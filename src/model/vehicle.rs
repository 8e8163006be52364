use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleCategory {
    Citadine,
    Berline,
    #[serde(rename = "SUV")]
    Suv,
    Utilitaire,
    Premium,
}

impl VehicleCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleCategory::Citadine => "Citadine",
            VehicleCategory::Berline => "Berline",
            VehicleCategory::Suv => "SUV",
            VehicleCategory::Utilitaire => "Utilitaire",
            VehicleCategory::Premium => "Premium",
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    Rented,
    Maintenance,
    OutOfService,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 4] = [
        VehicleStatus::Available,
        VehicleStatus::Rented,
        VehicleStatus::Maintenance,
        VehicleStatus::OutOfService,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Rented => "rented",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::OutOfService => "out_of_service",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VehicleStatus::Available => "Disponible",
            VehicleStatus::Rented => "En location",
            VehicleStatus::Maintenance => "En maintenance",
            VehicleStatus::OutOfService => "Hors service",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| DashboardError::InvalidFilter {
                field: "status",
                value: s.to_string(),
                expected: join_ids(VehicleStatus::ALL.iter().map(|st| st.as_str())),
            })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Vehicle {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub license_plate: String,
    pub category: VehicleCategory,
    pub agency_id: String,
    pub year: u16,
    pub status: VehicleStatus,
    pub daily_rate: f64,
    pub mileage: u32,
    pub total_revenue: i64,
    pub total_rentals: u32,
}

impl Vehicle {
    /// "Brand Model"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// "Brand Model (PLATE)"
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.license_plate)
    }

    /// Text matched by free-text fleet search.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.brand, self.model, self.license_plate)
    }
}

pub(crate) fn join_ids<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    ids.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_and_labels() {
        assert_eq!(
            "out_of_service".parse::<VehicleStatus>().unwrap(),
            VehicleStatus::OutOfService
        );
        assert_eq!("Rented".parse::<VehicleStatus>().unwrap(), VehicleStatus::Rented);
        assert_eq!(VehicleStatus::Maintenance.label(), "En maintenance");

        let err = "broken".parse::<VehicleStatus>().unwrap_err();
        assert!(err.to_string().contains("available, rented, maintenance, out_of_service"));
    }

    #[test]
    fn test_category_wire_names() {
        assert_eq!(VehicleCategory::Suv.to_string(), "SUV");
        let json = serde_json::to_string(&VehicleCategory::Suv).unwrap();
        assert_eq!(json, "\"SUV\"");
    }
}
