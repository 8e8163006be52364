use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// Query value meaning "every agency". Never stored as a real agency id.
pub const ALL_AGENCIES: &str = "all";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Agency {
    pub id: String,
    pub name: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
}

/// Which slice of the business a view is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AgencySelection {
    #[default]
    All,
    Agency(String),
}

impl AgencySelection {
    pub fn matches(&self, agency_id: &str) -> bool {
        match self {
            AgencySelection::All => true,
            AgencySelection::Agency(id) => id == agency_id,
        }
    }
}

impl FromStr for AgencySelection {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DashboardError::InvalidInput(
                "agency id must not be empty".to_string(),
            ));
        }
        if s.eq_ignore_ascii_case(ALL_AGENCIES) {
            Ok(AgencySelection::All)
        } else {
            Ok(AgencySelection::Agency(s.to_string()))
        }
    }
}

impl fmt::Display for AgencySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgencySelection::All => f.write_str(ALL_AGENCIES),
            AgencySelection::Agency(id) => f.write_str(id),
        }
    }
}

/// Agencies with a known scaling factor against the canonical series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownAgency {
    Paris,
    Lyon,
    Marseille,
    Bordeaux,
    Nice,
}

impl KnownAgency {
    pub const ALL: [KnownAgency; 5] = [
        KnownAgency::Paris,
        KnownAgency::Lyon,
        KnownAgency::Marseille,
        KnownAgency::Bordeaux,
        KnownAgency::Nice,
    ];

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "paris" => Some(KnownAgency::Paris),
            "lyon" => Some(KnownAgency::Lyon),
            "marseille" => Some(KnownAgency::Marseille),
            "bordeaux" => Some(KnownAgency::Bordeaux),
            "nice" => Some(KnownAgency::Nice),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            KnownAgency::Paris => "paris",
            KnownAgency::Lyon => "lyon",
            KnownAgency::Marseille => "marseille",
            KnownAgency::Bordeaux => "bordeaux",
            KnownAgency::Nice => "nice",
        }
    }

    /// Share of the canonical series attributed to this agency.
    pub fn multiplier(self) -> f64 {
        match self {
            KnownAgency::Paris => 1.3,
            KnownAgency::Lyon => 0.85,
            KnownAgency::Marseille => 0.75,
            KnownAgency::Bordeaux => 0.55,
            KnownAgency::Nice => 0.65,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_parses_sentinel_case_insensitively() {
        assert_eq!("all".parse::<AgencySelection>().unwrap(), AgencySelection::All);
        assert_eq!("ALL".parse::<AgencySelection>().unwrap(), AgencySelection::All);
        assert_eq!(
            "lyon".parse::<AgencySelection>().unwrap(),
            AgencySelection::Agency("lyon".to_string())
        );
        assert!("  ".parse::<AgencySelection>().is_err());
    }

    #[test]
    fn test_selection_matches() {
        assert!(AgencySelection::All.matches("paris"));
        assert!(AgencySelection::Agency("paris".into()).matches("paris"));
        assert!(!AgencySelection::Agency("paris".into()).matches("nice"));
    }

    #[test]
    fn test_known_agency_ids_round_trip() {
        for agency in KnownAgency::ALL {
            assert_eq!(KnownAgency::from_id(agency.id()), Some(agency));
            assert!((0.0..=2.0).contains(&agency.multiplier()));
        }
        assert_eq!(KnownAgency::from_id("lille"), None);
    }
}
