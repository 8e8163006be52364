use tracing::debug;

use crate::model::{AgencySelection, KnownAgency, MonthlyRecord};

/// Multiplier used for agencies missing from the table.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Scaling factor of an agency against the canonical series. Unknown
/// agencies get [`DEFAULT_MULTIPLIER`].
pub fn agency_multiplier(agency_id: &str) -> f64 {
    match KnownAgency::from_id(agency_id) {
        Some(agency) => agency.multiplier(),
        None => {
            debug!(agency_id, "no multiplier for agency, using default");
            DEFAULT_MULTIPLIER
        }
    }
}

/// Round half up, so a scaled loss of -6.5 becomes -6.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn scale(value: i64, multiplier: f64) -> i64 {
    round_half_up(value as f64 * multiplier) as i64
}

/// Derive an agency's monthly series from the canonical one.
///
/// Each field is scaled and rounded on its own, so a projected record's
/// profit can be off from `revenue - expenses` by one unit.
pub fn project_series(canonical: &[MonthlyRecord], selection: &AgencySelection) -> Vec<MonthlyRecord> {
    let agency_id = match selection {
        AgencySelection::All => return canonical.to_vec(),
        AgencySelection::Agency(id) => id,
    };

    let multiplier = agency_multiplier(agency_id);
    canonical
        .iter()
        .map(|m| {
            MonthlyRecord::scaled(
                m.month(),
                scale(m.revenue(), multiplier),
                scale(m.expenses(), multiplier),
                scale(m.profit(), multiplier),
                round_half_up(f64::from(m.rentals()) * multiplier) as u32,
            )
        })
        .collect()
}
