pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod format;
pub mod model;

pub use config::{DashboardConfig, KpiSettings};
pub use dataset::Dataset;
pub use engine::{compute_kpis, project_series, rollup, DashboardView, KpiOptions, KpiSnapshot, Selection};
pub use error::{DashboardError, Result};
pub use format::NumberFormat;
