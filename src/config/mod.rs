mod settings;

pub use settings::{DashboardConfig, DataSettings, FleetSettings, KpiSettings};

use crate::dataset::{load_dataset, Dataset};
use crate::error::{DashboardError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the config directory path (~/.fleetdash/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "fleetdash") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.fleetdash/
    let home = dirs_home().ok_or_else(|| {
        DashboardError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".fleetdash"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve a configured path: `~/` is expanded, relative paths are taken
/// relative to the config directory.
pub fn resolve_path(path: &str, cfg_dir: &Path) -> PathBuf {
    let expanded = expand_path(path);
    if expanded.is_absolute() {
        expanded
    } else {
        cfg_dir.join(expanded)
    }
}

/// Load config.toml (defaults if missing)
pub fn load_config(cfg_dir: &Path) -> Result<DashboardConfig> {
    let path = cfg_dir.join("config.toml");
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(DashboardConfig::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| DashboardError::ConfigParse { path, source: e })
}

/// Pick the dataset: an explicit file wins, then `[data].dataset`, then
/// the built-in sample.
pub fn load_dashboard_data(
    cfg_dir: &Path,
    config: &DashboardConfig,
    explicit: Option<&Path>,
) -> Result<Dataset> {
    let path = match (explicit, config.data.dataset.as_deref()) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(configured)) => resolve_path(configured, cfg_dir),
        (None, None) => {
            debug!("using built-in sample dataset");
            return Ok(Dataset::sample());
        }
    };
    load_dataset(&path)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[format]
currency_symbol = "€"
symbol_position = "suffix"   # or "prefix"
thousands_separator = " "

[kpi]
# Months compared at each end of the series for growth figures.
# A number, or "half" to use half the series length.
growth_window = 6
# Placeholder until utilization is computed from rental days.
fleet_utilization = 78.5

[fleet]
top_vehicles = 10

[data]
dataset = "dataset.toml"   # relative to this directory
"#;
