use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::model::Column;

/// Optional settings file read from the working directory at start-up.
pub const CONFIG_FILE: &str = "market-darpan.json";

/// A name in a settings or widget file that is not part of the fixed schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
    #[error("'{0}' is not one of the widget colours")]
    UnknownColor(String),
}

/// Start-up settings. Every field has a default, so a partial file is fine.
///
/// Column names are the sheet headers (`"Zone"`, `"Defect Type"`, ...);
/// an unknown header fails deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Columns offered as multi-selects on the overview page.
    pub dashboard_filters: Vec<Column>,
    /// Columns offered as multi-selects on the audit record list.
    pub record_filters: Vec<Column>,
    /// Column the date range applies to.
    pub date_column: Column,
    /// Simulated SSO round-trip.
    pub login_delay_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            dashboard_filters: vec![Column::Zone, Column::City, Column::Brand],
            record_filters: vec![Column::Zone, Column::Brand, Column::DefectType],
            date_column: Column::SurveyDate,
            login_delay_ms: 1500,
        }
    }
}

impl DashboardConfig {
    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing dashboard config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text)
    }

    /// Load `path` if it exists. A broken file is logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {e:#}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = DashboardConfig::from_json(r#"{ "record_filters": ["City", "Defect Type"] }"#)
            .unwrap();
        assert_eq!(cfg.record_filters, vec![Column::City, Column::DefectType]);
        assert_eq!(cfg.dashboard_filters, DashboardConfig::default().dashboard_filters);
        assert_eq!(cfg.login_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn unknown_column_is_rejected() {
        let err = DashboardConfig::from_json(r#"{ "dashboard_filters": ["Colour"] }"#).unwrap_err();
        assert!(format!("{err:#}").contains("unknown column 'Colour'"));
    }

    #[test]
    fn unknown_date_column_is_rejected() {
        let err = DashboardConfig::from_json(r#"{ "date_column": "When" }"#).unwrap_err();
        let expected = ConfigError::UnknownColumn("When".into()).to_string();
        assert!(err.root_cause().to_string().contains(&expected));
    }

    #[test]
    fn missing_file_falls_back() {
        let cfg = DashboardConfig::load_or_default(Path::new("/nonexistent/market-darpan.json"));
        assert_eq!(cfg, DashboardConfig::default());
    }
}
