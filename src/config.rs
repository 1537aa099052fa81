//! Dashboard Configuration Module
//! Dataset location, filter column and the static country registry.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Case-level dataset for Nigeria, Ivory Coast, Kenya and Mozambique.
pub const DEFAULT_DATASET_URL: &str = "https://raw.githubusercontent.com/NAKIBINGEGIDEON/data-analysis-and-visualization-project/92354269f67066df75a9fb6e47cbdcc820cbfc78/data.csv";

/// Column holding the country name of each row.
pub const DEFAULT_COUNTRY_COLUMN: &str = "Country";

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "dashboard.json";

pub const PAGE_TITLE: &str = "Impact of COVID-19 in Sub-Saharan Africa";
pub const PAGE_ICON: &str = "🌍";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Runtime settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub dataset_url: String,
    pub country_column: String,
    pub preview_rows: usize,
    /// Width and height in pixels of exported PNG charts.
    pub chart_export_size: (u32, u32),
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            country_column: DEFAULT_COUNTRY_COLUMN.to_string(),
            preview_rows: 5,
            chart_export_size: (1000, 600),
        }
    }
}

impl DashboardConfig {
    /// Parse a config file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// A registry entry: display name and coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Country {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

/// Countries offered in the selection list.
///
/// Only the names are used, to seed the country selector. The coordinates are
/// shown as hover text and take no part in filtering.
pub static COUNTRIES: [Country; 5] = [
    Country { name: "Nigeria", lat: 9.082, lon: 8.675 },
    Country { name: "Ivory Coast", lat: 7.54, lon: -5.5471 },
    Country { name: "Kenya", lat: 1.2921, lon: 36.8219 },
    Country { name: "Mozambique", lat: -18.665695, lon: 35.529562 },
    // Alternate spelling of Ivory Coast
    Country { name: "Ivory Coast (Côte d'Ivoire)", lat: 7.54, lon: -5.5471 },
];

/// Registry names in declaration order.
pub fn country_names() -> Vec<String> {
    COUNTRIES.iter().map(|c| c.name.to_string()).collect()
}

/// Look up a registry entry by exact name.
pub fn find_country(name: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load_or_default(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.country_column, "Country");
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, r#"{{"dataset_url": "http://localhost/data.csv", "preview_rows": 10}}"#).unwrap();

        let config = DashboardConfig::load_from_file(tmp.path()).unwrap();
        assert_eq!(config.dataset_url, "http://localhost/data.csv");
        assert_eq!(config.preview_rows, 10);
        assert_eq!(config.country_column, DEFAULT_COUNTRY_COLUMN);
        assert_eq!(config.chart_export_size, (1000, 600));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "{{ not json").unwrap();
        assert!(matches!(
            DashboardConfig::load_from_file(tmp.path()),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn registry_keeps_declaration_order() {
        let names = country_names();
        assert_eq!(names.len(), 5);
        assert_eq!(names[0], "Nigeria");
        assert_eq!(names[4], "Ivory Coast (Côte d'Ivoire)");
        assert_eq!(find_country("Kenya").map(|c| c.lon), Some(36.8219));
        assert!(find_country("Ghana").is_none());
    }
}
