use findash_core::DEFAULT_TARGET_MARGIN;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::input;

pub const DEFAULT_DATA_PATH: &str = "data/financial_data.csv";

/// Dashboard settings, loadable from YAML or JSON. Missing keys take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// CSV with one row per month
    pub data_path: PathBuf,
    /// Net profit margin target, in percent
    pub target_margin: f64,
    /// Month shown when `show` is run without `--month`
    pub default_month: Option<String>,
    /// Fail instead of warning on non-finite percent changes
    pub strict: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            target_margin: DEFAULT_TARGET_MARGIN,
            default_month: None,
            strict: false,
        }
    }
}

impl DashboardConfig {
    /// Load from `.yaml`/`.yml` or `.json`, by extension.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let config: DashboardConfig = match ext.as_deref() {
            Some("yaml") | Some("yml") => input::file::read_yaml(path)?,
            Some("json") => input::file::read_json(path)?,
            _ => {
                return Err(format!(
                    "Unsupported config format '{}': expected .yaml, .yml or .json",
                    path
                )
                .into())
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Command-line values override file values.
    pub fn with_overrides(mut self, target_margin: Option<f64>, strict: bool) -> Self {
        if let Some(t) = target_margin {
            self.target_margin = t;
        }
        self.strict |= strict;
        self
    }

    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if !self.target_margin.is_finite() {
            return Err("target_margin must be a finite number".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let c = DashboardConfig::default();
        assert_eq!(c.data_path, PathBuf::from("data/financial_data.csv"));
        assert_eq!(c.target_margin, 10.0);
        assert_eq!(c.default_month, None);
        assert!(!c.strict);
    }

    #[test]
    fn test_yaml_partial() {
        let file = write_temp(".yaml", "target_margin: 12.5\ndefault_month: Mar\n");
        let c = DashboardConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            c,
            DashboardConfig {
                target_margin: 12.5,
                default_month: Some("Mar".into()),
                ..DashboardConfig::default()
            }
        );
    }

    #[test]
    fn test_json() {
        let file = write_temp(
            ".json",
            r#"{ "data_path": "other.csv", "strict": true }"#,
        );
        let c = DashboardConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(c.data_path, PathBuf::from("other.csv"));
        assert!(c.strict);
        assert_eq!(c.target_margin, 10.0);
    }

    #[test]
    fn test_shipped_config() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/dashboard.yaml");
        let c = DashboardConfig::from_file(path).unwrap();
        assert_eq!(c.default_month.as_deref(), Some("Mar"));
        assert_eq!(c.target_margin, 10.0);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".toml", "target_margin = 1");
        let err = DashboardConfig::from_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Unsupported config format"));
    }

    #[test]
    fn test_overrides() {
        let c = DashboardConfig::default().with_overrides(Some(15.0), true);
        assert_eq!(c.target_margin, 15.0);
        assert!(c.strict);

        let c = DashboardConfig::default().with_overrides(None, false);
        assert_eq!(c.target_margin, 10.0);
        assert!(!c.strict);
    }
}
