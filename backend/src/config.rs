//! # Care Configuration
//!
//! Tunable thresholds and picker ranges, stored as a single YAML file.
//!
//! ## YAML Format
//!
//! ```yaml
//! picker:
//!   earliest_birth_date: 1900-01-01
//!   vaccination_years_back: 1
//!   vaccination_years_ahead: 5
//!   visit_years_back: 1
//!   visit_years_ahead: 1
//! concerns:
//!   newborn_age_days: 90
//!   min_daily_feedings: 6
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CareConfig {
    pub picker: PickerConfig,
    pub concerns: ConcernThresholds,
}

/// Date ranges offered by the different pickers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Lower bound for the birthday picker; the upper bound is always today
    pub earliest_birth_date: NaiveDate,
    pub vaccination_years_back: u32,
    pub vaccination_years_ahead: u32,
    pub visit_years_back: u32,
    pub visit_years_ahead: u32,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            earliest_birth_date: NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN),
            vaccination_years_back: 1,
            vaccination_years_ahead: 5,
            visit_years_back: 1,
            visit_years_ahead: 1,
        }
    }
}

/// Thresholds for the daily-routine advisories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcernThresholds {
    /// Babies younger than this (in days) get the feeding-frequency check
    pub newborn_age_days: u32,
    /// Fewer feedings than this in a day raises a feeding concern
    pub min_daily_feedings: usize,
}

impl Default for ConcernThresholds {
    fn default() -> Self {
        Self {
            newborn_age_days: 90,
            min_daily_feedings: 6,
        }
    }
}

impl CareConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read care config {:?}", path))?;
        let config: CareConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse care config {:?}", path))?;
        debug!("Loaded care config from {:?}", path);
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            info!("No care config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Write configuration as YAML, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }
        let yaml_content = serde_yaml::to_string(self).context("Failed to serialize care config")?;
        fs::write(path, yaml_content).with_context(|| format!("Failed to write care config {:?}", path))?;
        info!("Saved care config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = CareConfig::default();
        assert_eq!(config.picker.earliest_birth_date, NaiveDate::from_ymd_opt(1900, 1, 1).unwrap());
        assert_eq!(config.picker.vaccination_years_ahead, 5);
        assert_eq!(config.concerns.newborn_age_days, 90);
        assert_eq!(config.concerns.min_daily_feedings, 6);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("care.yaml");
        fs::write(&path, "concerns:\n  min_daily_feedings: 8\n").unwrap();

        let config = CareConfig::load(&path).unwrap();
        assert_eq!(config.concerns.min_daily_feedings, 8);
        assert_eq!(config.concerns.newborn_age_days, 90);
        assert_eq!(config.picker, PickerConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("care.yaml");

        let mut config = CareConfig::default();
        config.picker.visit_years_ahead = 2;
        config.save(&path).unwrap();

        assert_eq!(CareConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = CareConfig::load_or_default(temp_dir.path().join("missing.yaml")).unwrap();
        assert_eq!(config, CareConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("care.yaml");
        fs::write(&path, "concerns: [not, a, map]\n").unwrap();

        let error = CareConfig::load(&path).unwrap_err();
        assert!(error.to_string().contains("Failed to parse care config"));
    }
}
