//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading contribution
//! scheme configurations from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{ContributionPolicy, ProcessorSettings, RateConfig, SchemeConfig, SchemeMetadata};

/// Loads and provides access to contribution scheme configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/cpf/
/// ├── scheme.yaml          # Scheme metadata, ceilings, minimum wage
/// └── rates/
///     └── 2024-01-01.yaml  # Rates effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/cpf").unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
/// let policy = loader.policy_for(date).unwrap();
/// println!("Ordinary wage ceiling: ${}", policy.ceilings.ordinary_monthly);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    scheme: SchemeConfig,
    /// Sorted oldest first.
    rates: Vec<RateConfig>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `scheme.yaml` or the `rates` directory is
    /// missing, if any file contains invalid YAML, or if no rate file exists.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let scheme_path = path.join("scheme.yaml");
        let scheme = Self::load_yaml::<SchemeConfig>(&scheme_path)?;

        let rates_dir = path.join("rates");
        let mut rates = Self::load_rates(&rates_dir)?;
        rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));

        debug!(
            scheme = %scheme.scheme.code,
            rate_files = rates.len(),
            "Loaded contribution scheme configuration"
        );

        Ok(Self { scheme, rates })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateConfig>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                rates.push(Self::load_yaml::<RateConfig>(&path)?);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        &self.scheme.scheme
    }

    /// Returns the batch processing settings.
    pub fn processor_settings(&self) -> ProcessorSettings {
        self.scheme.processing
    }

    /// Returns the policy effective on `date`: the most recent rate file
    /// whose effective date is on or before it.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    /// use chrono::NaiveDate;
    ///
    /// let loader = ConfigLoader::load("./config/cpf")?;
    /// let policy = loader.policy_for(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap())?;
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn policy_for(&self, date: NaiveDate) -> EngineResult<ContributionPolicy> {
        self.rates
            .iter()
            .rfind(|rc| rc.effective_date <= date)
            .map(|rc| ContributionPolicy::from_parts(&self.scheme, rc))
            .ok_or(EngineError::PolicyNotFound { date })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/cpf"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.scheme().code, "CPF");
        assert_eq!(loader.scheme().citizen_nationality, "Singaporean");
    }

    #[test]
    fn test_loaded_policy_matches_default() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let policy = loader
            .policy_for(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap())
            .unwrap();

        assert_eq!(policy, ContributionPolicy::default());
    }

    #[test]
    fn test_policy_ceilings_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let policy = loader
            .policy_for(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .unwrap();

        assert_eq!(policy.ceilings.ordinary_monthly, dec("6000"));
        assert_eq!(policy.ceilings.additional_yearly, dec("102000"));
        assert_eq!(policy.minimum_qualifying_wage, dec("500"));
    }

    #[test]
    fn test_processor_settings_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.processor_settings().batch_size, 100);
    }

    #[test]
    fn test_policy_not_found_for_date_before_effective() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        match loader.policy_for(date) {
            Err(EngineError::PolicyNotFound { date: d }) => assert_eq!(d, date),
            other => panic!("Expected PolicyNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("scheme.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }
}
