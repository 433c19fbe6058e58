//! Configuration types for contribution policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the assembled
//! [`ContributionPolicy`] the calculators consume.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::PrPhase;

/// Metadata about the contribution scheme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SchemeMetadata {
    /// Short scheme code (e.g., "CPF").
    pub code: String,
    /// The human-readable name of the scheme.
    pub name: String,
    /// Nationality string that identifies a citizen (e.g., "Singaporean").
    pub citizen_nationality: String,
    /// URL to the official scheme documentation.
    pub source_url: String,
}

/// Wage ceilings applied before rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WageCeilings {
    /// Monthly cap on ordinary wages.
    pub ordinary_monthly: Decimal,
    /// Yearly cap on additional wages, before subtracting ordinary wages.
    pub additional_yearly: Decimal,
}

/// Settings for batch payroll runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ProcessorSettings {
    /// Number of employees processed concurrently per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_batch_size() -> usize {
    100
}

impl Default for ProcessorSettings {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

/// Scheme configuration file structure (`scheme.yaml`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SchemeConfig {
    /// Scheme metadata.
    pub scheme: SchemeMetadata,
    /// Wage ceilings.
    pub ceilings: WageCeilings,
    /// Basic wages below this amount attract no contribution.
    pub minimum_qualifying_wage: Decimal,
    /// Batch processing settings.
    #[serde(default)]
    pub processing: ProcessorSettings,
}

/// Age brackets of the contribution rate table.
///
/// # Example
///
/// ```
/// use payroll_engine::config::AgeBracket;
///
/// assert_eq!(AgeBracket::for_age(55), AgeBracket::UpTo55);
/// assert_eq!(AgeBracket::for_age(56), AgeBracket::Over55To60);
/// assert_eq!(AgeBracket::for_age(66), AgeBracket::Over65);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBracket {
    /// 55 and below.
    UpTo55,
    /// Above 55 to 60.
    Over55To60,
    /// Above 60 to 65.
    Over60To65,
    /// Above 65.
    Over65,
}

impl AgeBracket {
    /// Returns the bracket an age in whole years falls into.
    pub fn for_age(age: u32) -> Self {
        match age {
            0..=55 => AgeBracket::UpTo55,
            56..=60 => AgeBracket::Over55To60,
            61..=65 => AgeBracket::Over60To65,
            _ => AgeBracket::Over65,
        }
    }

    /// Returns the key used for this bracket in rate files.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBracket::UpTo55 => "below_55",
            AgeBracket::Over55To60 => "55_to_60",
            AgeBracket::Over60To65 => "60_to_65",
            AgeBracket::Over65 => "above_65",
        }
    }
}

/// Employee and employer contribution rates for one bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RatePair {
    /// Fraction of wages withheld from the employee (e.g., 0.20).
    pub employee: Decimal,
    /// Fraction of wages paid by the employer (e.g., 0.17).
    pub employer: Decimal,
}

impl RatePair {
    /// Returns both rates multiplied by `factor`.
    pub fn scaled(&self, factor: Decimal) -> Self {
        Self {
            employee: self.employee * factor,
            employer: self.employer * factor,
        }
    }
}

/// Contribution rates keyed by age bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RateTable {
    /// Rates for employees aged 55 and below.
    pub below_55: RatePair,
    /// Rates for employees above 55 to 60.
    #[serde(rename = "55_to_60")]
    pub from_55_to_60: RatePair,
    /// Rates for employees above 60 to 65.
    #[serde(rename = "60_to_65")]
    pub from_60_to_65: RatePair,
    /// Rates for employees above 65.
    pub above_65: RatePair,
}

impl RateTable {
    /// Returns the rate pair for a bracket.
    pub fn rates_for(&self, bracket: AgeBracket) -> RatePair {
        match bracket {
            AgeBracket::UpTo55 => self.below_55,
            AgeBracket::Over55To60 => self.from_55_to_60,
            AgeBracket::Over60To65 => self.from_60_to_65,
            AgeBracket::Over65 => self.above_65,
        }
    }
}

/// Fraction of full rates paid by permanent residents in each phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PrPhaseFactors {
    /// Factor during the first year of residency.
    pub first_year: Decimal,
    /// Factor during the second year of residency.
    pub second_year: Decimal,
    /// Factor from the third year of residency onwards.
    pub third_year_onwards: Decimal,
}

impl PrPhaseFactors {
    /// Returns the factor for a phase.
    pub fn factor_for(&self, phase: PrPhase) -> Decimal {
        match phase {
            PrPhase::FirstYear => self.first_year,
            PrPhase::SecondYear => self.second_year,
            PrPhase::ThirdYearOnwards => self.third_year_onwards,
        }
    }
}

/// Rate configuration for a specific effective date (`rates/<date>.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RateConfig {
    /// The effective date for these rates.
    pub effective_date: NaiveDate,
    /// Rates by age bracket.
    pub rates: RateTable,
    /// Permanent resident phase factors.
    pub pr_phase_factors: PrPhaseFactors,
}

/// Everything the contribution calculator needs for one pay period.
///
/// `ContributionPolicy::default()` carries the 2024 scheme constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionPolicy {
    /// Nationality string that identifies a citizen.
    pub citizen_nationality: String,
    /// The date these rates took effect.
    pub effective_date: NaiveDate,
    /// Basic wages below this amount attract no contribution.
    pub minimum_qualifying_wage: Decimal,
    /// Wage ceilings.
    pub ceilings: WageCeilings,
    /// Rates by age bracket.
    pub rates: RateTable,
    /// Permanent resident phase factors.
    pub pr_phase_factors: PrPhaseFactors,
}

impl ContributionPolicy {
    /// Assembles a policy from the scheme file and one rate file.
    pub fn from_parts(scheme: &SchemeConfig, rate_config: &RateConfig) -> Self {
        Self {
            citizen_nationality: scheme.scheme.citizen_nationality.clone(),
            effective_date: rate_config.effective_date,
            minimum_qualifying_wage: scheme.minimum_qualifying_wage,
            ceilings: scheme.ceilings,
            rates: rate_config.rates,
            pr_phase_factors: rate_config.pr_phase_factors,
        }
    }
}

impl Default for ContributionPolicy {
    fn default() -> Self {
        Self {
            citizen_nationality: "Singaporean".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            minimum_qualifying_wage: Decimal::new(500, 0),
            ceilings: WageCeilings {
                ordinary_monthly: Decimal::new(6000, 0),
                additional_yearly: Decimal::new(102000, 0),
            },
            rates: RateTable {
                below_55: RatePair {
                    employee: Decimal::new(20, 2),
                    employer: Decimal::new(17, 2),
                },
                from_55_to_60: RatePair {
                    employee: Decimal::new(15, 2),
                    employer: Decimal::new(15, 2),
                },
                from_60_to_65: RatePair {
                    employee: Decimal::new(85, 3),
                    employer: Decimal::new(95, 3),
                },
                above_65: RatePair {
                    employee: Decimal::new(6, 2),
                    employer: Decimal::new(75, 3),
                },
            },
            pr_phase_factors: PrPhaseFactors {
                first_year: Decimal::new(55, 2),
                second_year: Decimal::new(65, 2),
                third_year_onwards: Decimal::ONE,
            },
        }
    }
}
