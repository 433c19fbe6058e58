//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load contribution scheme
//! configurations from YAML files: scheme metadata, wage ceilings, the
//! age-bracket rate table and permanent resident phase factors.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/cpf").unwrap();
//! println!("Loaded scheme: {}", config.scheme().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AgeBracket, ContributionPolicy, PrPhaseFactors, ProcessorSettings, RateConfig, RatePair,
    RateTable, SchemeConfig, SchemeMetadata, WageCeilings,
};
