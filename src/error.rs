//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while configuring, validating,
//! computing or recording a payroll run.
//!
//! Statutory exemptions (low wage, foreign employee, exhausted ceilings) are
//! normal business states and never surface as errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/scheme.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/scheme.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No contribution rate table is effective on the requested date.
    #[error("No contribution policy effective on {date}")]
    PolicyNotFound {
        /// The date for which a policy was requested.
        date: NaiveDate,
    },

    /// The basic salary handed to the payroll calculator was negative.
    #[error("Invalid salary amount for employee '{employee_id}': {salary}")]
    InvalidSalary {
        /// The employee whose salary was rejected.
        employee_id: String,
        /// The rejected salary.
        salary: Decimal,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The payroll period was malformed.
    #[error("Invalid payroll period: {message}")]
    InvalidPayrollPeriod {
        /// A description of what made the period invalid.
        message: String,
    },

    /// An addition or deduction for an employee was invalid.
    #[error("Invalid adjustment for employee '{employee_id}': {message}")]
    InvalidAdjustment {
        /// The employee the adjustment belongs to.
        employee_id: String,
        /// A description of what made the adjustment invalid.
        message: String,
    },

    /// The persistence collaborator failed to record part of a payroll run.
    #[error("Payroll store error: {message}")]
    StoreError {
        /// A description of the store failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
