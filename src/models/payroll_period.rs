//! Payroll period model.
//!
//! This module contains the [`PayrollPeriod`] type that bounds a payroll run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The date range a payroll run pays for.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayrollPeriod::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
/// );
///
/// assert!(period.start_date < period.end_date);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// The start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the period (inclusive).
    pub end_date: NaiveDate,
}

impl PayrollPeriod {
    /// Creates a payroll period. Ordering is checked by
    /// [`validate_payroll_period`](crate::validation::validate_payroll_period).
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }
}
