//! Contribution result and year-to-date wage models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The statutory contribution for one pay period, split between employee
/// and employer.
///
/// All fields are non-negative and rounded to 2 decimal places, with
/// `total == employee_share + employer_share`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::ContributionResult;
///
/// let zero = ContributionResult::zero();
/// assert!(zero.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionResult {
    /// The share withheld from the employee's pay.
    pub employee_share: Decimal,
    /// The share paid by the employer on top of pay.
    pub employer_share: Decimal,
    /// The sum of both shares.
    pub total: Decimal,
}

impl ContributionResult {
    /// A contribution of zero for both parties.
    pub fn zero() -> Self {
        Self {
            employee_share: Decimal::ZERO,
            employer_share: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    /// Returns true when no contribution is payable.
    pub fn is_zero(&self) -> bool {
        self.employee_share.is_zero() && self.employer_share.is_zero() && self.total.is_zero()
    }
}

/// Wages already paid in the calendar year before this pay period.
///
/// Used to apply the yearly additional-wage ceiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearToDateWages {
    /// Ordinary (basic) wages paid so far this year.
    #[serde(default)]
    pub ordinary: Decimal,
    /// Additional (bonus-type) wages paid so far this year.
    #[serde(default)]
    pub additional: Decimal,
}

impl YearToDateWages {
    /// Creates year-to-date totals.
    pub fn new(ordinary: Decimal, additional: Decimal) -> Self {
        Self {
            ordinary,
            additional,
        }
    }
}
