//! Calculation logic for the payroll engine.
//!
//! This module contains the pure functions behind a payroll run: monetary
//! rounding, age and residency derivation, the statutory contribution
//! calculation with its wage ceilings, and the per-employee payroll
//! calculation that combines them into gross and net pay.

mod age;
mod contribution;
mod payroll;
mod residency;
mod rounding;

pub use age::age_in_years;
pub use contribution::{
    ContributionCalculation, ContributionInput, calculate_contribution,
    calculate_contribution_with_audit,
};
pub use payroll::{PayrollRequest, calculate_payroll};
pub use residency::determine_residency;
pub use rounding::round_money;
