//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod adjustment;
mod contribution;
mod employee;
mod payroll_period;
mod payroll_record;
mod payroll_result;

pub use adjustment::{Addition, AdditionKind, Deduction};
pub use contribution::{ContributionResult, YearToDateWages};
pub use employee::{Employee, EmployeeStatus, EmploymentType, PrPhase, Residency};
pub use payroll_period::PayrollPeriod;
pub use payroll_record::{PayrollItem, PayrollRecord, PayrollTotals, RecordStatus};
pub use payroll_result::{
    AdditionBreakdown, AdditionSummary, AuditStep, AuditTrace, DeductionBreakdown,
    DeductionSummary, PayrollResult,
};
