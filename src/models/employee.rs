//! Employee model and related types.
//!
//! This module defines the [`Employee`] record handed to the payroll
//! calculator, together with the employment, status and residency enums
//! that drive contribution eligibility.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents the type of employment arrangement.
///
/// Serialized with the labels used on employee import sheets
/// (`"Full-Time"`, `"Part-Time"`, `"Contract"`, `"Intern"`). Any other label
/// fails deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    /// Full-time employment.
    #[serde(rename = "Full-Time")]
    FullTime,
    /// Part-time employment.
    #[serde(rename = "Part-Time")]
    PartTime,
    /// Fixed-term contract.
    #[serde(rename = "Contract")]
    Contract,
    /// Internship.
    #[serde(rename = "Intern")]
    Intern,
}

/// Lifecycle status of an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently employed and paid.
    Active,
    /// No longer employed.
    Inactive,
    /// Invited to the portal but not yet onboarded.
    InviteSent,
    /// Paid through payroll without portal access.
    PayrollOnly,
}

/// Residency classification used for contribution eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Residency {
    /// Citizen of the scheme's jurisdiction; always contributes at full rates.
    Citizen,
    /// Permanent resident; rates are graduated by [`PrPhase`].
    PermanentResident,
    /// Foreign employee; exempt from contributions.
    Foreigner,
}

impl Residency {
    /// Returns the snake_case label used in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Residency::Citizen => "citizen",
            Residency::PermanentResident => "permanent_resident",
            Residency::Foreigner => "foreigner",
        }
    }
}

/// How far into permanent residency an employee is.
///
/// Permanent residents contribute at a fraction of the full rates during
/// the first two years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrPhase {
    /// First year of permanent residency.
    FirstYear,
    /// Second year of permanent residency.
    SecondYear,
    /// Third year of permanent residency onwards.
    ThirdYearOnwards,
}

impl PrPhase {
    /// Returns the snake_case label used in configuration and audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrPhase::FirstYear => "first_year",
            PrPhase::SecondYear => "second_year",
            PrPhase::ThirdYearOnwards => "third_year_onwards",
        }
    }
}

/// Represents an employee on the payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Internal record identifier.
    pub id: String,
    /// The company-issued employee number (e.g., "EMP001").
    pub employee_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Work email address.
    pub email: String,
    /// The employee's date of birth.
    pub date_of_birth: NaiveDate,
    /// Nationality as recorded on the employee sheet (e.g., "Singaporean").
    pub nationality: String,
    /// Whether the employee holds permanent residency.
    #[serde(default)]
    pub is_pr: bool,
    /// Permanent residency phase, if the employee is a PR and it is known.
    #[serde(default)]
    pub pr_phase: Option<PrPhase>,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Recurring monthly allowance recorded on the employee sheet.
    #[serde(default)]
    pub allowances: Decimal,
    /// The date the employee started employment.
    pub start_date: NaiveDate,
    /// Department name.
    #[serde(default)]
    pub department: String,
    /// Job title.
    #[serde(default)]
    pub position: String,
    /// Lifecycle status of the record.
    pub status: EmployeeStatus,
    /// The type of employment arrangement.
    pub employment_type: EmploymentType,
}
