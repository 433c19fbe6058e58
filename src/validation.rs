//! Input validation for payroll runs.
//!
//! These checks run before anything is computed or written. Each returns
//! the first problem found as an [`EngineError`].

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Addition, Deduction, Employee, PayrollPeriod};

/// Youngest age, by calendar year, an employee may be paid at.
pub const MIN_EMPLOYEE_AGE: i32 = 16;

/// Oldest age, by calendar year, an employee may be paid at.
pub const MAX_EMPLOYEE_AGE: i32 = 100;

/// Validates an employee record.
///
/// Age here is the difference between calendar years of `as_of` and the
/// date of birth, not whole years lived; it is a sanity bound on the
/// record rather than the age used for contribution rates.
///
/// # Errors
///
/// Returns [`EngineError::InvalidEmployee`] naming the offending field.
pub fn validate_employee(employee: &Employee, as_of: NaiveDate) -> EngineResult<()> {
    if employee.id.trim().is_empty() {
        return Err(invalid_employee("id", "Employee id must not be blank"));
    }
    if employee.employee_id.trim().is_empty() {
        return Err(invalid_employee(
            "employee_id",
            "Employee number must not be blank",
        ));
    }

    if employee.basic_salary < Decimal::ZERO {
        return Err(invalid_employee(
            "basic_salary",
            &format!("Basic salary must not be negative, got {}", employee.basic_salary),
        ));
    }

    let age = as_of.year() - employee.date_of_birth.year();
    if !(MIN_EMPLOYEE_AGE..=MAX_EMPLOYEE_AGE).contains(&age) {
        return Err(invalid_employee(
            "date_of_birth",
            &format!(
                "Employee age must be between {} and {}, got {}",
                MIN_EMPLOYEE_AGE, MAX_EMPLOYEE_AGE, age
            ),
        ));
    }

    Ok(())
}

/// Validates a payroll period against today's date.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPayrollPeriod`] if the start is not
/// before the end, or the end lies after `today`.
pub fn validate_payroll_period(period: &PayrollPeriod, today: NaiveDate) -> EngineResult<()> {
    if period.start_date >= period.end_date {
        return Err(EngineError::InvalidPayrollPeriod {
            message: "Start date must be before end date".to_string(),
        });
    }

    if period.end_date > today {
        return Err(EngineError::InvalidPayrollPeriod {
            message: format!("End date {} cannot be in the future", period.end_date),
        });
    }

    Ok(())
}

/// Validates the additions and deductions for one employee.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAdjustment`] for the first negative amount.
pub fn validate_adjustments(
    employee_id: &str,
    additions: &[Addition],
    deductions: &[Deduction],
) -> EngineResult<()> {
    if let Some(addition) = additions.iter().find(|a| a.amount < Decimal::ZERO) {
        return Err(EngineError::InvalidAdjustment {
            employee_id: employee_id.to_string(),
            message: format!("Addition amount must not be negative, got {}", addition.amount),
        });
    }

    if let Some(deduction) = deductions.iter().find(|d| d.amount < Decimal::ZERO) {
        return Err(EngineError::InvalidAdjustment {
            employee_id: employee_id.to_string(),
            message: format!(
                "Deduction '{}' must not be negative, got {}",
                deduction.kind, deduction.amount
            ),
        });
    }

    Ok(())
}

fn invalid_employee(field: &str, message: &str) -> EngineError {
    EngineError::InvalidEmployee {
        field: field.to_string(),
        message: message.to_string(),
    }
}
