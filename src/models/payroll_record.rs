//! Records written by a payroll run.
//!
//! A run produces one [`PayrollRecord`] header and one [`PayrollItem`] per
//! employee. Items carry their own additions and deductions so a store can
//! persist each employee as a single unit.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Addition, Deduction, PayrollPeriod, PayrollResult};

/// Lifecycle of a payroll run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Items are being written.
    Processing,
    /// Every employee was paid and totals are final.
    Completed,
    /// The run stopped on an error; totals are not meaningful.
    Failed,
}

/// Aggregate amounts over every item in a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Sum of gross salaries.
    pub gross: Decimal,
    /// Sum of net salaries.
    pub net: Decimal,
    /// Sum of employee contribution shares.
    pub contribution_employee: Decimal,
    /// Sum of employer contribution shares.
    pub contribution_employer: Decimal,
}

impl PayrollTotals {
    /// Adds one item's amounts to the totals.
    pub fn add(&mut self, item: &PayrollItem) {
        self.gross += item.gross_salary;
        self.net += item.net_salary;
        self.contribution_employee += item.contribution_employee;
        self.contribution_employer += item.contribution_employer;
    }
}

/// Header row for one payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier of the run.
    pub id: Uuid,
    /// The period being paid.
    pub period: PayrollPeriod,
    /// Current status of the run.
    pub status: RecordStatus,
    /// Totals over all items; zero until the run completes.
    pub totals: PayrollTotals,
    /// When the run completed.
    pub processed_at: Option<DateTime<Utc>>,
}

impl PayrollRecord {
    /// Creates a record in [`RecordStatus::Processing`].
    pub fn new(period: PayrollPeriod) -> Self {
        Self {
            id: Uuid::new_v4(),
            period,
            status: RecordStatus::Processing,
            totals: PayrollTotals::default(),
            processed_at: None,
        }
    }
}

/// One employee's line in a payroll run, with its adjustment sub-records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollItem {
    /// Unique identifier of the item.
    pub id: Uuid,
    /// The run this item belongs to.
    pub record_id: Uuid,
    /// The employee's internal record id.
    pub employee_id: String,
    /// Basic salary for the period.
    pub basic_salary: Decimal,
    /// Gross salary for the period.
    pub gross_salary: Decimal,
    /// Net salary for the period.
    pub net_salary: Decimal,
    /// Employee contribution share.
    pub contribution_employee: Decimal,
    /// Employer contribution share.
    pub contribution_employer: Decimal,
    /// Additions paid this period.
    pub additions: Vec<Addition>,
    /// Deductions withheld this period.
    pub deductions: Vec<Deduction>,
}

impl PayrollItem {
    /// Builds an item from a calculation result.
    pub fn from_result(
        record_id: Uuid,
        employee_id: impl Into<String>,
        basic_salary: Decimal,
        result: &PayrollResult,
        additions: Vec<Addition>,
        deductions: Vec<Deduction>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            record_id,
            employee_id: employee_id.into(),
            basic_salary,
            gross_salary: result.gross_salary,
            net_salary: result.net_salary,
            contribution_employee: result.contribution.employee_share,
            contribution_employer: result.contribution.employer_share,
            additions,
            deductions,
        }
    }
}
