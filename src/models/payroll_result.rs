//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] type and its breakdown
//! structures, plus the audit trace recording every rule applied while
//! producing it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ContributionResult;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the scheme rule or policy field behind this step.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a payroll calculation.
///
/// The trace carries no timestamps, so two calculations over the same
/// inputs produce identical traces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
}

/// Split of total deductions into the statutory contribution and everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// The employee's contribution share.
    pub contribution: Decimal,
    /// Sum of all other deductions.
    pub others: Decimal,
}

/// Deductions applied to gross salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSummary {
    /// Contribution plus other deductions.
    pub total: Decimal,
    /// The components of `total`.
    pub breakdown: DeductionBreakdown,
}

/// Split of additions by kind. Additions of kind `other` are only in the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionBreakdown {
    /// Sum of allowance additions.
    pub allowances: Decimal,
    /// Sum of bonus additions.
    pub bonuses: Decimal,
}

/// Additions paid on top of basic salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionSummary {
    /// Sum of all additions.
    pub total: Decimal,
    /// Allowance and bonus components.
    pub breakdown: AdditionBreakdown,
}

/// The full pay-period breakdown for one employee.
///
/// `net_salary = gross_salary - deductions.total` and is deliberately not
/// floored at zero: over-deduction surfaces as a negative net salary.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{
///     AdditionBreakdown, AdditionSummary, AuditTrace, ContributionResult,
///     DeductionBreakdown, DeductionSummary, PayrollResult,
/// };
/// use rust_decimal::Decimal;
///
/// let result = PayrollResult {
///     gross_salary: Decimal::new(700000, 2),
///     net_salary: Decimal::new(700000, 2),
///     contribution: ContributionResult::zero(),
///     deductions: DeductionSummary {
///         total: Decimal::ZERO,
///         breakdown: DeductionBreakdown { contribution: Decimal::ZERO, others: Decimal::ZERO },
///     },
///     additions: AdditionSummary {
///         total: Decimal::ZERO,
///         breakdown: AdditionBreakdown { allowances: Decimal::ZERO, bonuses: Decimal::ZERO },
///     },
///     audit_trace: AuditTrace::default(),
/// };
/// assert!(!result.is_over_deducted());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Basic salary plus all additions.
    pub gross_salary: Decimal,
    /// Gross salary minus all deductions; may be negative.
    pub net_salary: Decimal,
    /// The statutory contribution for this period.
    pub contribution: ContributionResult,
    /// Deductions from gross salary.
    pub deductions: DeductionSummary,
    /// Additions to basic salary.
    pub additions: AdditionSummary,
    /// Every rule applied, in order.
    pub audit_trace: AuditTrace,
}

impl PayrollResult {
    /// Returns true when deductions exceed gross salary.
    pub fn is_over_deducted(&self) -> bool {
        self.net_salary.is_sign_negative() && !self.net_salary.is_zero()
    }
}
