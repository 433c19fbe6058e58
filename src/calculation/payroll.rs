//! Payroll calculation.
//!
//! This module composes basic salary, additions, deductions and the
//! statutory contribution into gross and net salary for one employee and
//! one pay period.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::ContributionPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Addition, AdditionBreakdown, AdditionKind, AdditionSummary, AuditStep, AuditTrace, ContributionResult,
    Deduction, DeductionBreakdown, DeductionSummary, Employee, PayrollResult, YearToDateWages,
};

use super::age::age_in_years;
use super::contribution::{ContributionInput, calculate_contribution_with_audit};
use super::residency::determine_residency;
use super::rounding::round_money;

/// Everything needed to pay one employee for one period.
///
/// `as_of` is the date the employee's age is taken on; passing it in keeps
/// the calculation a pure function of its inputs.
#[derive(Debug, Clone, Copy)]
pub struct PayrollRequest<'a> {
    /// The employee being paid.
    pub employee: &'a Employee,
    /// Additions for this period.
    pub additions: &'a [Addition],
    /// Deductions for this period, other than the contribution.
    pub deductions: &'a [Deduction],
    /// Wages already paid this year.
    pub year_to_date: YearToDateWages,
    /// Date on which age is evaluated.
    pub as_of: NaiveDate,
}

impl<'a> PayrollRequest<'a> {
    /// Creates a request with no additions, no deductions and zero
    /// year-to-date wages.
    pub fn new(employee: &'a Employee, as_of: NaiveDate) -> Self {
        Self {
            employee,
            additions: &[],
            deductions: &[],
            year_to_date: YearToDateWages::default(),
            as_of,
        }
    }

    /// Sets the additions.
    pub fn with_additions(mut self, additions: &'a [Addition]) -> Self {
        self.additions = additions;
        self
    }

    /// Sets the deductions.
    pub fn with_deductions(mut self, deductions: &'a [Deduction]) -> Self {
        self.deductions = deductions;
        self
    }

    /// Sets the year-to-date wages.
    pub fn with_year_to_date(mut self, year_to_date: YearToDateWages) -> Self {
        self.year_to_date = year_to_date;
        self
    }
}

/// Calculates gross salary, contribution and net salary for one employee.
///
/// # Errors
///
/// Returns [`EngineError::InvalidSalary`] if the basic salary is negative,
/// or if salary and adjustments add up beyond what `Decimal` can hold.
/// Nothing else fails; net salary is allowed to go negative when
/// deductions exceed gross pay.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_payroll, PayrollRequest};
/// use payroll_engine::config::ContributionPolicy;
/// use payroll_engine::models::{Employee, EmployeeStatus, EmploymentType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "1".to_string(),
///     employee_id: "EMP001".to_string(),
///     first_name: "John".to_string(),
///     last_name: "Doe".to_string(),
///     email: "john@example.com".to_string(),
///     date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
///     nationality: "Singaporean".to_string(),
///     is_pr: false,
///     pr_phase: None,
///     basic_salary: Decimal::new(5000, 0),
///     allowances: Decimal::new(500, 0),
///     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     department: "Engineering".to_string(),
///     position: "Senior Engineer".to_string(),
///     status: EmployeeStatus::Active,
///     employment_type: EmploymentType::FullTime,
/// };
///
/// let as_of = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
/// let result = calculate_payroll(&PayrollRequest::new(&employee, as_of), &ContributionPolicy::default())?;
///
/// assert_eq!(result.gross_salary, Decimal::new(5000, 0));
/// assert_eq!(result.net_salary, Decimal::new(4000, 0));
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn calculate_payroll(
    request: &PayrollRequest<'_>,
    policy: &ContributionPolicy,
) -> EngineResult<PayrollResult> {
    let employee = request.employee;

    if employee.basic_salary < Decimal::ZERO {
        return Err(invalid_salary(employee));
    }

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    // Additions
    let additional_payments = checked_sum(request.additions.iter().map(|a| a.amount))
        .ok_or_else(|| invalid_salary(employee))?;
    let allowances = sum_of_kind(request.additions, AdditionKind::Allowance)
        .ok_or_else(|| invalid_salary(employee))?;
    let bonuses = sum_of_kind(request.additions, AdditionKind::Bonus)
        .ok_or_else(|| invalid_salary(employee))?;
    steps.push(AuditStep {
        step_number,
        rule_id: "additions_total".to_string(),
        rule_name: "Additions Total".to_string(),
        clause_ref: "additions".to_string(),
        input: serde_json::json!({
            "count": request.additions.len()
        }),
        output: serde_json::json!({
            "total": additional_payments.to_string(),
            "allowances": allowances.to_string(),
            "bonuses": bonuses.to_string()
        }),
        reasoning: format!(
            "{} addition(s) totalling ${} are treated as additional wages",
            request.additions.len(),
            additional_payments
        ),
    });
    step_number += 1;

    // Contribution
    let age = age_in_years(employee.date_of_birth, request.as_of);
    let residency = determine_residency(
        &employee.nationality,
        employee.is_pr,
        &policy.citizen_nationality,
    );
    let input = ContributionInput {
        wage: employee.basic_salary,
        additional_wage: additional_payments,
        year_to_date: request.year_to_date,
        age,
        residency,
        pr_phase: employee.pr_phase,
    };
    let contribution = calculate_contribution_with_audit(&input, policy, step_number);
    step_number += contribution.audit_steps.len() as u32;
    steps.extend(contribution.audit_steps);
    let contribution = contribution.result;

    // Deductions and net pay
    let other_deductions = checked_sum(request.deductions.iter().map(|d| d.amount))
        .ok_or_else(|| invalid_salary(employee))?;
    let gross_salary = employee
        .basic_salary
        .checked_add(additional_payments)
        .ok_or_else(|| invalid_salary(employee))?;
    let total_deductions = contribution
        .employee_share
        .checked_add(other_deductions)
        .ok_or_else(|| invalid_salary(employee))?;
    let net_salary = gross_salary
        .checked_sub(total_deductions)
        .ok_or_else(|| invalid_salary(employee))?;

    steps.push(AuditStep {
        step_number,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        clause_ref: "deductions".to_string(),
        input: serde_json::json!({
            "basic_salary": employee.basic_salary.to_string(),
            "additional_payments": additional_payments.to_string(),
            "employee_contribution": contribution.employee_share.to_string(),
            "other_deductions": other_deductions.to_string()
        }),
        output: serde_json::json!({
            "gross_salary": round_money(gross_salary).to_string(),
            "total_deductions": round_money(total_deductions).to_string(),
            "net_salary": round_money(net_salary).to_string()
        }),
        reasoning: format!(
            "${} - (${} contribution + ${} other deductions) = ${}",
            round_money(gross_salary),
            contribution.employee_share,
            round_money(other_deductions),
            round_money(net_salary)
        ),
    });

    Ok(PayrollResult {
        gross_salary: round_money(gross_salary),
        net_salary: round_money(net_salary),
        contribution: ContributionResult {
            employee_share: round_money(contribution.employee_share),
            employer_share: round_money(contribution.employer_share),
            total: round_money(contribution.total),
        },
        deductions: DeductionSummary {
            total: round_money(total_deductions),
            breakdown: DeductionBreakdown {
                contribution: round_money(contribution.employee_share),
                others: round_money(other_deductions),
            },
        },
        additions: AdditionSummary {
            total: round_money(additional_payments),
            breakdown: AdditionBreakdown {
                allowances: round_money(allowances),
                bonuses: round_money(bonuses),
            },
        },
        audit_trace: AuditTrace { steps },
    })
}

/// Sums amounts, or `None` if the total overflows `Decimal`.
fn checked_sum(mut amounts: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    amounts.try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
}

fn sum_of_kind(additions: &[Addition], kind: AdditionKind) -> Option<Decimal> {
    checked_sum(
        additions
            .iter()
            .filter(|a| a.kind == kind)
            .map(|a| a.amount),
    )
}

fn invalid_salary(employee: &Employee) -> EngineError {
    EngineError::InvalidSalary {
        employee_id: employee.employee_id.clone(),
        salary: employee.basic_salary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeStatus, EmploymentType, PrPhase};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn create_test_employee() -> Employee {
        Employee {
            id: "1".to_string(),
            employee_id: "EMP001".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@example.com".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            nationality: "Singaporean".to_string(),
            is_pr: false,
            pr_phase: None,
            basic_salary: dec("5000"),
            allowances: dec("500"),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            department: "Engineering".to_string(),
            position: "Senior Engineer".to_string(),
            status: EmployeeStatus::Active,
            employment_type: EmploymentType::FullTime,
        }
    }

    fn run(request: PayrollRequest<'_>) -> PayrollResult {
        calculate_payroll(&request, &ContributionPolicy::default()).unwrap()
    }

    #[test]
    fn test_basic_payroll() {
        let employee = create_test_employee();
        let result = run(PayrollRequest::new(&employee, as_of()));

        assert_eq!(result.gross_salary, dec("5000.00"));
        assert_eq!(result.contribution.employee_share, dec("1000.00"));
        assert_eq!(result.contribution.employer_share, dec("850.00"));
        assert_eq!(result.contribution.total, dec("1850.00"));
        assert_eq!(result.net_salary, dec("4000.00"));
        assert_eq!(result.deductions.breakdown.contribution, dec("1000.00"));
    }

    #[test]
    fn test_additions_are_broken_out_by_kind() {
        let employee = create_test_employee();
        let additions = vec![
            Addition::new(AdditionKind::Allowance, dec("500")).with_description("Transport"),
            Addition::new(AdditionKind::Bonus, dec("1000")).with_description("Performance"),
            Addition::new(AdditionKind::Other, dec("50")),
        ];
        let result = run(PayrollRequest::new(&employee, as_of()).with_additions(&additions));

        assert_eq!(result.gross_salary, dec("6550.00"));
        assert_eq!(result.additions.total, dec("1550.00"));
        assert_eq!(result.additions.breakdown.allowances, dec("500.00"));
        assert_eq!(result.additions.breakdown.bonuses, dec("1000.00"));
    }

    #[test]
    fn test_deductions_reduce_net() {
        let employee = create_test_employee();
        let deductions = vec![
            Deduction::new("loan", dec("200")).with_description("Company loan"),
            Deduction::new("insurance", dec("100")).with_description("Health insurance"),
        ];
        let result = run(PayrollRequest::new(&employee, as_of()).with_deductions(&deductions));

        assert_eq!(result.deductions.total, dec("1300.00"));
        assert_eq!(result.deductions.breakdown.others, dec("300.00"));
        assert_eq!(result.net_salary, dec("3700.00"));
    }

    #[test]
    fn test_negative_salary_is_rejected() {
        let mut employee = create_test_employee();
        employee.basic_salary = dec("-1000");

        let result = calculate_payroll(
            &PayrollRequest::new(&employee, as_of()),
            &ContributionPolicy::default(),
        );

        match result {
            Err(EngineError::InvalidSalary {
                employee_id,
                salary,
            }) => {
                assert_eq!(employee_id, "EMP001");
                assert_eq!(salary, dec("-1000"));
            }
            other => panic!("Expected InvalidSalary, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_salary_is_allowed() {
        let mut employee = create_test_employee();
        employee.basic_salary = Decimal::ZERO;

        let result = run(PayrollRequest::new(&employee, as_of()));
        assert_eq!(result.gross_salary, dec("0"));
        assert!(result.contribution.is_zero());
    }

    #[test]
    fn test_over_deduction_yields_negative_net() {
        let employee = create_test_employee();
        let deductions = vec![Deduction::new("loan", dec("4500"))];
        let result = run(PayrollRequest::new(&employee, as_of()).with_deductions(&deductions));

        assert_eq!(result.net_salary, dec("-500.00"));
        assert!(result.is_over_deducted());
    }

    #[test]
    fn test_foreigner_pays_no_contribution() {
        let mut employee = create_test_employee();
        employee.nationality = "American".to_string();
        employee.basic_salary = dec("7000");
        let deductions = vec![Deduction::new("loan", dec("250"))];

        let result = run(PayrollRequest::new(&employee, as_of()).with_deductions(&deductions));

        assert!(result.contribution.is_zero());
        assert_eq!(result.gross_salary, dec("7000.00"));
        assert_eq!(result.net_salary, dec("6750.00"));
    }

    #[test]
    fn test_pr_phase_comes_from_employee() {
        let mut employee = create_test_employee();
        employee.nationality = "Malaysian".to_string();
        employee.is_pr = true;
        employee.pr_phase = Some(PrPhase::FirstYear);

        let result = run(PayrollRequest::new(&employee, as_of()));

        assert_eq!(result.contribution.employee_share, dec("550.00"));
        assert_eq!(result.net_salary, dec("4450.00"));
    }

    #[test]
    fn test_age_is_taken_on_as_of_date() {
        let mut employee = create_test_employee();
        employee.date_of_birth = NaiveDate::from_ymd_opt(1968, 7, 1).unwrap();

        // 55 on 2024-06-30, 56 the next day
        let before = run(PayrollRequest::new(&employee, as_of()));
        let after = run(PayrollRequest::new(
            &employee,
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        ));

        assert_eq!(before.contribution.employee_share, dec("1000.00"));
        assert_eq!(after.contribution.employee_share, dec("750.00"));
    }

    #[test]
    fn test_year_to_date_wages_are_forwarded() {
        let employee = create_test_employee();
        let additions = vec![Addition::new(AdditionKind::Bonus, dec("1000"))];
        let result = run(
            PayrollRequest::new(&employee, as_of())
                .with_additions(&additions)
                .with_year_to_date(YearToDateWages::new(dec("5000"), dec("102000"))),
        );

        assert_eq!(result.contribution.employee_share, dec("1000.00"));
        assert_eq!(result.gross_salary, dec("6000.00"));
    }

    #[test]
    fn test_audit_trace_is_sequential() {
        let employee = create_test_employee();
        let additions = vec![Addition::new(AdditionKind::Bonus, dec("1000"))];
        let result = run(PayrollRequest::new(&employee, as_of()).with_additions(&additions));

        let steps = &result.audit_trace.steps;
        let rule_ids: Vec<&str> = steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            rule_ids,
            vec![
                "additions_total",
                "ordinary_wage_contribution",
                "additional_wage_contribution",
                "net_salary"
            ]
        );
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
    }

    #[test]
    fn test_calculation_is_idempotent() {
        let employee = create_test_employee();
        let additions = vec![Addition::new(AdditionKind::Allowance, dec("333.335"))];
        let request = PayrollRequest::new(&employee, as_of()).with_additions(&additions);

        assert_eq!(run(request), run(request));
    }

    #[test]
    fn test_overflowing_gross_is_rejected() {
        let mut employee = create_test_employee();
        employee.basic_salary = Decimal::MAX;
        let additions = vec![Addition::new(AdditionKind::Bonus, Decimal::MAX)];

        let result = calculate_payroll(
            &PayrollRequest::new(&employee, as_of()).with_additions(&additions),
            &ContributionPolicy::default(),
        );

        assert!(matches!(
            result,
            Err(EngineError::InvalidSalary { ref employee_id, .. }) if employee_id == "EMP001"
        ));
    }

    #[test]
    fn test_overflowing_additions_are_rejected() {
        let employee = create_test_employee();
        let additions = vec![
            Addition::new(AdditionKind::Allowance, Decimal::MAX),
            Addition::new(AdditionKind::Other, Decimal::MIN),
            Addition::new(AdditionKind::Allowance, Decimal::MAX),
        ];

        let result = calculate_payroll(
            &PayrollRequest::new(&employee, as_of()).with_additions(&additions),
            &ContributionPolicy::default(),
        );

        assert!(matches!(result, Err(EngineError::InvalidSalary { .. })));
    }

    #[test]
    fn test_overflowing_deductions_are_rejected() {
        let employee = create_test_employee();
        let deductions = vec![
            Deduction::new("loan", Decimal::MAX),
            Deduction::new("insurance", Decimal::MAX),
        ];

        let result = calculate_payroll(
            &PayrollRequest::new(&employee, as_of()).with_deductions(&deductions),
            &ContributionPolicy::default(),
        );

        assert!(matches!(result, Err(EngineError::InvalidSalary { .. })));
    }
}
