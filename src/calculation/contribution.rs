//! Statutory contribution calculation.
//!
//! This module computes the employee and employer contribution for one pay
//! period from the ordinary (basic) wage, any additional wage paid in the
//! same period, the wages already paid this year, the employee's age and
//! their residency.
//!
//! Exemptions (wage below the qualifying minimum, foreign employees, an
//! exhausted additional-wage ceiling) resolve to a zero contribution rather
//! than an error.

use rust_decimal::Decimal;

use crate::config::{AgeBracket, ContributionPolicy, RatePair};
use crate::models::{AuditStep, ContributionResult, PrPhase, Residency, YearToDateWages};

use super::rounding::round_money;

/// Inputs to a contribution calculation for one pay period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionInput {
    /// Ordinary (basic) wage for the period.
    pub wage: Decimal,
    /// Additional (bonus-type) wage paid in the period; zero if none.
    pub additional_wage: Decimal,
    /// Wages already paid this year.
    pub year_to_date: YearToDateWages,
    /// Age in whole years.
    pub age: u32,
    /// Residency classification.
    pub residency: Residency,
    /// Permanent residency phase; only consulted for permanent residents.
    pub pr_phase: Option<PrPhase>,
}

impl ContributionInput {
    /// Creates an input with no additional wage and zero year-to-date wages.
    pub fn new(wage: Decimal, age: u32, residency: Residency) -> Self {
        Self {
            wage,
            additional_wage: Decimal::ZERO,
            year_to_date: YearToDateWages::default(),
            age,
            residency,
            pr_phase: None,
        }
    }

    /// Sets the additional wage paid in the period.
    pub fn with_additional_wage(mut self, additional_wage: Decimal) -> Self {
        self.additional_wage = additional_wage;
        self
    }

    /// Sets the wages already paid this year.
    pub fn with_year_to_date(mut self, year_to_date: YearToDateWages) -> Self {
        self.year_to_date = year_to_date;
        self
    }

    /// Sets the permanent residency phase.
    pub fn with_pr_phase(mut self, pr_phase: PrPhase) -> Self {
        self.pr_phase = Some(pr_phase);
        self
    }
}

/// The result of a contribution calculation, including its audit steps.
#[derive(Debug, Clone)]
pub struct ContributionCalculation {
    /// The combined contribution for the period.
    pub result: ContributionResult,
    /// The audit steps recording this calculation.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates the statutory contribution for one pay period.
///
/// This never fails: every exemption yields [`ContributionResult::zero`].
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_contribution, ContributionInput};
/// use payroll_engine::config::ContributionPolicy;
/// use payroll_engine::models::Residency;
/// use rust_decimal::Decimal;
///
/// let input = ContributionInput::new(Decimal::new(5000, 0), 34, Residency::Citizen);
/// let result = calculate_contribution(&input, &ContributionPolicy::default());
///
/// assert_eq!(result.employee_share, Decimal::new(1000, 0));
/// assert_eq!(result.employer_share, Decimal::new(850, 0));
/// assert_eq!(result.total, Decimal::new(1850, 0));
/// ```
pub fn calculate_contribution(
    input: &ContributionInput,
    policy: &ContributionPolicy,
) -> ContributionResult {
    calculate_contribution_with_audit(input, policy, 1).result
}

/// Calculates the statutory contribution and records each rule applied.
///
/// Steps are numbered from `step_number`.
pub fn calculate_contribution_with_audit(
    input: &ContributionInput,
    policy: &ContributionPolicy,
    step_number: u32,
) -> ContributionCalculation {
    if input.wage < policy.minimum_qualifying_wage {
        return exempt(
            step_number,
            "minimum_qualifying_wage",
            serde_json::json!({
                "wage": input.wage.to_string(),
                "minimum_qualifying_wage": policy.minimum_qualifying_wage.to_string()
            }),
            format!(
                "Wage ${} is below the minimum qualifying wage ${} - no contribution",
                input.wage, policy.minimum_qualifying_wage
            ),
        );
    }

    if input.residency == Residency::Foreigner {
        return exempt(
            step_number,
            "residency",
            serde_json::json!({
                "residency": input.residency.as_str()
            }),
            "Foreign employees do not contribute - no contribution".to_string(),
        );
    }

    let bracket = AgeBracket::for_age(input.age);
    let factor = phase_factor(input, policy);
    let rates = policy.rates.rates_for(bracket).scaled(factor);

    let mut audit_steps = Vec::with_capacity(2);
    let ordinary = contribution_on(input.wage, rates, policy);
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "ordinary_wage_contribution".to_string(),
        rule_name: "Ordinary Wage Contribution".to_string(),
        clause_ref: "ceilings.ordinary_monthly".to_string(),
        input: serde_json::json!({
            "wage": input.wage.to_string(),
            "age": input.age,
            "age_bracket": bracket.as_str(),
            "residency": input.residency.as_str(),
            "pr_phase": input.pr_phase.map(|p| p.as_str()),
            "phase_factor": factor.normalize().to_string(),
            "ordinary_wage_ceiling": policy.ceilings.ordinary_monthly.to_string()
        }),
        output: contribution_json(&ordinary),
        reasoning: format!(
            "min(${}, ${}) x {} employee / {} employer = ${} / ${}",
            input.wage,
            policy.ceilings.ordinary_monthly,
            rates.employee.normalize(),
            rates.employer.normalize(),
            ordinary.employee_share,
            ordinary.employer_share
        ),
    });

    let additional = if input.additional_wage > Decimal::ZERO {
        let (capped, reasoning) = cap_additional_wage(input, policy);
        let additional = contribution_on(capped, rates, policy);
        audit_steps.push(AuditStep {
            step_number: step_number + 1,
            rule_id: "additional_wage_contribution".to_string(),
            rule_name: "Additional Wage Contribution".to_string(),
            clause_ref: "ceilings.additional_yearly".to_string(),
            input: serde_json::json!({
                "additional_wage": input.additional_wage.to_string(),
                "ytd_ordinary_wages": input.year_to_date.ordinary.to_string(),
                "ytd_additional_wages": input.year_to_date.additional.to_string(),
                "additional_wage_ceiling": policy.ceilings.additional_yearly.to_string()
            }),
            output: serde_json::json!({
                "capped_additional_wage": capped.to_string(),
                "employee_share": additional.employee_share.to_string(),
                "employer_share": additional.employer_share.to_string(),
                "total": additional.total.to_string()
            }),
            reasoning,
        });
        additional
    } else {
        ContributionResult::zero()
    };

    let result = ContributionResult {
        employee_share: round_money(ordinary.employee_share + additional.employee_share),
        employer_share: round_money(ordinary.employer_share + additional.employer_share),
        total: round_money(ordinary.total + additional.total),
    };

    ContributionCalculation {
        result,
        audit_steps,
    }
}

/// Returns the multiplier applied to the full rates.
///
/// Citizens always pay full rates; a permanent resident without a recorded
/// phase is treated as fully phased in.
fn phase_factor(input: &ContributionInput, policy: &ContributionPolicy) -> Decimal {
    match (input.residency, input.pr_phase) {
        (Residency::PermanentResident, Some(phase)) => policy.pr_phase_factors.factor_for(phase),
        _ => Decimal::ONE,
    }
}

/// Applies the ordinary wage ceiling and the rates to a wage.
fn contribution_on(wage: Decimal, rates: RatePair, policy: &ContributionPolicy) -> ContributionResult {
    let capped = wage.min(policy.ceilings.ordinary_monthly);
    let employee_share = round_money(capped * rates.employee);
    let employer_share = round_money(capped * rates.employer);

    ContributionResult {
        employee_share,
        employer_share,
        total: round_money(employee_share + employer_share),
    }
}

/// Caps the additional wage at the headroom left under the yearly ceiling.
fn cap_additional_wage(input: &ContributionInput, policy: &ContributionPolicy) -> (Decimal, String) {
    let ceiling = policy.ceilings.additional_yearly;
    let ytd = input.year_to_date;

    if ytd.additional >= ceiling {
        return (
            Decimal::ZERO,
            format!(
                "Year-to-date additional wages ${} already reach the ${} ceiling - no contribution",
                ytd.additional, ceiling
            ),
        );
    }

    // Overflow here means year-to-date wages dwarf the ceiling: no headroom
    let headroom = ytd
        .ordinary
        .checked_mul(Decimal::from(12))
        .and_then(|annual| ceiling.checked_sub(annual))
        .map(|remaining| remaining.max(Decimal::ZERO))
        .and_then(|remaining| remaining.checked_sub(ytd.additional))
        .map_or(Decimal::ZERO, |headroom| headroom.max(Decimal::ZERO));
    let capped = input.additional_wage.min(headroom);

    (
        capped,
        format!(
            "Headroom max(0, ${} - 12 x ${}) - ${} = ${}; additional wage ${} capped to ${}",
            ceiling, ytd.ordinary, ytd.additional, headroom, input.additional_wage, capped
        ),
    )
}

fn contribution_json(result: &ContributionResult) -> serde_json::Value {
    serde_json::json!({
        "employee_share": result.employee_share.to_string(),
        "employer_share": result.employer_share.to_string(),
        "total": result.total.to_string()
    })
}

fn exempt(
    step_number: u32,
    reason: &str,
    input: serde_json::Value,
    reasoning: String,
) -> ContributionCalculation {
    let audit_step = AuditStep {
        step_number,
        rule_id: "contribution_exemption".to_string(),
        rule_name: "Contribution Exemption".to_string(),
        clause_ref: reason.to_string(),
        input,
        output: serde_json::json!({
            "exempt": true,
            "employee_share": "0.00",
            "employer_share": "0.00",
            "total": "0.00"
        }),
        reasoning,
    };

    ContributionCalculation {
        result: ContributionResult::zero(),
        audit_steps: vec![audit_step],
    }
}
