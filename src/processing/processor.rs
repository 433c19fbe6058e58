//! Batch payroll runs.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use futures::future::join_all;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{PayrollRequest, calculate_payroll};
use crate::config::{ConfigLoader, ContributionPolicy, ProcessorSettings};
use crate::error::EngineResult;
use crate::models::{
    Addition, Deduction, Employee, PayrollItem, PayrollPeriod, PayrollRecord, PayrollTotals,
    YearToDateWages,
};
use crate::validation::{validate_adjustments, validate_employee, validate_payroll_period};

use super::store::PayrollStore;

/// The inputs to one payroll run.
///
/// Adjustments and year-to-date wages are keyed by [`Employee::id`];
/// employees without an entry get none and zero respectively.
#[derive(Debug, Clone)]
pub struct PayrollRun {
    /// The period being paid.
    pub period: PayrollPeriod,
    /// Employees to pay, in processing order.
    pub employees: Vec<Employee>,
    /// Additions per employee.
    pub additions: HashMap<String, Vec<Addition>>,
    /// Deductions per employee.
    pub deductions: HashMap<String, Vec<Deduction>>,
    /// Wages already paid this year, per employee.
    pub year_to_date: HashMap<String, YearToDateWages>,
}

impl PayrollRun {
    /// Creates a run with no adjustments.
    pub fn new(period: PayrollPeriod, employees: Vec<Employee>) -> Self {
        Self {
            period,
            employees,
            additions: HashMap::new(),
            deductions: HashMap::new(),
            year_to_date: HashMap::new(),
        }
    }

    /// Sets the additions for one employee.
    pub fn with_additions(mut self, employee_id: impl Into<String>, additions: Vec<Addition>) -> Self {
        self.additions.insert(employee_id.into(), additions);
        self
    }

    /// Sets the deductions for one employee.
    pub fn with_deductions(
        mut self,
        employee_id: impl Into<String>,
        deductions: Vec<Deduction>,
    ) -> Self {
        self.deductions.insert(employee_id.into(), deductions);
        self
    }

    /// Sets the year-to-date wages for one employee.
    pub fn with_year_to_date(
        mut self,
        employee_id: impl Into<String>,
        year_to_date: YearToDateWages,
    ) -> Self {
        self.year_to_date.insert(employee_id.into(), year_to_date);
        self
    }

    fn additions_for(&self, employee_id: &str) -> &[Addition] {
        self.additions
            .get(employee_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn deductions_for(&self, employee_id: &str) -> &[Deduction] {
        self.deductions
            .get(employee_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn year_to_date_for(&self, employee_id: &str) -> YearToDateWages {
        self.year_to_date
            .get(employee_id)
            .copied()
            .unwrap_or_default()
    }
}

/// Runs payroll for a set of employees and records the outcome in a store.
pub struct PayrollProcessor<S: PayrollStore> {
    store: Arc<S>,
    policy: ContributionPolicy,
    settings: ProcessorSettings,
}

impl<S: PayrollStore> PayrollProcessor<S> {
    /// Creates a processor with an explicit policy and settings.
    pub fn new(store: Arc<S>, policy: ContributionPolicy, settings: ProcessorSettings) -> Self {
        Self {
            store,
            policy,
            settings,
        }
    }

    /// Creates a processor using the policy effective on `effective_on` and
    /// the batch settings from the loaded scheme.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PolicyNotFound`](crate::error::EngineError::PolicyNotFound)
    /// if no rate table covers `effective_on`.
    pub fn from_config(
        store: Arc<S>,
        config: &ConfigLoader,
        effective_on: NaiveDate,
    ) -> EngineResult<Self> {
        let policy = config.policy_for(effective_on)?;
        debug!(
            scheme = %config.scheme().code,
            effective_date = %policy.effective_date,
            "Resolved contribution policy"
        );
        Ok(Self::new(store, policy, config.processor_settings()))
    }

    /// Returns the store this processor writes to.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the policy contributions are computed under.
    pub fn policy(&self) -> &ContributionPolicy {
        &self.policy
    }

    /// Processes a payroll run.
    ///
    /// The period and every employee are validated before anything is
    /// written. Employees are then paid in batches of
    /// [`ProcessorSettings::batch_size`], concurrently within a batch, and
    /// ages are taken on `today`.
    ///
    /// # Errors
    ///
    /// Validation errors are returned with nothing written. Once the record
    /// exists, any calculation or store error marks it failed and is
    /// returned; items already written stay in the store.
    pub async fn process(&self, run: &PayrollRun, today: NaiveDate) -> EngineResult<PayrollRecord> {
        validate_payroll_period(&run.period, today)?;
        for employee in &run.employees {
            validate_employee(employee, today)?;
            validate_adjustments(
                &employee.employee_id,
                run.additions_for(&employee.id),
                run.deductions_for(&employee.id),
            )?;
        }

        let record = self.store.create_record(run.period).await?;
        info!(
            record_id = %record.id,
            period_start = %run.period.start_date,
            period_end = %run.period.end_date,
            employees = run.employees.len(),
            "Processing payroll run"
        );

        let outcome = match self.process_employees(record.id, run, today).await {
            Ok(totals) => {
                self.store
                    .complete_record(record.id, totals, Utc::now())
                    .await
            }
            Err(err) => Err(err),
        };

        match outcome {
            Ok(completed) => {
                info!(
                    record_id = %completed.id,
                    total_gross = %completed.totals.gross,
                    total_net = %completed.totals.net,
                    "Payroll run completed"
                );
                Ok(completed)
            }
            Err(err) => {
                warn!(record_id = %record.id, error = %err, "Payroll run failed");
                if let Err(fail_err) = self.store.fail_record(record.id).await {
                    warn!(
                        record_id = %record.id,
                        error = %fail_err,
                        "Could not mark payroll run as failed"
                    );
                }
                Err(err)
            }
        }
    }

    async fn process_employees(
        &self,
        record_id: Uuid,
        run: &PayrollRun,
        today: NaiveDate,
    ) -> EngineResult<PayrollTotals> {
        let batch_size = self.settings.batch_size.max(1);
        let mut totals = PayrollTotals::default();

        for (batch_index, batch) in run.employees.chunks(batch_size).enumerate() {
            let units = batch
                .iter()
                .map(|employee| self.process_employee(record_id, run, employee, today));
            let items = join_all(units).await;

            for item in items {
                totals.add(&item?);
            }

            debug!(
                record_id = %record_id,
                batch = batch_index + 1,
                batch_len = batch.len(),
                "Payroll batch written"
            );
        }

        Ok(totals)
    }

    async fn process_employee(
        &self,
        record_id: Uuid,
        run: &PayrollRun,
        employee: &Employee,
        today: NaiveDate,
    ) -> EngineResult<PayrollItem> {
        let additions = run.additions_for(&employee.id);
        let deductions = run.deductions_for(&employee.id);

        let request = PayrollRequest::new(employee, today)
            .with_additions(additions)
            .with_deductions(deductions)
            .with_year_to_date(run.year_to_date_for(&employee.id));
        let result = calculate_payroll(&request, &self.policy)?;

        let item = PayrollItem::from_result(
            record_id,
            employee.id.as_str(),
            employee.basic_salary,
            &result,
            additions.to_vec(),
            deductions.to_vec(),
        );
        self.store.insert_item(&item).await?;

        Ok(item)
    }
}
