//! Persistence seam for payroll runs.
//!
//! The processor only talks to a [`PayrollStore`]. [`InMemoryPayrollStore`]
//! keeps everything in process memory and is what tests and single-process
//! callers use.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollItem, PayrollPeriod, PayrollRecord, PayrollTotals, RecordStatus};

/// Storage for payroll records and their items.
///
/// Implementations must persist an item together with its additions and
/// deductions in one `insert_item` call, so a reader never sees an item
/// without its adjustments.
#[async_trait]
pub trait PayrollStore: Send + Sync {
    /// Creates a record for `period` in [`RecordStatus::Processing`].
    async fn create_record(&self, period: PayrollPeriod) -> EngineResult<PayrollRecord>;

    /// Writes one employee's item, including its adjustments.
    async fn insert_item(&self, item: &PayrollItem) -> EngineResult<()>;

    /// Marks a record completed with its final totals.
    async fn complete_record(
        &self,
        record_id: Uuid,
        totals: PayrollTotals,
        processed_at: DateTime<Utc>,
    ) -> EngineResult<PayrollRecord>;

    /// Marks a record failed.
    async fn fail_record(&self, record_id: Uuid) -> EngineResult<()>;
}

/// A [`PayrollStore`] backed by in-process maps.
#[derive(Debug, Default)]
pub struct InMemoryPayrollStore {
    records: Mutex<HashMap<Uuid, PayrollRecord>>,
    items: Mutex<Vec<PayrollItem>>,
}

impl InMemoryPayrollStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the record with `record_id`, if any.
    pub fn record(&self, record_id: Uuid) -> EngineResult<Option<PayrollRecord>> {
        let records = self.records.lock().map_err(|_| poisoned("records"))?;
        Ok(records.get(&record_id).cloned())
    }

    /// Returns copies of every record in the store.
    pub fn records(&self) -> EngineResult<Vec<PayrollRecord>> {
        let records = self.records.lock().map_err(|_| poisoned("records"))?;
        Ok(records.values().cloned().collect())
    }

    /// Returns copies of every item written for `record_id`, in insertion order.
    pub fn items_for(&self, record_id: Uuid) -> EngineResult<Vec<PayrollItem>> {
        let items = self.items.lock().map_err(|_| poisoned("items"))?;
        Ok(items
            .iter()
            .filter(|item| item.record_id == record_id)
            .cloned()
            .collect())
    }

    fn set_status(
        &self,
        record_id: Uuid,
        update: impl FnOnce(&mut PayrollRecord),
    ) -> EngineResult<PayrollRecord> {
        let mut records = self.records.lock().map_err(|_| poisoned("records"))?;
        let record = records
            .get_mut(&record_id)
            .ok_or_else(|| EngineError::StoreError {
                message: format!("Payroll record {} not found", record_id),
            })?;
        update(record);
        Ok(record.clone())
    }
}

#[async_trait]
impl PayrollStore for InMemoryPayrollStore {
    async fn create_record(&self, period: PayrollPeriod) -> EngineResult<PayrollRecord> {
        let record = PayrollRecord::new(period);
        let mut records = self.records.lock().map_err(|_| poisoned("records"))?;
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn insert_item(&self, item: &PayrollItem) -> EngineResult<()> {
        {
            let records = self.records.lock().map_err(|_| poisoned("records"))?;
            match records.get(&item.record_id) {
                Some(record) if record.status == RecordStatus::Processing => {}
                Some(record) => {
                    return Err(EngineError::StoreError {
                        message: format!(
                            "Payroll record {} is {:?}, items can no longer be added",
                            record.id, record.status
                        ),
                    });
                }
                None => {
                    return Err(EngineError::StoreError {
                        message: format!("Payroll record {} not found", item.record_id),
                    });
                }
            }
        }

        let mut items = self.items.lock().map_err(|_| poisoned("items"))?;
        items.push(item.clone());
        Ok(())
    }

    async fn complete_record(
        &self,
        record_id: Uuid,
        totals: PayrollTotals,
        processed_at: DateTime<Utc>,
    ) -> EngineResult<PayrollRecord> {
        self.set_status(record_id, |record| {
            record.status = RecordStatus::Completed;
            record.totals = totals;
            record.processed_at = Some(processed_at);
        })
    }

    async fn fail_record(&self, record_id: Uuid) -> EngineResult<()> {
        self.set_status(record_id, |record| {
            record.status = RecordStatus::Failed;
        })?;
        Ok(())
    }
}

fn poisoned(what: &str) -> EngineError {
    EngineError::StoreError {
        message: format!("In-memory {} lock poisoned", what),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn january_2024() -> PayrollPeriod {
        PayrollPeriod::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
    }

    fn item_for(record_id: Uuid) -> PayrollItem {
        PayrollItem {
            id: Uuid::new_v4(),
            record_id,
            employee_id: "1".to_string(),
            basic_salary: Decimal::new(5000, 0),
            gross_salary: Decimal::new(5000, 0),
            net_salary: Decimal::new(4000, 0),
            contribution_employee: Decimal::new(1000, 0),
            contribution_employer: Decimal::new(850, 0),
            additions: Vec::new(),
            deductions: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_create_record_starts_processing() {
        let store = InMemoryPayrollStore::new();
        let record = store.create_record(january_2024()).await.unwrap();

        assert_eq!(record.status, RecordStatus::Processing);
        assert_eq!(store.record(record.id).unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_items_are_grouped_by_record() {
        let store = InMemoryPayrollStore::new();
        let first = store.create_record(january_2024()).await.unwrap();
        let second = store.create_record(january_2024()).await.unwrap();

        store.insert_item(&item_for(first.id)).await.unwrap();
        store.insert_item(&item_for(first.id)).await.unwrap();
        store.insert_item(&item_for(second.id)).await.unwrap();

        assert_eq!(store.items_for(first.id).unwrap().len(), 2);
        assert_eq!(store.items_for(second.id).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_into_unknown_record_fails() {
        let store = InMemoryPayrollStore::new();
        let result = store.insert_item(&item_for(Uuid::new_v4())).await;

        assert!(matches!(result, Err(EngineError::StoreError { .. })));
    }

    #[tokio::test]
    async fn test_complete_record_sets_totals() {
        let store = InMemoryPayrollStore::new();
        let record = store.create_record(january_2024()).await.unwrap();
        let mut totals = PayrollTotals::default();
        totals.add(&item_for(record.id));

        let completed = store
            .complete_record(record.id, totals, Utc::now())
            .await
            .unwrap();

        assert_eq!(completed.status, RecordStatus::Completed);
        assert_eq!(completed.totals.gross, Decimal::new(5000, 0));
        assert!(completed.processed_at.is_some());
    }

    #[tokio::test]
    async fn test_failed_record_rejects_items() {
        let store = InMemoryPayrollStore::new();
        let record = store.create_record(january_2024()).await.unwrap();
        store.fail_record(record.id).await.unwrap();

        let result = store.insert_item(&item_for(record.id)).await;

        assert!(matches!(result, Err(EngineError::StoreError { .. })));
        assert_eq!(
            store.record(record.id).unwrap().map(|r| r.status),
            Some(RecordStatus::Failed)
        );
    }
}
