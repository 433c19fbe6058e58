//! Batch payroll processing.
//!
//! A [`PayrollProcessor`] validates a [`PayrollRun`], pays each employee
//! through the calculation module and records one item per employee in a
//! [`PayrollStore`].

mod processor;
mod store;

pub use processor::{PayrollProcessor, PayrollRun};
pub use store::{InMemoryPayrollStore, PayrollStore};
