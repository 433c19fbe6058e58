//! Payroll engine for Singapore payroll runs
//!
//! This crate computes Central Provident Fund (CPF) contributions and
//! monthly payroll (gross pay, statutory and other deductions, net pay)
//! for employees, and processes whole payroll runs in batches against a
//! pluggable store.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod processing;
pub mod validation;
