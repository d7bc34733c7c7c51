//! Pay agreement resolution and compliance engine for workforce rostering.
//!
//! This crate resolves which pay agreement and rate applies to a worker on a
//! given date, prices shifts against that rate (penalties, loadings,
//! overtime), checks actual pay for underpayment risk, calculates leave
//! accrual, and keeps an append-only audit trail with derived alerts for
//! every agreement mutation.

#![warn(missing_docs)]

pub mod compliance;
pub mod config;
pub mod error;
pub mod leave;
pub mod ledger;
pub mod models;
pub mod pricing;
pub mod resolver;
pub mod store;
