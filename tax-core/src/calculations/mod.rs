//! Progressive income tax calculation.
//!
//! The bracket table lives in [`brackets`]; [`income_tax`] applies the
//! personal and donation allowances and evaluates the table.

pub mod brackets;
pub mod common;
pub mod income_tax;

pub use brackets::{BracketTable, BracketTableError, STANDARD_BRACKETS};
pub use income_tax::{DONATION_CAP, IncomeTaxCalculator, PERSONAL_ALLOWANCE, compute_tax};
