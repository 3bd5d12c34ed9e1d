pub mod calculations;
pub mod deductions;
pub mod models;

pub use calculations::{BracketTable, BracketTableError, IncomeTaxCalculator, compute_tax};
pub use deductions::{DeductionKind, DeductionLimit, DeductionLimitError};
pub use models::*;
