use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Allowance;

/// Everything the calculator needs for one computation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxComputationInput {
    pub total_income: Decimal,
    /// Withholding tax already paid. Carried but not yet applied to the result.
    pub wht: Decimal,
    pub allowances: Vec<Allowance>,
}

/// Tax contributed by a single bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLevel {
    pub level: String,
    pub tax: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComputationResult {
    pub tax: Decimal,
    pub tax_levels: Vec<TaxLevel>,
}
