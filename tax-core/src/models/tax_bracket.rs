use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal bracket of a progressive tax table.
///
/// A bracket covers taxable income in `(min_income, max_income]`; the top
/// bracket has no upper bound. `base_tax` is the tax accumulated by every
/// lower bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    pub base_tax: Decimal,
}

impl TaxBracket {
    /// Whether `taxable_income` falls inside this bracket.
    pub fn contains(
        &self,
        taxable_income: Decimal,
    ) -> bool {
        taxable_income > self.min_income
            && self.max_income.is_none_or(|max| taxable_income <= max)
    }

    /// Tax owed on the part of `taxable_income` that lies in this bracket.
    pub fn marginal_tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        if taxable_income <= self.min_income {
            return Decimal::ZERO;
        }
        let ceiling = match self.max_income {
            Some(max) => taxable_income.min(max),
            None => taxable_income,
        };
        (ceiling - self.min_income) * self.tax_rate
    }

    /// Tax owed by a full bracket. `None` for the open-ended top bracket.
    pub fn full_bracket_tax(&self) -> Option<Decimal> {
        self.max_income
            .map(|max| (max - self.min_income) * self.tax_rate)
    }
}
