//! Progressive tax bracket table.
//!
//! # Standard table
//!
//! | Taxable income        | Rate | Base tax |
//! |-----------------------|------|----------|
//! | 0 - 150,000           | 0%   | 0        |
//! | 150,001 - 500,000     | 10%  | 0        |
//! | 500,001 - 1,000,000   | 15%  | 35,000   |
//! | 1,000,001 - 2,000,000 | 20%  | 110,000  |
//! | 2,000,001 and above   | 35%  | 310,000  |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::BracketTable;
//!
//! let table = BracketTable::standard();
//!
//! assert_eq!(table.tax_for(dec!(640000)), dec!(56000));
//! assert_eq!(table.tax_for(dec!(-5)), dec!(0));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::TaxBracket;
use crate::calculations::common::format_thousands;
use crate::models::TaxLevel;

/// The fixed progressive schedule applied to every filer.
pub const STANDARD_BRACKETS: [TaxBracket; 5] = [
    TaxBracket {
        min_income: Decimal::ZERO,
        max_income: Some(Decimal::from_parts(150_000, 0, 0, false, 0)),
        tax_rate: Decimal::ZERO,
        base_tax: Decimal::ZERO,
    },
    TaxBracket {
        min_income: Decimal::from_parts(150_000, 0, 0, false, 0),
        max_income: Some(Decimal::from_parts(500_000, 0, 0, false, 0)),
        tax_rate: Decimal::from_parts(10, 0, 0, false, 2),
        base_tax: Decimal::ZERO,
    },
    TaxBracket {
        min_income: Decimal::from_parts(500_000, 0, 0, false, 0),
        max_income: Some(Decimal::from_parts(1_000_000, 0, 0, false, 0)),
        tax_rate: Decimal::from_parts(15, 0, 0, false, 2),
        base_tax: Decimal::from_parts(35_000, 0, 0, false, 0),
    },
    TaxBracket {
        min_income: Decimal::from_parts(1_000_000, 0, 0, false, 0),
        max_income: Some(Decimal::from_parts(2_000_000, 0, 0, false, 0)),
        tax_rate: Decimal::from_parts(20, 0, 0, false, 2),
        base_tax: Decimal::from_parts(110_000, 0, 0, false, 0),
    },
    TaxBracket {
        min_income: Decimal::from_parts(2_000_000, 0, 0, false, 0),
        max_income: None,
        tax_rate: Decimal::from_parts(35, 0, 0, false, 2),
        base_tax: Decimal::from_parts(310_000, 0, 0, false, 0),
    },
];

/// Errors raised when a bracket table does not describe a valid
/// progressive schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("no tax brackets provided")]
    Empty,

    #[error("first bracket must start at 0, found {0}")]
    NonZeroStart(Decimal),

    #[error("bracket {index} is empty: upper bound does not exceed lower bound")]
    EmptyRange { index: usize },

    #[error("bracket {index} does not start where the previous bracket ends")]
    NotContiguous { index: usize },

    #[error("bracket {index} is open-ended but is not the last bracket")]
    OpenEndedBeforeLast { index: usize },

    #[error("last bracket must be open-ended")]
    BoundedTop,

    #[error("bracket {index} has a lower rate than the bracket below it")]
    DecreasingRate { index: usize },

    #[error("bracket {index} base tax is {actual}, expected {expected}")]
    BaseTaxMismatch {
        index: usize,
        expected: Decimal,
        actual: Decimal,
    },
}

/// A validated, ordered sequence of [`TaxBracket`]s covering `(0, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketTable<'a> {
    brackets: &'a [TaxBracket],
}

impl BracketTable<'static> {
    /// The process-wide standard schedule.
    pub const fn standard() -> Self {
        Self {
            brackets: &STANDARD_BRACKETS,
        }
    }
}

impl Default for BracketTable<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> BracketTable<'a> {
    /// Validates `brackets` and wraps them in a table.
    ///
    /// Brackets must be sorted by `min_income`, start at zero, be contiguous,
    /// end with an open-ended bracket, have non-decreasing rates, and carry a
    /// `base_tax` equal to the tax accumulated by the brackets below.
    ///
    /// # Errors
    ///
    /// Returns the first [`BracketTableError`] found.
    pub fn new(brackets: &'a [TaxBracket]) -> Result<Self, BracketTableError> {
        let first = brackets.first().ok_or(BracketTableError::Empty)?;
        if !first.min_income.is_zero() {
            return Err(BracketTableError::NonZeroStart(first.min_income));
        }

        let last_index = brackets.len() - 1;
        let mut accumulated = Decimal::ZERO;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.base_tax != accumulated {
                return Err(BracketTableError::BaseTaxMismatch {
                    index,
                    expected: accumulated,
                    actual: bracket.base_tax,
                });
            }

            if index > 0 {
                let previous = &brackets[index - 1];
                if previous.max_income != Some(bracket.min_income) {
                    return Err(BracketTableError::NotContiguous { index });
                }
                if bracket.tax_rate < previous.tax_rate {
                    return Err(BracketTableError::DecreasingRate { index });
                }
            }

            match bracket.full_bracket_tax() {
                Some(_) if bracket.max_income <= Some(bracket.min_income) => {
                    return Err(BracketTableError::EmptyRange { index });
                }
                Some(full) => accumulated += full,
                None if index != last_index => {
                    return Err(BracketTableError::OpenEndedBeforeLast { index });
                }
                None => {}
            }
        }

        if brackets[last_index].max_income.is_some() {
            return Err(BracketTableError::BoundedTop);
        }

        Ok(Self { brackets })
    }

    /// Finds the bracket containing `taxable_income`, if it is positive.
    pub fn bracket_for(
        &self,
        taxable_income: Decimal,
    ) -> Option<&'a TaxBracket> {
        self.brackets.iter().find(|b| b.contains(taxable_income))
    }

    /// Tax owed on `taxable_income`.
    ///
    /// Zero when `taxable_income` is zero or negative. Otherwise the base tax
    /// of the containing bracket plus the marginal rate on the excess over its
    /// lower bound. No rounding is applied.
    pub fn tax_for(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        if taxable_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        self.bracket_for(taxable_income)
            .map_or(Decimal::ZERO, |bracket| {
                bracket.base_tax + (taxable_income - bracket.min_income) * bracket.tax_rate
            })
    }

    /// Per-bracket breakdown of the tax owed on `taxable_income`.
    ///
    /// Returns one entry per bracket in table order, including brackets the
    /// income never reaches (their tax is zero).
    pub fn levels_for(
        &self,
        taxable_income: Decimal,
    ) -> Vec<TaxLevel> {
        self.brackets
            .iter()
            .map(|bracket| TaxLevel {
                level: level_label(bracket),
                tax: bracket.marginal_tax(taxable_income),
            })
            .collect()
    }
}

/// Human-readable income range of a bracket, e.g. `"150,001-500,000"`.
fn level_label(bracket: &TaxBracket) -> String {
    let lower = if bracket.min_income.is_zero() {
        format_thousands(bracket.min_income)
    } else {
        format_thousands(bracket.min_income + Decimal::ONE)
    };

    match bracket.max_income {
        Some(max) => format!("{lower}-{}", format_thousands(max)),
        None => format!("{lower} and above"),
    }
}
