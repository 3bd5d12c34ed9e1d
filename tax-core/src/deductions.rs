//! Administrative deduction limits.
//!
//! Each limit is a static range an administrator-supplied amount must fall
//! in. Accepted amounts are returned unchanged; nothing is stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::format_thousands;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeductionKind {
    Personal,
    KReceipt,
}

impl DeductionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::KReceipt => "k-receipt",
        }
    }
}

fn display_amount(amount: &Decimal) -> String {
    format_thousands(*amount)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeductionLimitError {
    #[error(
        "Amount must be between {} and {}",
        display_amount(.min),
        display_amount(.max)
    )]
    OutOfRange {
        kind: DeductionKind,
        amount: Decimal,
        min: Decimal,
        max: Decimal,
    },
}

/// Range an administrative deduction amount must lie in.
///
/// The upper bound is always inclusive; the lower bound is inclusive only
/// when `min_inclusive` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeductionLimit {
    pub kind: DeductionKind,
    pub min: Decimal,
    pub min_inclusive: bool,
    pub max: Decimal,
}

impl DeductionLimit {
    /// `[10,000, 100,000]`
    pub const PERSONAL: Self = Self {
        kind: DeductionKind::Personal,
        min: Decimal::from_parts(10_000, 0, 0, false, 0),
        min_inclusive: true,
        max: Decimal::from_parts(100_000, 0, 0, false, 0),
    };

    /// `(0, 100,000]`
    pub const K_RECEIPT: Self = Self {
        kind: DeductionKind::KReceipt,
        min: Decimal::ZERO,
        min_inclusive: false,
        max: Decimal::from_parts(100_000, 0, 0, false, 0),
    };

    pub fn contains(
        &self,
        amount: Decimal,
    ) -> bool {
        let above_min = if self.min_inclusive {
            amount >= self.min
        } else {
            amount > self.min
        };
        above_min && amount <= self.max
    }

    /// Returns `amount` if it lies within the limit.
    ///
    /// # Errors
    ///
    /// [`DeductionLimitError::OutOfRange`] naming the accepted range.
    pub fn validate(
        &self,
        amount: Decimal,
    ) -> Result<Decimal, DeductionLimitError> {
        if self.contains(amount) {
            Ok(amount)
        } else {
            Err(DeductionLimitError::OutOfRange {
                kind: self.kind,
                amount,
                min: self.min,
                max: self.max,
            })
        }
    }
}
