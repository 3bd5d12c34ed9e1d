use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tag identifying the kind of an itemized allowance.
///
/// Only [`AllowanceType::Donation`] currently reduces taxable income.
/// Every other tag is accepted and carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AllowanceType {
    Donation,
    KReceipt,
    Other(String),
}

impl AllowanceType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Donation => "donation",
            Self::KReceipt => "k-receipt",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for AllowanceType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "donation" => Self::Donation,
            "k-receipt" => Self::KReceipt,
            _ => Self::Other(s),
        }
    }
}

impl From<AllowanceType> for String {
    fn from(t: AllowanceType) -> Self {
        match t {
            AllowanceType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    pub allowance_type: AllowanceType,
    pub amount: Decimal,
}

impl Allowance {
    pub fn new(
        allowance_type: AllowanceType,
        amount: Decimal,
    ) -> Self {
        Self {
            allowance_type,
            amount,
        }
    }

    /// Shorthand for a donation allowance.
    pub fn donation(amount: Decimal) -> Self {
        Self::new(AllowanceType::Donation, amount)
    }
}
