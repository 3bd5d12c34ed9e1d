//! Wire types for the HTTP API.
//!
//! Field names are camelCase and monetary amounts travel as JSON numbers.
//! Missing request fields decode to zero or an empty list.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use tax_core::{Allowance, AllowanceType, TaxComputationInput, TaxComputationResult, TaxLevel};

use super::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceRequest {
    pub allowance_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRequest {
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub wht: Decimal,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub allowances: Vec<AllowanceRequest>,
}

/// Treats an explicit `null` like a missing list.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl TaxRequest {
    /// Converts the request into calculator input.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidRequest`] if any allowance amount is negative.
    pub fn into_input(self) -> Result<TaxComputationInput, ApiError> {
        let allowances = self
            .allowances
            .into_iter()
            .map(|a| {
                if a.amount.is_sign_negative() && !a.amount.is_zero() {
                    return Err(ApiError::InvalidRequest(format!(
                        "negative amount {} for allowance '{}'",
                        a.amount, a.allowance_type
                    )));
                }
                Ok(Allowance::new(AllowanceType::from(a.allowance_type), a.amount))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TaxComputationInput {
            total_income: self.total_income,
            wht: self.wht,
            allowances,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLevelResponse {
    pub level: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
}

impl From<TaxLevel> for TaxLevelResponse {
    fn from(level: TaxLevel) -> Self {
        Self {
            level: level.level,
            tax: level.tax,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    pub tax_level: Vec<TaxLevelResponse>,
}

impl From<TaxComputationResult> for TaxResponse {
    fn from(result: TaxComputationResult) -> Self {
        Self {
            tax: result.tax,
            tax_level: result.tax_levels.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRequest {
    #[serde(default, with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDeductionResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub personal_deduction: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KReceiptResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub k_receipt: Decimal,
}
