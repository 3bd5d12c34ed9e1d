use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use rust_decimal::Decimal;
use tax_core::DeductionLimit;
use tracing::info;

use super::{
    AppState,
    dto::{DeductionRequest, KReceiptResponse, PersonalDeductionResponse},
    error::ApiError,
};

/// `POST /admin/deductions/personal`
pub async fn set_personal_deduction(
    State(state): State<AppState>,
    payload: Result<Json<DeductionRequest>, JsonRejection>,
) -> Result<Json<PersonalDeductionResponse>, ApiError> {
    let amount = accepted_amount(&state.personal_limit, payload)?;
    Ok(Json(PersonalDeductionResponse {
        personal_deduction: amount,
    }))
}

/// `POST /admin/deductions/k-receipt`
pub async fn set_k_receipt(
    State(state): State<AppState>,
    payload: Result<Json<DeductionRequest>, JsonRejection>,
) -> Result<Json<KReceiptResponse>, ApiError> {
    let amount = accepted_amount(&state.k_receipt_limit, payload)?;
    Ok(Json(KReceiptResponse { k_receipt: amount }))
}

/// Unwraps the request body and checks its amount against `limit`.
fn accepted_amount(
    limit: &DeductionLimit,
    payload: Result<Json<DeductionRequest>, JsonRejection>,
) -> Result<Decimal, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::InvalidRequestData(rejection.body_text()))?;
    let amount = limit.validate(request.amount)?;

    info!(kind = limit.kind.as_str(), %amount, "deduction amount accepted");
    Ok(amount)
}
