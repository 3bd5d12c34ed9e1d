use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::debug;

use super::{
    AppState,
    dto::{TaxRequest, TaxResponse},
    error::ApiError,
};

/// `POST /tax/calculations`
pub async fn calculate_tax(
    State(state): State<AppState>,
    payload: Result<Json<TaxRequest>, JsonRejection>,
) -> Result<Json<TaxResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
    let input = request.into_input()?;

    if !input.wht.is_zero() {
        debug!(wht = %input.wht, "withholding tax supplied; not applied to the result");
    }

    let result = state.calculator.calculate(&input);
    Ok(Json(TaxResponse::from(result)))
}
