use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tax_core::DeductionLimitError;
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced to HTTP clients.
///
/// The `String` payloads carry the detailed cause for the log; clients only
/// see the variant's display text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request")]
    InvalidRequest(String),

    #[error("Invalid request data")]
    InvalidRequestData(String),

    #[error(transparent)]
    DeductionLimit(#[from] DeductionLimitError),

    #[error("Internal server error")]
    Internal(String),
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidRequestData(_) | Self::DeductionLimit(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::InvalidRequest(detail)
            | Self::InvalidRequestData(detail)
            | Self::Internal(detail) => detail.clone(),
            Self::DeductionLimit(DeductionLimitError::OutOfRange { kind, amount, .. }) => {
                format!("{} deduction {amount} out of range", kind.as_str())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), detail = %self.detail(), "{self}");
        } else {
            warn!(status = status.as_u16(), detail = %self.detail(), "{self}");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::DeductionLimit;

    use super::*;

    #[test]
    fn invalid_request_hides_detail() {
        let err = ApiError::InvalidRequest("expected value at line 1".to_string());

        assert_eq!(err.to_string(), "Invalid request");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn deduction_limit_uses_range_message() {
        let err = ApiError::from(DeductionLimit::K_RECEIPT.validate(dec!(0)).unwrap_err());

        assert_eq!(err.to_string(), "Amount must be between 0 and 100,000");
        assert_eq!(err.detail(), "k-receipt deduction 0 out of range");
    }

    #[test]
    fn internal_error_is_server_error_without_detail() {
        let err = ApiError::Internal("index out of bounds".to_string());

        assert_eq!(err.to_string(), "Internal server error");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.detail(), "index out of bounds");
    }
}
