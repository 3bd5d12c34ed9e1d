//! HTTP routing for the tax service.

pub mod admin;
pub mod dto;
pub mod error;
pub mod tax;

use std::any::Any;
use std::time::Instant;

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::post,
};
use tax_core::{DeductionLimit, IncomeTaxCalculator};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tracing::info;

pub use error::{ApiError, ErrorBody};

/// Shared, immutable context handed to every handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppState {
    pub calculator: IncomeTaxCalculator<'static>,
    pub personal_limit: DeductionLimit,
    pub k_receipt_limit: DeductionLimit,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            calculator: IncomeTaxCalculator::standard(),
            personal_limit: DeductionLimit::PERSONAL,
            k_receipt_limit: DeductionLimit::K_RECEIPT,
        }
    }
}

/// Builds the service router around `state`.
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/tax/calculations", post(tax::calculate_tax))
        .route("/admin/deductions/personal", post(admin::set_personal_deduction))
        .route("/admin/deductions/k-receipt", post(admin::set_k_receipt));

    with_middleware(routes).with_state(state)
}

/// Wraps `routes` in the service middleware, innermost first: panic
/// recovery, request logging, then CORS.
fn with_middleware<S>(routes: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    routes
        .layer(CatchPanicLayer::custom(recover_panic))
        .layer(middleware::from_fn(log_requests))
        .layer(CorsLayer::permissive())
}

/// Turns a handler panic into a 500 response.
fn recover_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Internal(detail).into_response()
}

async fn log_requests(
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "handled request"
    );
    response
}
