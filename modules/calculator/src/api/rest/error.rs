//! Mapping from pipeline failures to the HTTP error envelope.

use axum::extract::rejection::BytesRejection;
use axum::response::{IntoResponse, Response};
use calc_errors::{Rejection, bad_request};

use crate::domain::DomainError;

use super::operand::OperandError;

/// Why a request did not produce a result.
///
/// The cause is kept for logging; on the wire every variant becomes the same
/// 400 envelope.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// Malformed body, missing operand or non-numeric operand text.
    #[error("{0}")]
    BadInput(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The engine produced NaN or an infinity.
    #[error("result is not a finite number")]
    Unrepresentable,
}

impl From<OperandError> for ApiError {
    fn from(e: OperandError) -> Self {
        Self::BadInput(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::BadInput(e.to_string())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(e: BytesRejection) -> Self {
        Self::BadInput(e.body_text())
    }
}

impl From<ApiError> for Rejection {
    fn from(e: ApiError) -> Self {
        bad_request(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        Rejection::from(self).into_response()
    }
}
