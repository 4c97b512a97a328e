//! REST handlers for the calculator
//!
//! One handler per route. Each hands the raw body to the shared pipeline so
//! that decode failures produce the same envelope as domain errors. A body
//! that cannot be buffered (e.g. over the size limit) is rejected the same way.

#![allow(clippy::unused_async)] // axum handler signature

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use calc_errors::ErrorEnvelope;
use tracing::debug;

use crate::domain::Operation;

use super::dto::{BinaryOperands, ResultEnvelope, UnaryOperands};
use super::error::ApiError;
use super::pipeline;

type RawBody = Result<Bytes, BytesRejection>;

fn respond(op: Operation, body: RawBody) -> Result<Json<ResultEnvelope>, ApiError> {
    let outcome = body
        .map_err(ApiError::from)
        .and_then(|bytes| pipeline::run(op, &bytes));
    match outcome {
        Ok(out) => {
            debug!(%op, result = out.result, "operation completed");
            Ok(Json(out))
        }
        Err(e) => {
            debug!(%op, error = %e, "operation rejected");
            Err(e)
        }
    }
}

/// Add two numbers
#[utoipa::path(
    post,
    path = "/v1/add",
    tag = "calculator",
    request_body(content = BinaryOperands, description = "Operands"),
    responses(
        (status = 200, description = "Sum of a and b", body = ResultEnvelope),
        (status = 400, description = "Invalid input", body = ErrorEnvelope)
    )
)]
pub async fn add(body: RawBody) -> Result<Json<ResultEnvelope>, ApiError> {
    respond(Operation::Add, body)
}

/// Subtract two numbers
#[utoipa::path(
    post,
    path = "/v1/subtract",
    tag = "calculator",
    request_body(content = BinaryOperands, description = "Operands"),
    responses(
        (status = 200, description = "Difference a - b", body = ResultEnvelope),
        (status = 400, description = "Invalid input", body = ErrorEnvelope)
    )
)]
pub async fn subtract(body: RawBody) -> Result<Json<ResultEnvelope>, ApiError> {
    respond(Operation::Subtract, body)
}

/// Multiply two numbers
#[utoipa::path(
    post,
    path = "/v1/multiply",
    tag = "calculator",
    request_body(content = BinaryOperands, description = "Operands"),
    responses(
        (status = 200, description = "Product of a and b", body = ResultEnvelope),
        (status = 400, description = "Invalid input", body = ErrorEnvelope)
    )
)]
pub async fn multiply(body: RawBody) -> Result<Json<ResultEnvelope>, ApiError> {
    respond(Operation::Multiply, body)
}

/// Divide two numbers
#[utoipa::path(
    post,
    path = "/v1/divide",
    tag = "calculator",
    request_body(content = BinaryOperands, description = "Operands"),
    responses(
        (status = 200, description = "Quotient a / b", body = ResultEnvelope),
        (status = 400, description = "Invalid input or division by zero", body = ErrorEnvelope)
    )
)]
pub async fn divide(body: RawBody) -> Result<Json<ResultEnvelope>, ApiError> {
    respond(Operation::Divide, body)
}

/// Power operation
#[utoipa::path(
    post,
    path = "/v1/power",
    tag = "calculator",
    request_body(content = BinaryOperands, description = "Base a and exponent b"),
    responses(
        (status = 200, description = "a raised to b", body = ResultEnvelope),
        (status = 400, description = "Invalid input or non-real result", body = ErrorEnvelope)
    )
)]
pub async fn power(body: RawBody) -> Result<Json<ResultEnvelope>, ApiError> {
    respond(Operation::Power, body)
}

/// Square root
#[utoipa::path(
    post,
    path = "/v1/sqrt",
    tag = "calculator",
    request_body(content = UnaryOperands, description = "Operand"),
    responses(
        (status = 200, description = "Non-negative square root of a", body = ResultEnvelope),
        (status = 400, description = "Invalid input or negative operand", body = ErrorEnvelope)
    )
)]
pub async fn sqrt(body: RawBody) -> Result<Json<ResultEnvelope>, ApiError> {
    respond(Operation::Sqrt, body)
}

/// Percentage calculation
#[utoipa::path(
    post,
    path = "/v1/percentage",
    tag = "calculator",
    request_body(content = BinaryOperands, description = "Percentage a of base b"),
    responses(
        (status = 200, description = "a percent of b", body = ResultEnvelope),
        (status = 400, description = "Invalid input or negative percentage", body = ErrorEnvelope)
    )
)]
pub async fn percentage(body: RawBody) -> Result<Json<ResultEnvelope>, ApiError> {
    respond(Operation::Percentage, body)
}
