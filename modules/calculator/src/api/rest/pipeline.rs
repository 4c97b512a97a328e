//! decode -> compute -> encode
//!
//! The two shapes (one operand, two operands) share a single decode path and
//! a single encode path. Nothing here blocks or holds state.

use serde::de::DeserializeOwned;

use crate::domain::{BinaryKernel, Kernel, Operation, UnaryFn};

use super::dto::{BinaryOperands, ResultEnvelope, UnaryOperands};
use super::error::ApiError;

/// Decode a request body into operands.
///
/// The body must be a JSON object; `Content-Type` is not consulted.
///
/// # Errors
/// `ApiError::BadInput` for malformed JSON, a non-object body, a missing
/// operand or an operand that is not a number literal.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(ApiError::BadInput(
            "request body must be a JSON object".to_owned(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

/// Run a two-operand kernel against a request body.
///
/// # Errors
/// Any decode, conversion or domain failure, or a non-finite result.
pub fn run_binary(kernel: BinaryKernel, body: &[u8]) -> Result<ResultEnvelope, ApiError> {
    let input: BinaryOperands = decode(body)?;
    let a = input.a.to_f64()?;
    let b = input.b.to_f64()?;
    ResultEnvelope::new(kernel.call(a, b)?)
}

/// Run a one-operand kernel against a request body.
///
/// # Errors
/// Any decode, conversion or domain failure, or a non-finite result.
pub fn run_unary(kernel: UnaryFn, body: &[u8]) -> Result<ResultEnvelope, ApiError> {
    let input: UnaryOperands = decode(body)?;
    let a = input.a.to_f64()?;
    ResultEnvelope::new(kernel(a)?)
}

/// Run the named operation against a request body.
///
/// # Errors
/// See [`run_binary`] and [`run_unary`].
pub fn run(op: Operation, body: &[u8]) -> Result<ResultEnvelope, ApiError> {
    match op.kernel() {
        Kernel::Binary(kernel) => run_binary(kernel, body),
        Kernel::Unary(kernel) => run_unary(kernel, body),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::float_cmp, clippy::lossy_float_literal)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, engine};

    #[test]
    fn binary_success() {
        let out = run(Operation::Add, br#"{"a": 2, "b": 3}"#).unwrap();
        assert_eq!(out.result, 5.0);
    }

    #[test]
    fn unary_success() {
        let out = run(Operation::Sqrt, br#"{"a": "9"}"#).unwrap();
        assert_eq!(out.result, 3.0);
    }

    #[test]
    fn total_kernel_is_wrapped_as_success() {
        let out = run_binary(BinaryKernel::Total(engine::subtract), br#"{"a":5,"b":3}"#).unwrap();
        assert_eq!(out.result, 2.0);
    }

    #[test]
    fn domain_errors_pass_through() {
        let err = run(Operation::Divide, br#"{"a": 5, "b": 0}"#).unwrap_err();
        assert!(matches!(err, ApiError::Domain(DomainError::DivisionByZero)));

        let err = run(Operation::Power, br#"{"a": -4, "b": 0.5}"#).unwrap_err();
        assert!(matches!(err, ApiError::Domain(DomainError::InvalidDomain)));
    }

    #[test]
    fn decode_failures_happen_before_compute() {
        let bodies: [&[u8]; 6] = [
            b"{not json",
            b"",
            b"[1, 2]",
            br#"{"a": 1}"#,
            br#"{"a": "x", "b": 1}"#,
            br#"{"a": null, "b": 1}"#,
        ];
        for body in bodies {
            let err = run(Operation::Divide, body).unwrap_err();
            assert!(matches!(err, ApiError::BadInput(_)), "{err:?}");
        }
    }

    #[test]
    fn overflowing_operand_text_is_bad_input() {
        let err = run(Operation::Add, br#"{"a": "1e400", "b": 1}"#).unwrap_err();
        assert!(matches!(err, ApiError::BadInput(_)), "{err:?}");
    }

    #[test]
    fn overflowing_result_is_not_a_success() {
        let err = run(Operation::Multiply, br#"{"a": 1e308, "b": 10}"#).unwrap_err();
        assert!(matches!(err, ApiError::Unrepresentable));
    }

    #[test]
    fn pipeline_matches_engine() {
        let out = run(Operation::Percentage, br#"{"a": 10, "b": -100}"#).unwrap();
        assert_eq!(Ok(out.result), engine::percentage(10.0, -100.0));

        let out = run(Operation::Divide, br#"{"a": "98765432109876543210", "b": 3}"#).unwrap();
        assert_eq!(Ok(out.result), engine::divide(98_765_432_109_876_543_210.0, 3.0));
    }
}
