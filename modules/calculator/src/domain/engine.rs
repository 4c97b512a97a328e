//! Arithmetic engine
//!
//! Pure functions over `f64`. Overflow in the infallible operations follows
//! IEEE 754 and is not guarded here.

use tracing::debug;

use super::DomainError;

#[must_use]
pub fn add(a: f64, b: f64) -> f64 {
    debug!(a, b, "performing addition");
    a + b
}

#[must_use]
pub fn subtract(a: f64, b: f64) -> f64 {
    debug!(a, b, "performing subtraction");
    a - b
}

#[must_use]
pub fn multiply(a: f64, b: f64) -> f64 {
    debug!(a, b, "performing multiplication");
    a * b
}

/// Divide `a` by `b`.
///
/// # Errors
/// `DomainError::DivisionByZero` when `b` is exactly zero (either sign).
pub fn divide(a: f64, b: f64) -> Result<f64, DomainError> {
    debug!(a, b, "performing division");
    if b == 0.0 {
        return Err(DomainError::DivisionByZero);
    }
    Ok(a / b)
}

/// Raise `a` to the power `b`.
///
/// # Errors
/// `DomainError::InvalidDomain` when the result is not a real number,
/// e.g. a negative base with a fractional exponent.
pub fn power(a: f64, b: f64) -> Result<f64, DomainError> {
    debug!(a, b, "performing exponentiation");
    let result = a.powf(b);
    if result.is_nan() {
        return Err(DomainError::InvalidDomain);
    }
    Ok(result)
}

/// Non-negative square root of `a`.
///
/// # Errors
/// `DomainError::InvalidDomain` when `a < 0`.
pub fn sqrt(a: f64) -> Result<f64, DomainError> {
    debug!(a, "performing square root");
    if a < 0.0 {
        return Err(DomainError::InvalidDomain);
    }
    Ok(a.sqrt())
}

/// `a` percent of `b`.
///
/// Only the percentage `a` is validated; `b` may be zero or negative.
///
/// # Errors
/// `DomainError::NegativePercentage` when `a < 0`.
pub fn percentage(a: f64, b: f64) -> Result<f64, DomainError> {
    debug!(a, b, "performing percentage");
    if a < 0.0 {
        return Err(DomainError::NegativePercentage);
    }
    Ok((a / 100.0) * b)
}
