//! Domain errors raised by the arithmetic engine.

/// Errors for mathematically invalid inputs.
///
/// Messages are fixed; no operand is interpolated into them.
/// `InvalidDomain` covers both a negative square-root argument and a
/// non-real power result.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("sqrt negative number")]
    InvalidDomain,

    #[error("negative percentage")]
    NegativePercentage,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn messages_are_fixed() {
        assert_eq!(DomainError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(DomainError::InvalidDomain.to_string(), "sqrt negative number");
        assert_eq!(
            DomainError::NegativePercentage.to_string(),
            "negative percentage"
        );
    }
}
