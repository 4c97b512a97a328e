//! Operand coercion.
//!
//! An operand arrives either as a JSON number or as a JSON string holding a
//! decimal number. Both are kept in textual form until the conversion step so
//! that numerals wider than `f64` are accepted on the wire; precision is lost
//! only when [`Operand::to_f64`] collapses them.

use std::fmt;
use std::num::ParseFloatError;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

/// A numeric operand in its textual decimal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand(String);

/// Conversion failure from operand text to `f64`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OperandError {
    #[error("invalid number literal {text:?}: {source}")]
    Parse {
        text: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("value out of range: {text}")]
    OutOfRange { text: String },
}

impl Operand {
    /// Build an operand from text, checking it is a JSON number literal.
    ///
    /// Returns `None` when `text` is not a valid literal.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        is_number_literal(text).then(|| Self(text.to_owned()))
    }

    /// Collapse the operand to the nearest `f64`.
    ///
    /// # Errors
    /// `OperandError::Parse` when the text is not a real number and
    /// `OperandError::OutOfRange` when it overflows `f64`.
    pub fn to_f64(&self) -> Result<f64, OperandError> {
        let value: f64 = self.0.parse().map_err(|source| OperandError::Parse {
            text: self.0.clone(),
            source,
        })?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(OperandError::OutOfRange {
                text: self.0.clone(),
            })
        }
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Self(value.to_string())
    }
}

struct OperandVisitor;

impl Visitor<'_> for OperandVisitor {
    type Value = Operand;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a string containing a decimal number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Operand, E> {
        Ok(Operand(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Operand, E> {
        Ok(Operand(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Operand, E> {
        Ok(Operand::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Operand, E> {
        Operand::parse(v).ok_or_else(|| E::custom(format!("invalid number literal {v:?}")))
    }
}

impl<'de> Deserialize<'de> for Operand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OperandVisitor)
    }
}

/// JSON number grammar: `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
fn is_number_literal(s: &str) -> bool {
    let b = s.as_bytes();
    let mut i = 0;

    if b.get(i) == Some(&b'-') {
        i += 1;
    }

    match b.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i += 1 + count_digits(&b[i + 1..]),
        _ => return false,
    }

    if b.get(i) == Some(&b'.') {
        let n = count_digits(&b[i + 1..]);
        if n == 0 {
            return false;
        }
        i += 1 + n;
    }

    if matches!(b.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(b.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let n = count_digits(&b[i..]);
        if n == 0 {
            return false;
        }
        i += n;
    }

    i == b.len()
}

fn count_digits(b: &[u8]) -> usize {
    b.iter().take_while(|c| c.is_ascii_digit()).count()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::float_cmp, clippy::lossy_float_literal)]
mod tests {
    use super::*;

    #[test]
    fn accepts_json_number_literals() {
        for s in [
            "0",
            "-0",
            "12.3",
            "-4.5",
            "1e10",
            "1E-7",
            "2.5e+3",
            "98765432109876543210",
        ] {
            assert!(is_number_literal(s), "{s} should be accepted");
        }
    }

    #[test]
    fn rejects_non_literals() {
        for s in [
            "", "-", "abc", "01", "1.", ".5", "+1", "1e", "1e+", " 1", "1 ", "0x10", "NaN",
            "Infinity", "1_000",
        ] {
            assert!(!is_number_literal(s), "{s:?} should be rejected");
        }
    }

    #[test]
    fn deserializes_numbers_and_numeric_strings() {
        let n: Operand = serde_json::from_str("12").unwrap();
        assert_eq!(n.to_f64().unwrap(), 12.0);

        let f: Operand = serde_json::from_str("-4.5").unwrap();
        assert_eq!(f.to_f64().unwrap(), -4.5);

        let s: Operand = serde_json::from_str(r#""6.7""#).unwrap();
        assert_eq!(s.0, "6.7");
        assert_eq!(s.to_f64().unwrap(), 6.7);
    }

    #[test]
    fn wide_numerals_lose_precision_but_convert() {
        let s: Operand = serde_json::from_str(r#""98765432109876543210""#).unwrap();
        assert_eq!(s.0, "98765432109876543210");
        assert_eq!(s.to_f64().unwrap(), 98_765_432_109_876_543_210.0);
    }

    #[test]
    fn rejects_non_numeric_json() {
        for body in [r#""abc""#, r#""""#, "null", "true", "[1]", r#"{"x":1}"#] {
            let res: Result<Operand, _> = serde_json::from_str(body);
            assert!(res.is_err(), "{body} should not decode");
        }
    }

    #[test]
    fn decode_error_names_the_literal() {
        let err = serde_json::from_str::<Operand>(r#""12a""#).unwrap_err();
        assert!(err.to_string().contains("invalid number literal"), "{err}");
    }

    #[test]
    fn overflowing_text_fails_conversion() {
        let op = Operand::parse("1e400").unwrap();
        assert_eq!(
            op.to_f64(),
            Err(OperandError::OutOfRange {
                text: "1e400".to_owned()
            })
        );
    }

    #[test]
    fn underflow_collapses_to_zero() {
        let op = Operand::parse("1e-400").unwrap();
        assert_eq!(op.to_f64().unwrap(), 0.0);
    }
}
