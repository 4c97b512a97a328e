//! REST DTOs for the calculator
//!
//! These types are transport-specific (serde + utoipa for REST/OpenAPI).

use serde::{Deserialize, Serialize, Serializer};
use serde_json::value::RawValue;
use utoipa::ToSchema;

use super::error::ApiError;
use super::operand::Operand;

/// Operands of a two-argument operation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(title = "BinaryOperand")]
pub struct BinaryOperands {
    /// First operand, as a JSON number or a numeric string
    #[schema(value_type = f64, example = 12.3)]
    pub a: Operand,
    /// Second operand, as a JSON number or a numeric string
    #[schema(value_type = f64, example = 4.5)]
    pub b: Operand,
}

/// Operand of a one-argument operation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(title = "UnaryOperand")]
pub struct UnaryOperands {
    /// The operand, as a JSON number or a numeric string
    #[schema(value_type = f64, example = 6.7)]
    pub a: Operand,
}

/// Successful operation result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(title = "Response")]
pub struct ResultEnvelope {
    /// Shortest decimal that round-trips to the computed value
    #[serde(serialize_with = "serialize_plain_decimal")]
    #[schema(example = 8.9)]
    pub result: f64,
}

impl ResultEnvelope {
    /// Wrap a computed value.
    ///
    /// # Errors
    /// `ApiError::Unrepresentable` for NaN or an infinity.
    pub fn new(result: f64) -> Result<Self, ApiError> {
        if result.is_finite() {
            Ok(Self { result })
        } else {
            Err(ApiError::Unrepresentable)
        }
    }
}

/// Write an `f64` as the shortest round-trip decimal, never in exponent form
/// (`5.0` -> `5`, `1e21` -> `1000000000000000000000`).
#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_plain_decimal<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::Error;

    if !value.is_finite() {
        return Err(S::Error::custom("result is not a finite number"));
    }
    let raw = RawValue::from_string(value.to_string()).map_err(S::Error::custom)?;
    raw.serialize(serializer)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::float_cmp, clippy::lossy_float_literal)]
mod tests {
    use super::*;

    fn encode(v: f64) -> String {
        serde_json::to_string(&ResultEnvelope::new(v).unwrap()).unwrap()
    }

    #[test]
    fn result_uses_shortest_plain_decimal() {
        assert_eq!(encode(5.0), r#"{"result":5}"#);
        assert_eq!(encode(0.5), r#"{"result":0.5}"#);
        assert_eq!(encode(-10.0), r#"{"result":-10}"#);
        assert_eq!(encode(0.1 + 0.2), r#"{"result":0.30000000000000004}"#);
        assert_eq!(encode(1e21), r#"{"result":1000000000000000000000}"#);
        assert_eq!(encode(1e-7), r#"{"result":0.0000001}"#);
    }

    #[test]
    fn result_round_trips() {
        for v in [3.0, -2.5, 1.0 / 3.0, 32_921_810_703_292_180_000.0, f64::MIN_POSITIVE] {
            let back: ResultEnvelope = serde_json::from_str(&encode(v)).unwrap();
            assert_eq!(back.result, v);
        }
    }

    #[test]
    fn non_finite_results_are_refused() {
        assert!(matches!(
            ResultEnvelope::new(f64::INFINITY),
            Err(ApiError::Unrepresentable)
        ));
        assert!(matches!(
            ResultEnvelope::new(f64::NAN),
            Err(ApiError::Unrepresentable)
        ));
    }

    #[test]
    fn binary_operands_require_both_fields() {
        let ok: BinaryOperands = serde_json::from_str(r#"{"a": 2, "b": "3"}"#).unwrap();
        assert_eq!(ok.a.to_f64().unwrap(), 2.0);
        assert_eq!(ok.b.to_f64().unwrap(), 3.0);

        let err = serde_json::from_str::<BinaryOperands>(r#"{"a": 2}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `b`"), "{err}");
    }

    #[test]
    fn unary_operands_ignore_extra_fields() {
        let ok: UnaryOperands = serde_json::from_str(r#"{"a": 9, "b": 1}"#).unwrap();
        assert_eq!(ok.a.to_f64().unwrap(), 9.0);
    }
}
