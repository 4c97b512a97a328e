//! Error envelope for HTTP APIs (pure data model, framework integration behind features)

use http::StatusCode;
use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

/// Body of every failed request.
///
/// Carries a human-readable message only; there is no machine-readable code
/// on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[cfg_attr(
    feature = "utoipa",
    schema(title = "ErrorResponse", description = "Error message for a failed operation")
)]
pub struct ErrorEnvelope {
    /// Human-readable explanation of the failure.
    #[cfg_attr(feature = "utoipa", schema(example = "invalid input"))]
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// An error envelope together with the HTTP status it is answered with.
#[derive(Debug, Clone)]
#[must_use]
pub struct Rejection {
    pub status: StatusCode,
    pub envelope: ErrorEnvelope,
}

impl Rejection {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            envelope: ErrorEnvelope::new(detail),
        }
    }
}

pub fn bad_request(detail: impl Into<String>) -> Rejection {
    Rejection::new(StatusCode::BAD_REQUEST, detail)
}

/// Axum integration: make Rejection directly usable as a response
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for Rejection {
    fn into_response(self) -> axum::response::Response {
        tracing::debug!(status = self.status.as_u16(), error = %self.envelope.error, "request rejected");

        let status = self.status;
        let mut resp = axum::Json(self.envelope).into_response();
        *resp.status_mut() = status;
        resp
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_single_error_field() {
        let e = ErrorEnvelope::new("division by zero");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "division by zero" }));
    }

    #[test]
    fn envelope_deserializes_from_wire_shape() {
        let e: ErrorEnvelope = serde_json::from_str(r#"{"error":"negative percentage"}"#).unwrap();
        assert_eq!(e.error, "negative percentage");
    }

    #[test]
    fn bad_request_uses_400() {
        let r = bad_request("invalid number literal");
        assert_eq!(r.status, StatusCode::BAD_REQUEST);
        assert_eq!(r.envelope.error, "invalid number literal");
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn rejection_into_response_sets_status_and_body() {
        use axum::response::IntoResponse;

        let resp = bad_request("boom").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let ct = resp
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        assert_eq!(ct, "application/json");

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let e: ErrorEnvelope = serde_json::from_slice(&body).unwrap();
        assert_eq!(e.error, "boom");
    }
}
