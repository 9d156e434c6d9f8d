//! # Framework Adapter
//!
//! Turns a validation outcome into either a "400 - Bad request" error or a
//! call to the success continuation. The core never sees status codes or
//! requests; this is the only place they meet.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http_body_util::LengthLimitError;
use serde::Serialize;
use thiserror::Error;

use crate::schema::{Declaration, Document, KeyedViolation, Violation};

/// Message sent with every rejected payload
pub const BAD_REQUEST_MESSAGE: &str = "Bad request";

/// Structured rejection of a payload that did not match its declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadRequest {
    pub status_code: u16,
    pub message: String,
    /// Violation tree without the payload wrapper
    pub errors: Violation,
}

impl BadRequest {
    pub fn new(errors: Violation) -> Self {
        Self {
            status_code: StatusCode::BAD_REQUEST.as_u16(),
            message: BAD_REQUEST_MESSAGE.to_string(),
            errors,
        }
    }
}

impl From<KeyedViolation> for BadRequest {
    fn from(violation: KeyedViolation) -> Self {
        Self::new(violation.into_violation())
    }
}

impl IntoResponse for BadRequest {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

/// Validates `payload` and calls exactly one continuation.
///
/// `on_bad_request` receives the structured rejection; `on_valid` is called
/// with no arguments when the payload conforms.
pub fn validate_payload<D, R, F, S>(
    declaration: &Declaration,
    payload: Option<&D>,
    on_bad_request: F,
    on_valid: S,
) -> R
where
    D: Document + ?Sized,
    F: FnOnce(BadRequest) -> R,
    S: FnOnce() -> R,
{
    match declaration.validate(payload) {
        Some(violation) => on_bad_request(BadRequest::from(violation)),
        None => on_valid(),
    }
}

/// Errors raised before a body can be validated at all
#[derive(Debug, Clone, Error)]
pub enum AdapterError {
    /// Body is larger than the configured limit
    #[error("Request body is too large: {0}")]
    BodyTooLarge(String),

    /// Body stream failed while buffering
    #[error("Request body could not be read: {0}")]
    UnreadableBody(String),

    /// Body is not JSON
    #[error("Request body is not valid JSON: {0}")]
    MalformedJson(String),
}

impl AdapterError {
    /// Classifies a failure to buffer the request body.
    pub fn from_body_error(err: &axum::Error) -> Self {
        let mut cause: Option<&(dyn std::error::Error + 'static)> = Some(err);
        while let Some(e) = cause {
            if e.is::<LengthLimitError>() {
                return AdapterError::BodyTooLarge(err.to_string());
            }
            cause = e.source();
        }
        AdapterError::UnreadableBody(err.to_string())
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdapterError::BodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AdapterError::UnreadableBody(_) => StatusCode::BAD_REQUEST,
            AdapterError::MalformedJson(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<AdapterError> for ErrorResponse {
    fn from(err: AdapterError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for AdapterError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_valid_payload_calls_continuation() {
        let decl = Declaration::string().required();
        let outcome = validate_payload(&decl, Some(&json!("ok")), |_| "bad", || "next");
        assert_eq!(outcome, "next");
    }

    #[test]
    fn test_invalid_payload_is_rejected_without_wrapper() {
        let decl = Declaration::string().required();
        let outcome = validate_payload::<Value, _, _, _>(&decl, None, Err, || Ok(()));
        let bad = outcome.unwrap_err();

        assert_eq!(
            serde_json::to_value(&bad).unwrap(),
            json!({
                "statusCode": 400,
                "message": "Bad request",
                "errors": {"kind": "missing", "message": "expected string, got absent"}
            })
        );
    }

    #[test]
    fn test_aggregate_errors_are_forwarded() {
        let decl = Declaration::shape([("a", Declaration::number().required())]);
        let bad = validate_payload(&decl, Some(&json!({"a": "1"})), Some, || None).unwrap();
        assert_eq!(
            bad.errors.field("a").and_then(Violation::message),
            Some("expected number, got string")
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(BadRequest::new(Violation::Fields(Default::default())).status_code, 400);
        assert_eq!(
            AdapterError::MalformedJson("eof".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AdapterError::BodyTooLarge("length limit exceeded".into()).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AdapterError::UnreadableBody("connection reset".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_body_errors_are_classified() {
        let too_large = axum::body::to_bytes(axum::body::Body::from("0123456789"), 4)
            .await
            .unwrap_err();
        assert!(matches!(
            AdapterError::from_body_error(&too_large),
            AdapterError::BodyTooLarge(_)
        ));

        let broken = axum::Error::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset",
        ));
        assert!(matches!(
            AdapterError::from_body_error(&broken),
            AdapterError::UnreadableBody(_)
        ));
    }
}
