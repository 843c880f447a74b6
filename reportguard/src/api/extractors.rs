use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;

use crate::error::ReportGuardError;

/// `axum::Json` whose rejections render as v1 `invalid_request` envelopes.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ReportGuardError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for ReportGuardError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> ReportGuardError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ReportGuardError::PayloadTooLarge(rejection.body_text());
    }

    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            if let Some(field) = extract_missing_field(&message) {
                ReportGuardError::Validation(format!("Missing required field: {field}"))
            } else {
                ReportGuardError::Validation(format!("Invalid JSON: {message}"))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            ReportGuardError::Validation(format!("JSON syntax error: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => ReportGuardError::Validation(
            "Missing `Content-Type: application/json` header".to_string(),
        ),
        JsonRejection::BytesRejection(_) => {
            ReportGuardError::Internal("Failed to read request body".to_string())
        }
        _ => ReportGuardError::Validation(rejection.body_text()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_missing_field_name() {
        assert_eq!(
            extract_missing_field("Failed to deserialize: missing field `reportData` at line 1"),
            Some("reportData")
        );
        assert_eq!(extract_missing_field("expected value"), None);
    }
}
