use http::StatusCode;
use serde::{Deserialize, Serialize};

const UNKNOWN_ERROR: &str = "Unknown error";

/// Body the user service sends back alongside a failure status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    /// Extracts the error detail, falling back to the status reason when the
    /// body is not an envelope.
    pub fn detail_from(status: StatusCode, body: &[u8]) -> String {
        match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(envelope) if !envelope.error.is_empty() => envelope.error,
            _ => status
                .canonical_reason()
                .unwrap_or(UNKNOWN_ERROR)
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Connection(String),
    Status { status: StatusCode, detail: String },
    Decode(String),
    Encode(String),
    Timeout,
    Cancelled,
}

impl ApiError {
    pub fn status(status: StatusCode, body: &[u8]) -> Self {
        Self::Status {
            status,
            detail: ErrorEnvelope::detail_from(status, body),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Connection(e) => write!(f, "Connection error: {e}"),
            ApiError::Status { status, detail } => write!(f, "Status: {status} - {detail}"),
            ApiError::Decode(e) => write!(f, "Error decoding the response body: {e}"),
            ApiError::Encode(e) => write!(f, "Error encoding the request body: {e}"),
            ApiError::Timeout => write!(f, "Request timed out"),
            ApiError::Cancelled => write!(f, "Request cancelled"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<hyper::Error> for ApiError {
    fn from(value: hyper::Error) -> Self {
        Self::Connection(value.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(value: std::io::Error) -> Self {
        Self::Connection(value.to_string())
    }
}

impl From<http::Error> for ApiError {
    fn from(value: http::Error) -> Self {
        Self::Encode(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_envelope_detail() {
        let err = ApiError::status(StatusCode::CONFLICT, br#"{"error":"Username taken"}"#);
        assert_eq!(
            err,
            ApiError::Status {
                status: StatusCode::CONFLICT,
                detail: "Username taken".to_string()
            }
        );
    }

    #[test]
    fn falls_back_when_body_is_not_an_envelope() {
        let bodies: [&[u8]; 4] = [
            b"<html>oops</html>",
            br#"{"message":"nope"}"#,
            b"",
            br#"{"error":""}"#,
        ];
        for body in bodies {
            let err = ApiError::status(StatusCode::INTERNAL_SERVER_ERROR, body);
            assert_eq!(
                err,
                ApiError::Status {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    detail: "Internal Server Error".to_string()
                }
            );
        }
    }

    #[test]
    fn unknown_status_uses_default_detail() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(ErrorEnvelope::detail_from(status, b"garbage"), "Unknown error");
    }
}
