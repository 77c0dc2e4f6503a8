//! Error types for the bookstore API client.
//!
//! # Design
//! The remote service answers every rejection with a `{code, message}`
//! envelope. Those land in `Service` unchanged so callers can assert on the
//! exact status, code and message. Non-2xx responses without the envelope
//! keep the raw body in `UnexpectedStatus`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::http::HttpResponse;

/// Structured error body returned by the bookstore service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(deserialize_with = "code_as_string")]
    pub code: String,
    pub message: String,
}

/// The service sends codes as strings, but some deployments emit numbers.
fn code_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(i64),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(code) => code,
        Code::Number(code) => code.to_string(),
    })
}

/// Errors returned by the client parse methods and the `BookStore` facade.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The service rejected the request with a structured error body.
    #[error("HTTP {status}: {code} {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
    },

    /// A non-2xx response whose body is not the error envelope.
    #[error("HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    pub(crate) fn from_response(response: &HttpResponse) -> Self {
        match serde_json::from_str::<ErrorBody>(&response.body) {
            Ok(envelope) => ApiError::Service {
                status: response.status,
                code: envelope.code,
                message: envelope.message,
            },
            Err(_) => ApiError::UnexpectedStatus {
                status: response.status,
                body: response.body.clone(),
            },
        }
    }

    /// HTTP status of the rejected response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Service { status, .. } | ApiError::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Service { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::Service { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn envelope_becomes_service_error() {
        let body = r#"{"code":"1200","message":"User not authorized!"}"#;
        let err = ApiError::from_response(&response(401, body));
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.code(), Some("1200"));
        assert_eq!(err.message(), Some("User not authorized!"));
        assert_eq!(err.to_string(), "HTTP 401: 1200 User not authorized!");
    }

    #[test]
    fn numeric_code_is_stringified() {
        let body: ErrorBody = serde_json::from_str(r#"{"code":1210,"message":"dup"}"#).unwrap();
        assert_eq!(body.code, "1210");
    }

    #[test]
    fn plain_body_becomes_unexpected_status() {
        let err = ApiError::from_response(&response(502, "bad gateway"));
        assert!(matches!(err, ApiError::UnexpectedStatus { status: 502, .. }));
        assert_eq!(err.code(), None);
    }

    #[test]
    fn transport_error_has_no_status() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.message(), None);
    }
}
