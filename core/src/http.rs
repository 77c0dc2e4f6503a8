//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! `BookClient` and `AccountClient` build `HttpRequest` values and parse
//! `HttpResponse` values without touching the network; a `Transport` (or any
//! other host) executes the actual I/O in between.
//!
//! All fields use owned types (`String`, `Vec`) so values can be logged,
//! stored in test vectors, or handed to another executor without lifetime
//! concerns.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, ErrorBody};
use crate::types::{ApiResponse, Token};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` is the fixed route. Caller-supplied path segments live in
/// `segments` and query parameters in `query`; both are encoded by
/// [`HttpRequest::full_url`], so an identifier can never change the route.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: String) -> Self {
        Self {
            method,
            url,
            segments: Vec::new(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Append one path segment. `/`, `?`, `#` and `%` are percent-encoded
    /// when the URL is assembled; an empty segment leaves a trailing slash.
    pub fn with_segment(mut self, segment: &str) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn with_query(mut self, name: &str, value: &str) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Attach `authorization: Bearer <token>` when a token is present. An
    /// absent token leaves the request unauthenticated.
    pub fn with_bearer(mut self, token: Option<&Token>) -> Self {
        if let Some(token) = token {
            self.headers
                .push(("authorization".to_string(), format!("Bearer {}", token.as_str())));
        }
        self
    }

    pub fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        self.body = Some(body);
        Ok(self)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The absolute URL with path segments percent-encoded and query
    /// parameters form-encoded.
    ///
    /// `.` and `..` have no encoded form that URL parsers keep as data, so a
    /// segment equal to either is refused instead of resolving to another
    /// route.
    pub fn full_url(&self) -> Result<String, ApiError> {
        let invalid = |reason: String| ApiError::InvalidUrl(format!("{}: {reason}", self.url));
        let mut url = url::Url::parse(&self.url).map_err(|e| invalid(e.to_string()))?;
        if !self.segments.is_empty() {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| invalid("cannot carry path segments".to_string()))?;
            for segment in &self.segments {
                if segment == "." || segment == ".." {
                    return Err(invalid(format!("dot segment {segment:?} in path")));
                }
                path.push(segment);
            }
        }
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url.to_string())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Reject non-2xx responses, and 2xx responses that still carry the
/// `{code, message}` error envelope.
pub(crate) fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if !response.is_success() {
        return Err(ApiError::from_response(response));
    }
    if let Ok(envelope) = serde_json::from_str::<ErrorBody>(&response.body) {
        return Err(ApiError::Service {
            status: response.status,
            code: envelope.code,
            message: envelope.message,
        });
    }
    Ok(())
}

pub(crate) fn decode<T: DeserializeOwned>(
    response: HttpResponse,
) -> Result<ApiResponse<T>, ApiError> {
    check_status(&response)?;
    let data = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::Deserialization(e.to_string()))?;
    Ok(ApiResponse {
        status: response.status,
        data,
    })
}

/// Accept a success response whose body is ignored (204 No Content).
pub(crate) fn decode_empty(response: HttpResponse) -> Result<ApiResponse<()>, ApiError> {
    check_status(&response)?;
    Ok(ApiResponse {
        status: response.status,
        data: (),
    })
}
