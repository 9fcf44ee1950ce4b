//! Raw executor output and the envelope returned by the responding client.

use std::borrow::Cow;

use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// A response as produced by a [`RequestExecutor`](crate::RequestExecutor).
///
/// Read-only once produced: customizers and observers only ever see
/// `&RawResponse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    error_message: Option<String>,
}

impl RawResponse {
    /// Empty response with `status`.
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
            error_message: None,
        }
    }

    /// Response assembled from transport parts.
    ///
    /// For 4xx and 5xx statuses the error message is taken from the JSON error
    /// model (`{"error": {"message": ..}}` or a top-level `"message"`) and
    /// falls back to the canonical reason phrase.
    #[must_use]
    pub fn from_parts(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        let error_message = if status.is_client_error() || status.is_server_error() {
            extract_error_message(&body).or_else(|| status.canonical_reason().map(str::to_string))
        } else {
            None
        };
        Self {
            status,
            headers,
            body,
            error_message,
        }
    }

    /// Append a header value.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Replace the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the error message.
    #[must_use]
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// `Content-Type` header, if present and valid text.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// `Content-Length` header, or the body length when the header is absent.
    #[must_use]
    pub fn content_length(&self) -> u64 {
        self.headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(self.body.len() as u64)
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text; invalid UTF-8 is replaced.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Error message of an error response.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Decode the body as JSON, regardless of status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| Error::Decode {
            type_name: std::any::type_name::<T>().to_string(),
            source: Box::new(e),
        })
    }
}

fn extract_error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .pointer("/error/message")
        .or_else(|| value.get("message"))
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

/// Decoded payload together with the response metadata it came from.
///
/// Returned by [`RespondingClient`](crate::RespondingClient), which is the way
/// to observe the status of non-2xx responses: their payload is always `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerResponse<T> {
    status: StatusCode,
    headers: HeaderMap,
    content_length: u64,
    error_message: Option<String>,
    body: Option<T>,
}

impl<T> ControllerResponse<T> {
    /// Combine captured response metadata with a decoded payload.
    #[must_use]
    pub fn new(raw: &RawResponse, body: Option<T>) -> Self {
        Self {
            status: raw.status(),
            headers: raw.headers().clone(),
            content_length: raw.content_length(),
            error_message: raw.error_message().map(str::to_string),
            body,
        }
    }

    /// Status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Status code as a number.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// All values of header `name` that are valid text.
    #[must_use]
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// `Content-Type` header, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// Content length of the captured response.
    #[must_use]
    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    /// Error message of an error response.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Decoded payload.
    #[must_use]
    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    /// Consume the envelope, returning the payload.
    #[must_use]
    pub fn into_body(self) -> Option<T> {
        self.body
    }
}
