//! Reusable response expectations.
//!
//! Each function returns a response customizer for
//! [`ClientBuilder::customize_response`](crate::ClientBuilder::customize_response)
//! or [`ClientCaller::then`](crate::ClientCaller::then).

use http::HeaderName;

use crate::error::AssertionFailure;
use crate::response::RawResponse;

/// Expect the status code to equal `expected`.
///
/// ```
/// use route_client::{expect, RawResponse};
/// use route_client::http::StatusCode;
///
/// let check = expect::status(200);
/// assert!(check(&RawResponse::new(StatusCode::OK)).is_ok());
///
/// let failure = check(&RawResponse::new(StatusCode::INTERNAL_SERVER_ERROR)).unwrap_err();
/// assert_eq!(failure.message(), "expected status 200 but was 500");
/// ```
pub fn status(
    expected: u16,
) -> impl Fn(&RawResponse) -> Result<(), AssertionFailure> + Send + Sync + 'static {
    move |response: &RawResponse| {
        let actual = response.status().as_u16();
        if actual == expected {
            Ok(())
        } else {
            Err(AssertionFailure::new(format!(
                "expected status {expected} but was {actual}"
            )))
        }
    }
}

/// Expect a 2xx status code.
pub fn success() -> impl Fn(&RawResponse) -> Result<(), AssertionFailure> + Send + Sync + 'static
{
    |response: &RawResponse| {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AssertionFailure::new(format!(
                "expected a successful status but was {}",
                status.as_u16()
            )))
        }
    }
}

/// Expect header `name` to carry `expected` among its values.
pub fn header(
    name: HeaderName,
    expected: impl Into<String>,
) -> impl Fn(&RawResponse) -> Result<(), AssertionFailure> + Send + Sync + 'static {
    let expected = expected.into();
    move |response: &RawResponse| {
        let values: Vec<&str> = response
            .headers()
            .get_all(&name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        if values.iter().any(|v| *v == expected) {
            Ok(())
        } else if values.is_empty() {
            Err(AssertionFailure::new(format!(
                "expected header '{name}' to be '{expected}' but it was missing"
            )))
        } else {
            Err(AssertionFailure::new(format!(
                "expected header '{name}' to be '{expected}' but was '{}'",
                values.join(", ")
            )))
        }
    }
}

/// Expect the media type of `Content-Type` to equal `expected`.
///
/// Parameters such as `charset` are ignored unless `expected` carries them.
pub fn content_type(
    expected: impl Into<String>,
) -> impl Fn(&RawResponse) -> Result<(), AssertionFailure> + Send + Sync + 'static {
    let expected = expected.into();
    move |response: &RawResponse| {
        let actual = response.content_type().unwrap_or_default();
        let matches = if expected.contains(';') {
            actual.eq_ignore_ascii_case(&expected)
        } else {
            actual
                .split(';')
                .next()
                .is_some_and(|media| media.trim().eq_ignore_ascii_case(&expected))
        };
        if matches {
            Ok(())
        } else {
            Err(AssertionFailure::new(format!(
                "expected content type '{expected}' but was '{actual}'"
            )))
        }
    }
}
