//! Typed error enum for controller client calls.
//!
//! Every variant is fatal for the call that produced it; nothing is retried.

use route_client_core::ResolveError;

/// Boxed error used at the serializer and executor seams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An expectation registered as a response customizer was not met.
///
/// # Examples
///
/// ```
/// use route_client::AssertionFailure;
///
/// let failure = AssertionFailure::new("expected status 200 but was 500");
/// assert_eq!(failure.message(), "expected status 200 but was 500");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AssertionFailure {
    message: String,
}

impl AssertionFailure {
    /// Create a failure carrying `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors produced by controller clients, callers and executors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Routing metadata is missing or ambiguous.
    #[error(transparent)]
    RouteResolution(#[from] ResolveError),

    /// A path variable argument was `None`.
    ///
    /// Rejected instead of leaving the `{placeholder}` in the URL.
    #[error("Path variable '{variable}' cannot be null for {controller}#{method}(...)")]
    MissingPathVariable {
        /// Placeholder name.
        variable: String,
        /// Controller name.
        controller: String,
        /// Method name.
        method: String,
    },

    /// The declared return type cannot be decoded.
    #[error("unsupported return type: {type_name}")]
    UnsupportedReturnType {
        /// Full type name of the declared return type.
        type_name: String,
    },

    /// A response customizer rejected the response.
    #[error("assertion failed: {0}")]
    Assertion(#[from] AssertionFailure),

    /// The client, caller or call arguments are misconfigured.
    #[error("invalid client configuration: {0}")]
    Configuration(String),

    /// The request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] BoxError),

    /// The response body could not be decoded into the declared type.
    #[error("failed to decode response body as {type_name}: {source}")]
    Decode {
        /// Full type name of the declared return type.
        type_name: String,
        /// Underlying serializer error.
        #[source]
        source: BoxError,
    },

    /// A raw stream argument could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The request could not be turned into a valid HTTP request.
    #[error(transparent)]
    Http(#[from] http::Error),

    /// The executor failed to dispatch the request.
    #[error("request dispatch failed: {0}")]
    Dispatch(#[source] BoxError),
}

/// Convenience alias used throughout the public API.
pub type Result<T> = std::result::Result<T, Error>;
