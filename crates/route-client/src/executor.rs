//! Executor seam: sends a [`RequestDescriptor`] and returns the raw response.

use crate::error::Result;
use crate::request::RequestDescriptor;
use crate::response::RawResponse;

/// Sends a request and returns the raw response.
///
/// Executors are blocking: the client calls [`execute`](Self::execute) on the
/// caller's thread and waits for the result. Any timeout belongs to the
/// executor.
///
/// Closures implement the trait, which keeps test doubles short:
///
/// ```
/// use route_client::{RawResponse, RequestDescriptor, RequestExecutor};
/// use route_client::http::{Method, StatusCode};
///
/// let executor = |request: RequestDescriptor| -> route_client::Result<RawResponse> {
///     Ok(RawResponse::new(StatusCode::OK).with_body(request.uri()))
/// };
///
/// let response = executor
///     .execute(RequestDescriptor::new(Method::GET, "/ping"))
///     .unwrap();
/// assert_eq!(response.text(), "/ping");
/// ```
pub trait RequestExecutor: Send + Sync {
    /// Send `request`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dispatch`](crate::Error::Dispatch) (or any other
    /// variant) if the request could not be sent.
    fn execute(&self, request: RequestDescriptor) -> Result<RawResponse>;
}

impl<F> RequestExecutor for F
where
    F: Fn(RequestDescriptor) -> Result<RawResponse> + Send + Sync,
{
    fn execute(&self, request: RequestDescriptor) -> Result<RawResponse> {
        self(request)
    }
}
