//! In-process executor dispatching through an [`axum::Router`].

use axum::body::Body;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tracing::trace;

use crate::error::{Error, Result};
use crate::executor::RequestExecutor;
use crate::request::RequestDescriptor;
use crate::response::RawResponse;

/// Executes requests against an [`axum::Router`] without a network socket.
///
/// Each request is driven to completion with [`ServiceExt::oneshot`] on a
/// private current-thread runtime, so the executor must be used from
/// synchronous code (a plain `#[test]`), never from inside another tokio
/// runtime.
///
/// # Examples
///
/// ```
/// use axum::{routing::get, Router};
/// use route_client::http::{Method, StatusCode};
/// use route_client::{RequestDescriptor, RequestExecutor, RouterExecutor};
///
/// let router = Router::new().route("/ping", get(|| async { "pong" }));
/// let executor = RouterExecutor::new(router).unwrap();
///
/// let response = executor
///     .execute(RequestDescriptor::new(Method::GET, "/ping"))
///     .unwrap();
/// assert_eq!(response.status(), StatusCode::OK);
/// assert_eq!(response.text(), "pong");
/// ```
#[derive(Debug)]
pub struct RouterExecutor {
    router: Router,
    runtime: tokio::runtime::Runtime,
}

impl RouterExecutor {
    /// Wrap `router`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the runtime cannot be created.
    pub fn new(router: Router) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self { router, runtime })
    }
}

impl RequestExecutor for RouterExecutor {
    fn execute(&self, request: RequestDescriptor) -> Result<RawResponse> {
        let request = request.into_http_request()?.map(Body::from);
        trace!(method = %request.method(), uri = %request.uri(), "dispatching to router");

        self.runtime.block_on(async {
            let response = match self.router.clone().oneshot(request).await {
                Ok(response) => response,
                Err(never) => match never {},
            };

            let (parts, body) = response.into_parts();
            let bytes = body
                .collect()
                .await
                .map_err(|e| Error::Dispatch(Box::new(e)))?
                .to_bytes();
            Ok(RawResponse::from_parts(
                parts.status,
                parts.headers,
                bytes.to_vec(),
            ))
        })
    }
}
