//! Client variant returning response metadata with every payload.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::builder::ClientBuilder;
use crate::client::{Controller, ControllerClient};
use crate::error::{AssertionFailure, Error, Result};
use crate::request::RequestDescriptor;
use crate::response::{ControllerResponse, RawResponse};

/// Runs actions and returns a [`ControllerResponse`] per action.
///
/// The last response of each action is captured by an internal observer, so
/// non-2xx statuses stay visible even though their payload is `None`.
/// Concurrent use of one instance is not supported.
pub struct RespondingClient<C> {
    builder: ClientBuilder<C>,
    last: Arc<Mutex<Option<RawResponse>>>,
}

impl<C: Controller> RespondingClient<C> {
    pub(crate) fn new(builder: ClientBuilder<C>) -> Self {
        let last: Arc<Mutex<Option<RawResponse>>> = Arc::default();
        let stash = Arc::clone(&last);
        let builder = builder.observe_response(move |response| {
            *stash.lock().unwrap_or_else(PoisonError::into_inner) = Some(response.clone());
        });
        Self { builder, last }
    }

    /// Register a request customizer.
    #[must_use]
    pub fn customize_request<F>(mut self, customizer: F) -> Self
    where
        F: Fn(&mut RequestDescriptor) + Send + Sync + 'static,
    {
        self.builder = self.builder.customize_request(customizer);
        self
    }

    /// Register a response expectation.
    #[must_use]
    pub fn customize_response<F>(mut self, check: F) -> Self
    where
        F: Fn(&RawResponse) -> std::result::Result<(), AssertionFailure> + Send + Sync + 'static,
    {
        self.builder = self.builder.customize_response(check);
        self
    }

    /// Run `action` on a fresh client and pair its result with the captured
    /// response.
    ///
    /// # Errors
    ///
    /// Returns the action's error, or [`Error::Configuration`] if the action
    /// made no controller call.
    pub fn execute_function<R, F>(&self, action: F) -> Result<ControllerResponse<R>>
    where
        F: FnOnce(&ControllerClient<C>) -> Result<Option<R>>,
    {
        self.clear();
        let body = action(&self.builder.build())?;
        let raw = self.take()?;
        Ok(ControllerResponse::new(&raw, body))
    }

    /// Run `action` on a fresh client and return the captured response
    /// without payload.
    ///
    /// # Errors
    ///
    /// Same as [`execute_function`](Self::execute_function).
    pub fn execute_consumer<F>(&self, action: F) -> Result<ControllerResponse<()>>
    where
        F: FnOnce(&ControllerClient<C>) -> Result<()>,
    {
        self.clear();
        action(&self.builder.build())?;
        let raw = self.take()?;
        Ok(ControllerResponse::new(&raw, None))
    }

    fn clear(&self) {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    fn take(&self) -> Result<RawResponse> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| {
                Error::Configuration("action completed without a controller call".to_string())
            })
    }
}

impl<C> fmt::Debug for RespondingClient<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RespondingClient")
            .field("builder", &self.builder)
            .finish_non_exhaustive()
    }
}
