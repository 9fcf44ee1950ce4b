//! Invocation Proxy: typed controller calls → HTTP requests.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};

use route_client_core::{resolve_method, ControllerMetadata, MethodRoute};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::args::ArgValue;
use crate::builder::Customizers;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::executor::RequestExecutor;
use crate::factory::ClientFactory;
use crate::mapper::map_response;
use crate::request::synthesize;
use crate::response::RawResponse;
use crate::serializer::Serializer;

/// A type whose routing metadata drives a [`ControllerClient`].
///
/// Usually implemented by the [`controller!`](crate::controller) macro.
pub trait Controller {
    /// Routing metadata, built once.
    fn metadata() -> &'static ControllerMetadata;
}

/// Client standing in for controller `C`.
///
/// Calls go through [`invoke`](Self::invoke) / [`invoke_unit`](Self::invoke_unit),
/// which the API trait generated by [`controller!`](crate::controller) wraps
/// in typed methods. Routes are resolved on first use and cached.
///
/// Cloning is cheap and clones share the same customizer snapshot. Clients are
/// `Send + Sync`; clients built from different builders never share state.
pub struct ControllerClient<C> {
    inner: Arc<ClientInner>,
    _controller: PhantomData<fn() -> C>,
}

struct ClientInner {
    metadata: &'static ControllerMetadata,
    routes: Mutex<HashMap<String, Arc<MethodRoute>>>,
    executor: Arc<dyn RequestExecutor>,
    serializer: Arc<dyn Serializer>,
    config: Arc<ClientConfig>,
    customizers: Customizers,
}

impl<C: Controller> ControllerClient<C> {
    pub(crate) fn new(factory: &ClientFactory, customizers: Customizers) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                metadata: C::metadata(),
                routes: Mutex::new(HashMap::new()),
                executor: Arc::clone(&factory.executor),
                serializer: Arc::clone(&factory.serializer),
                config: Arc::clone(&factory.config),
                customizers,
            }),
            _controller: PhantomData,
        }
    }
}

impl<C> ControllerClient<C> {
    /// Routing metadata of the controller.
    #[must_use]
    pub fn metadata(&self) -> &'static ControllerMetadata {
        self.inner.metadata
    }

    /// Resolved route of `method`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RouteResolution`](crate::Error::RouteResolution) if the
    /// method cannot be routed.
    pub fn route(&self, method: &str) -> Result<Arc<MethodRoute>> {
        let mut routes = self
            .inner
            .routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(route) = routes.get(method) {
            return Ok(Arc::clone(route));
        }

        let route = Arc::new(resolve_method(self.inner.metadata, method)?);
        routes.insert(method.to_string(), Arc::clone(&route));
        Ok(route)
    }

    /// Call `method` and decode the response into `R`.
    ///
    /// `args` holds one value per declared parameter. The result is `None`
    /// for non-2xx statuses and null bodies.
    ///
    /// # Errors
    ///
    /// Returns an error if the route cannot be resolved, the request cannot be
    /// built or sent, a response customizer fails, or the body does not decode
    /// into `R`.
    pub fn invoke<R>(&self, method: &str, args: Vec<ArgValue>) -> Result<Option<R>>
    where
        R: DeserializeOwned + 'static,
    {
        let response = self.send(method, args)?;
        map_response(&response, self.inner.serializer.as_ref())
    }

    /// Call `method`, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Same as [`invoke`](Self::invoke), minus decoding.
    pub fn invoke_unit(&self, method: &str, args: Vec<ArgValue>) -> Result<()> {
        self.send(method, args).map(drop)
    }

    /// Call `method` and return the raw response after customizers and
    /// observers ran.
    ///
    /// # Errors
    ///
    /// Same as [`invoke_unit`](Self::invoke_unit).
    pub fn send(&self, method: &str, args: Vec<ArgValue>) -> Result<RawResponse> {
        let route = self.route(method)?;
        let inner = &*self.inner;

        let mut request = synthesize(&route, args, inner.serializer.as_ref(), &inner.config)?;
        for customize in inner.customizers.request.iter() {
            customize(&mut request);
        }
        trace!(
            count = inner.customizers.request.len(),
            "applied request customizers"
        );

        debug!(
            controller = %route.controller,
            method = %route.method,
            verb = %request.method(),
            uri = %request.uri(),
            "dispatching controller call"
        );
        let response = inner.executor.execute(request)?;
        debug!(status = response.status().as_u16(), "received response");

        for check in inner.customizers.response.iter() {
            check(&response)?;
        }
        trace!(
            count = inner.customizers.response.len(),
            "applied response customizers"
        );

        for observe in inner.customizers.observers.iter() {
            observe(&response);
        }
        Ok(response)
    }
}

impl<C> Clone for ControllerClient<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _controller: PhantomData,
        }
    }
}

impl<C> fmt::Debug for ControllerClient<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerClient")
            .field("controller", &self.inner.metadata.name)
            .field("config", &self.inner.config)
            .field("request_customizers", &self.inner.customizers.request.len())
            .field("response_customizers", &self.inner.customizers.response.len())
            .field("observers", &self.inner.customizers.observers.len())
            .finish_non_exhaustive()
    }
}
