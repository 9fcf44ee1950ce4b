//! Fluent configuration of controller clients.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::client::{Controller, ControllerClient};
use crate::error::AssertionFailure;
use crate::expect;
use crate::factory::ClientFactory;
use crate::request::RequestDescriptor;
use crate::response::RawResponse;

/// Mutates a request before it is sent.
pub type RequestCustomizer = Arc<dyn Fn(&mut RequestDescriptor) + Send + Sync>;

/// Checks a response; a failure aborts the call.
pub type ResponseCustomizer =
    Arc<dyn Fn(&RawResponse) -> Result<(), AssertionFailure> + Send + Sync>;

/// Observes a response; cannot alter the result.
pub type ResponseObserver = Arc<dyn Fn(&RawResponse) + Send + Sync>;

/// Immutable customizer lists shared by one built client.
#[derive(Clone)]
pub(crate) struct Customizers {
    pub(crate) request: Arc<[RequestCustomizer]>,
    pub(crate) response: Arc<[ResponseCustomizer]>,
    pub(crate) observers: Arc<[ResponseObserver]>,
}

/// Accumulates customizers for clients of controller `C`.
///
/// Every [`build`](Self::build) takes a snapshot of the lists registered so
/// far; customizers added afterwards never reach clients that were already
/// built.
///
/// # Examples
///
/// ```
/// use route_client::{controller, ClientFactory, RawResponse, RequestDescriptor};
/// use route_client::http::StatusCode;
///
/// controller! {
///     #[route("/health")]
///     pub struct HealthController;
///     pub trait HealthApi {
///         #[get]
///         fn health() -> String;
///     }
/// }
///
/// let factory = ClientFactory::new(|_: RequestDescriptor| -> route_client::Result<RawResponse> {
///     Ok(RawResponse::new(StatusCode::OK).with_body("up"))
/// });
///
/// let client = factory
///     .builder::<HealthController>()
///     .expect_status(200)
///     .build();
/// assert_eq!(client.health().unwrap().as_deref(), Some("up"));
/// ```
pub struct ClientBuilder<C> {
    factory: ClientFactory,
    request_customizers: Vec<RequestCustomizer>,
    response_customizers: Vec<ResponseCustomizer>,
    observers: Vec<ResponseObserver>,
    _controller: PhantomData<fn() -> C>,
}

impl<C: Controller> ClientBuilder<C> {
    pub(crate) fn new(factory: ClientFactory) -> Self {
        Self {
            factory,
            request_customizers: Vec::new(),
            response_customizers: Vec::new(),
            observers: Vec::new(),
            _controller: PhantomData,
        }
    }

    /// Register a request customizer; customizers run in registration order.
    #[must_use]
    pub fn customize_request<F>(mut self, customizer: F) -> Self
    where
        F: Fn(&mut RequestDescriptor) + Send + Sync + 'static,
    {
        self.request_customizers.push(Arc::new(customizer));
        self
    }

    /// Register a response customizer; the first failure aborts the call.
    #[must_use]
    pub fn customize_response<F>(mut self, customizer: F) -> Self
    where
        F: Fn(&RawResponse) -> Result<(), AssertionFailure> + Send + Sync + 'static,
    {
        self.response_customizers.push(Arc::new(customizer));
        self
    }

    /// Register a response observer, run after every response customizer
    /// passed.
    #[must_use]
    pub fn observe_response<F>(mut self, observer: F) -> Self
    where
        F: Fn(&RawResponse) + Send + Sync + 'static,
    {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Expect every response to carry `status`.
    #[must_use]
    pub fn expect_status(self, status: u16) -> Self {
        self.customize_response(expect::status(status))
    }

    /// Build a client bound to a snapshot of the current customizers.
    #[must_use]
    pub fn build(&self) -> ControllerClient<C> {
        let customizers = Customizers {
            request: self.request_customizers.iter().cloned().collect(),
            response: self.response_customizers.iter().cloned().collect(),
            observers: self.observers.iter().cloned().collect(),
        };
        ControllerClient::new(&self.factory, customizers)
    }

    /// Shorthand for `expect_status(status)` followed by `build()`.
    #[must_use]
    pub fn with_expected_status(self, status: u16) -> ControllerClient<C> {
        self.expect_status(status).build()
    }
}

impl<C> Clone for ClientBuilder<C> {
    fn clone(&self) -> Self {
        Self {
            factory: self.factory.clone(),
            request_customizers: self.request_customizers.clone(),
            response_customizers: self.response_customizers.clone(),
            observers: self.observers.clone(),
            _controller: PhantomData,
        }
    }
}

impl<C> fmt::Debug for ClientBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("controller", &std::any::type_name::<C>())
            .field("request_customizers", &self.request_customizers.len())
            .field("response_customizers", &self.response_customizers.len())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
