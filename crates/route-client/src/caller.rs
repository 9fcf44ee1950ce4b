//! Single-use caller: one action, one set of expectations.

use std::fmt;

use crate::builder::ClientBuilder;
use crate::client::{Controller, ControllerClient};
use crate::error::{AssertionFailure, Error, Result};
use crate::request::RequestDescriptor;
use crate::response::RawResponse;

type Action<C, R> = Box<dyn FnOnce(&ControllerClient<C>) -> Result<Option<R>>>;
type Consumer<C> = Box<dyn FnOnce(&ControllerClient<C>) -> Result<()>>;

/// Runs exactly one action against a freshly built client.
///
/// The action is either a value-producing function ([`when`](Self::when)) or
/// a consumer ([`when_consume`](Self::when_consume)); registering one after
/// the other is a configuration error raised immediately. Expectations
/// accumulate on the caller, so a caller is consumed by
/// [`execute`](Self::execute).
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
///     Ok(RawResponse::new(StatusCode::SERVICE_UNAVAILABLE))
/// });
///
/// let result = factory
///     .caller::<HealthController>()
///     .when(|client| client.health())
///     .unwrap()
///     .then_status(503)
///     .execute()
///     .unwrap();
/// assert_eq!(result, None);
/// ```
pub struct ClientCaller<C, R = ()> {
    builder: ClientBuilder<C>,
    action: Option<Action<C, R>>,
    consumer: Option<Consumer<C>>,
}

impl<C: Controller> ClientCaller<C> {
    pub(crate) fn new(builder: ClientBuilder<C>) -> Self {
        Self {
            builder,
            action: None,
            consumer: None,
        }
    }
}

impl<C: Controller, R> ClientCaller<C, R> {
    /// Select a value-producing action, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a consumer is already registered.
    pub fn when<T, F>(self, action: F) -> Result<ClientCaller<C, T>>
    where
        F: FnOnce(&ControllerClient<C>) -> Result<Option<T>> + 'static,
    {
        if self.consumer.is_some() {
            return Err(Error::Configuration(
                "caller already has a consumer; register either a function or a consumer"
                    .to_string(),
            ));
        }
        Ok(ClientCaller {
            builder: self.builder,
            action: Some(Box::new(action)),
            consumer: None,
        })
    }

    /// Select a consuming action, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a function is already registered.
    pub fn when_consume<F>(mut self, consumer: F) -> Result<Self>
    where
        F: FnOnce(&ControllerClient<C>) -> Result<()> + 'static,
    {
        if self.action.is_some() {
            return Err(Error::Configuration(
                "caller already has a function; register either a function or a consumer"
                    .to_string(),
            ));
        }
        self.consumer = Some(Box::new(consumer));
        Ok(self)
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
    pub fn then<F>(mut self, check: F) -> Self
    where
        F: Fn(&RawResponse) -> std::result::Result<(), AssertionFailure> + Send + Sync + 'static,
    {
        self.builder = self.builder.customize_response(check);
        self
    }

    /// Expect the response status to equal `status`.
    #[must_use]
    pub fn then_status(mut self, status: u16) -> Self {
        self.builder = self.builder.expect_status(status);
        self
    }

    /// Build a client and run the selected action.
    ///
    /// Returns the function's result, or `None` for a consumer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if no action was selected, or any
    /// error raised by the call, including failed expectations.
    pub fn execute(self) -> Result<Option<R>> {
        let client = self.builder.build();
        match (self.action, self.consumer) {
            (Some(action), _) => action(&client),
            (None, Some(consumer)) => consumer(&client).map(|()| None),
            (None, None) => Err(Error::Configuration(
                "caller has no action; call `when` or `when_consume` first".to_string(),
            )),
        }
    }
}

impl<C, R> fmt::Debug for ClientCaller<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCaller")
            .field("builder", &self.builder)
            .field("has_function", &self.action.is_some())
            .field("has_consumer", &self.consumer.is_some())
            .finish()
    }
}
