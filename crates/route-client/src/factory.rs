//! Entry point: shared executor, serializer and config for every client.

use std::fmt;
use std::sync::Arc;

use crate::builder::ClientBuilder;
use crate::caller::ClientCaller;
use crate::client::{Controller, ControllerClient};
use crate::config::ClientConfig;
use crate::executor::RequestExecutor;
use crate::expect;
use crate::responding::RespondingClient;
use crate::serializer::{JsonSerializer, Serializer};

/// Reusable customization applied to client builders.
///
/// Lets a test suite share one setup (authentication headers, expected
/// statuses) across controllers:
///
/// ```
/// use route_client::{ClientBuilder, ClientCustomizer, Controller};
/// use route_client::http::{header, HeaderValue};
///
/// struct BearerAuth(&'static str);
///
/// impl ClientCustomizer for BearerAuth {
///     fn customize<C: Controller>(&self, builder: ClientBuilder<C>) -> ClientBuilder<C> {
///         let value = HeaderValue::from_str(&format!("Bearer {}", self.0)).unwrap();
///         builder.customize_request(move |request| {
///             request.header(header::AUTHORIZATION, value.clone());
///         })
///     }
/// }
/// ```
pub trait ClientCustomizer {
    /// Customize `builder`.
    fn customize<C: Controller>(&self, builder: ClientBuilder<C>) -> ClientBuilder<C>;
}

/// Creates builders, clients, callers and responding clients.
///
/// Cloning is cheap; clones share the executor, serializer and config.
#[derive(Clone)]
pub struct ClientFactory {
    pub(crate) executor: Arc<dyn RequestExecutor>,
    pub(crate) serializer: Arc<dyn Serializer>,
    pub(crate) config: Arc<ClientConfig>,
}

impl ClientFactory {
    /// Factory sending every request through `executor`, with the JSON
    /// serializer and the default config.
    #[must_use]
    pub fn new(executor: impl RequestExecutor + 'static) -> Self {
        Self {
            executor: Arc::new(executor),
            serializer: Arc::new(JsonSerializer),
            config: Arc::new(ClientConfig::default()),
        }
    }

    /// Factory dispatching in-process through `router`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the executor runtime cannot
    /// be created.
    #[cfg(feature = "axum")]
    pub fn for_router(router: axum::Router) -> crate::Result<Self> {
        Ok(Self::new(crate::router::RouterExecutor::new(router)?))
    }

    /// Replace the body serializer.
    #[must_use]
    pub fn with_serializer(mut self, serializer: impl Serializer + 'static) -> Self {
        self.serializer = Arc::new(serializer);
        self
    }

    /// Replace the client config.
    #[must_use]
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// The client config.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builder for clients of `C` with no customizers.
    #[must_use]
    pub fn builder<C: Controller>(&self) -> ClientBuilder<C> {
        ClientBuilder::new(self.clone())
    }

    /// Client of `C` expecting a 2xx status on every call.
    #[must_use]
    pub fn create<C: Controller>(&self) -> ControllerClient<C> {
        self.builder::<C>()
            .customize_response(expect::success())
            .build()
    }

    /// Builder for clients of `C`, prepared by `customizer`.
    #[must_use]
    pub fn customized<C, K>(&self, customizer: &K) -> ClientBuilder<C>
    where
        C: Controller,
        K: ClientCustomizer,
    {
        customizer.customize(self.builder::<C>())
    }

    /// Single-use caller for one action against `C`.
    #[must_use]
    pub fn caller<C: Controller>(&self) -> ClientCaller<C> {
        ClientCaller::new(self.builder())
    }

    /// Client capturing response metadata alongside decoded payloads.
    #[must_use]
    pub fn responding_client<C: Controller>(&self) -> RespondingClient<C> {
        RespondingClient::new(self.builder())
    }
}

impl fmt::Debug for ClientFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientFactory")
            .field("content_type", &self.serializer.content_type())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
