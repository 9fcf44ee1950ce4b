//! Client-wide request settings.

use http::{HeaderMap, HeaderName, HeaderValue};

/// Settings applied to every request built by a [`ClientFactory`](crate::ClientFactory).
///
/// # Examples
///
/// ```
/// use route_client::ClientConfig;
/// use route_client::http::{header, HeaderValue};
///
/// let config = ClientConfig::new()
///     .context_path("/api")
///     .default_header(header::ACCEPT, HeaderValue::from_static("application/json"));
///
/// assert_eq!(config.context_path_value(), "/api");
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Prefix prepended to every route template (default: empty).
    pub(crate) context_path: String,

    /// Headers inserted into every request before request customizers run.
    pub(crate) default_headers: HeaderMap,

    /// Content type attached to raw stream bodies (default: `text/plain`).
    pub(crate) stream_content_type: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            context_path: String::new(),
            default_headers: HeaderMap::new(),
            stream_content_type: "text/plain".to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new config with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prefix prepended to every route template.
    #[must_use]
    pub fn context_path(mut self, path: &str) -> Self {
        self.context_path = path.to_string();
        self
    }

    /// Add a header sent with every request.
    ///
    /// Repeated calls with the same name add repeated values.
    #[must_use]
    pub fn default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.default_headers.append(name, value);
        self
    }

    /// Set the content type attached to raw stream bodies.
    #[must_use]
    pub fn stream_content_type(mut self, content_type: &str) -> Self {
        self.stream_content_type = content_type.to_string();
        self
    }

    /// The configured context path.
    #[must_use]
    pub fn context_path_value(&self) -> &str {
        &self.context_path
    }

    /// The configured default headers.
    #[must_use]
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }
}
