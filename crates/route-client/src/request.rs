//! Request descriptor and the synthesizer that builds it from a call.

use std::collections::HashSet;
use std::io::Read;

use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use route_client_core::{expand_template, MethodRoute, ParamBinding};
use tracing::{trace, warn};

use crate::args::{ArgValue, MultipartFile};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::multipart;
use crate::serializer::Serializer;

/// An encoded request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    content_type: String,
    bytes: Vec<u8>,
}

impl RequestBody {
    /// Body of `bytes` sent with `content_type`.
    #[must_use]
    pub fn new(content_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Content type of the body.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Encoded bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// An HTTP request before it reaches the executor.
///
/// Built by the client for every call, then handed to each request customizer
/// in registration order; customizers may change anything.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Option<RequestBody>,
    files: Vec<MultipartFile>,
    multipart: bool,
}

impl RequestDescriptor {
    /// Empty request for `method` on `path`.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            files: Vec::new(),
            multipart: false,
        }
    }

    /// HTTP verb.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Replace the HTTP verb.
    pub fn set_method(&mut self, method: Method) -> &mut Self {
        self.method = method;
        self
    }

    /// Expanded path, without query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Replace the path.
    pub fn set_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.path = path.into();
        self
    }

    /// Query entries in insertion order; keys may repeat.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// All values of the query key `key`, in order.
    #[must_use]
    pub fn query_values(&self, key: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Append a query entry.
    pub fn add_query(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Remove every entry of the query key `key`.
    pub fn remove_query(&mut self, key: &str) -> &mut Self {
        self.query.retain(|(k, _)| k != key);
        self
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable request headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Append a header value.
    pub fn header(&mut self, name: HeaderName, value: HeaderValue) -> &mut Self {
        self.headers.append(name, value);
        self
    }

    /// Encoded body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    /// Replace the body.
    pub fn set_body(&mut self, body: RequestBody) -> &mut Self {
        self.body = Some(body);
        self
    }

    /// Drop the body.
    pub fn clear_body(&mut self) -> &mut Self {
        self.body = None;
        self
    }

    /// File attachments, in argument order.
    #[must_use]
    pub fn files(&self) -> &[MultipartFile] {
        &self.files
    }

    /// Attach a file; the request becomes multipart.
    pub fn add_file(&mut self, file: MultipartFile) -> &mut Self {
        self.files.push(file);
        self.multipart = true;
        self
    }

    /// Whether the request is sent as `multipart/form-data`.
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        self.multipart
    }

    /// Request target: the percent-encoded path followed by the query string.
    ///
    /// Each path segment is encoded on its own, so `/` keeps its meaning. An
    /// absolute URL keeps its scheme and authority untouched.
    ///
    /// ```
    /// use route_client::RequestDescriptor;
    /// use route_client::http::Method;
    ///
    /// let mut request = RequestDescriptor::new(Method::GET, "/example/path/hello world");
    /// request.add_query("names", "a b").add_query("names", "c");
    /// assert_eq!(request.uri(), "/example/path/hello%20world?names=a%20b&names=c");
    /// ```
    #[must_use]
    pub fn uri(&self) -> String {
        let mut uri = encode_path(&self.path);
        if uri.is_empty() {
            uri.push('/');
        }
        if !self.query.is_empty() {
            let pairs: Vec<String> = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect();
            uri.push('?');
            uri.push_str(&pairs.join("&"));
        }
        uri
    }

    /// Convert into an [`http::Request`] with a fully encoded body.
    ///
    /// Multipart requests carry only their file parts; a plain body set on a
    /// multipart request is dropped. Otherwise the body's content type is sent
    /// unless a `Content-Type` header is already present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the target or a header value is invalid.
    pub fn into_http_request(self) -> Result<http::Request<Vec<u8>>> {
        let uri = self.uri();
        let mut headers = self.headers;

        let bytes = if self.multipart {
            if self.body.is_some() {
                warn!(uri = %uri, "multipart request drops its plain body");
            }
            let boundary = multipart::boundary();
            let content_type = HeaderValue::from_str(&multipart::content_type(&boundary))
                .map_err(http::Error::from)?;
            headers.insert(CONTENT_TYPE, content_type);
            multipart::encode(&self.files, &boundary)
        } else {
            match self.body {
                Some(body) => {
                    if !headers.contains_key(CONTENT_TYPE) {
                        let content_type =
                            HeaderValue::from_str(&body.content_type).map_err(http::Error::from)?;
                        headers.insert(CONTENT_TYPE, content_type);
                    }
                    body.bytes
                }
                None => Vec::new(),
            }
        };

        let mut request = http::Request::builder()
            .method(self.method)
            .uri(uri)
            .body(bytes)?;
        *request.headers_mut() = headers;
        Ok(request)
    }
}

fn encode_path(path: &str) -> String {
    let (origin, rest) = match path.find("://") {
        Some(scheme_end) => {
            let authority_start = scheme_end + 3;
            let split = path[authority_start..]
                .find('/')
                .map_or(path.len(), |i| authority_start + i);
            path.split_at(split)
        }
        None => ("", path),
    };

    let encoded: Vec<_> = rest.split('/').map(urlencoding::encode).collect();
    format!("{origin}{}", encoded.join("/"))
}

/// Build the request for one call of a resolved method.
///
/// `args` holds one value per binding, in declaration order.
pub(crate) fn synthesize(
    route: &MethodRoute,
    args: Vec<ArgValue>,
    serializer: &dyn Serializer,
    config: &ClientConfig,
) -> Result<RequestDescriptor> {
    if args.len() != route.bindings.len() {
        return Err(Error::Configuration(format!(
            "{}#{} takes {} arguments but {} were given",
            route.controller,
            route.method,
            route.bindings.len(),
            args.len()
        )));
    }

    let mut vars = Vec::new();
    let mut query = Vec::new();
    let mut seen = HashSet::new();
    let mut files = Vec::new();
    let mut body = None;
    let mut stream = None;

    for (binding, arg) in route.bindings.iter().zip(args) {
        match binding {
            ParamBinding::PathVariable(name) => match arg.into_text() {
                Some(value) => vars.push((name.clone(), value)),
                None => {
                    return Err(Error::MissingPathVariable {
                        variable: name.clone(),
                        controller: route.controller.clone(),
                        method: route.method.clone(),
                    })
                }
            },
            ParamBinding::QueryParam { name, .. } => {
                // First occurrence of a key wins.
                if arg.is_null() || !seen.insert(name.clone()) {
                    continue;
                }
                push_query(&mut query, name, arg);
            }
            ParamBinding::FileAttachment(name) => {
                if arg.is_null() || !seen.insert(name.clone()) {
                    continue;
                }
                collect_files(&mut files, name, arg);
            }
            ParamBinding::Body => {
                if !arg.is_null() {
                    body = Some(arg);
                }
            }
            ParamBinding::RawStream => {
                if let ArgValue::Stream(mut reader) = arg {
                    let mut bytes = Vec::new();
                    reader.read_to_end(&mut bytes)?;
                    stream = Some(bytes);
                }
            }
            ParamBinding::Unbound => {}
        }
    }

    let template = format!("{}{}", config.context_path, route.template);
    let mut request = RequestDescriptor::new(route.verb.clone(), expand_template(&template, &vars));
    request.headers = config.default_headers.clone();
    request.query = query;
    request.files = files;
    request.multipart = route.multipart;

    if let Some(value) = body {
        let value = match value {
            ArgValue::Json(value) => value,
            other => serde_json::Value::String(other.into_text().unwrap_or_default()),
        };
        let bytes = serializer.encode(&value).map_err(Error::Encode)?;
        request.body = Some(RequestBody::new(serializer.content_type(), bytes));
    }
    if let Some(bytes) = stream {
        request.body = Some(RequestBody::new(config.stream_content_type.clone(), bytes));
    }

    trace!(
        method = %request.method,
        path = %request.path,
        query = request.query.len(),
        files = request.files.len(),
        "synthesized request"
    );
    Ok(request)
}

fn push_query(query: &mut Vec<(String, String)>, name: &str, arg: ArgValue) {
    match arg {
        ArgValue::List(items) => {
            for item in items {
                query.push((name.to_string(), item.into_text().unwrap_or_default()));
            }
        }
        other => {
            if let Some(value) = other.into_text() {
                query.push((name.to_string(), value));
            }
        }
    }
}

fn collect_files(files: &mut Vec<MultipartFile>, name: &str, arg: ArgValue) {
    match arg {
        ArgValue::File(file) => files.push(file.or_named(name)),
        ArgValue::List(items) => {
            for item in items {
                collect_files(files, name, item);
            }
        }
        _ => {}
    }
}
