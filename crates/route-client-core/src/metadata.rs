//! Declarative routing metadata for a controller surface.
//!
//! These types play the role of routing attributes: they are written once per
//! controller (by hand or by the `route-client` `controller!` macro) and read by
//! [`resolve_method`](crate::resolve_method).

use http::Method;

/// Type-level shape of a method parameter.
///
/// Binding classification relies on it for the cases that are driven by type
/// rather than by attribute: file attachments switch the whole request to
/// multipart, and readers become the raw request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgShape {
    /// A single value rendered as text (`String`, integers, `bool`, ...).
    Scalar,
    /// A collection whose elements are rendered as repeated values.
    Sequence,
    /// A structured value encoded by the serializer.
    Structured,
    /// A file (or collection of files) sent as a multipart part.
    File,
    /// A reader consumed to completion and sent as the raw body.
    Stream,
}

impl ArgShape {
    /// Shape of a collection whose elements have shape `element`.
    ///
    /// Collections of files stay [`ArgShape::File`]; everything else becomes
    /// [`ArgShape::Sequence`].
    #[must_use]
    pub const fn sequence_of(element: Self) -> Self {
        match element {
            Self::File => Self::File,
            _ => Self::Sequence,
        }
    }
}

/// Binding attribute placed on a method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingAttr {
    /// Bound to a `{name}` placeholder of the path template.
    Path {
        /// Placeholder name; defaults to the parameter name.
        name: Option<String>,
    },
    /// Bound to a query parameter.
    Query {
        /// Query key; defaults to the parameter name.
        name: Option<String>,
        /// Whether the handler requires the parameter.
        required: bool,
    },
    /// Bound to the request body.
    Body,
}

/// Metadata of one method parameter, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamMetadata {
    /// Parameter name as declared.
    pub name: String,
    /// Binding attribute, if any.
    pub attr: Option<BindingAttr>,
    /// Type shape of the parameter.
    pub shape: ArgShape,
}

impl ParamMetadata {
    /// Parameter without a binding attribute.
    #[must_use]
    pub fn unbound(name: &str, shape: ArgShape) -> Self {
        Self {
            name: name.to_string(),
            attr: None,
            shape,
        }
    }

    /// Path variable named after the parameter.
    #[must_use]
    pub fn path(name: &str, shape: ArgShape) -> Self {
        Self {
            name: name.to_string(),
            attr: Some(BindingAttr::Path { name: None }),
            shape,
        }
    }

    /// Required query parameter named after the parameter.
    #[must_use]
    pub fn query(name: &str, shape: ArgShape) -> Self {
        Self {
            name: name.to_string(),
            attr: Some(BindingAttr::Query {
                name: None,
                required: true,
            }),
            shape,
        }
    }

    /// Request body parameter.
    #[must_use]
    pub fn body(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attr: Some(BindingAttr::Body),
            shape: ArgShape::Structured,
        }
    }

    /// Override the placeholder or query key the parameter binds to.
    ///
    /// Has no effect on body or unbound parameters.
    #[must_use]
    pub fn rename(mut self, key: &str) -> Self {
        match &mut self.attr {
            Some(BindingAttr::Path { name } | BindingAttr::Query { name, .. }) => {
                *name = Some(key.to_string());
            }
            Some(BindingAttr::Body) | None => {}
        }
        self
    }

    /// Mark a query parameter as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        if let Some(BindingAttr::Query { required, .. }) = &mut self.attr {
            *required = false;
        }
        self
    }
}

/// Route attribute: HTTP verbs and path templates.
///
/// Only the first path is used. Exactly one verb is expected on a method;
/// anything else is rejected at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteAttr {
    /// Declared HTTP verbs.
    pub methods: Vec<Method>,
    /// Declared path templates.
    pub paths: Vec<String>,
}

impl RouteAttr {
    /// Route attribute from verbs and paths.
    #[must_use]
    pub fn new(methods: &[Method], paths: &[&str]) -> Self {
        Self {
            methods: methods.to_vec(),
            paths: paths.iter().map(ToString::to_string).collect(),
        }
    }

    /// Single-verb route attribute.
    #[must_use]
    pub fn verb(method: Method, path: &str) -> Self {
        Self::new(&[method], &[path])
    }

    /// `GET` route.
    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::verb(Method::GET, path)
    }

    /// `POST` route.
    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::verb(Method::POST, path)
    }

    /// `PUT` route.
    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::verb(Method::PUT, path)
    }

    /// `PATCH` route.
    #[must_use]
    pub fn patch(path: &str) -> Self {
        Self::verb(Method::PATCH, path)
    }

    /// `DELETE` route.
    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::verb(Method::DELETE, path)
    }

    /// First declared path, or `""` when none is declared.
    #[must_use]
    pub fn path(&self) -> &str {
        self.paths.first().map_or("", String::as_str)
    }
}

/// Metadata of one controller method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMetadata {
    /// Method name.
    pub name: String,
    /// Route attribute, if any.
    pub route: Option<RouteAttr>,
    /// Parameters in declaration order.
    pub params: Vec<ParamMetadata>,
}

impl MethodMetadata {
    /// Method without route attribute and without parameters.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            route: None,
            params: Vec::new(),
        }
    }

    /// Set the route attribute.
    #[must_use]
    pub fn route(mut self, route: RouteAttr) -> Self {
        self.route = Some(route);
        self
    }

    /// Append a parameter.
    #[must_use]
    pub fn param(mut self, param: ParamMetadata) -> Self {
        self.params.push(param);
        self
    }
}

/// Metadata of a controller: the target surface a client stands in for.
///
/// # Examples
///
/// ```
/// use route_client_core::{ArgShape, ControllerMetadata, MethodMetadata, ParamMetadata, RouteAttr};
///
/// let controller = ControllerMetadata::new("ExampleController")
///     .base_path("/example")
///     .method(
///         MethodMetadata::new("path_example")
///             .route(RouteAttr::get("/path/{message}"))
///             .param(ParamMetadata::path("message", ArgShape::Scalar)),
///     );
///
/// assert_eq!(controller.base_path_value(), Some("/example"));
/// assert!(controller.find_method("path_example").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerMetadata {
    /// Controller name, used in diagnostics.
    pub name: String,
    /// Base paths from the controller's route attribute; `None` when absent.
    pub base_paths: Option<Vec<String>>,
    /// Declared methods.
    pub methods: Vec<MethodMetadata>,
}

impl ControllerMetadata {
    /// Controller without route attribute and without methods.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            base_paths: None,
            methods: Vec::new(),
        }
    }

    /// Set the controller route attribute to a single base path.
    #[must_use]
    pub fn base_path(self, path: &str) -> Self {
        self.base_paths(&[path])
    }

    /// Set the controller route attribute. Only the first path is used.
    #[must_use]
    pub fn base_paths(mut self, paths: &[&str]) -> Self {
        self.base_paths = Some(paths.iter().map(ToString::to_string).collect());
        self
    }

    /// Append a method.
    #[must_use]
    pub fn method(mut self, method: MethodMetadata) -> Self {
        self.methods.push(method);
        self
    }

    /// Base path used for every route, `None` when the controller has no
    /// route attribute. An attribute with no path yields `""`.
    #[must_use]
    pub fn base_path_value(&self) -> Option<&str> {
        self.base_paths
            .as_ref()
            .map(|paths| paths.first().map_or("", String::as_str))
    }

    /// Look up a method by name.
    #[must_use]
    pub fn find_method(&self, name: &str) -> Option<&MethodMetadata> {
        self.methods.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sequence_of_files_stays_file() {
        assert_eq!(ArgShape::sequence_of(ArgShape::File), ArgShape::File);
        assert_eq!(ArgShape::sequence_of(ArgShape::Scalar), ArgShape::Sequence);
        assert_eq!(ArgShape::sequence_of(ArgShape::Sequence), ArgShape::Sequence);
    }

    #[test]
    fn rename_applies_to_path_and_query_only() {
        let path = ParamMetadata::path("id", ArgShape::Scalar).rename("item_id");
        assert_eq!(
            path.attr,
            Some(BindingAttr::Path {
                name: Some("item_id".to_string())
            })
        );

        let body = ParamMetadata::body("request").rename("ignored");
        assert_eq!(body.attr, Some(BindingAttr::Body));
    }

    #[test]
    fn optional_clears_required_flag() {
        let param = ParamMetadata::query("page", ArgShape::Scalar).optional();
        assert_eq!(
            param.attr,
            Some(BindingAttr::Query {
                name: None,
                required: false
            })
        );
    }

    #[test]
    fn base_path_value_defaults_to_empty() {
        let none = ControllerMetadata::new("A");
        assert_eq!(none.base_path_value(), None);

        let empty = ControllerMetadata::new("B").base_paths(&[]);
        assert_eq!(empty.base_path_value(), Some(""));

        let first = ControllerMetadata::new("C").base_paths(&["/one", "/two"]);
        assert_eq!(first.base_path_value(), Some("/one"));
    }

    #[test]
    fn route_attr_path_defaults_to_empty() {
        assert_eq!(RouteAttr::new(&[Method::GET], &[]).path(), "");
        assert_eq!(RouteAttr::post("/body").path(), "/body");
    }
}
