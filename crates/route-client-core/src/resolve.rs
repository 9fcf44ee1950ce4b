//! Route resolution: controller metadata → [`MethodRoute`].

use http::Method;

use crate::error::ResolveError;
use crate::metadata::{ArgShape, BindingAttr, ControllerMetadata, ParamMetadata};

/// How a call argument contributes to the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamBinding {
    /// Substituted into the `{name}` placeholder of the path template.
    PathVariable(String),
    /// Sent as a query parameter.
    QueryParam {
        /// Query key.
        name: String,
        /// Whether the handler requires the parameter.
        required: bool,
    },
    /// Encoded by the serializer and sent as the request body.
    Body,
    /// Sent as a multipart file part.
    FileAttachment(String),
    /// Read to completion and sent verbatim as the request body.
    RawStream,
    /// Not part of the request.
    Unbound,
}

/// Resolved route of one controller method.
///
/// Derived once per method and cached by the client: a method never changes
/// its route shape between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRoute {
    /// Controller name.
    pub controller: String,
    /// Method name.
    pub method: String,
    /// HTTP verb.
    pub verb: Method,
    /// Base path joined with the method path; may contain `{name}` placeholders.
    pub template: String,
    /// One binding per parameter, in declaration order.
    pub bindings: Vec<ParamBinding>,
    /// Whether any parameter is a file attachment.
    pub multipart: bool,
}

/// Resolve the route of `method` on `controller`.
///
/// The path template is the controller base path followed by the method path.
/// Bindings follow the parameter attributes, except for the type-driven cases:
/// readers always become [`ParamBinding::RawStream`], and files bound as query
/// parameters (or left unannotated) become [`ParamBinding::FileAttachment`].
///
/// # Errors
///
/// Returns [`ResolveError`] if the controller or the method carries no route
/// attribute, if the method is unknown, if the method does not declare exactly
/// one HTTP verb, or if more than one parameter is bound as the body.
///
/// # Examples
///
/// ```
/// use route_client_core::{
///     resolve_method, ArgShape, ControllerMetadata, MethodMetadata, ParamBinding, ParamMetadata,
///     RouteAttr,
/// };
///
/// let controller = ControllerMetadata::new("ExampleController")
///     .base_path("/example")
///     .method(
///         MethodMetadata::new("path_example")
///             .route(RouteAttr::get("/path/{message}"))
///             .param(ParamMetadata::path("message", ArgShape::Scalar)),
///     );
///
/// let route = resolve_method(&controller, "path_example").unwrap();
/// assert_eq!(route.template, "/example/path/{message}");
/// assert_eq!(route.bindings, vec![ParamBinding::PathVariable("message".into())]);
/// ```
pub fn resolve_method(
    controller: &ControllerMetadata,
    method: &str,
) -> Result<MethodRoute, ResolveError> {
    let Some(base) = controller.base_path_value() else {
        return Err(ResolveError::MissingControllerRoute {
            controller: controller.name.clone(),
        });
    };

    let Some(declared) = controller.find_method(method) else {
        return Err(ResolveError::UnknownMethod {
            controller: controller.name.clone(),
            method: method.to_string(),
        });
    };

    let Some(route) = &declared.route else {
        return Err(ResolveError::MissingMethodRoute {
            controller: controller.name.clone(),
            method: method.to_string(),
        });
    };

    let verb = match route.methods.as_slice() {
        [verb] => verb.clone(),
        [] => {
            return Err(ResolveError::MissingVerb {
                controller: controller.name.clone(),
                method: method.to_string(),
            })
        }
        verbs => {
            return Err(ResolveError::AmbiguousVerb {
                controller: controller.name.clone(),
                method: method.to_string(),
                verbs: verbs.iter().map(ToString::to_string).collect(),
            })
        }
    };

    let bodies: Vec<String> = declared
        .params
        .iter()
        .filter(|p| p.shape != ArgShape::Stream && p.attr == Some(BindingAttr::Body))
        .map(|p| p.name.clone())
        .collect();
    if bodies.len() > 1 {
        return Err(ResolveError::MultipleBodies {
            controller: controller.name.clone(),
            method: method.to_string(),
            params: bodies,
        });
    }

    let bindings: Vec<ParamBinding> = declared.params.iter().map(classify).collect();
    let multipart = declared.params.iter().any(|p| p.shape == ArgShape::File);
    let template = format!("{base}{}", route.path());

    tracing::debug!(
        controller = %controller.name,
        method,
        %verb,
        %template,
        multipart,
        "resolved route"
    );

    Ok(MethodRoute {
        controller: controller.name.clone(),
        method: method.to_string(),
        verb,
        template,
        bindings,
        multipart,
    })
}

fn classify(param: &ParamMetadata) -> ParamBinding {
    if param.shape == ArgShape::Stream {
        return ParamBinding::RawStream;
    }

    match &param.attr {
        Some(BindingAttr::Path { name }) => {
            ParamBinding::PathVariable(name.clone().unwrap_or_else(|| param.name.clone()))
        }
        Some(BindingAttr::Query { name, required }) => {
            let name = name.clone().unwrap_or_else(|| param.name.clone());
            if param.shape == ArgShape::File {
                ParamBinding::FileAttachment(name)
            } else {
                ParamBinding::QueryParam {
                    name,
                    required: *required,
                }
            }
        }
        Some(BindingAttr::Body) => ParamBinding::Body,
        None if param.shape == ArgShape::File => ParamBinding::FileAttachment(param.name.clone()),
        None => ParamBinding::Unbound,
    }
}
