//! Route resolution errors.

/// Error returned by [`resolve_method`](crate::resolve_method) when the routing
/// metadata of a controller method is missing or contradictory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// The controller carries no `route` attribute, so there is no base path.
    #[error("controller '{controller}' has no routing attribute")]
    MissingControllerRoute {
        /// Controller name.
        controller: String,
    },

    /// The method is not part of the controller's declared surface.
    #[error("method '{controller}#{method}' is not declared")]
    UnknownMethod {
        /// Controller name.
        controller: String,
        /// Method name.
        method: String,
    },

    /// The method carries no route attribute.
    #[error("method '{controller}#{method}' has no routing attribute")]
    MissingMethodRoute {
        /// Controller name.
        controller: String,
        /// Method name.
        method: String,
    },

    /// The route attribute names no HTTP verb.
    #[error("method '{controller}#{method}' declares no HTTP verb")]
    MissingVerb {
        /// Controller name.
        controller: String,
        /// Method name.
        method: String,
    },

    /// The route attribute names several HTTP verbs where exactly one is expected.
    #[error(
        "method '{controller}#{method}' declares ambiguous HTTP verbs {verbs:?}; \
         exactly one is expected"
    )]
    AmbiguousVerb {
        /// Controller name.
        controller: String,
        /// Method name.
        method: String,
        /// All declared verbs.
        verbs: Vec<String>,
    },

    /// More than one parameter is bound as the request body.
    #[error("method '{controller}#{method}' binds more than one request body: {params:?}")]
    MultipleBodies {
        /// Controller name.
        controller: String,
        /// Method name.
        method: String,
        /// Names of the body-bound parameters.
        params: Vec<String>,
    },
}
