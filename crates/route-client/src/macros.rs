//! Declarative controller definitions.

/// Declare a controller and its typed client API.
///
/// Expands to:
///
/// - a unit struct `$name` implementing [`Controller`](crate::Controller),
///   whose metadata is built once from the attributes;
/// - a trait `$api` with one method per declared route;
/// - an implementation of `$api` for [`ControllerClient<$name>`](crate::ControllerClient).
///
/// Controller attribute: `#[route]` or `#[route("/base")]`. A controller
/// without it can be declared, but every call fails with a route resolution
/// error.
///
/// Method attributes: `#[get]`, `#[post]`, `#[put]`, `#[patch]`,
/// `#[delete]`, `#[head]`, `#[options]` (each with an optional path, e.g.
/// `#[get("/items/{id}")]`) and
/// `#[request(methods = [GET, POST], path = "/x")]`.
///
/// Parameter attributes: `#[path]`, `#[path("name")]`, `#[query]`,
/// `#[query("name")]`, `#[query(optional)]`, `#[query("name", optional)]`
/// and `#[body]`. Unannotated readers become the raw request body and
/// unannotated [`MultipartFile`](crate::MultipartFile)s become file parts;
/// any other unannotated parameter is not sent.
///
/// Methods without a return type return `Result<()>`; methods returning `T`
/// return `Result<Option<T>>`, where `None` stands for a non-2xx status or a
/// null body.
///
/// # Examples
///
/// ```
/// use route_client::controller;
///
/// #[derive(serde::Serialize)]
/// pub struct NewItem {
///     pub name: String,
/// }
///
/// #[derive(serde::Deserialize)]
/// pub struct Item {
///     pub id: u64,
///     pub name: String,
/// }
///
/// controller! {
///     /// Item endpoints.
///     #[route("/items")]
///     pub struct ItemController;
///
///     pub trait ItemApi {
///         /// Fetch one item.
///         #[get("/{id}")]
///         fn get_item(#[path] id: u64) -> Item;
///
///         #[get]
///         fn search(#[query("q")] term: Option<String>, #[query] tags: Vec<String>) -> Vec<Item>;
///
///         #[post]
///         fn create(#[body] item: NewItem) -> Item;
///
///         #[delete("/{id}")]
///         fn delete(#[path] id: u64);
///     }
/// }
///
/// use route_client::Controller;
/// let metadata = ItemController::metadata();
/// assert_eq!(metadata.base_path_value(), Some("/items"));
/// assert_eq!(metadata.methods.len(), 4);
/// ```
#[macro_export]
macro_rules! controller {
    (
        $(#[$($sattr:tt)*])*
        pub struct $name:ident;

        $(#[$($tattr:tt)*])*
        pub trait $api:ident {
            $(
                $(#[$($mattr:tt)*])*
                fn $method:ident (
                    $( $(#[$($bind:tt)*])? $arg:ident : $ty:ty ),* $(,)?
                ) $(-> $ret:ty)? ;
            )*
        }
    ) => {
        $crate::__documented!([] [$([$($sattr)*])*] {
            #[derive(Debug, Clone, Copy, Default)]
            pub struct $name;
        });

        impl $crate::Controller for $name {
            fn metadata() -> &'static $crate::ControllerMetadata {
                static METADATA: ::std::sync::OnceLock<$crate::ControllerMetadata> =
                    ::std::sync::OnceLock::new();
                METADATA.get_or_init(|| $crate::ControllerMetadata {
                    name: ::std::string::String::from(::core::stringify!($name)),
                    base_paths: $crate::__controller_route!($([$($sattr)*])*),
                    methods: ::std::vec![
                        $(
                            $crate::MethodMetadata {
                                name: ::std::string::String::from(::core::stringify!($method)),
                                route: $crate::__method_route!($([$($mattr)*])*),
                                params: ::std::vec![
                                    $( $crate::__param_metadata!([$($($bind)*)?] $arg : $ty) ),*
                                ],
                            }
                        ),*
                    ],
                })
            }
        }

        $crate::__documented!([] [$([$($tattr)*])*] {
            pub trait $api {
                $(
                    $crate::__documented!([] [$([$($mattr)*])*] {
                        fn $method(&self $(, $arg: $ty)*) -> $crate::__return_type!($($ret)?);
                    });
                )*
            }
        });

        impl $api for $crate::ControllerClient<$name> {
            $(
                fn $method(&self $(, $arg: $ty)*) -> $crate::__return_type!($($ret)?) {
                    let args: ::std::vec::Vec<$crate::ArgValue> = ::std::vec![
                        $( $crate::__arg_value!([$($($bind)*)?] $arg) ),*
                    ];
                    $crate::__invoke!(self, ::core::stringify!($method), args $(, $ret)?)
                }
            )*
        }
    };
}

/// Emit an item with only the `doc` attributes of an attribute list.
#[doc(hidden)]
#[macro_export]
macro_rules! __documented {
    ([$($docs:tt)*] [] { $($item:tt)* }) => {
        $($docs)* $($item)*
    };
    ([$($docs:tt)*] [[doc = $doc:literal] $($rest:tt)*] $item:tt) => {
        $crate::__documented!([$($docs)* #[doc = $doc]] [$($rest)*] $item);
    };
    ([$($docs:tt)*] [$other:tt $($rest:tt)*] $item:tt) => {
        $crate::__documented!([$($docs)*] [$($rest)*] $item);
    };
}

/// Controller base paths from the struct's attribute list.
#[doc(hidden)]
#[macro_export]
macro_rules! __controller_route {
    () => {
        ::core::option::Option::None
    };
    ([doc = $doc:literal] $($rest:tt)*) => {
        $crate::__controller_route!($($rest)*)
    };
    ([route] $($rest:tt)*) => {
        ::core::option::Option::Some(::std::vec::Vec::new())
    };
    ([route($($base:literal),* $(,)?)] $($rest:tt)*) => {
        ::core::option::Option::Some(::std::vec![$(::std::string::String::from($base)),*])
    };
    ([$($other:tt)*] $($rest:tt)*) => {
        ::core::compile_error!(::core::concat!(
            "unsupported controller attribute: #[",
            ::core::stringify!($($other)*),
            "]"
        ))
    };
}

/// Method route from the method's attribute list.
#[doc(hidden)]
#[macro_export]
macro_rules! __method_route {
    () => {
        ::core::option::Option::None
    };
    ([doc = $doc:literal] $($rest:tt)*) => {
        $crate::__method_route!($($rest)*)
    };
    ([$($attr:tt)*] $($rest:tt)*) => {
        ::core::option::Option::Some($crate::__route_attr!($($attr)*))
    };
}

/// One routing attribute → `RouteAttr`.
#[doc(hidden)]
#[macro_export]
macro_rules! __route_attr {
    (get $(($path:literal))?) => { $crate::__route_attr!(@verb GET $($path)?) };
    (post $(($path:literal))?) => { $crate::__route_attr!(@verb POST $($path)?) };
    (put $(($path:literal))?) => { $crate::__route_attr!(@verb PUT $($path)?) };
    (patch $(($path:literal))?) => { $crate::__route_attr!(@verb PATCH $($path)?) };
    (delete $(($path:literal))?) => { $crate::__route_attr!(@verb DELETE $($path)?) };
    (head $(($path:literal))?) => { $crate::__route_attr!(@verb HEAD $($path)?) };
    (options $(($path:literal))?) => { $crate::__route_attr!(@verb OPTIONS $($path)?) };
    (request(methods = [$($verb:ident),* $(,)?] $(, path = $path:literal)? $(,)?)) => {
        $crate::RouteAttr::new(&[$($crate::http::Method::$verb),*], &[$($path)?])
    };
    (request(path = $path:literal $(, methods = [$($verb:ident),* $(,)?])? $(,)?)) => {
        $crate::RouteAttr::new(&[$($($crate::http::Method::$verb),*)?], &[$path])
    };
    (@verb $verb:ident) => {
        $crate::RouteAttr::new(&[$crate::http::Method::$verb], &[])
    };
    (@verb $verb:ident $path:literal) => {
        $crate::RouteAttr::new(&[$crate::http::Method::$verb], &[$path])
    };
    ($($other:tt)*) => {
        ::core::compile_error!(::core::concat!(
            "unsupported routing attribute: #[",
            ::core::stringify!($($other)*),
            "]"
        ))
    };
}

/// Parameter attribute → `ParamMetadata`.
#[doc(hidden)]
#[macro_export]
macro_rules! __param_metadata {
    ([] $arg:ident : $ty:ty) => {
        $crate::ParamMetadata::unbound(
            ::core::stringify!($arg),
            <$ty as $crate::Argument>::SHAPE,
        )
    };
    ([path] $arg:ident : $ty:ty) => {
        $crate::ParamMetadata::path(::core::stringify!($arg), <$ty as $crate::Argument>::SHAPE)
    };
    ([path($key:literal)] $arg:ident : $ty:ty) => {
        $crate::__param_metadata!([path] $arg : $ty).rename($key)
    };
    ([query] $arg:ident : $ty:ty) => {
        $crate::ParamMetadata::query(::core::stringify!($arg), <$ty as $crate::Argument>::SHAPE)
    };
    ([query(optional)] $arg:ident : $ty:ty) => {
        $crate::__param_metadata!([query] $arg : $ty).optional()
    };
    ([query($key:literal)] $arg:ident : $ty:ty) => {
        $crate::__param_metadata!([query] $arg : $ty).rename($key)
    };
    ([query($key:literal, optional)] $arg:ident : $ty:ty) => {
        $crate::__param_metadata!([query] $arg : $ty)
            .rename($key)
            .optional()
    };
    ([body] $arg:ident : $ty:ty) => {
        $crate::ParamMetadata::body(::core::stringify!($arg))
    };
    ([$($other:tt)*] $arg:ident : $ty:ty) => {
        ::core::compile_error!(::core::concat!(
            "unsupported parameter attribute: #[",
            ::core::stringify!($($other)*),
            "] on `",
            ::core::stringify!($arg),
            "`"
        ))
    };
}

/// Call argument → `ArgValue`.
#[doc(hidden)]
#[macro_export]
macro_rules! __arg_value {
    ([body] $arg:ident) => {
        $crate::ArgValue::json(&$arg)?
    };
    ([$($attr:tt)*] $arg:ident) => {
        $crate::Argument::into_arg($arg)
    };
}

/// Declared return type → client method return type.
#[doc(hidden)]
#[macro_export]
macro_rules! __return_type {
    () => {
        $crate::Result<()>
    };
    ($ret:ty) => {
        $crate::Result<::core::option::Option<$ret>>
    };
}

/// Dispatch through the unit or the decoding call.
#[doc(hidden)]
#[macro_export]
macro_rules! __invoke {
    ($client:expr, $method:expr, $args:expr) => {
        $client.invoke_unit($method, $args)
    };
    ($client:expr, $method:expr, $args:expr, $ret:ty) => {
        $client.invoke::<$ret>($method, $args)
    };
}

#[cfg(test)]
mod tests {
    use crate::{ArgShape, BindingAttr, Controller, RouteAttr};
    use http::Method;
    use pretty_assertions::assert_eq;

    controller! {
        /// Test controller.
        #[route("/example")]
        pub struct ExampleController;

        pub trait ExampleApi {
            /// Root.
            #[get]
            fn example() -> String;

            #[get("/path/{message}")]
            fn path_example(#[path] message: Option<String>) -> String;

            #[get("/renamed/{id}")]
            fn renamed(#[path("id")] item: u32, #[query("q", optional)] term: Option<&str>);

            #[request(methods = [GET, POST], path = "/multi")]
            fn multi();

            #[post("/upload")]
            fn upload(file: crate::MultipartFile, #[query(optional)] note: Option<String>);

            #[post("/body")]
            fn body(#[body] body: serde_json::Value, ignored: u8) -> serde_json::Value;

            fn unrouted();
        }
    }

    controller! {
        pub struct BareController;

        pub trait BareApi {
            #[get("/x")]
            fn x();
        }
    }

    #[test]
    fn metadata_from_attributes() {
        let metadata = ExampleController::metadata();
        assert_eq!(metadata.name, "ExampleController");
        assert_eq!(metadata.base_path_value(), Some("/example"));
        assert_eq!(metadata.methods.len(), 7);

        let root = metadata.find_method("example").unwrap();
        assert_eq!(root.route, Some(RouteAttr::new(&[Method::GET], &[])));
        assert!(root.params.is_empty());

        let renamed = metadata.find_method("renamed").unwrap();
        assert_eq!(
            renamed.params[0].attr,
            Some(BindingAttr::Path {
                name: Some("id".to_string())
            })
        );
        assert_eq!(
            renamed.params[1].attr,
            Some(BindingAttr::Query {
                name: Some("q".to_string()),
                required: false
            })
        );

        let multi = metadata.find_method("multi").unwrap();
        assert_eq!(
            multi.route,
            Some(RouteAttr::new(&[Method::GET, Method::POST], &["/multi"]))
        );

        let upload = metadata.find_method("upload").unwrap();
        assert_eq!(upload.params[0].attr, None);
        assert_eq!(upload.params[0].shape, ArgShape::File);

        let body = metadata.find_method("body").unwrap();
        assert_eq!(body.params[0].attr, Some(BindingAttr::Body));
        assert_eq!(body.params[1].attr, None);

        assert_eq!(metadata.find_method("unrouted").unwrap().route, None);
    }

    #[test]
    fn controller_without_route_attribute() {
        assert_eq!(BareController::metadata().base_path_value(), None);
    }

    #[test]
    fn metadata_is_built_once() {
        assert!(std::ptr::eq(
            ExampleController::metadata(),
            ExampleController::metadata()
        ));
    }
}
