#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! ## API Reference

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod metadata;
mod resolve;
mod template;

pub use error::ResolveError;
pub use metadata::{
    ArgShape, BindingAttr, ControllerMetadata, MethodMetadata, ParamMetadata, RouteAttr,
};
pub use resolve::{resolve_method, MethodRoute, ParamBinding};
pub use template::{collapse_slashes, expand_template, placeholders};
