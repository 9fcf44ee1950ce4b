#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! ## API Reference
//!
//! # Types
//!
//! - [`controller!`] — Declares a controller and its typed client API
//! - [`ClientFactory`] — Entry point holding the executor, serializer and config
//! - [`ClientBuilder`] — Accumulates request/response customizers, builds clients
//! - [`ControllerClient`] — The client standing in for a controller
//! - [`ClientCaller`] — Single-use caller with response expectations
//! - [`RespondingClient`] — Returns [`ControllerResponse`] envelopes with status and headers
//! - [`RouterExecutor`] — In-process executor for an `axum::Router` (feature `axum`)
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! route-client = "0.1"
//! ```
//!
//! # Companion Crate
//!
//! | Crate                 | Purpose                             |
//! |-----------------------|-------------------------------------|
//! | `route-client` (this) | Clients, executors, `controller!`   |
//! | `route-client-core`   | Routing metadata and resolution     |

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod args;
mod builder;
mod caller;
mod client;
mod config;
mod error;
mod executor;
pub mod expect;
mod factory;
mod macros;
mod mapper;
mod multipart;
mod request;
mod responding;
mod response;
#[cfg(feature = "axum")]
mod router;
mod serializer;

pub use args::{ArgValue, Argument, MultipartFile};
pub use builder::{ClientBuilder, RequestCustomizer, ResponseCustomizer, ResponseObserver};
pub use caller::ClientCaller;
pub use client::{Controller, ControllerClient};
pub use config::ClientConfig;
pub use error::{AssertionFailure, BoxError, Error, Result};
pub use executor::RequestExecutor;
pub use factory::{ClientCustomizer, ClientFactory};
pub use mapper::{map_response, TypeDescriptor};
pub use request::{RequestBody, RequestDescriptor};
pub use responding::RespondingClient;
pub use response::{ControllerResponse, RawResponse};
#[cfg(feature = "axum")]
pub use router::RouterExecutor;
pub use serializer::{JsonSerializer, Serializer};

pub use route_client_core::{
    resolve_method, ArgShape, BindingAttr, ControllerMetadata, MethodMetadata, MethodRoute,
    ParamBinding, ParamMetadata, ResolveError, RouteAttr,
};

/// Re-export of the `http` crate used in the public API.
pub use http;
