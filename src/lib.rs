//! Wildpath is a minimal HTTP request router built around wildcard path
//! patterns and a bitmask method set.
//!
//! Endpoints are registered up front, conflicts are rejected at
//! registration time, and the resulting [`Registry`] is frozen behind an
//! [`Arc`](std::sync::Arc) before the first request is served. The
//! [`Dispatcher`] resolves each incoming request to the first endpoint
//! whose pattern and method set both match, falling back to configurable
//! 404 and 405 handlers.
//!
//! A small sample application (pages, a JSON-free API endpoint, and
//! static assets) lives in [`controllers`] and is wired up by the
//! `wildpath` binary.

pub mod cli;
pub mod controllers;
pub mod dispatcher;
pub mod endpoint;
pub mod method;
pub mod pattern;
pub mod registry;
pub mod server;
pub mod static_files;

pub use dispatcher::{Dispatcher, Resolution};
pub use endpoint::{Controller, Endpoint, EndpointBinding, Gate, Handler};
pub use method::MethodSet;
pub use pattern::PathPattern;
pub use registry::{Registry, RegistryError};
