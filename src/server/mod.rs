//! HTTP transport collaborator: parsing, request context, and the coroutine
//! server loop built on `may_minihttp`.
//!
//! The routing core treats everything in this module as a collaborator: it
//! parses raw requests into a [`RequestContext`], hands the context to the
//! dispatcher, and writes whatever response the gate/handler built back to
//! the wire. No routing decisions happen here.

pub mod context;
pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use context::RequestContext;
pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_request, ParsedRequest};
pub use service::AppService;
