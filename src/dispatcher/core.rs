//! Dispatcher core: the request hot path.

use crate::endpoint::Endpoint;
use crate::method::MethodSet;
use crate::registry::Registry;
use crate::server::RequestContext;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of resolving an incoming (path, method token) pair.
#[derive(Debug)]
pub enum Resolution<'a> {
    /// Exactly one endpoint is authoritative for this request.
    Matched(&'a Endpoint),
    /// No registered pattern matches the path.
    NotFound,
    /// At least one pattern matches the path, but no matching endpoint
    /// admits the method.
    MethodNotAllowed,
}

/// Resolves incoming requests against a completed registry and invokes the
/// winning endpoint's gate and handler.
///
/// Holds the registry behind an `Arc`; the endpoint list is immutable once
/// serving starts, so clones of the dispatcher share it without locks.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolve a request to its authoritative endpoint, or a 404/405 outcome.
    ///
    /// Pure and synchronous: no gate or handler runs here, and repeated calls
    /// with the same inputs against an unchanged registry yield the same
    /// outcome every time.
    #[must_use]
    pub fn resolve(&self, method_token: &str, path: &str) -> Resolution<'_> {
        let incoming = MethodSet::parse_token(method_token);
        debug!(
            method = %method_token,
            path = %path,
            recognized = incoming.is_some(),
            "Resolution attempt"
        );

        let match_start = Instant::now();

        let path_matches: Vec<&Endpoint> = self
            .registry
            .endpoints()
            .iter()
            .filter(|endpoint| endpoint.pattern().matches(path))
            .collect();

        if path_matches.is_empty() {
            warn!(
                method = %method_token,
                path = %path,
                duration_us = match_start.elapsed().as_micros() as u64,
                "No endpoint matched path"
            );
            return Resolution::NotFound;
        }

        // First-registered wins among endpoints that also admit the method.
        match path_matches
            .into_iter()
            .find(|endpoint| endpoint.methods().allows(incoming))
        {
            Some(endpoint) => {
                info!(
                    method = %method_token,
                    path = %path,
                    handler = %endpoint.name(),
                    pattern = %endpoint.path(),
                    duration_us = match_start.elapsed().as_micros() as u64,
                    "Endpoint matched"
                );
                Resolution::Matched(endpoint)
            }
            None => {
                warn!(
                    method = %method_token,
                    path = %path,
                    duration_us = match_start.elapsed().as_micros() as u64,
                    "Path matched but method not allowed"
                );
                Resolution::MethodNotAllowed
            }
        }
    }

    /// Resolve and execute: gate first, then handler.
    ///
    /// 404/405 outcomes run the registry's hook when one is installed and
    /// fall back to the default minimal responses otherwise. A gate that
    /// returns `false` ends dispatch with whatever response the gate itself
    /// produced; the dispatcher adds nothing. Errors raised inside gates or
    /// handlers are not intercepted here.
    pub fn dispatch(&self, ctx: &mut RequestContext) {
        let (method, path) = (ctx.method().to_string(), ctx.path().to_string());
        match self.resolve(&method, &path) {
            Resolution::Matched(endpoint) => {
                if let Some(gate) = endpoint.gate() {
                    if !gate(ctx) {
                        debug!(
                            handler = %endpoint.name(),
                            path = %path,
                            "Gate rejected request; dispatch stopped"
                        );
                        return;
                    }
                }
                let start = Instant::now();
                (endpoint.handler())(ctx);
                debug!(
                    handler = %endpoint.name(),
                    latency_us = start.elapsed().as_micros() as u64,
                    "Handler complete"
                );
            }
            Resolution::NotFound => match self.registry.not_found_handler() {
                Some(hook) => hook(ctx),
                None => ctx.send_text("404", 404),
            },
            Resolution::MethodNotAllowed => match self.registry.method_not_allowed_handler() {
                Some(hook) => hook(ctx),
                None => ctx.send_text("405", 405),
            },
        }
    }
}
