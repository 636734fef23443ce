//! Endpoint bindings: pattern + method set + handler + optional gate.
//!
//! Handlers and gates are plain callables over a [`RequestContext`]. A
//! handler owns producing the response; a gate runs first and may veto the
//! handler by returning `false`, in which case dispatch stops silently and
//! whatever response the gate wrote (possibly none) stands.

use crate::method::MethodSet;
use crate::pattern::PathPattern;
use crate::server::RequestContext;
use std::fmt;
use std::sync::Arc;

/// A request handler. Side-effect-only: it writes its response through the
/// context's response builders.
pub type Handler = Arc<dyn Fn(&mut RequestContext) + Send + Sync>;

/// A pre-handler check. `true` continues to the handler, `false` stops
/// dispatch; the gate itself is responsible for any response it wants seen.
pub type Gate = Arc<dyn Fn(&mut RequestContext) -> bool + Send + Sync>;

/// One registered endpoint. Created by the registry at registration time and
/// immutable thereafter.
#[derive(Clone)]
pub struct Endpoint {
    name: String,
    pattern: PathPattern,
    methods: MethodSet,
    handler: Handler,
    gate: Option<Gate>,
}

impl Endpoint {
    pub(crate) fn new(binding: EndpointBinding) -> Self {
        let pattern = PathPattern::compile(&binding.path);
        Self {
            name: binding.name,
            pattern,
            methods: binding.methods,
            handler: binding.handler,
            gate: binding.gate,
        }
    }

    /// Handler name, used in registration errors and logs.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// The literal path string this endpoint was registered under.
    #[must_use]
    pub fn path(&self) -> &str {
        self.pattern.source()
    }

    #[must_use]
    pub fn methods(&self) -> MethodSet {
        self.methods
    }

    #[must_use]
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    #[must_use]
    pub fn gate(&self) -> Option<&Gate> {
        self.gate.as_ref()
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("name", &self.name)
            .field("path", &self.pattern.source())
            .field("methods", &self.methods.to_string())
            .field("gated", &self.gate.is_some())
            .finish()
    }
}

/// A declarative registration request: the (pattern, methods, handler)
/// triple plus an optional gate, before validation.
///
/// Controllers hand these to the registry; nothing is compiled or checked
/// until [`Registry::register`](crate::registry::Registry::register) runs.
#[derive(Clone)]
pub struct EndpointBinding {
    pub name: String,
    pub path: String,
    pub methods: MethodSet,
    pub handler: Handler,
    pub gate: Option<Gate>,
}

impl EndpointBinding {
    pub fn new<F>(name: &str, path: &str, methods: MethodSet, handler: F) -> Self
    where
        F: Fn(&mut RequestContext) + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            methods,
            handler: Arc::new(handler),
            gate: None,
        }
    }

    /// Attach a gate to run before the handler.
    #[must_use]
    pub fn with_gate<G>(mut self, gate: G) -> Self
    where
        G: Fn(&mut RequestContext) -> bool + Send + Sync + 'static,
    {
        self.gate = Some(Arc::new(gate));
        self
    }

    pub(crate) fn with_shared_gate(mut self, gate: Option<Gate>) -> Self {
        if self.gate.is_none() {
            self.gate = gate;
        }
        self
    }
}

/// A grouping object that supplies endpoint bindings for batch registration.
///
/// This is the explicit-registration counterpart of attribute-scanned
/// controller classes: a controller yields its full set of bindings and the
/// registry commits them all or none.
pub trait Controller {
    fn bindings(&self) -> Vec<EndpointBinding>;
}
