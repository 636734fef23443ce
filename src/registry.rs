//! Endpoint registration and conflict detection.
//!
//! The registry owns the ordered endpoint list for one server instance.
//! Registration happens entirely before serving starts and is the only phase
//! that mutates the list; request-time resolution reads it without locks.
//! Insertion order is preserved and is significant: when several endpoints
//! match a request, the earliest registered one wins.

use crate::endpoint::{Controller, Endpoint, EndpointBinding, Gate, Handler};
use crate::server::RequestContext;
use std::fmt;
use tracing::{info, warn};

/// Registration-time failure. Surfaced before the server starts serving;
/// callers are expected to fail fast and abort startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A new endpoint's literal path and method set overlap an endpoint that
    /// is already registered (or accepted earlier in the same batch).
    Conflict {
        /// Name of the handler being registered
        name: String,
        /// The contested literal path string
        path: String,
        /// Methods requested by the new registration
        methods: String,
        /// Name of the already-registered handler it collides with
        existing: String,
        /// Methods held by the existing endpoint
        existing_methods: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Conflict {
                name,
                path,
                methods,
                existing,
                existing_methods,
            } => {
                write!(
                    f,
                    "endpoint conflict: cannot register '{name}' at '{path}' ({methods}); \
                     '{existing}' already occupies that path with overlapping methods \
                     ({existing_methods})"
                )
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Ordered collection of endpoints plus the optional 404/405 hooks.
///
/// Not safe for concurrent registration; complete all registration before
/// sharing the registry (behind an `Arc`) with the serving side.
#[derive(Default)]
pub struct Registry {
    endpoints: Vec<Endpoint>,
    not_found: Option<Handler>,
    method_not_allowed: Option<Handler>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single endpoint.
    ///
    /// Compiles the pattern, scans every already-registered endpoint for a
    /// literal-path + method-set conflict, and appends on success. Nothing is
    /// committed on failure.
    pub fn register(&mut self, binding: EndpointBinding) -> Result<(), RegistryError> {
        self.check_conflict(&[], &binding)?;
        self.commit(Endpoint::new(binding));
        Ok(())
    }

    /// Register every binding a controller supplies, all or nothing.
    ///
    /// Each candidate is validated against the full existing list plus the
    /// candidates accepted earlier in the same batch. If any candidate
    /// conflicts, the whole batch is rejected and the registry is unchanged.
    /// Returns the number of endpoints added.
    pub fn register_controller(
        &mut self,
        controller: &dyn Controller,
    ) -> Result<usize, RegistryError> {
        self.register_controller_with_gate(controller, None)
    }

    /// Like [`register_controller`](Self::register_controller), but attaches
    /// a shared gate to every binding that does not already carry its own.
    ///
    /// This is the bulk authorization hook: one callback covering everything
    /// the controller registers.
    pub fn register_controller_with_gate(
        &mut self,
        controller: &dyn Controller,
        gate: Option<Gate>,
    ) -> Result<usize, RegistryError> {
        let mut staged: Vec<Endpoint> = Vec::new();
        for binding in controller.bindings() {
            let binding = binding.with_shared_gate(gate.clone());
            self.check_conflict(&staged, &binding)?;
            staged.push(Endpoint::new(binding));
        }
        let count = staged.len();
        for endpoint in staged {
            self.commit(endpoint);
        }
        Ok(count)
    }

    fn commit(&mut self, endpoint: Endpoint) {
        info!(
            name = %endpoint.name(),
            path = %endpoint.path(),
            methods = %endpoint.methods(),
            total_endpoints = self.endpoints.len() + 1,
            "Endpoint registered"
        );
        self.endpoints.push(endpoint);
    }

    /// Conflict rule: identical literal path string AND overlapping method
    /// sets. Differing wildcard patterns are never compared semantically,
    /// even when their match sets overlap; resolution order disambiguates
    /// those at request time.
    fn check_conflict(
        &self,
        staged: &[Endpoint],
        binding: &EndpointBinding,
    ) -> Result<(), RegistryError> {
        if binding.methods.is_empty() {
            warn!(
                name = %binding.name,
                path = %binding.path,
                "Endpoint registered with an empty method set; it can never match"
            );
        }
        for existing in self.endpoints.iter().chain(staged.iter()) {
            if existing.path() == binding.path && existing.methods().overlaps(binding.methods) {
                return Err(RegistryError::Conflict {
                    name: binding.name.clone(),
                    path: binding.path.clone(),
                    methods: binding.methods.to_string(),
                    existing: existing.name().to_string(),
                    existing_methods: existing.methods().to_string(),
                });
            }
        }
        Ok(())
    }

    /// The registered endpoints in registration order.
    #[must_use]
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Install the hook invoked when no pattern matches a request path.
    /// At most one subscriber; installing again replaces the previous hook.
    pub fn set_not_found_handler<F>(&mut self, handler: F)
    where
        F: Fn(&mut RequestContext) + Send + Sync + 'static,
    {
        self.not_found = Some(std::sync::Arc::new(handler));
    }

    /// Install the hook invoked when patterns match but no method does.
    pub fn set_method_not_allowed_handler<F>(&mut self, handler: F)
    where
        F: Fn(&mut RequestContext) + Send + Sync + 'static,
    {
        self.method_not_allowed = Some(std::sync::Arc::new(handler));
    }

    pub(crate) fn not_found_handler(&self) -> Option<&Handler> {
        self.not_found.as_ref()
    }

    pub(crate) fn method_not_allowed_handler(&self) -> Option<&Handler> {
        self.method_not_allowed.as_ref()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("endpoints", &self.endpoints)
            .field("not_found_hook", &self.not_found.is_some())
            .field("method_not_allowed_hook", &self.method_not_allowed.is_some())
            .finish()
    }
}
