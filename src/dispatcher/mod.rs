//! # Dispatcher Module
//!
//! Per-request resolution and handler invocation.
//!
//! ## Overview
//!
//! The dispatcher answers one question for every incoming request: given a
//! (path, method token) pair, which registered endpoint (if any) gets to
//! run? Resolution is a pure, read-only decision over the registry's
//! immutable endpoint list:
//!
//! 1. Parse the method token (case-sensitive; anything but the seven named
//!    methods is unrecognized).
//! 2. Collect the endpoints whose compiled pattern matches the path, in
//!    registration order.
//! 3. No path match → 404 outcome.
//! 4. Take the first path match whose method set admits the parsed method
//!    (unrecognized methods are admitted only by `ALLOW_ALL`).
//! 5. No such endpoint → 405 outcome.
//!
//! Registration order is the tie-break and a user-significant contract, not
//! an implementation accident.
//!
//! ## Execution
//!
//! [`Dispatcher::dispatch`] runs resolution and then executes gate and
//! handler against the request context. A gate returning `false` stops
//! dispatch silently: no handler runs and no default response is written.
//! The 404/405 outcomes run the registry's optional hooks, or emit the
//! default plain-text `"404"` / `"405"` bodies when no hook is installed.
//!
//! ## Concurrency
//!
//! Resolution takes `&self` and touches only immutable state, so it is safe
//! to call concurrently from any number of request-handling coroutines
//! without coordination. Gates and handlers may block; each request's
//! gate+handler chain runs on its own connection coroutine and never
//! serializes unrelated requests.

mod core;

pub use core::{Dispatcher, Resolution};
