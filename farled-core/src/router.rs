//! The route-matching abstraction.
//!
//! A [`Router`] answers one question: given a request's routing-relevant
//! attributes, which registered route (and associated value) should handle
//! it? Implementations range from a flat route table to a composite that
//! merges several routers into one dispatch surface.
//!
//! # Lifecycle
//!
//! Routers hold a fixed, immutable set of routes for their entire
//! lifetime: built single-threaded during server startup, then read
//! concurrently without locks until process shutdown. No operation here
//! mutates shared state, suspends, or blocks on I/O — `find` sits on the
//! request's latency-critical path.

use std::io;

use crate::context::RoutingContext;
use crate::error::RoutingError;
use crate::metrics::{MeterIdPrefix, MeterRegistry};
use crate::routed::Routed;

/// The matching abstraction over a frozen set of routes with associated
/// values of type `T`.
pub trait Router<T>: Send + Sync {
    /// Find the single best match for `ctx`.
    ///
    /// "No route matched" is not an error: it is `Ok(Routed::empty())`.
    /// An `Err` is reserved for the cases where routing must answer with
    /// something other than not-found — an unmatched CORS preflight or a
    /// surfaced deferred failure — and only composing routers produce
    /// those.
    fn find(&self, ctx: &RoutingContext) -> Result<Routed<T>, RoutingError>;

    /// Enumerate every route matching `ctx`, in registration order.
    ///
    /// Used for conflict detection, route listing, and diagnostics; never
    /// on the dispatch path. The result contains no empty entries.
    fn find_all(&self, ctx: &RoutingContext) -> Vec<Routed<T>>;

    /// Register per-route meters under `prefix`.
    ///
    /// Returns whether anything was registered; `false` means this router
    /// is metrics-inert (e.g. it owns no routes).
    fn register_metrics(&self, registry: &mut dyn MeterRegistry, prefix: &MeterIdPrefix) -> bool;

    /// Write a human-readable description of every owned route, one per
    /// line, for operational introspection.
    fn dump(&self, out: &mut dyn io::Write) -> io::Result<()>;
}

// Allow Box<dyn Router> to be used where Router is expected, so composites
// can be nested without an extra wrapper.
impl<T> Router<T> for Box<dyn Router<T>> {
    fn find(&self, ctx: &RoutingContext) -> Result<Routed<T>, RoutingError> {
        (**self).find(ctx)
    }

    fn find_all(&self, ctx: &RoutingContext) -> Vec<Routed<T>> {
        (**self).find_all(ctx)
    }

    fn register_metrics(&self, registry: &mut dyn MeterRegistry, prefix: &MeterIdPrefix) -> bool {
        (**self).register_metrics(registry, prefix)
    }

    fn dump(&self, out: &mut dyn io::Write) -> io::Result<()> {
        (**self).dump(out)
    }
}
