//! Testing utilities for Farled.
//!
//! This module provides utilities to make testing routers, bindings, and
//! decorator chains easier:
//!
//! - [`RecordingRegistry`]: a meter registry that records registrations
//!   instead of wiring a backend
//! - [`FnService`]: a function-backed service value with identity equality
//! - [`get`] / [`request`]: routing-context shorthands

use std::sync::Arc;

use farled_core::{MeterIdPrefix, MeterRegistry, Method, Route, RoutingContext};

/// A [`MeterRegistry`] spy that records every registration it receives.
///
/// Useful for verifying what a composed router registers and under which
/// prefix, without installing a metrics backend.
#[derive(Default)]
pub struct RecordingRegistry {
    entries: Vec<(MeterIdPrefix, String)>,
}

impl RecordingRegistry {
    /// Create an empty recording registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded `(prefix, route pattern)` pairs, in registration order.
    pub fn entries(&self) -> &[(MeterIdPrefix, String)] {
        &self.entries
    }

    /// The number of recorded registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MeterRegistry for RecordingRegistry {
    fn register_route(&mut self, id: &MeterIdPrefix, route: &Route) {
        self.entries.push((id.clone(), route.pattern().to_string()));
    }
}

/// A service backed by a plain function, comparing by identity.
///
/// Virtual hosts require service values to be `Clone + PartialEq` so that
/// match de-duplication works; closures provide neither, so this wrapper
/// shares the function behind an `Arc` and compares by pointer identity:
/// two results carry the same service iff they dispatch to the same
/// function.
pub struct FnService<Req, Res> {
    f: Arc<dyn Fn(Req) -> Res + Send + Sync>,
}

impl<Req, Res> FnService<Req, Res> {
    /// Wrap a function as a service.
    pub fn new(f: impl Fn(Req) -> Res + Send + Sync + 'static) -> Self {
        Self { f: Arc::new(f) }
    }

    /// Invoke the service.
    pub fn call(&self, req: Req) -> Res {
        (self.f)(req)
    }
}

impl<Req, Res> Clone for FnService<Req, Res> {
    fn clone(&self) -> Self {
        Self { f: self.f.clone() }
    }
}

impl<Req, Res> PartialEq for FnService<Req, Res> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl<Req, Res> Eq for FnService<Req, Res> {}

impl<Req, Res> std::fmt::Debug for FnService<Req, Res> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FnService({:p})", Arc::as_ptr(&self.f))
    }
}

/// A plain `GET` routing context for `path`.
pub fn get(path: &str) -> RoutingContext {
    RoutingContext::builder(Method::GET, path).build()
}

/// A routing context for an arbitrary method and path.
pub fn request(method: Method, path: &str) -> RoutingContext {
    RoutingContext::builder(method, path).build()
}
