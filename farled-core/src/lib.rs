//! # farled-core
//!
//! Core routing contracts for the Farled server framework.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! transport layers and leaf-router implementations that don't need the
//! full `farled` implementation crate.
//!
//! # Routing Model
//!
//! Routing in Farled is built from a small set of value types and one trait:
//!
//! ## [`Route`]
//!
//! Immutable match criteria for one dispatch target: a compiled path
//! pattern (behind the [`PathMatcher`] seam), an ordered set of HTTP
//! methods (empty = all), and optional media-type constraints on what the
//! target consumes and produces. Equality is structural, so identically
//! specified routes compare equal regardless of how they were built.
//!
//! ## [`RoutingContext`]
//!
//! The read-only, per-request view of everything relevant to route
//! matching: path, method, query string, candidate content types, a CORS
//! preflight flag, and an optional *deferred failure* — an error detected
//! before routing that must only surface if routing itself finds no match.
//!
//! ## [`Routed`]
//!
//! The outcome of a match attempt: either empty, or a matched [`Route`]
//! plus extracted path parameters plus an associated value (typically a
//! service or handler).
//!
//! ## [`Router`]
//!
//! The matching abstraction: find the best single match, enumerate all
//! matches, register metrics, and dump a diagnostic description. Routers
//! are built once at startup, frozen, and read concurrently without locks
//! for the life of the process.
//!
//! # Error Types
//!
//! - [`RoutingError`] - Request-time failures produced by routing itself
//! - [`ConfigError`] - Build-time configuration failures (fatal at startup)

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod context;
mod error;
mod media;
mod method;
mod metrics;
mod route;
mod routed;
mod router;

// Re-exports
pub use context::{RoutingContext, RoutingContextBuilder};
pub use error::{BoxError, ConfigError, RoutingError};
pub use media::MediaType;
pub use method::Method;
pub use metrics::{MeterIdPrefix, MeterRegistry};
pub use route::{PathMatcher, Route, RouteBuilder};
pub use routed::{PathParams, Routed};
pub use router::Router;
