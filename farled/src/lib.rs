//! # farled
//!
//! Route composition and middleware binding for the Farled server
//! framework.
//!
//! This crate provides:
//! - **Leaf routing**: [`RouteTable`], a frozen first-match route table
//! - **Composition**: [`CompositeRouter`], which merges routers with
//!   first-match-wins precedence and a result-mapping transformation
//! - **Path patterns**: [`MatchitPattern`], the `matchit`-backed pattern
//!   compiler behind the [`PathMatcher`](farled_core::PathMatcher) seam
//! - **Virtual hosts**: [`VirtualHost`] and its builder, binding services
//!   and route-scoped decorators into a single dispatch surface
//! - **Telemetry**: a `metrics`-facade-backed meter registry
//! - **Testing utilities**: registration spies and function-backed services
//!
//! [`RouteTable`]: routing::RouteTable
//! [`CompositeRouter`]: routing::CompositeRouter
//! [`MatchitPattern`]: routing::MatchitPattern
//! [`VirtualHost`]: vhost::VirtualHost

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core contracts
pub use farled_core;

// Modules
pub mod routing;
pub mod telemetry;
pub mod testing;
pub mod vhost;
