//! Error types for Farled routing.
//!
//! This module provides a structured error hierarchy using `thiserror`,
//! split by the phase in which an error can occur:
//!
//! - [`RoutingError`] - Request-time failures produced by routing itself
//! - [`ConfigError`] - Build-time failures that abort server startup
//!
//! "No route matched" is deliberately *not* an error: it is represented by
//! the empty [`Routed`](crate::Routed) value, and the transport layer turns
//! it into a 404. Request-time errors exist only for the two cases where
//! the composite router must answer with something other than not-found.

use std::sync::Arc;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Request-time failures produced by routing.
///
/// These propagate to the transport layer for translation into a response;
/// they are never retried or swallowed inside a router.
#[derive(Error, Debug, Clone)]
pub enum RoutingError {
    /// A CORS preflight request matched no route.
    ///
    /// A forbidden response is the more correct signal than not-found: the
    /// resource does not support the requested cross-origin method.
    #[error("CORS preflight request matched no route")]
    ForbiddenPreflight,

    /// A failure detected before routing, surfaced because no route matched.
    ///
    /// The cause is opaque to the router and passed through unchanged; its
    /// HTTP status is owned by the cause itself.
    #[error("no route matched; surfacing failure deferred from an earlier phase")]
    Deferred(#[source] Arc<dyn std::error::Error + Send + Sync>),
}

impl RoutingError {
    /// The HTTP status code owned by this error, if routing owns one.
    ///
    /// Returns `None` for [`RoutingError::Deferred`]: the status of a
    /// deferred failure belongs to the underlying cause.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RoutingError::ForbiddenPreflight => Some(403),
            RoutingError::Deferred(_) => None,
        }
    }

    /// The deferred cause, if this error surfaces one.
    pub fn deferred_cause(&self) -> Option<&(dyn std::error::Error + Send + Sync)> {
        match self {
            RoutingError::ForbiddenPreflight => None,
            RoutingError::Deferred(cause) => Some(cause.as_ref()),
        }
    }
}

/// Build-time configuration failures.
///
/// Detected while routing tables and decorator lists are being constructed,
/// before the server starts serving. These abort startup; they can never
/// occur at request time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An HTTP method string could not be parsed.
    #[error("unknown HTTP method: {0}")]
    InvalidMethod(String),

    /// A media type string could not be parsed.
    #[error("invalid media type: {0}")]
    InvalidMediaType(String),

    /// A path pattern was rejected by the pattern compiler.
    #[error("invalid path pattern `{pattern}`: {reason}")]
    InvalidPathPattern {
        /// The pattern as written.
        pattern: String,
        /// The compiler's rejection reason.
        reason: String,
    },

    /// A route was built without a path pattern.
    #[error("route has no path pattern")]
    MissingPathPattern,

    /// A binding builder was completed without any path criteria.
    #[error("binding has no path criteria; call path(), path_prefix() or a method shorthand first")]
    EmptyBinding,

    /// A virtual host was built with neither routes nor sub-routers.
    #[error("virtual host {0:?} has no routes")]
    NoRoutes(String),
}

#[cfg(test)]
mod tests {
    use super::{BoxError, RoutingError};
    use std::sync::Arc;

    #[test]
    fn forbidden_preflight_owns_its_status() {
        assert_eq!(RoutingError::ForbiddenPreflight.status_code(), Some(403));
        assert!(RoutingError::ForbiddenPreflight.deferred_cause().is_none());
    }

    #[test]
    fn deferred_passes_the_cause_through() {
        let cause: BoxError = "bad percent-encoding".into();
        let err = RoutingError::Deferred(Arc::from(cause));

        assert_eq!(err.status_code(), None);
        let surfaced = err.deferred_cause().expect("cause");
        assert_eq!(surfaced.to_string(), "bad percent-encoding");
    }
}
