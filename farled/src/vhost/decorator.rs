//! Route-scoped decorators and their ordered composition.

use std::fmt;
use std::sync::Arc;

use farled_core::{Route, RoutingContext};

/// A decorator: a pure transformation from a "next" service to a wrapped
/// service.
pub type Decorator<S> = Arc<dyn Fn(S) -> S + Send + Sync>;

/// One route paired with one decorator.
///
/// An ordered sequence of these, scoped to a virtual host, forms the
/// middleware chain: binding order is invocation order, so the first-bound
/// entry whose route matches becomes the outermost wrapper.
pub struct RouteDecoratingService<S> {
    route: Route,
    decorator: Decorator<S>,
}

impl<S> RouteDecoratingService<S> {
    /// Pair `route` with `decorator`.
    pub fn new(route: Route, decorator: Decorator<S>) -> Self {
        Self { route, decorator }
    }

    /// The route scoping this decorator.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Whether this decorator applies to `ctx`.
    pub fn matches(&self, ctx: &RoutingContext) -> bool {
        self.route.apply(ctx).is_some()
    }

    /// Wrap `next` with this decorator.
    pub fn decorate(&self, next: S) -> S {
        (self.decorator)(next)
    }
}

impl<S> Clone for RouteDecoratingService<S> {
    fn clone(&self) -> Self {
        Self {
            route: self.route.clone(),
            decorator: self.decorator.clone(),
        }
    }
}

impl<S> fmt::Debug for RouteDecoratingService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDecoratingService")
            .field("route", &self.route)
            .finish_non_exhaustive()
    }
}

/// Fold the decorator chain for one request.
///
/// Entries whose route does not match `ctx` contribute nothing. Matching
/// entries wrap the accumulated service from last-bound to first-bound, so
/// the first-bound decorator ends up outermost: it sees the request first
/// and the response last.
///
/// The fold builds one composed service per request; decorators are never
/// linked into a mutable chain of objects.
pub fn compose<S>(
    decorators: &[RouteDecoratingService<S>],
    ctx: &RoutingContext,
    service: S,
) -> S {
    decorators
        .iter()
        .rev()
        .filter(|entry| entry.matches(ctx))
        .fold(service, |next, entry| entry.decorate(next))
}
