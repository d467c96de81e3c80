//! Virtual hosts: a named dispatch surface owning one composed router and
//! one ordered decorator list.
//!
//! A virtual host is configured fully at startup — services bound to
//! routes, decorators bound to routes, optional pre-built sub-routers —
//! then frozen. Per request, the transport layer asks it for the target
//! service (`find`) and for the middleware chain wrapping that service
//! (`decorate`); the two lists are independent by design, so decorators
//! apply to any matching request whether or not the matched service knows
//! about them.

mod binding;
pub mod decorator;

pub use binding::{DecoratorBindingBuilder, ServiceBindingBuilder};
pub use decorator::{Decorator, RouteDecoratingService};

use std::io;

use farled_core::{
    ConfigError, MeterIdPrefix, MeterRegistry, Route, Routed, Router, RoutingContext,
    RoutingError,
};

use crate::routing::{CompositeRouter, RouteTable};

/// A named virtual host: one composed router plus one ordered decorator
/// list, frozen after construction.
pub struct VirtualHost<S> {
    name: String,
    router: CompositeRouter<S, S>,
    decorators: Vec<RouteDecoratingService<S>>,
}

impl<S: Clone + PartialEq + Send + Sync + 'static> VirtualHost<S> {
    /// The host name this surface serves.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Find the service for `ctx`.
    ///
    /// Matching follows the composite contract: first-match-wins across
    /// the host's route table and any appended sub-routers, a 403 outcome
    /// for unmatched CORS preflights, and deferred-failure surfacing on a
    /// plain miss.
    pub fn find(&self, ctx: &RoutingContext) -> Result<Routed<S>, RoutingError> {
        self.router.find(ctx)
    }

    /// Enumerate every route matching `ctx`, de-duplicated.
    pub fn find_all(&self, ctx: &RoutingContext) -> Vec<Routed<S>> {
        self.router.find_all(ctx)
    }

    /// Build the effective middleware chain for one request.
    ///
    /// Folds the decorator list over `service`: decorators bound earlier
    /// end up outermost, decorators whose route does not match `ctx`
    /// contribute nothing.
    pub fn decorate(&self, ctx: &RoutingContext, service: S) -> S {
        decorator::compose(&self.decorators, ctx, service)
    }

    /// Register this host's router meters under `prefix`, tagged with the
    /// host name. Returns whether anything was registered.
    pub fn register_metrics(
        &self,
        registry: &mut dyn MeterRegistry,
        prefix: &MeterIdPrefix,
    ) -> bool {
        let prefix = prefix.with_tag("hostname", &self.name);
        self.router.register_metrics(registry, &prefix)
    }

    /// Dump every route owned by this host's router.
    pub fn dump(&self, out: &mut dyn io::Write) -> io::Result<()> {
        self.router.dump(out)
    }
}

/// Builder for [`VirtualHost`].
///
/// Routes and decorators accumulate in declaration order; `build` freezes
/// both lists. All configuration happens single-threaded at startup, and
/// configuration errors abort startup rather than surfacing at request
/// time.
pub struct VirtualHostBuilder<S> {
    name: String,
    routes: Vec<(Route, S)>,
    sub_routers: Vec<Box<dyn Router<S>>>,
    decorators: Vec<RouteDecoratingService<S>>,
}

impl<S: Clone + PartialEq + Send + Sync + 'static> VirtualHostBuilder<S> {
    /// Start building a virtual host named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            routes: Vec::new(),
            sub_routers: Vec::new(),
            decorators: Vec::new(),
        }
    }

    /// Bind a service to routes fluently; `build` on the returned builder
    /// comes back here.
    pub fn route(self) -> ServiceBindingBuilder<S> {
        ServiceBindingBuilder::new(self)
    }

    /// Bind a decorator to routes fluently; `build` on the returned
    /// builder comes back here.
    pub fn route_decorator(self) -> DecoratorBindingBuilder<S> {
        DecoratorBindingBuilder::new(self)
    }

    /// Bind `service` to an already-built route.
    pub fn service(mut self, route: Route, service: S) -> Self {
        self.routes.push((route, service));
        self
    }

    /// Append a pre-built router consulted after this host's own routes.
    pub fn router(mut self, router: Box<dyn Router<S>>) -> Self {
        self.sub_routers.push(router);
        self
    }

    pub(crate) fn add_service_route(&mut self, route: Route, service: S) {
        self.routes.push((route, service));
    }

    pub(crate) fn add_route_decorating_service(&mut self, entry: RouteDecoratingService<S>) {
        self.decorators.push(entry);
    }

    /// Freeze the host.
    ///
    /// Fails with [`ConfigError::NoRoutes`] if nothing was bound: a host
    /// that can never match anything is a configuration mistake, caught at
    /// startup.
    pub fn build(self) -> Result<VirtualHost<S>, ConfigError> {
        if self.routes.is_empty() && self.sub_routers.is_empty() {
            return Err(ConfigError::NoRoutes(self.name));
        }

        let mut delegates: Vec<Box<dyn Router<S>>> = Vec::new();
        if !self.routes.is_empty() {
            let mut table = RouteTable::builder();
            for (route, service) in self.routes {
                table = table.add(route, service);
            }
            delegates.push(Box::new(table.build()));
        }
        delegates.extend(self.sub_routers);

        tracing::debug!(
            hostname = %self.name,
            delegates = delegates.len(),
            decorators = self.decorators.len(),
            "virtual host built"
        );

        Ok(VirtualHost {
            name: self.name,
            router: CompositeRouter::identity(delegates),
            decorators: self.decorators,
        })
    }
}
