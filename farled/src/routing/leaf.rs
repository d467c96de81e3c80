//! The leaf route table: a frozen, first-match-wins scan.

use std::io;
use std::sync::Arc;

use farled_core::{
    ConfigError, MeterIdPrefix, MeterRegistry, Route, Routed, Router, RoutingContext,
    RoutingError,
};

use crate::routing::pattern::MatchitPattern;

/// A leaf router matching directly against its own ordered route table.
///
/// Routes are consulted in registration order and the first structural
/// match wins; there is no scoring or backtracking. The table is frozen at
/// build time and safe for unsynchronized concurrent reads.
pub struct RouteTable<T> {
    entries: Vec<(Route, T)>,
}

impl<T> RouteTable<T> {
    /// Start building a table.
    pub fn builder() -> RouteTableBuilder<T> {
        RouteTableBuilder {
            entries: Vec::new(),
        }
    }

    /// The number of registered routes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table owns no routes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone + Send + Sync> Router<T> for RouteTable<T> {
    fn find(&self, ctx: &RoutingContext) -> Result<Routed<T>, RoutingError> {
        for (route, value) in &self.entries {
            if let Some(params) = route.apply(ctx) {
                return Ok(Routed::new(route.clone(), params, value.clone()));
            }
        }
        Ok(Routed::empty())
    }

    fn find_all(&self, ctx: &RoutingContext) -> Vec<Routed<T>> {
        self.entries
            .iter()
            .filter_map(|(route, value)| {
                route
                    .apply(ctx)
                    .map(|params| Routed::new(route.clone(), params, value.clone()))
            })
            .collect()
    }

    fn register_metrics(&self, registry: &mut dyn MeterRegistry, prefix: &MeterIdPrefix) -> bool {
        for (route, _) in &self.entries {
            registry.register_route(prefix, route);
        }
        !self.entries.is_empty()
    }

    fn dump(&self, out: &mut dyn io::Write) -> io::Result<()> {
        for (route, _) in &self.entries {
            writeln!(out, "{route}")?;
        }
        Ok(())
    }
}

/// Builder for [`RouteTable`]. Insertion order is match precedence.
pub struct RouteTableBuilder<T> {
    entries: Vec<(Route, T)>,
}

impl<T> RouteTableBuilder<T> {
    /// Append a route and its associated value.
    ///
    /// Duplicate routes are legal; the earlier registration shadows the
    /// later one in `find` and both appear in `find_all`.
    pub fn add(mut self, route: Route, value: T) -> Self {
        self.entries.push((route, value));
        self
    }

    /// Convenience: compile `pattern` and append a route accepting every
    /// method.
    pub fn add_pattern(self, pattern: &str, value: T) -> Result<Self, ConfigError> {
        let route = Route::builder()
            .path(Arc::new(MatchitPattern::new(pattern)?))
            .build()?;
        Ok(self.add(route, value))
    }

    /// Freeze the table.
    pub fn build(self) -> RouteTable<T> {
        RouteTable {
            entries: self.entries,
        }
    }
}
