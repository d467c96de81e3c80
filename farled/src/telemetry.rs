//! Metrics-facade-backed meter registration.
//!
//! Implements the `farled-core` registration contract on top of the
//! `metrics` facade: whatever recorder the application installs
//! (Prometheus exporter, statsd, a debugging recorder) receives the
//! per-route meters. Without an installed recorder the macros are no-ops,
//! so registration is always safe to run.

use farled_core::{MeterIdPrefix, MeterRegistry, Route};
use metrics::Label;

/// A [`MeterRegistry`] writing registrations into the global `metrics`
/// recorder.
///
/// Each route registers a `<prefix>.requests` counter, primed at zero so
/// it appears in scrapes before the first request, carrying the prefix
/// tags (hostname, delegate index) plus the route pattern as labels.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsMeterRegistry;

impl MetricsMeterRegistry {
    /// Create a registry handle.
    pub fn new() -> Self {
        Self
    }
}

impl MeterRegistry for MetricsMeterRegistry {
    fn register_route(&mut self, id: &MeterIdPrefix, route: &Route) {
        let mut labels: Vec<Label> = id
            .tags()
            .iter()
            .map(|(k, v)| Label::new(k.clone(), v.clone()))
            .collect();
        labels.push(Label::new("route", route.pattern().to_string()));

        let name = format!("{}.requests", id.name());
        metrics::describe_counter!(name.clone(), "Requests dispatched to the route");
        metrics::counter!(name, labels).increment(0);
    }
}

#[cfg(test)]
mod tests {
    use super::MetricsMeterRegistry;
    use crate::routing::RouteTable;
    use farled_core::{MeterIdPrefix, Router};

    #[test]
    fn registration_is_a_no_op_without_a_recorder() {
        let table = RouteTable::builder()
            .add_pattern("/users/{id}", 1)
            .unwrap()
            .build();
        let mut registry = MetricsMeterRegistry::new();
        let prefix = MeterIdPrefix::new("farled.router").with_tag("hostname", "example.com");

        // No recorder installed: must not panic, and the router still
        // reports that it registered.
        assert!(table.register_metrics(&mut registry, &prefix));
    }
}
