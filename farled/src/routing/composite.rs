//! Composing multiple routers into one.

use std::io;

use farled_core::{
    MeterIdPrefix, MeterRegistry, Routed, Router, RoutingContext, RoutingError,
};

/// A [`Router`] built from an ordered list of delegate routers plus a
/// result-mapping function.
///
/// `find` consults the delegates in registration order and the first
/// present result wins — no backtracking once a delegate reports a match.
/// The mapping function turns each delegate's `Routed<I>` into the
/// composite's `Routed<O>`, which lets routing tables over one value type
/// (say, service registrations) surface as another (say, invocable
/// handlers) without either side knowing about the other.
///
/// Composites nest: a `CompositeRouter` is itself a `Router<O>`, and
/// flattening nested composites into one delegate list is observably
/// equivalent to nesting them.
///
/// Only the composite produces routing *errors*. When every delegate
/// misses, it distinguishes three outcomes:
///
/// 1. the request is a CORS preflight — fail with
///    [`RoutingError::ForbiddenPreflight`] (403 beats 404 for a preflight
///    against an undefined cross-origin method);
/// 2. the context carries a deferred failure — surface it now, and only
///    now, so an earlier-phase problem can never mask a route that would
///    have matched;
/// 3. otherwise — the empty result, which the transport layer turns into
///    not-found.
pub struct CompositeRouter<I, O> {
    delegates: Vec<Box<dyn Router<I>>>,
    map_result: Box<dyn Fn(Routed<I>) -> Routed<O> + Send + Sync>,
}

impl<I, O> CompositeRouter<I, O> {
    /// Compose `delegates` in the given order, transforming every match
    /// through `map_result`.
    ///
    /// An empty delegate list is legal (the composite is then metrics-inert
    /// and never matches); duplicate delegates are legal and simply
    /// consulted twice.
    pub fn new(
        delegates: Vec<Box<dyn Router<I>>>,
        map_result: impl Fn(Routed<I>) -> Routed<O> + Send + Sync + 'static,
    ) -> Self {
        Self {
            delegates,
            map_result: Box::new(map_result),
        }
    }

    /// Convenience form for the common single-delegate case.
    pub fn single(
        delegate: Box<dyn Router<I>>,
        map_result: impl Fn(Routed<I>) -> Routed<O> + Send + Sync + 'static,
    ) -> Self {
        Self::new(vec![delegate], map_result)
    }

    /// The number of delegates.
    pub fn delegate_count(&self) -> usize {
        self.delegates.len()
    }
}

impl<T: 'static> CompositeRouter<T, T> {
    /// Compose `delegates` without transforming results.
    pub fn identity(delegates: Vec<Box<dyn Router<T>>>) -> Self {
        Self::new(delegates, |routed| routed)
    }
}

impl<I, O: PartialEq> Router<O> for CompositeRouter<I, O> {
    fn find(&self, ctx: &RoutingContext) -> Result<Routed<O>, RoutingError> {
        for delegate in &self.delegates {
            let result = delegate.find(ctx)?;
            if result.is_present() {
                return Ok((self.map_result)(result));
            }
        }
        if ctx.is_cors_preflight() {
            // The preflight check wins over any deferred failure.
            tracing::debug!(path = ctx.path(), "CORS preflight matched no route");
            return Err(RoutingError::ForbiddenPreflight);
        }
        if let Some(cause) = ctx.deferred_cause() {
            tracing::debug!(
                path = ctx.path(),
                cause = %cause,
                "surfacing deferred failure: no route matched"
            );
            return Err(RoutingError::Deferred(cause.clone()));
        }
        Ok(Routed::empty())
    }

    fn find_all(&self, ctx: &RoutingContext) -> Vec<Routed<O>> {
        let mut results: Vec<Routed<O>> = Vec::new();
        for delegate in &self.delegates {
            for routed in delegate.find_all(ctx) {
                let mapped = (self.map_result)(routed);
                // De-duplicate on the mapped result, keeping first-seen
                // order: the same logical route may be reachable through
                // more than one delegate.
                if !results.contains(&mapped) {
                    results.push(mapped);
                }
            }
        }
        results
    }

    fn register_metrics(&self, registry: &mut dyn MeterRegistry, prefix: &MeterIdPrefix) -> bool {
        match self.delegates.len() {
            0 => false,
            // A single delegate keeps the prefix unchanged: an index tag
            // would add meaningless cardinality.
            1 => self.delegates[0].register_metrics(registry, prefix),
            _ => {
                let mut registered = false;
                for (index, delegate) in self.delegates.iter().enumerate() {
                    let tagged = prefix.with_tag("index", index.to_string());
                    if delegate.register_metrics(registry, &tagged) {
                        registered = true;
                    }
                }
                registered
            }
        }
    }

    fn dump(&self, out: &mut dyn io::Write) -> io::Result<()> {
        // Raw diagnostic concatenation; no merging or de-duplication.
        for delegate in &self.delegates {
            delegate.dump(out)?;
        }
        Ok(())
    }
}
