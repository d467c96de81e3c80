//! Route definition and the path-matcher seam.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::context::RoutingContext;
use crate::error::ConfigError;
use crate::media::MediaType;
use crate::method::Method;
use crate::routed::PathParams;

/// A compiled path pattern.
///
/// The pattern compiler itself lives outside this crate (the `farled`
/// crate ships a `matchit`-backed implementation); the routing core only
/// needs to test a request path against the compiled form and to recover
/// the original pattern string for equality and diagnostics.
pub trait PathMatcher: Send + Sync {
    /// The pattern as written, e.g. `/users/{id}`.
    ///
    /// Two routes compiled from the same pattern string are considered to
    /// have the same pattern, whatever compiler produced them.
    fn pattern(&self) -> &str;

    /// Match `path` against the pattern, extracting path parameters in
    /// declaration order. Returns `None` when the path does not match.
    fn captures(&self, path: &str) -> Option<PathParams>;
}

/// Immutable match criteria identifying one dispatch target.
///
/// A route combines a compiled path pattern with an ordered set of HTTP
/// methods (empty = all methods) and media-type constraints on what the
/// target consumes (empty = any) and produces (empty = unspecified).
///
/// Equality and hashing are structural — pattern string, methods, and
/// media constraints — so identical routes built through different paths
/// compare equal. Match de-duplication relies on this.
#[derive(Clone)]
pub struct Route {
    matcher: Arc<dyn PathMatcher>,
    methods: BTreeSet<Method>,
    consumes: Vec<MediaType>,
    produces: Vec<MediaType>,
}

impl Route {
    /// Start building a route.
    pub fn builder() -> RouteBuilder {
        RouteBuilder::default()
    }

    /// The pattern string this route was compiled from.
    pub fn pattern(&self) -> &str {
        self.matcher.pattern()
    }

    /// The accepted methods. Empty means every method is accepted.
    pub fn methods(&self) -> &BTreeSet<Method> {
        &self.methods
    }

    /// Media types this route's target accepts. Empty means any.
    pub fn consumes(&self) -> &[MediaType] {
        &self.consumes
    }

    /// Media types this route's target can produce. Empty means unspecified.
    pub fn produces(&self) -> &[MediaType] {
        &self.produces
    }

    /// Match this route against a request context.
    ///
    /// All criteria combine with AND semantics: the method set, the
    /// consumes/produces constraints, and finally the path pattern. Returns
    /// the extracted path parameters on a match, `None` otherwise. Never
    /// mutates the context.
    pub fn apply(&self, ctx: &RoutingContext) -> Option<PathParams> {
        if !self.methods.is_empty() && !self.methods.contains(&ctx.method()) {
            return None;
        }
        if !self.consumes.is_empty() {
            // A request without a content type cannot satisfy a consumes
            // constraint.
            let content_type = ctx.content_type()?;
            if !self.consumes.iter().any(|c| c.covers(content_type)) {
                return None;
            }
        }
        if !self.produces.is_empty() && !ctx.accepted_types().is_empty() {
            let acceptable = ctx
                .accepted_types()
                .iter()
                .any(|accept| self.produces.iter().any(|p| accept.covers(p)));
            if !acceptable {
                return None;
            }
        }
        self.matcher.captures(ctx.path())
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.pattern() == other.pattern()
            && self.methods == other.methods
            && self.consumes == other.consumes
            && self.produces == other.produces
    }
}

impl Eq for Route {}

impl Hash for Route {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pattern().hash(state);
        self.methods.hash(state);
        self.consumes.hash(state);
        self.produces.hash(state);
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern())
            .field("methods", &self.methods)
            .field("consumes", &self.consumes)
            .field("produces", &self.produces)
            .finish()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.methods.is_empty() {
            write!(f, "*")?;
        } else {
            let mut first = true;
            for method in &self.methods {
                if !first {
                    write!(f, ",")?;
                }
                write!(f, "{method}")?;
                first = false;
            }
        }
        write!(f, " {}", self.pattern())?;
        if !self.consumes.is_empty() {
            write!(f, " consumes=[")?;
            for (i, mt) in self.consumes.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{mt}")?;
            }
            write!(f, "]")?;
        }
        if !self.produces.is_empty() {
            write!(f, " produces=[")?;
            for (i, mt) in self.produces.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{mt}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// Builder for [`Route`]. Consumed by [`RouteBuilder::build`].
#[derive(Default)]
pub struct RouteBuilder {
    matcher: Option<Arc<dyn PathMatcher>>,
    methods: BTreeSet<Method>,
    consumes: Vec<MediaType>,
    produces: Vec<MediaType>,
}

impl RouteBuilder {
    /// Set the compiled path pattern.
    pub fn path(mut self, matcher: Arc<dyn PathMatcher>) -> Self {
        self.matcher = Some(matcher);
        self
    }

    /// Restrict the route to the given methods. Not calling this (or
    /// passing an empty set) accepts every method.
    pub fn methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.methods.extend(methods);
        self
    }

    /// Restrict the route to requests carrying one of these content types.
    pub fn consumes(mut self, types: impl IntoIterator<Item = MediaType>) -> Self {
        self.consumes.extend(types);
        self
    }

    /// Declare the content types the route's target can produce.
    pub fn produces(mut self, types: impl IntoIterator<Item = MediaType>) -> Self {
        self.produces.extend(types);
        self
    }

    /// Build the route. Fails if no path pattern was set.
    pub fn build(self) -> Result<Route, ConfigError> {
        let matcher = self.matcher.ok_or(ConfigError::MissingPathPattern)?;
        Ok(Route {
            matcher,
            methods: self.methods,
            consumes: self.consumes,
            produces: self.produces,
        })
    }
}
