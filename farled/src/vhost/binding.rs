//! Fluent binding builders for routes and route-scoped decorators.
//!
//! Service binding and decorator binding share one criteria vocabulary:
//! path patterns, path prefixes, method sets, per-method shorthands, and
//! media-type constraints accumulate identically, and `build` resolves
//! them into concrete [`Route`]s registered with the owning virtual host.
//!
//! Builders are consumed by value. Once `build` has run, the criteria are
//! gone and the builder cannot be touched again — the post-build reuse
//! guard is the type system, not a runtime flag.

use std::collections::BTreeSet;
use std::sync::Arc;

use farled_core::{ConfigError, MediaType, Method, Route};

use crate::routing::MatchitPattern;
use crate::vhost::VirtualHostBuilder;
use crate::vhost::decorator::RouteDecoratingService;

enum PathSelection {
    Pattern(String),
    Prefix(String),
}

struct Selection {
    path: PathSelection,
    // A method shorthand pins its own method set; plain path criteria
    // inherit the builder-level one.
    methods: Option<BTreeSet<Method>>,
}

/// The criteria accumulator shared by both binding builders.
#[derive(Default)]
struct BindingCriteria {
    selections: Vec<Selection>,
    methods: BTreeSet<Method>,
    consumes: Vec<MediaType>,
    produces: Vec<MediaType>,
}

impl BindingCriteria {
    fn path(&mut self, pattern: &str) {
        self.selections.push(Selection {
            path: PathSelection::Pattern(pattern.to_string()),
            methods: None,
        });
    }

    fn path_prefix(&mut self, prefix: &str) {
        self.selections.push(Selection {
            path: PathSelection::Prefix(prefix.to_string()),
            methods: None,
        });
    }

    fn shorthand(&mut self, method: Method, pattern: &str) {
        self.selections.push(Selection {
            path: PathSelection::Pattern(pattern.to_string()),
            methods: Some(BTreeSet::from([method])),
        });
    }

    fn methods(&mut self, methods: impl IntoIterator<Item = Method>) {
        self.methods.extend(methods);
    }

    fn consumes(&mut self, types: impl IntoIterator<Item = MediaType>) {
        self.consumes.extend(types);
    }

    fn produces(&mut self, types: impl IntoIterator<Item = MediaType>) {
        self.produces.extend(types);
    }

    /// Resolve the accumulated criteria into one route per selection.
    fn resolve(self) -> Result<Vec<Route>, ConfigError> {
        if self.selections.is_empty() {
            return Err(ConfigError::EmptyBinding);
        }
        let mut routes = Vec::with_capacity(self.selections.len());
        for selection in self.selections {
            let matcher = match &selection.path {
                PathSelection::Pattern(pattern) => MatchitPattern::new(pattern.clone())?,
                PathSelection::Prefix(prefix) => MatchitPattern::prefix(prefix)?,
            };
            let methods = selection.methods.unwrap_or_else(|| self.methods.clone());
            routes.push(
                Route::builder()
                    .path(Arc::new(matcher))
                    .methods(methods)
                    .consumes(self.consumes.iter().cloned())
                    .produces(self.produces.iter().cloned())
                    .build()?,
            );
        }
        Ok(routes)
    }
}

macro_rules! criteria_methods {
    () => {
        /// Bind the given path pattern.
        pub fn path(mut self, pattern: &str) -> Self {
            self.criteria.path(pattern);
            self
        }

        /// Bind everything under `prefix` (expands to a wildcard-suffixed
        /// pattern).
        pub fn path_prefix(mut self, prefix: &str) -> Self {
            self.criteria.path_prefix(prefix);
            self
        }

        /// Restrict plain path criteria to the given methods.
        pub fn methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
            self.criteria.methods(methods);
            self
        }

        /// Bind `pattern` for `GET` only.
        pub fn get(mut self, pattern: &str) -> Self {
            self.criteria.shorthand(Method::GET, pattern);
            self
        }

        /// Bind `pattern` for `POST` only.
        pub fn post(mut self, pattern: &str) -> Self {
            self.criteria.shorthand(Method::POST, pattern);
            self
        }

        /// Bind `pattern` for `PUT` only.
        pub fn put(mut self, pattern: &str) -> Self {
            self.criteria.shorthand(Method::PUT, pattern);
            self
        }

        /// Bind `pattern` for `PATCH` only.
        pub fn patch(mut self, pattern: &str) -> Self {
            self.criteria.shorthand(Method::PATCH, pattern);
            self
        }

        /// Bind `pattern` for `DELETE` only.
        pub fn delete(mut self, pattern: &str) -> Self {
            self.criteria.shorthand(Method::DELETE, pattern);
            self
        }

        /// Bind `pattern` for `OPTIONS` only.
        pub fn options(mut self, pattern: &str) -> Self {
            self.criteria.shorthand(Method::OPTIONS, pattern);
            self
        }

        /// Bind `pattern` for `HEAD` only.
        pub fn head(mut self, pattern: &str) -> Self {
            self.criteria.shorthand(Method::HEAD, pattern);
            self
        }

        /// Bind `pattern` for `TRACE` only.
        pub fn trace(mut self, pattern: &str) -> Self {
            self.criteria.shorthand(Method::TRACE, pattern);
            self
        }

        /// Bind `pattern` for `CONNECT` only.
        pub fn connect(mut self, pattern: &str) -> Self {
            self.criteria.shorthand(Method::CONNECT, pattern);
            self
        }

        /// Restrict the binding to requests carrying one of these content
        /// types.
        pub fn consumes(mut self, types: impl IntoIterator<Item = MediaType>) -> Self {
            self.criteria.consumes(types);
            self
        }

        /// Declare the content types the bound target produces.
        pub fn produces(mut self, types: impl IntoIterator<Item = MediaType>) -> Self {
            self.criteria.produces(types);
            self
        }
    };
}

/// Binds a service to one or more routes, then returns control to the
/// owning [`VirtualHostBuilder`].
///
/// Created through [`VirtualHostBuilder::route`].
pub struct ServiceBindingBuilder<S> {
    owner: VirtualHostBuilder<S>,
    criteria: BindingCriteria,
}

impl<S: Clone + PartialEq + Send + Sync + 'static> ServiceBindingBuilder<S> {
    pub(crate) fn new(owner: VirtualHostBuilder<S>) -> Self {
        Self {
            owner,
            criteria: BindingCriteria::default(),
        }
    }

    criteria_methods!();

    /// Resolve the criteria, register one route per selection bound to
    /// `service`, and hand control back to the virtual-host builder.
    pub fn build(mut self, service: S) -> Result<VirtualHostBuilder<S>, ConfigError> {
        for route in self.criteria.resolve()? {
            self.owner.add_service_route(route, service.clone());
        }
        Ok(self.owner)
    }
}

/// Binds a decorator to one or more routes, then returns control to the
/// owning [`VirtualHostBuilder`].
///
/// Created through [`VirtualHostBuilder::route_decorator`]. The decorator
/// factory receives the eventual "next" service at dispatch time, once per
/// request, so it can close over per-chain state.
pub struct DecoratorBindingBuilder<S> {
    owner: VirtualHostBuilder<S>,
    criteria: BindingCriteria,
}

impl<S: Clone + PartialEq + Send + Sync + 'static> DecoratorBindingBuilder<S> {
    pub(crate) fn new(owner: VirtualHostBuilder<S>) -> Self {
        Self {
            owner,
            criteria: BindingCriteria::default(),
        }
    }

    criteria_methods!();

    /// Resolve the criteria, register one [`RouteDecoratingService`] per
    /// selection, and hand control back to the virtual-host builder.
    ///
    /// Binding order is declaration order: decorators registered earlier
    /// wrap later ones.
    pub fn build(
        mut self,
        decorator: impl Fn(S) -> S + Send + Sync + 'static,
    ) -> Result<VirtualHostBuilder<S>, ConfigError> {
        let decorator: Arc<dyn Fn(S) -> S + Send + Sync> = Arc::new(decorator);
        for route in self.criteria.resolve()? {
            self.owner
                .add_route_decorating_service(RouteDecoratingService::new(
                    route,
                    decorator.clone(),
                ));
        }
        Ok(self.owner)
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{FnService, get, request};
    use crate::vhost::VirtualHostBuilder;
    use farled_core::{ConfigError, MediaType, Method};

    type Svc = FnService<(), &'static str>;

    fn svc(label: &'static str) -> Svc {
        FnService::new(move |()| label)
    }

    #[test]
    fn empty_criteria_fail_fast() {
        let result = VirtualHostBuilder::new("example.com")
            .route()
            .build(svc("users"));
        assert_eq!(result.err(), Some(ConfigError::EmptyBinding));
    }

    #[test]
    fn one_route_per_selection() {
        let host = VirtualHostBuilder::new("example.com")
            .route()
            .get("/users/{id}")
            .post("/users")
            .build(svc("users"))
            .unwrap()
            .build()
            .unwrap();

        assert!(host.find(&get("/users/42")).unwrap().is_present());
        assert!(
            host.find(&request(Method::POST, "/users"))
                .unwrap()
                .is_present()
        );
        // The shorthand pinned POST; GET /users stays unmatched.
        assert!(!host.find(&get("/users")).unwrap().is_present());
    }

    #[test]
    fn builder_level_methods_apply_to_plain_paths_only() {
        let host = VirtualHostBuilder::new("example.com")
            .route()
            .path("/reports/{id}")
            .get("/health")
            .methods([Method::PUT, Method::DELETE])
            .build(svc("reports"))
            .unwrap()
            .build()
            .unwrap();

        assert!(
            host.find(&request(Method::PUT, "/reports/1"))
                .unwrap()
                .is_present()
        );
        assert!(!host.find(&get("/reports/1")).unwrap().is_present());
        // The GET shorthand is untouched by the builder-level set.
        assert!(host.find(&get("/health")).unwrap().is_present());
        assert!(
            !host
                .find(&request(Method::PUT, "/health"))
                .unwrap()
                .is_present()
        );
    }

    #[test]
    fn prefix_expands_to_wildcard_pattern() {
        let host = VirtualHostBuilder::new("example.com")
            .route()
            .path_prefix("/api")
            .build(svc("api"))
            .unwrap()
            .build()
            .unwrap();

        let routed = host.find(&get("/api/users/42")).unwrap();
        assert_eq!(routed.route().unwrap().pattern(), "/api/{*rest}");
        assert!(!host.find(&get("/other")).unwrap().is_present());
    }

    #[test]
    fn media_constraints_carry_into_the_routes() {
        let host = VirtualHostBuilder::new("example.com")
            .route()
            .path("/ingest")
            .consumes([MediaType::json()])
            .build(svc("ingest"))
            .unwrap()
            .build()
            .unwrap();

        let json = farled_core::RoutingContext::builder(Method::POST, "/ingest")
            .content_type(MediaType::json())
            .build();
        assert!(host.find(&json).unwrap().is_present());

        let text = farled_core::RoutingContext::builder(Method::POST, "/ingest")
            .content_type(MediaType::plain_text())
            .build();
        assert!(!host.find(&text).unwrap().is_present());
    }

    #[test]
    fn invalid_pattern_aborts_the_binding() {
        let result = VirtualHostBuilder::new("example.com")
            .route()
            .path("/users/{broken")
            .build(svc("users"));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPathPattern { .. })
        ));
    }
}
