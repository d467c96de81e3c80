//! Per-request routing context.

use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;
use crate::media::MediaType;
use crate::method::Method;

/// The read-only, per-request view of everything relevant to route
/// matching.
///
/// Constructed once per incoming request by the transport layer, handed to
/// the routers, and discarded after dispatch. Routers never mutate it.
///
/// Besides the plain request attributes, the context carries two pieces of
/// routing-specific state:
///
/// - a CORS preflight flag: an unmatched preflight must fail with 403
///   rather than not-found;
/// - an optional *deferred cause*: a failure detected in an earlier phase
///   (e.g. malformed encoding) that must be surfaced only if routing
///   itself finds no match, so it can never mask a route that would have
///   matched.
#[derive(Clone)]
pub struct RoutingContext {
    path: String,
    method: Method,
    query: Option<String>,
    content_type: Option<MediaType>,
    accepted_types: Vec<MediaType>,
    cors_preflight: bool,
    deferred_cause: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl RoutingContext {
    /// Start building a context for `method` and the normalized `path`.
    pub fn builder(method: Method, path: impl Into<String>) -> RoutingContextBuilder {
        RoutingContextBuilder {
            ctx: RoutingContext {
                path: path.into(),
                method,
                query: None,
                content_type: None,
                accepted_types: Vec::new(),
                cors_preflight: false,
                deferred_cause: None,
            },
        }
    }

    /// The normalized request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The raw query string, if the request carried one.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The request body's content type, if any.
    pub fn content_type(&self) -> Option<&MediaType> {
        self.content_type.as_ref()
    }

    /// The response content types the client accepts, in preference order.
    /// Empty means the client stated no preference.
    pub fn accepted_types(&self) -> &[MediaType] {
        &self.accepted_types
    }

    /// Whether this request is a CORS preflight.
    pub fn is_cors_preflight(&self) -> bool {
        self.cors_preflight
    }

    /// The failure deferred from an earlier phase, if one was recorded.
    pub fn deferred_cause(&self) -> Option<&Arc<dyn std::error::Error + Send + Sync>> {
        self.deferred_cause.as_ref()
    }
}

impl fmt::Debug for RoutingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingContext")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("content_type", &self.content_type)
            .field("accepted_types", &self.accepted_types)
            .field("cors_preflight", &self.cors_preflight)
            .field("deferred_cause", &self.deferred_cause.as_ref().map(|e| e.to_string()))
            .finish()
    }
}

/// Builder for [`RoutingContext`], used by the transport layer.
pub struct RoutingContextBuilder {
    ctx: RoutingContext,
}

impl RoutingContextBuilder {
    /// Set the raw query string.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.ctx.query = Some(query.into());
        self
    }

    /// Set the request body's content type.
    pub fn content_type(mut self, content_type: MediaType) -> Self {
        self.ctx.content_type = Some(content_type);
        self
    }

    /// Set the response content types the client accepts.
    pub fn accepted_types(mut self, types: impl IntoIterator<Item = MediaType>) -> Self {
        self.ctx.accepted_types = types.into_iter().collect();
        self
    }

    /// Mark the request as a CORS preflight.
    pub fn cors_preflight(mut self) -> Self {
        self.ctx.cors_preflight = true;
        self
    }

    /// Record a failure detected before routing. It surfaces only if no
    /// route matches.
    pub fn deferred_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.ctx.deferred_cause = Some(Arc::from(cause.into()));
        self
    }

    /// Finish building the context.
    pub fn build(self) -> RoutingContext {
        self.ctx
    }
}

#[cfg(test)]
mod tests {
    use super::RoutingContext;
    use crate::media::MediaType;
    use crate::method::Method;

    #[test]
    fn builder_defaults() {
        let ctx = RoutingContext::builder(Method::GET, "/users/42").build();
        assert_eq!(ctx.path(), "/users/42");
        assert_eq!(ctx.method(), Method::GET);
        assert_eq!(ctx.query(), None);
        assert!(ctx.content_type().is_none());
        assert!(ctx.accepted_types().is_empty());
        assert!(!ctx.is_cors_preflight());
        assert!(ctx.deferred_cause().is_none());
    }

    #[test]
    fn builder_records_all_attributes() {
        let ctx = RoutingContext::builder(Method::POST, "/orders")
            .query("page=2")
            .content_type(MediaType::json())
            .accepted_types([MediaType::json(), MediaType::plain_text()])
            .cors_preflight()
            .deferred_cause("bad percent-encoding")
            .build();

        assert_eq!(ctx.query(), Some("page=2"));
        assert_eq!(ctx.content_type(), Some(&MediaType::json()));
        assert_eq!(ctx.accepted_types().len(), 2);
        assert!(ctx.is_cors_preflight());
        assert_eq!(
            ctx.deferred_cause().unwrap().to_string(),
            "bad percent-encoding"
        );
    }
}
