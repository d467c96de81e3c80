//! The outcome of a route match attempt.

use crate::route::Route;

/// Path parameters extracted from a matched pattern.
///
/// Keys are unique and iteration order is the declaration order of the
/// parameters in the pattern, which matters for diagnostics and for the
/// structural equality used in match de-duplication.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathParams {
    entries: Vec<(String, String)>,
}

impl PathParams {
    /// An empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no parameters were extracted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();
        for (k, v) in iter {
            let k = k.into();
            // Keys are unique; a later occurrence replaces the earlier value
            // without disturbing declaration order.
            match entries.iter_mut().find(|(existing, _)| *existing == k) {
                Some((_, slot)) => *slot = v.into(),
                None => entries.push((k, v.into())),
            }
        }
        Self { entries }
    }
}

/// The outcome of a match attempt: either empty, or a matched [`Route`]
/// plus extracted path parameters plus an associated value.
///
/// The associated value is typically a service or a handler-producing
/// value; the routing core never inspects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed<T> {
    inner: Option<Match<T>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Match<T> {
    route: Route,
    params: PathParams,
    value: T,
}

impl<T> Routed<T> {
    /// The empty result: no route matched.
    pub fn empty() -> Self {
        Self { inner: None }
    }

    /// A present result for `route` with the extracted `params` and the
    /// route's associated `value`.
    pub fn new(route: Route, params: PathParams, value: T) -> Self {
        Self {
            inner: Some(Match {
                route,
                params,
                value,
            }),
        }
    }

    /// Whether a route matched.
    pub fn is_present(&self) -> bool {
        self.inner.is_some()
    }

    /// The matched route, if any.
    pub fn route(&self) -> Option<&Route> {
        self.inner.as_ref().map(|m| &m.route)
    }

    /// The extracted path parameters, if a route matched.
    pub fn path_params(&self) -> Option<&PathParams> {
        self.inner.as_ref().map(|m| &m.params)
    }

    /// Shorthand for looking up one path parameter on a present result.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.path_params().and_then(|p| p.get(name))
    }

    /// The associated value, if a route matched.
    pub fn value(&self) -> Option<&T> {
        self.inner.as_ref().map(|m| &m.value)
    }

    /// Consume the result, yielding the associated value of a present match.
    pub fn into_value(self) -> Option<T> {
        self.inner.map(|m| m.value)
    }

    /// Transform the associated value, preserving route and parameters.
    ///
    /// An empty result stays empty. This is the building block for the
    /// composite router's result mapping.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Routed<U> {
        Routed {
            inner: self.inner.map(|m| Match {
                route: m.route,
                params: m.params,
                value: f(m.value),
            }),
        }
    }
}
