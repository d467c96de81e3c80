//! Matchit-based path pattern implementation.
//!
//! Compiles the `{param}` / `{*rest}` pattern syntax once at build time
//! and exposes it behind the [`PathMatcher`] seam of `farled-core`.

use farled_core::{ConfigError, PathMatcher, PathParams};
use matchit::Router as InnerRouter;

/// A compiled path pattern backed by `matchit`.
///
/// Supports named parameters (`/users/{id}`) and a trailing catch-all
/// (`/files/{*path}`). The original pattern string is retained: route
/// equality and diagnostics work on it, never on the compiled form.
pub struct MatchitPattern {
    pattern: String,
    router: InnerRouter<()>,
}

impl MatchitPattern {
    /// Compile `pattern`. Fails with a build-time error if `matchit`
    /// rejects the syntax.
    pub fn new(pattern: impl Into<String>) -> Result<Self, ConfigError> {
        let pattern = pattern.into();
        let mut router = InnerRouter::new();
        router
            .insert(pattern.clone(), ())
            .map_err(|e| ConfigError::InvalidPathPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self { pattern, router })
    }

    /// Compile a pattern matching everything under `prefix`, by expanding
    /// the prefix to a wildcard-suffixed pattern (`/api` becomes
    /// `/api/{*rest}`).
    pub fn prefix(prefix: &str) -> Result<Self, ConfigError> {
        let trimmed = prefix.trim_end_matches('/');
        Self::new(format!("{trimmed}/{{*rest}}"))
    }
}

impl PathMatcher for MatchitPattern {
    fn pattern(&self) -> &str {
        &self.pattern
    }

    fn captures(&self, path: &str) -> Option<PathParams> {
        let matched = self.router.at(path).ok()?;
        Some(matched.params.iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::MatchitPattern;
    use farled_core::PathMatcher;

    #[test]
    fn extracts_params_in_declaration_order() {
        let pattern = MatchitPattern::new("/orgs/{org}/repos/{repo}").unwrap();
        let params = pattern.captures("/orgs/acme/repos/farled").unwrap();

        let pairs: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(pairs, [("org", "acme"), ("repo", "farled")]);
    }

    #[test]
    fn no_match_returns_none() {
        let pattern = MatchitPattern::new("/users/{id}").unwrap();
        assert!(pattern.captures("/users").is_none());
        assert!(pattern.captures("/users/1/posts").is_none());
    }

    #[test]
    fn prefix_expands_to_wildcard() {
        let pattern = MatchitPattern::prefix("/api/users/").unwrap();
        assert_eq!(pattern.pattern(), "/api/users/{*rest}");

        let params = pattern.captures("/api/users/42/orders").unwrap();
        assert_eq!(params.get("rest"), Some("42/orders"));
        assert!(pattern.captures("/api/orders").is_none());
    }

    #[test]
    fn invalid_syntax_is_a_config_error() {
        assert!(MatchitPattern::new("/users/{unclosed").is_err());
    }
}
