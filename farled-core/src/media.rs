//! Media types for content negotiation during route matching.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A media type (`type/subtype`) usable as a match criterion.
///
/// Either half may be the `*` wildcard. Matching is asymmetric: the route's
/// criterion may be a wildcard that covers a concrete request type, e.g.
/// `application/*` matches `application/json`.
///
/// Parameters (`; charset=...`) are not part of route matching and are
/// rejected at parse time so they cannot silently change equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType {
    kind: String,
    subtype: String,
}

impl MediaType {
    /// Create a media type from its two halves.
    pub fn new(kind: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            kind: kind.into().to_ascii_lowercase(),
            subtype: subtype.into().to_ascii_lowercase(),
        }
    }

    /// `application/json`.
    pub fn json() -> Self {
        Self::new("application", "json")
    }

    /// `text/plain`.
    pub fn plain_text() -> Self {
        Self::new("text", "plain")
    }

    /// `*/*`.
    pub fn any() -> Self {
        Self::new("*", "*")
    }

    /// The primary type, e.g. `application`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The subtype, e.g. `json`.
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Whether this media type, used as a criterion, covers `other`.
    ///
    /// Wildcards on *this* side match anything in that position.
    pub fn covers(&self, other: &MediaType) -> bool {
        (self.kind == "*" || self.kind == other.kind)
            && (self.subtype == "*" || self.subtype == other.subtype)
    }
}

impl FromStr for MediaType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidMediaType(s.to_string());
        let (kind, subtype) = s.split_once('/').ok_or_else(invalid)?;
        if kind.is_empty() || subtype.is_empty() || subtype.contains('/') || s.contains(';') {
            return Err(invalid());
        }
        Ok(MediaType::new(kind, subtype))
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.subtype)
    }
}

#[cfg(test)]
mod tests {
    use super::MediaType;

    #[test]
    fn parses_and_normalizes_case() {
        let mt: MediaType = "Application/JSON".parse().unwrap();
        assert_eq!(mt, MediaType::json());
        assert_eq!(mt.to_string(), "application/json");
    }

    #[test]
    fn rejects_malformed_types() {
        assert!("application".parse::<MediaType>().is_err());
        assert!("a/b/c".parse::<MediaType>().is_err());
        assert!("text/plain; charset=utf-8".parse::<MediaType>().is_err());
    }

    #[test]
    fn wildcard_coverage() {
        let any = MediaType::any();
        let app_any = MediaType::new("application", "*");
        let json = MediaType::json();

        assert!(any.covers(&json));
        assert!(app_any.covers(&json));
        assert!(!app_any.covers(&MediaType::plain_text()));
        // Coverage is directional: a concrete type does not cover a wildcard.
        assert!(!json.covers(&app_any));
    }
}
