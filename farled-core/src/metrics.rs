//! The metrics registration contract.
//!
//! Routers expose their composed structure to a metrics backend through a
//! deliberately small seam: a hierarchical meter identifier and a registry
//! trait that accepts per-route registrations. Backend wiring (exporters,
//! recorder installation) lives outside this crate; the `farled` crate
//! ships a `metrics`-facade-backed implementation and a recording spy for
//! tests.

use std::fmt;

use crate::route::Route;

/// A hierarchical meter identifier: a dotted name plus ordered tags.
///
/// Composite routers append a positional `index` tag per delegate when
/// more than one delegate registers, so meters reflect the composed
/// structure rather than a single flattened table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeterIdPrefix {
    name: String,
    tags: Vec<(String, String)>,
}

impl MeterIdPrefix {
    /// Create a prefix with the given dotted name and no tags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
        }
    }

    /// The dotted meter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tags, in the order they were appended.
    pub fn tags(&self) -> &[(String, String)] {
        &self.tags
    }

    /// A copy of this prefix with one more tag appended.
    pub fn with_tag(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut tags = self.tags.clone();
        tags.push((key.into(), value.into()));
        Self {
            name: self.name.clone(),
            tags,
        }
    }
}

impl fmt::Display for MeterIdPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.tags.is_empty() {
            write!(f, "{{")?;
            for (i, (k, v)) in self.tags.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, "}}")?;
        }
        Ok(())
    }
}

/// The registration sink routers write their meters into.
///
/// Called once per route at startup, never on the request path.
pub trait MeterRegistry {
    /// Register the meters for one route under `id`.
    fn register_route(&mut self, id: &MeterIdPrefix, route: &Route);
}

#[cfg(test)]
mod tests {
    use super::MeterIdPrefix;

    #[test]
    fn with_tag_appends_without_mutating() {
        let base = MeterIdPrefix::new("farled.router");
        let tagged = base.with_tag("index", "0").with_tag("vhost", "example.com");

        assert!(base.tags().is_empty());
        assert_eq!(
            tagged.tags(),
            [
                ("index".to_string(), "0".to_string()),
                ("vhost".to_string(), "example.com".to_string()),
            ]
        );
        assert_eq!(tagged.name(), "farled.router");
    }

    #[test]
    fn display_includes_tags() {
        let id = MeterIdPrefix::new("farled.router").with_tag("index", "1");
        assert_eq!(id.to_string(), "farled.router{index=1}");
        assert_eq!(MeterIdPrefix::new("farled.router").to_string(), "farled.router");
    }
}
