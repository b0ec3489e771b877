//! Dependency edge types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::label::ScopeLabel;

/// Target identity of a dependency edge.
///
/// Implements `Ord` for deterministic ordering: (group, name, version).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtifactRef {
    /// Group / namespace.
    pub group: String,
    /// Artifact name.
    pub name: String,
    /// Version string, compared literally.
    pub version: String,
}

impl ArtifactRef {
    /// Create a new artifact reference.
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

/// Minimal edge surface read by selectors.
///
/// Collection engines carry richer edge shapes (type, classifier,
/// exclusions); selectors only ever look at the scope label, so this is the
/// whole contract between the two.
pub trait ScopedEdge {
    /// Scope label carried by the edge. The empty label is an ordinary label.
    fn scope(&self) -> &ScopeLabel;
}

/// A declared dependency edge: target identity plus scope label.
///
/// Implements `Ord` for deterministic ordering: (target, scope).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// The dependency this edge points at.
    pub target: ArtifactRef,
    /// Scope label classifying the edge.
    pub scope: ScopeLabel,
}

impl DependencyEdge {
    /// Create a new dependency edge.
    pub fn new(target: ArtifactRef, scope: impl Into<ScopeLabel>) -> Self {
        Self {
            target,
            scope: scope.into(),
        }
    }

    /// Create a root edge: the conventional empty scope label.
    pub fn root(target: ArtifactRef) -> Self {
        Self::new(target, "")
    }
}

impl ScopedEdge for DependencyEdge {
    fn scope(&self) -> &ScopeLabel {
        &self.scope
    }
}

impl fmt::Display for DependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scope.is_empty() {
            write!(f, "{}", self.target)
        } else {
            write!(f, "{} ({})", self.target, self.scope)
        }
    }
}

// Canonical ordering: target, then scope
impl PartialOrd for DependencyEdge {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DependencyEdge {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.target.cmp(&other.target) {
            std::cmp::Ordering::Equal => self.scope.cmp(&other.scope),
            ord => ord,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aref(name: &str) -> ArtifactRef {
        ArtifactRef::new("org.example", name, "1.0")
    }

    #[test]
    fn test_edge_ordering() {
        let e1 = DependencyEdge::new(aref("alpha"), "compile");
        let e2 = DependencyEdge::new(aref("beta"), "compile");
        let e3 = DependencyEdge::new(aref("beta"), "test");

        assert!(e1 < e2);
        assert!(e2 < e3);
    }

    #[test]
    fn test_root_edge_has_empty_scope() {
        let root = DependencyEdge::root(aref("app"));
        assert!(root.scope().is_empty());
    }

    #[test]
    fn test_display() {
        let edge = DependencyEdge::new(aref("alpha"), "runtime");
        assert_eq!(edge.to_string(), "org.example:alpha:1.0 (runtime)");

        let root = DependencyEdge::root(aref("app"));
        assert_eq!(root.to_string(), "org.example:app:1.0");
    }
}
