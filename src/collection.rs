//! Engine-facing collection shapes.
//!
//! Walking the dependency graph and resolving metadata or version conflicts
//! is owned by an external engine. This module only models the handoff: the
//! request a caller bundles for the engine, and the context value the engine
//! threads through selector derivation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::DependencyEdge;

/// A repository the collection engine may resolve metadata against.
///
/// System-scoped dependencies never resolve against any of these; engines
/// recognize them via
/// [`ScopeManager::system_scope`](crate::ScopeManager::system_scope) and
/// check file presence instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRepository {
    /// Repository identifier.
    pub id: String,
    /// Base URL.
    pub url: String,
}

impl RemoteRepository {
    /// Create a new repository descriptor.
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for RemoteRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.url)
    }
}

/// Everything a caller hands to a collection engine for one resolution.
///
/// Built during resolution-scope activation together with the root selector
/// (see [`ScopeManager::selector`](crate::ScopeManager::selector)); the
/// engine owns everything from there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectRequest {
    /// The root dependency, conventionally with the empty scope label.
    pub root: DependencyEdge,
    /// Already-resolved direct dependencies of the root, if known.
    pub direct_dependencies: Vec<DependencyEdge>,
    /// Dependency management entries (version pins the engine applies).
    pub managed_dependencies: Vec<DependencyEdge>,
    /// Repositories to resolve against.
    pub repositories: Vec<RemoteRepository>,
}

impl CollectRequest {
    /// Request for collecting the given root with no extra inputs.
    pub fn new(root: DependencyEdge) -> Self {
        Self {
            root,
            direct_dependencies: Vec::new(),
            managed_dependencies: Vec::new(),
            repositories: Vec::new(),
        }
    }

    /// Set the known direct dependencies.
    pub fn with_direct_dependencies(mut self, dependencies: Vec<DependencyEdge>) -> Self {
        self.direct_dependencies = dependencies;
        self
    }

    /// Set the managed dependencies.
    pub fn with_managed_dependencies(mut self, dependencies: Vec<DependencyEdge>) -> Self {
        self.managed_dependencies = dependencies;
        self
    }

    /// Set the repositories.
    pub fn with_repositories(mut self, repositories: Vec<RemoteRepository>) -> Self {
        self.repositories = repositories;
        self
    }
}

/// Collection state an engine passes when deriving child selectors.
///
/// Selectors never inspect it; it exists so engines and selectors agree on
/// a shape. Engines with richer state supply their own context type instead;
/// the [`DependencySelector`](crate::DependencySelector) contract is generic
/// over it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionContext {
    /// The accepted edge the engine is about to descend into, if any.
    pub parent: Option<DependencyEdge>,
}

impl CollectionContext {
    /// Context for descending into the given accepted edge.
    pub fn descending(parent: DependencyEdge) -> Self {
        Self {
            parent: Some(parent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArtifactRef;

    #[test]
    fn test_request_builder() {
        let root = DependencyEdge::root(ArtifactRef::new("org.example", "app", "1.0"));
        let request = CollectRequest::new(root.clone())
            .with_direct_dependencies(vec![DependencyEdge::new(
                ArtifactRef::new("org.example", "lib", "2.0"),
                "compile",
            )])
            .with_repositories(vec![RemoteRepository::new(
                "central",
                "https://repo.example.org/releases",
            )]);

        assert_eq!(request.root, root);
        assert_eq!(request.direct_dependencies.len(), 1);
        assert_eq!(request.managed_dependencies.len(), 0);
        assert_eq!(request.repositories[0].id, "central");
    }

    #[test]
    fn test_context_is_plain_state() {
        let edge = DependencyEdge::new(ArtifactRef::new("org.example", "lib", "2.0"), "compile");
        let context = CollectionContext::descending(edge.clone());
        assert_eq!(context.parent, Some(edge));
        assert_eq!(CollectionContext::default().parent, None);
    }
}
