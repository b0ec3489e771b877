//! Scope registry.
//!
//! The [`ScopeManager`] owns the universe of dependency and resolution scope
//! definitions for one execution context. It is populated once from a
//! validated [`ScopeManagerConfig`] and is purely a lookup table afterwards:
//! no per-request mutable state, safe to share across concurrent resolutions.

use indexmap::IndexMap;

use crate::canonical::fingerprint_hex;
use crate::config::{LookupMode, ScopeConfigError, ScopeManagerConfig};
use crate::selector::ScopeDependencySelector;
use crate::types::{DependencyScope, ResolutionScope, ScopeLabel};

/// Error for manager lookups in strict mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeManagerError {
    /// No dependency scope registered under the given id.
    #[error("unknown dependency scope: {0}")]
    UnknownDependencyScope(String),
    /// No resolution scope registered under the given id.
    #[error("unknown resolution scope: {0}")]
    UnknownResolutionScope(String),
}

/// Registry of dependency and resolution scopes.
///
/// Universes keep registration order, so listings are deterministic and
/// reflect the configuration as written.
#[derive(Debug, Clone)]
pub struct ScopeManager {
    id: String,
    lookup: LookupMode,
    dependency_scopes: IndexMap<ScopeLabel, DependencyScope>,
    resolution_scopes: IndexMap<String, ResolutionScope>,
    system_scope: Option<ScopeLabel>,
    fingerprint: String,
}

impl ScopeManager {
    /// Build a manager from a configuration, validating it whole.
    ///
    /// Checks: unique scope and resolution-scope ids, at most one system
    /// scope, resolution scopes reference only declared dependency scopes,
    /// well-formed activation windows. Any violation fails construction; a
    /// manager never exists in a half-valid state.
    pub fn new(config: ScopeManagerConfig) -> Result<Self, ScopeConfigError> {
        let fingerprint = fingerprint_hex(&config);

        let mut dependency_scopes = IndexMap::with_capacity(config.dependency_scopes.len());
        let mut system_scope: Option<ScopeLabel> = None;

        for declared in &config.dependency_scopes {
            let label = ScopeLabel::new(declared.id.as_str());
            if dependency_scopes.contains_key(&label) {
                return Err(ScopeConfigError::DuplicateDependencyScope(
                    declared.id.clone(),
                ));
            }
            if declared.system {
                if let Some(first) = &system_scope {
                    return Err(ScopeConfigError::MultipleSystemScopes {
                        first: first.as_str().to_string(),
                        second: declared.id.clone(),
                    });
                }
                system_scope = Some(label.clone());
            }
            dependency_scopes.insert(
                label.clone(),
                DependencyScope::new(label, declared.system),
            );
        }

        let mut resolution_scopes = IndexMap::with_capacity(config.resolution_scopes.len());

        for declared in &config.resolution_scopes {
            if resolution_scopes.contains_key(declared.id.as_str()) {
                return Err(ScopeConfigError::DuplicateResolutionScope(
                    declared.id.clone(),
                ));
            }
            for referenced in declared
                .included
                .iter()
                .flatten()
                .chain(declared.excluded.iter().flatten())
            {
                if !dependency_scopes.contains_key(referenced.as_str()) {
                    return Err(ScopeConfigError::UndeclaredScopeReference {
                        resolution_scope: declared.id.clone(),
                        scope: referenced.clone(),
                    });
                }
            }
            let window = declared
                .window()
                .map_err(|source| ScopeConfigError::InvalidWindow {
                    resolution_scope: declared.id.clone(),
                    source,
                })?;
            resolution_scopes.insert(
                declared.id.clone(),
                ResolutionScope::new(
                    declared.id.clone(),
                    declared.included_set(),
                    declared.excluded_set(),
                    window,
                ),
            );
        }

        tracing::debug!(
            manager = %config.id,
            dependency_scopes = dependency_scopes.len(),
            resolution_scopes = resolution_scopes.len(),
            %fingerprint,
            "scope manager constructed"
        );

        Ok(Self {
            id: config.id,
            lookup: config.lookup,
            dependency_scopes,
            resolution_scopes,
            system_scope,
            fingerprint,
        })
    }

    /// The manager label.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The configured lookup mode.
    pub fn lookup_mode(&self) -> LookupMode {
        self.lookup
    }

    /// Fingerprint of the configuration this manager was built from.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// The system scope, if this universe declares one.
    ///
    /// Dependencies in this scope are filesystem-resident: no repository
    /// descriptor, always graph leaves. Collection engines must special-case
    /// them (presence check instead of metadata fetch) rather than treating
    /// the label as an ordinary scope.
    pub fn system_scope(&self) -> Option<&DependencyScope> {
        self.system_scope
            .as_ref()
            .and_then(|label| self.dependency_scopes.get(label))
    }

    /// Look up a dependency scope by label.
    ///
    /// Strict mode turns a miss into [`ScopeManagerError`]; lenient mode
    /// returns `Ok(None)` and leaves the fallback to the caller.
    pub fn dependency_scope(
        &self,
        id: &str,
    ) -> Result<Option<&DependencyScope>, ScopeManagerError> {
        match self.dependency_scopes.get(id) {
            Some(scope) => Ok(Some(scope)),
            None => match self.lookup {
                LookupMode::Lenient => Ok(None),
                LookupMode::Strict => {
                    Err(ScopeManagerError::UnknownDependencyScope(id.to_string()))
                }
            },
        }
    }

    /// Look up a resolution scope by id. Same contract as
    /// [`dependency_scope`](Self::dependency_scope).
    pub fn resolution_scope(
        &self,
        id: &str,
    ) -> Result<Option<&ResolutionScope>, ScopeManagerError> {
        match self.resolution_scopes.get(id) {
            Some(scope) => Ok(Some(scope)),
            None => match self.lookup {
                LookupMode::Lenient => Ok(None),
                LookupMode::Strict => {
                    Err(ScopeManagerError::UnknownResolutionScope(id.to_string()))
                }
            },
        }
    }

    /// All dependency scopes, in registration order.
    pub fn dependency_scope_universe(&self) -> Vec<&DependencyScope> {
        self.dependency_scopes.values().collect()
    }

    /// All resolution scopes, in registration order.
    pub fn resolution_scope_universe(&self) -> Vec<&ResolutionScope> {
        self.resolution_scopes.values().collect()
    }

    /// Activate a resolution scope: resolve it and build the root selector
    /// (depth 0) to hand to a collection engine.
    pub fn selector(
        &self,
        resolution_scope_id: &str,
    ) -> Result<Option<ScopeDependencySelector>, ScopeManagerError> {
        let selector = self
            .resolution_scope(resolution_scope_id)?
            .map(ScopeDependencySelector::for_scope);
        if selector.is_some() {
            tracing::debug!(
                manager = %self.id,
                resolution_scope = resolution_scope_id,
                "resolution scope activated"
            );
        }
        Ok(selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DependencyScopeConfig, ResolutionScopeConfig};
    use crate::types::DepthWindowError;

    fn standard_strict() -> ScopeManager {
        ScopeManager::new(ScopeManagerConfig::standard().with_lookup(LookupMode::Strict)).unwrap()
    }

    #[test]
    fn test_strict_lookup_fails_on_unknown_scope() {
        let manager = standard_strict();
        assert_eq!(
            manager.dependency_scope("bogus"),
            Err(ScopeManagerError::UnknownDependencyScope(
                "bogus".to_string()
            ))
        );
        assert_eq!(
            manager.resolution_scope("bogus"),
            Err(ScopeManagerError::UnknownResolutionScope(
                "bogus".to_string()
            ))
        );
    }

    #[test]
    fn test_lenient_lookup_returns_absent() {
        let manager = ScopeManager::new(ScopeManagerConfig::standard()).unwrap();
        assert_eq!(manager.dependency_scope("bogus"), Ok(None));
        assert_eq!(manager.resolution_scope("bogus"), Ok(None));
    }

    #[test]
    fn test_known_scope_resolves_in_both_modes() {
        let strict = standard_strict();
        let lenient = ScopeManager::new(ScopeManagerConfig::standard()).unwrap();

        assert!(strict.dependency_scope("compile").unwrap().is_some());
        assert!(lenient.dependency_scope("compile").unwrap().is_some());
    }

    #[test]
    fn test_system_scope_matches_lookup() {
        let manager = ScopeManager::new(ScopeManagerConfig::standard()).unwrap();

        let by_lookup = manager.dependency_scope("system").unwrap().unwrap();
        let by_accessor = manager.system_scope().unwrap();

        assert_eq!(by_lookup, by_accessor);
        assert!(by_accessor.is_system());
    }

    #[test]
    fn test_universe_without_system_scope() {
        let manager = ScopeManager::new(ScopeManagerConfig::standard_without_system()).unwrap();
        assert!(manager.system_scope().is_none());
    }

    #[test]
    fn test_universes_keep_registration_order() {
        let manager = ScopeManager::new(ScopeManagerConfig::standard()).unwrap();

        let labels: Vec<_> = manager
            .dependency_scope_universe()
            .iter()
            .map(|s| s.id().as_str().to_string())
            .collect();
        assert_eq!(labels, ["compile", "provided", "runtime", "test", "system"]);

        let ids: Vec<_> = manager
            .resolution_scope_universe()
            .iter()
            .map(|s| s.id().to_string())
            .collect();
        assert_eq!(
            ids,
            ["main-compile", "main-runtime", "test-compile", "test-runtime"]
        );
    }

    #[test]
    fn test_duplicate_dependency_scope_rejected() {
        let config = ScopeManagerConfig::new("dup")
            .with_dependency_scope(DependencyScopeConfig::new("compile"))
            .with_dependency_scope(DependencyScopeConfig::new("compile"));
        assert_eq!(
            ScopeManager::new(config).unwrap_err(),
            ScopeConfigError::DuplicateDependencyScope("compile".to_string())
        );
    }

    #[test]
    fn test_duplicate_resolution_scope_rejected() {
        let config = ScopeManagerConfig::new("dup")
            .with_dependency_scope(DependencyScopeConfig::new("compile"))
            .with_resolution_scope(ResolutionScopeConfig::new("main"))
            .with_resolution_scope(ResolutionScopeConfig::new("main"));
        assert_eq!(
            ScopeManager::new(config).unwrap_err(),
            ScopeConfigError::DuplicateResolutionScope("main".to_string())
        );
    }

    #[test]
    fn test_second_system_scope_rejected() {
        let config = ScopeManagerConfig::new("two-systems")
            .with_dependency_scope(DependencyScopeConfig::system("system"))
            .with_dependency_scope(DependencyScopeConfig::system("local"));
        assert_eq!(
            ScopeManager::new(config).unwrap_err(),
            ScopeConfigError::MultipleSystemScopes {
                first: "system".to_string(),
                second: "local".to_string(),
            }
        );
    }

    #[test]
    fn test_undeclared_scope_reference_rejected() {
        let config = ScopeManagerConfig::new("dangling")
            .with_dependency_scope(DependencyScopeConfig::new("compile"))
            .with_resolution_scope(ResolutionScopeConfig::new("main").included(["runtime"]));
        assert_eq!(
            ScopeManager::new(config).unwrap_err(),
            ScopeConfigError::UndeclaredScopeReference {
                resolution_scope: "main".to_string(),
                scope: "runtime".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_window_rejected_at_construction() {
        let config = ScopeManagerConfig::new("bad-window")
            .with_dependency_scope(DependencyScopeConfig::new("compile"))
            .with_resolution_scope(ResolutionScopeConfig::new("main").apply_from(0));
        assert_eq!(
            ScopeManager::new(config).unwrap_err(),
            ScopeConfigError::InvalidWindow {
                resolution_scope: "main".to_string(),
                source: DepthWindowError::StartsBeforeRoot(0),
            }
        );
    }

    #[test]
    fn test_selector_activation() {
        let manager = ScopeManager::new(ScopeManagerConfig::standard()).unwrap();

        let selector = manager.selector("main-runtime").unwrap().unwrap();
        assert_eq!(selector.depth(), 0);
        assert_eq!(
            selector.window(),
            manager
                .resolution_scope("main-runtime")
                .unwrap()
                .unwrap()
                .window()
        );

        assert_eq!(manager.selector("bogus"), Ok(None));
    }

    #[test]
    fn test_fingerprint_tracks_configuration() {
        let a = ScopeManager::new(ScopeManagerConfig::standard()).unwrap();
        let b = ScopeManager::new(ScopeManagerConfig::standard()).unwrap();
        let c = ScopeManager::new(ScopeManagerConfig::standard_without_system()).unwrap();

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
