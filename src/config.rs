//! Scope manager configuration.
//!
//! A [`ScopeManagerConfig`] declares the whole scope universe up front: the
//! dependency scopes that exist, the resolution scopes that filter them, and
//! the lookup mode. [`ScopeManager::new`](crate::ScopeManager::new) validates
//! the configuration once and is read-only afterwards.
//!
//! Two presets cover the common build-tool universe, one with a system scope
//! and one without; hosts with other needs deserialize their own config from
//! JSON.

use serde::{Deserialize, Serialize};

use crate::types::{DepthWindow, DepthWindowError, ScopeSet};

/// Behavior of manager lookups for unknown ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// Unknown ids surface as an error at lookup time.
    Strict,
    /// Unknown ids return an absent result; the caller decides the fallback.
    #[default]
    Lenient,
}

/// Error validating a scope manager configuration.
///
/// Raised by [`ScopeManager::new`](crate::ScopeManager::new); a manager is
/// never constructed from an invalid configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeConfigError {
    /// Two dependency scopes share an id.
    #[error("duplicate dependency scope: {0}")]
    DuplicateDependencyScope(String),
    /// Two resolution scopes share an id.
    #[error("duplicate resolution scope: {0}")]
    DuplicateResolutionScope(String),
    /// More than one scope is flagged as the system scope.
    #[error("multiple system scopes: {first} and {second}")]
    MultipleSystemScopes {
        /// The first scope flagged as system.
        first: String,
        /// The second scope flagged as system.
        second: String,
    },
    /// A resolution scope names a dependency scope that is not declared.
    #[error("resolution scope {resolution_scope} references undeclared dependency scope {scope}")]
    UndeclaredScopeReference {
        /// The referencing resolution scope.
        resolution_scope: String,
        /// The undeclared dependency scope id.
        scope: String,
    },
    /// A resolution scope declares an invalid activation window.
    #[error("invalid activation window for resolution scope {resolution_scope}")]
    InvalidWindow {
        /// The resolution scope with the bad window.
        resolution_scope: String,
        /// The underlying window error.
        #[source]
        source: DepthWindowError,
    },
}

/// Declaration of one dependency scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyScopeConfig {
    /// Scope label.
    pub id: String,
    /// Whether this is the system scope. At most one per configuration.
    #[serde(default)]
    pub system: bool,
}

impl DependencyScopeConfig {
    /// Declare an ordinary scope.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            system: false,
        }
    }

    /// Declare the system scope.
    pub fn system(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            system: true,
        }
    }
}

fn default_apply_from() -> u32 {
    1
}

/// Declaration of one resolution scope.
///
/// Absent `included` means "no inclusion constraint" (any scope passes);
/// absent `excluded` means "exclude nothing". An empty list is different:
/// it names no scopes, so an empty `included` matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionScopeConfig {
    /// Policy label, e.g. `"main-runtime"`.
    pub id: String,
    /// Scope ids to keep, absent for unconstrained.
    #[serde(default)]
    pub included: Option<Vec<String>>,
    /// Scope ids to drop, absent for none.
    #[serde(default)]
    pub excluded: Option<Vec<String>>,
    /// First depth (1-based) at which the sets apply.
    #[serde(default = "default_apply_from")]
    pub apply_from: u32,
    /// Last depth at which the sets apply, absent for unbounded.
    #[serde(default)]
    pub apply_to: Option<u32>,
}

impl ResolutionScopeConfig {
    /// Declare a resolution scope active from the root's children onward.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            included: None,
            excluded: None,
            apply_from: 1,
            apply_to: None,
        }
    }

    /// Set the included scope ids.
    pub fn included<I, T>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.included = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    /// Set the excluded scope ids.
    pub fn excluded<I, T>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.excluded = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    /// Set the activation window start.
    pub fn apply_from(mut self, depth: u32) -> Self {
        self.apply_from = depth;
        self
    }

    /// Set the activation window end.
    pub fn apply_to(mut self, depth: u32) -> Self {
        self.apply_to = Some(depth);
        self
    }

    /// The included set with sentinel semantics.
    pub(crate) fn included_set(&self) -> ScopeSet {
        match &self.included {
            None => ScopeSet::Unconstrained,
            Some(scopes) => ScopeSet::of(scopes.iter().map(String::as_str)),
        }
    }

    /// The excluded set with sentinel semantics.
    pub(crate) fn excluded_set(&self) -> ScopeSet {
        match &self.excluded {
            None => ScopeSet::ExcludeNothing,
            Some(scopes) => ScopeSet::of(scopes.iter().map(String::as_str)),
        }
    }

    /// The validated activation window.
    pub(crate) fn window(&self) -> Result<DepthWindow, DepthWindowError> {
        match self.apply_to {
            Some(last) => DepthWindow::bounded(self.apply_from, last),
            None => DepthWindow::from(self.apply_from),
        }
    }
}

/// Full scope universe declaration for one manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeManagerConfig {
    /// Manager label, for diagnostics and fingerprinting.
    pub id: String,
    /// Lookup behavior for unknown ids.
    #[serde(default)]
    pub lookup: LookupMode,
    /// Dependency scopes, in registration order.
    pub dependency_scopes: Vec<DependencyScopeConfig>,
    /// Resolution scopes, in registration order.
    pub resolution_scopes: Vec<ResolutionScopeConfig>,
}

impl ScopeManagerConfig {
    /// Empty configuration with the given label.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lookup: LookupMode::default(),
            dependency_scopes: Vec::new(),
            resolution_scopes: Vec::new(),
        }
    }

    /// Set the lookup mode.
    pub fn with_lookup(mut self, lookup: LookupMode) -> Self {
        self.lookup = lookup;
        self
    }

    /// Add a dependency scope declaration.
    pub fn with_dependency_scope(mut self, scope: DependencyScopeConfig) -> Self {
        self.dependency_scopes.push(scope);
        self
    }

    /// Add a resolution scope declaration.
    pub fn with_resolution_scope(mut self, scope: ResolutionScopeConfig) -> Self {
        self.resolution_scopes.push(scope);
        self
    }

    /// The standard build-tool scope universe, system scope included.
    ///
    /// Dependency scopes: `compile`, `provided`, `runtime`, `test`, `system`.
    /// Resolution scopes:
    ///
    /// | id             | window | rule                                     |
    /// |----------------|--------|------------------------------------------|
    /// | `main-compile` | `1..`  | keep `compile`, `provided`, `system`     |
    /// | `main-runtime` | `1..`  | keep `compile`, `runtime`                |
    /// | `test-compile` | `2..`  | drop `test`, `runtime` past direct deps  |
    /// | `test-runtime` | `2..`  | drop `test`, `provided` past direct deps |
    ///
    /// The `2..` windows make test and provided dependencies non-transitive:
    /// direct dependencies pass unconditionally, their subtrees are filtered.
    pub fn standard() -> Self {
        Self {
            id: "standard".to_string(),
            lookup: LookupMode::Lenient,
            dependency_scopes: vec![
                DependencyScopeConfig::new("compile"),
                DependencyScopeConfig::new("provided"),
                DependencyScopeConfig::new("runtime"),
                DependencyScopeConfig::new("test"),
                DependencyScopeConfig::system("system"),
            ],
            resolution_scopes: vec![
                ResolutionScopeConfig::new("main-compile").included([
                    "compile", "provided", "system",
                ]),
                ResolutionScopeConfig::new("main-runtime").included(["compile", "runtime"]),
                ResolutionScopeConfig::new("test-compile")
                    .excluded(["test", "runtime"])
                    .apply_from(2),
                ResolutionScopeConfig::new("test-runtime")
                    .excluded(["test", "provided"])
                    .apply_from(2),
            ],
        }
    }

    /// The standard universe without a system scope.
    ///
    /// For hosts whose repositories never carry filesystem-resident
    /// dependencies. Same resolution scopes as [`standard`](Self::standard),
    /// minus the `system` references.
    pub fn standard_without_system() -> Self {
        Self {
            id: "standard-no-system".to_string(),
            lookup: LookupMode::Lenient,
            dependency_scopes: vec![
                DependencyScopeConfig::new("compile"),
                DependencyScopeConfig::new("provided"),
                DependencyScopeConfig::new("runtime"),
                DependencyScopeConfig::new("test"),
            ],
            resolution_scopes: vec![
                ResolutionScopeConfig::new("main-compile").included(["compile", "provided"]),
                ResolutionScopeConfig::new("main-runtime").included(["compile", "runtime"]),
                ResolutionScopeConfig::new("test-compile")
                    .excluded(["test", "runtime"])
                    .apply_from(2),
                ResolutionScopeConfig::new("test-runtime")
                    .excluded(["test", "provided"])
                    .apply_from(2),
            ],
        }
    }
}
