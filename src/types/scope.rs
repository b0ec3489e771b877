//! Dependency scope and resolution scope definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::label::{ScopeLabel, ScopeSet};

/// A declared dependency scope.
///
/// Created once at [`ScopeManager`](crate::ScopeManager) construction and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyScope {
    /// Scope label, the identity of this scope.
    id: ScopeLabel,
    /// Whether this is the structurally special system scope.
    system: bool,
}

impl DependencyScope {
    /// Create a new dependency scope definition.
    pub fn new(id: impl Into<ScopeLabel>, system: bool) -> Self {
        Self {
            id: id.into(),
            system,
        }
    }

    /// The scope label.
    pub fn id(&self) -> &ScopeLabel {
        &self.id
    }

    /// Whether this scope denotes filesystem-resident dependencies.
    ///
    /// Dependencies in the system scope have no repository descriptor and
    /// are always graph leaves. Collection engines must recognize them via
    /// this flag (presence check instead of metadata fetch); the selector
    /// treats the label like any other string.
    pub fn is_system(&self) -> bool {
        self.system
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Error for invalid depth-activation windows.
///
/// Raised synchronously at construction, never during traversal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DepthWindowError {
    /// Windows are 1-based; depth 0 is the root itself.
    #[error("activation window must start at depth 1 or deeper, got {0}")]
    StartsBeforeRoot(u32),
    /// The upper bound precedes the lower bound.
    #[error("activation window end {last} precedes start {first}")]
    Inverted {
        /// First depth the window covers.
        first: u32,
        /// Last depth the window covers.
        last: u32,
    },
}

/// Depth-activation window for scope filtering.
///
/// 1-based and inclusive on both ends: depth 1 is the root's direct
/// dependencies, depth 2 their dependencies, and so on. An unbounded
/// window has no upper end. Invariant: `1 <= first <= last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepthWindow {
    first: u32,
    last: Option<u32>,
}

impl DepthWindow {
    /// Window covering every depth from `first` onward.
    pub fn from(first: u32) -> Result<Self, DepthWindowError> {
        if first < 1 {
            return Err(DepthWindowError::StartsBeforeRoot(first));
        }
        Ok(Self { first, last: None })
    }

    /// Window covering `first..=last`.
    pub fn bounded(first: u32, last: u32) -> Result<Self, DepthWindowError> {
        if first < 1 {
            return Err(DepthWindowError::StartsBeforeRoot(first));
        }
        if first > last {
            return Err(DepthWindowError::Inverted { first, last });
        }
        Ok(Self {
            first,
            last: Some(last),
        })
    }

    /// Window active from the root's own children onward.
    pub fn from_root() -> Self {
        Self {
            first: 1,
            last: None,
        }
    }

    /// Window inert through depth 1, active from depth 2 onward.
    pub fn from_direct() -> Self {
        Self {
            first: 2,
            last: None,
        }
    }

    /// First depth the window covers.
    pub fn first(&self) -> u32 {
        self.first
    }

    /// Last depth the window covers, `None` if unbounded.
    pub fn last(&self) -> Option<u32> {
        self.last
    }

    /// Whether the window covers the given depth.
    pub fn contains(&self, depth: u32) -> bool {
        depth >= self.first && self.last.map_or(true, |last| depth <= last)
    }
}

impl fmt::Display for DepthWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last {
            Some(last) => write!(f, "{}..={}", self.first, last),
            None => write!(f, "{}..", self.first),
        }
    }
}

/// A named filtering policy selecting one filtered view of a dependency graph.
///
/// Combines included/excluded scope sets with a depth-activation window.
/// Immutable; created with the manager and resolved by id (e.g.
/// `"main-runtime"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionScope {
    id: String,
    included: ScopeSet,
    excluded: ScopeSet,
    window: DepthWindow,
}

impl ResolutionScope {
    /// Create a new resolution scope definition.
    pub fn new(
        id: impl Into<String>,
        included: ScopeSet,
        excluded: ScopeSet,
        window: DepthWindow,
    ) -> Self {
        Self {
            id: id.into(),
            included,
            excluded,
            window,
        }
    }

    /// The policy label, e.g. `"main-runtime"`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Scopes this policy keeps.
    pub fn included(&self) -> &ScopeSet {
        &self.included
    }

    /// Scopes this policy drops.
    pub fn excluded(&self) -> &ScopeSet {
        &self.excluded
    }

    /// Depth window inside which the sets apply.
    pub fn window(&self) -> &DepthWindow {
        &self.window
    }
}

impl fmt::Display for ResolutionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (included: {}, excluded: {}, window: {})",
            self.id, self.included, self.excluded, self.window
        )
    }
}
