//! Depth-bounded scope selection.
//!
//! The core decision algorithm: a per-edge accept/reject function built from
//! a resolution scope. Outside its depth-activation window a selector is
//! inert and accepts unconditionally; inside it, an edge passes iff its scope
//! label is in the included set and not in the excluded set.
//!
//! Selectors are immutable values. A traversal never advances a shared depth
//! counter; it derives a fresh selector (depth + 1) for each accepted edge,
//! which is what makes concurrent walks of disjoint subtrees safe without
//! synchronization.

use std::fmt;

use crate::types::{DepthWindow, DepthWindowError, ResolutionScope, ScopeSet, ScopedEdge};

/// Per-edge filtering contract between this kernel and a collection engine.
///
/// The engine must call [`select_dependency`](Self::select_dependency) for
/// every edge before deciding whether to traverse it. A `false` result means
/// the edge is excluded from the resulting graph and its subtree is never
/// descended into; the selector itself never prunes anything. For every
/// accepted edge the engine calls
/// [`derive_child_selector`](Self::derive_child_selector) exactly once and
/// uses the returned selector only along that edge's own children, never
/// across sibling edges.
///
/// Edge and context shapes belong to the engine; this contract only requires
/// that edges expose a scope label and that a context value exists.
pub trait DependencySelector: Sized {
    /// Decide whether the given edge is kept at the current depth.
    fn select_dependency<E: ScopedEdge>(&self, edge: &E) -> bool;

    /// Derive the selector for the accepted edge's children.
    ///
    /// The context is the engine's own collection state; it is not inspected
    /// here.
    fn derive_child_selector<C>(&self, context: &C) -> Self;
}

/// Scope-filtering selector with a depth-activation window.
///
/// Constructed at depth 0 when a resolution scope is activated; each
/// derivation copies the configuration at depth + 1, forming a tree of
/// selector instances isomorphic to the accepted portion of the dependency
/// graph.
///
/// No relationship between scope labels is assumed: labels are compared
/// literally, none implies another, and the empty label is an ordinary
/// label.
///
/// Equality and hashing compare all four fields, including the window's
/// upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeDependencySelector {
    /// Current position in the walk; root = 0.
    depth: u32,
    window: DepthWindow,
    included: ScopeSet,
    excluded: ScopeSet,
}

impl ScopeDependencySelector {
    /// Selector filtering from the root's own children onward.
    pub fn from_root(included: ScopeSet, excluded: ScopeSet) -> Self {
        Self {
            depth: 0,
            window: DepthWindow::from_root(),
            included,
            excluded,
        }
    }

    /// Selector inert through direct dependencies, filtering from depth 2.
    pub fn from_direct(included: ScopeSet, excluded: ScopeSet) -> Self {
        Self {
            depth: 0,
            window: DepthWindow::from_direct(),
            included,
            excluded,
        }
    }

    /// Selector filtering from the given depth onward (1 = root's children).
    pub fn from_depth(
        apply_from: u32,
        included: ScopeSet,
        excluded: ScopeSet,
    ) -> Result<Self, DepthWindowError> {
        Ok(Self {
            depth: 0,
            window: DepthWindow::from(apply_from)?,
            included,
            excluded,
        })
    }

    /// Selector filtering inside an explicit bounded window.
    pub fn from_window(
        apply_from: u32,
        apply_to: u32,
        included: ScopeSet,
        excluded: ScopeSet,
    ) -> Result<Self, DepthWindowError> {
        Ok(Self {
            depth: 0,
            window: DepthWindow::bounded(apply_from, apply_to)?,
            included,
            excluded,
        })
    }

    /// Root selector for a resolved resolution scope.
    ///
    /// The scope's window was validated at manager construction, so this
    /// cannot fail.
    pub fn for_scope(scope: &ResolutionScope) -> Self {
        Self {
            depth: 0,
            window: *scope.window(),
            included: scope.included().clone(),
            excluded: scope.excluded().clone(),
        }
    }

    /// Current depth; root = 0.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The depth-activation window.
    pub fn window(&self) -> &DepthWindow {
        &self.window
    }

    /// The included scope set.
    pub fn included(&self) -> &ScopeSet {
        &self.included
    }

    /// The excluded scope set.
    pub fn excluded(&self) -> &ScopeSet {
        &self.excluded
    }

    /// Whether the selector filters at its current depth.
    pub fn is_active(&self) -> bool {
        self.window.contains(self.depth)
    }
}

impl DependencySelector for ScopeDependencySelector {
    fn select_dependency<E: ScopedEdge>(&self, edge: &E) -> bool {
        if !self.window.contains(self.depth) {
            return true;
        }
        let scope = edge.scope();
        self.included.contains(scope) && !self.excluded.contains(scope)
    }

    fn derive_child_selector<C>(&self, _context: &C) -> Self {
        Self {
            depth: self.depth + 1,
            window: self.window,
            included: self.included.clone(),
            excluded: self.excluded.clone(),
        }
    }
}

impl fmt::Display for ScopeDependencySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScopeDependencySelector(included: {}, excluded: {}, depth: {}, window: {}, active: {})",
            self.included,
            self.excluded,
            self.depth,
            self.window,
            self.is_active()
        )
    }
}
