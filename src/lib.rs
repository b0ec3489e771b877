//! # scope-kernel
//!
//! Depth-bounded scope filtering for dependency graph resolution.
//!
//! The Scope Kernel answers one question:
//!
//! > Given a dependency edge at some depth of a graph walk, is it **part of
//! > the filtered view** a resolution scope asks for?
//!
//! ## Core Contract
//!
//! 1. A [`ScopeManager`] owns the universe of dependency scopes and named
//!    resolution scopes, validated once at construction
//! 2. Activating a resolution scope yields a root [`ScopeDependencySelector`]
//!    at depth 0
//! 3. An external collection engine asks the selector about every edge and
//!    derives a child selector (depth + 1) before descending an accepted one
//!
//! ## Architecture
//!
//! ```text
//! resolution-scope id → ScopeManager → root selector (depth 0)
//!                                            ↓
//!                              collection engine (external)
//!                         select → derive → select → derive …
//! ```
//!
//! ## Guarantees
//!
//! - Selectors are immutable values; derivation never mutates, so disjoint
//!   subtrees can be walked concurrently without synchronization
//! - Scope labels are compared literally: no case folding, no implication
//!   between scopes, and the empty label is an ordinary label
//! - Invalid configurations (bad windows, dangling scope references) fail at
//!   construction, never during traversal

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod canonical;
pub mod collection;
pub mod config;
pub mod manager;
pub mod selector;
pub mod types;

// Re-exports
pub use canonical::{fingerprint, fingerprint_hex};
pub use collection::{CollectRequest, CollectionContext, RemoteRepository};
pub use config::{
    DependencyScopeConfig, LookupMode, ResolutionScopeConfig, ScopeConfigError, ScopeManagerConfig,
};
pub use manager::{ScopeManager, ScopeManagerError};
pub use selector::{DependencySelector, ScopeDependencySelector};
pub use types::{
    ArtifactRef, DependencyEdge, DependencyScope, DepthWindow, DepthWindowError, ResolutionScope,
    ScopeLabel, ScopeSet, ScopedEdge,
};

/// Schema version for all scope kernel types.
/// Increment on breaking changes to any schema type.
pub const SCOPE_KERNEL_SCHEMA_VERSION: &str = "1.0.0";

/// Resolution scope activated when a caller names none.
pub const DEFAULT_RESOLUTION_SCOPE: &str = "main-runtime";
