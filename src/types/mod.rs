//! Core types for the scope kernel.

pub mod edge;
pub mod label;
pub mod scope;

pub use edge::{ArtifactRef, DependencyEdge, ScopedEdge};
pub use label::{ScopeLabel, ScopeSet};
pub use scope::{DependencyScope, DepthWindow, DepthWindowError, ResolutionScope};
