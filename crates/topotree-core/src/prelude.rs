//! topotree Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use topotree_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{
    cluster_label, EdgeData, HierarchyStyle, LeafKind, NodeData, NodeId, NodeKind, TreeNode,
};

// Re-export the HierarchyGraph trait
pub use crate::hierarchy::HierarchyGraph;

// Re-export the MembershipSource trait
pub use crate::source::MembershipSource;

// Re-export corpus types
pub use crate::corpus::{CorpusStore, DocumentTermMatrix, MetaSeries};

// Re-export error types
pub use crate::error::{InvariantError, MissingArtifact, Result, TopoTreeError, ValidationError};
