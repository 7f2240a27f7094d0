//! topotree Runtime Prelude — convenient imports for common usage.
//!
//! ```rust
//! use topotree_runtime::prelude::*;
//! ```

// Re-export hierarchy construction
pub use crate::builder::{
    checked_level, group_membership_graph, prune_unreachable, HierarchyBuilder,
    MembershipGraphOptions,
};
pub use crate::hierarchy_impl::PetHierarchyGraph;
pub use crate::top_words::top_word_indices_for_level;

// Re-export tree conversion and merging
pub use crate::reducer::{merge_step, reduce, MergeCache};
pub use crate::tree::{max_depth, tree_from_graph};

// Re-export sessions
pub use crate::session::{SnapshotManifest, VizConfig, VizSession};

// Re-export model and corpus adapters
pub use crate::corpus::MemoryCorpus;
pub use crate::extract::{document_clusters, topic_distributions, topic_submatrices};
pub use crate::model::{FittedModel, ModelSnapshot, SerializedLevel};
pub use crate::provenance::GitProvenance;
pub use crate::results::{add_results, ResultsBundle, ResultsOptions};

// Re-export from core
pub use topotree_core::prelude::*;
