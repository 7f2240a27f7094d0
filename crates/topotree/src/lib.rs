//! # topotree
//!
//! Browsable cluster hierarchies from hierarchical topic-model memberships.
//!
//! A fitted hierarchical model assigns every document and every word to one
//! cluster per level. topotree links those clusters into a single-rooted
//! hierarchy, converts it to a nested tree and lets a viewer collapse the
//! lower levels one depth at a time.
//!
//! ## Quick Start
//!
//! ```rust
//! use ndarray::array;
//! use topotree::prelude::*;
//!
//! let labels: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
//! let level0 = array![[1.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
//! let level1 = array![[1.0, 1.0, 1.0]];
//!
//! let graph = HierarchyBuilder::new(LeafKind::Words, &labels)
//!     .levels([level0.view(), level1.view()])
//!     .build()
//!     .unwrap();
//!
//! let tree = tree_from_graph(&graph).unwrap();
//! let collapsed = reduce(&tree, 1).unwrap();
//! assert_eq!(collapsed.child_ids(), vec!["a", "b", "c"]);
//! ```
//!
//! ## Architecture
//!
//! - [`topotree_core`] - Shared types, the graph/model/corpus traits and errors
//! - [`topotree_runtime`] - petgraph hierarchy, builder, reducer, sessions and
//!   corpus adapters
//!
//! ## Merge depth
//!
//! | Depth | What the root's subtree contains |
//! |-------|----------------------------------|
//! | 0 | every level, down to the leaves |
//! | D | clusters at levels D and above, leaves hung from level D |
//! | root level | the root with every leaf as a direct child |

pub use topotree_core as core;
pub use topotree_runtime as runtime;

pub mod prelude {
    //! Everything needed to build, merge and browse hierarchies.
    pub use topotree_runtime::prelude::*;
}
