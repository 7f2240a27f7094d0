//! # topotree Core
//!
//! Core traits and types for turning a fitted hierarchical topic model into
//! a browsable tree.
//!
//! - **HierarchyGraph**: clusters pointing down at what they subsume
//! - **MembershipSource**: read-only view of a fitted model
//! - **CorpusStore**: where derived artifacts are written back
//! - **TreeNode**: the nested form the reducer and renderers work on
//!
//! ## Quick Start
//!
//! ```rust
//! use topotree_core::prelude::*;
//!
//! let kind: LeafKind = "documents".parse().unwrap();
//! assert_eq!(cluster_label(1, 0), "Level_1_0");
//! assert_eq!(kind.as_str(), "documents");
//! ```

pub mod corpus;
pub mod error;
pub mod hierarchy;
pub mod prelude;
pub mod source;
pub mod types;
