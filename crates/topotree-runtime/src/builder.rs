//! Hierarchy graph builder.
//!
//! Turns a stack of per-level membership matrices into one graph rooted at
//! the top level. Level 0 clusters point at leaves; a cluster at level L
//! points at the level L-1 clusters that its member leaves already hang
//! from.
//!
//! # Example
//!
//! ```rust
//! use ndarray::array;
//! use topotree_core::prelude::*;
//! use topotree_runtime::builder::HierarchyBuilder;
//!
//! let labels: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
//! let level0 = array![[1.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
//! let level1 = array![[1.0, 1.0, 1.0]];
//!
//! let graph = HierarchyBuilder::new(LeafKind::Words, &labels)
//!     .level(level0.view())
//!     .level(level1.view())
//!     .build()
//!     .unwrap();
//! assert_eq!(graph.roots().len(), 1);
//! ```
//!
//! # Ancestor lookup
//!
//! For each retained leaf the builder keeps its *frontier*: the clusters at
//! the most recently processed level that the leaf is reachable from. A
//! positive entry `(cluster, leaf)` at level L > 0 links `cluster` to every
//! frontier cluster of `leaf`. After each level the frontier moves up one
//! step through the edges just inserted. Every lookup is a parent-index
//! read, so a full build costs O(L * C * N) membership reads plus the edges
//! inserted.
//!
//! A leaf can sit in more than one cluster when memberships are fractional.
//! All of them are kept, so the graph may briefly be a DAG; tree conversion
//! rejects such graphs.

use crate::hierarchy_impl::PetHierarchyGraph;
use ndarray::ArrayView2;
use std::collections::BTreeSet;
use topotree_core::error::{Result, TopoTreeError, ValidationError};
use topotree_core::hierarchy::HierarchyGraph;
use topotree_core::source::MembershipSource;
use topotree_core::types::*;
use tracing::{debug, info};

/// Builder for a hierarchy graph over one kind of leaf.
pub struct HierarchyBuilder<'a> {
    kind: LeafKind,
    leaf_labels: &'a [String],
    levels: Vec<ArrayView2<'a, f64>>,
    retained: Option<Vec<usize>>,
    categories: Option<Vec<String>>,
}

impl<'a> HierarchyBuilder<'a> {
    /// Start a builder over `leaf_labels`, one label per membership column.
    pub fn new(kind: LeafKind, leaf_labels: &'a [String]) -> Self {
        Self {
            kind,
            leaf_labels,
            levels: Vec::new(),
            retained: None,
            categories: None,
        }
    }

    /// Append the membership matrix of the next level up.
    pub fn level(mut self, memberships: ArrayView2<'a, f64>) -> Self {
        self.levels.push(memberships);
        self
    }

    /// Append several levels, lowest first.
    pub fn levels(mut self, levels: impl IntoIterator<Item = ArrayView2<'a, f64>>) -> Self {
        self.levels.extend(levels);
        self
    }

    /// Only keep these leaves (column indices). All leaves are kept by default.
    pub fn retain(mut self, leaf_indices: Vec<usize>) -> Self {
        self.retained = Some(leaf_indices);
        self
    }

    /// One category per retained leaf, in retained order.
    pub fn categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    fn validate(&self) -> Result<Vec<usize>> {
        let num_leaves = self.leaf_labels.len();
        if self.levels.is_empty() {
            return Err(ValidationError::NoLevels.into());
        }
        for (level, memberships) in self.levels.iter().enumerate() {
            if memberships.ncols() != num_leaves {
                return Err(ValidationError::MembershipShape {
                    level,
                    kind: self.kind,
                    expected: num_leaves,
                    found: memberships.ncols(),
                }
                .into());
            }
        }

        let retained = match &self.retained {
            Some(indices) => {
                if let Some(&index) = indices.iter().find(|&&i| i >= num_leaves) {
                    return Err(ValidationError::LeafOutOfRange {
                        index,
                        kind: self.kind,
                        leaves: num_leaves,
                    }
                    .into());
                }
                indices.clone()
            }
            None => (0..num_leaves).collect(),
        };

        if let Some(categories) = &self.categories {
            if categories.len() != retained.len() {
                return Err(TopoTreeError::category_count(
                    categories.len(),
                    self.kind,
                    retained.len(),
                ));
            }
        }
        Ok(retained)
    }

    /// Build, prune and verify the graph.
    ///
    /// Fails before touching any graph state if the input is malformed, and
    /// after pruning if the top level does not yield exactly one root.
    pub fn build(self) -> Result<PetHierarchyGraph> {
        let retained = self.validate()?;
        let max_level = self.levels.len() - 1;
        let mut graph = PetHierarchyGraph::new();

        let leaves: Vec<(usize, NodeId)> = retained
            .iter()
            .enumerate()
            .map(|(pos, &leaf_idx)| {
                let category = self.categories.as_ref().map(|c| c[pos].clone());
                let id = graph.add_node(
                    self.leaf_labels[leaf_idx].clone(),
                    NodeKind::Leaf {
                        index: leaf_idx,
                        category,
                    },
                );
                (leaf_idx, id)
            })
            .collect();

        let mut frontier: Vec<Vec<NodeId>> = vec![Vec::new(); leaves.len()];

        for (level, memberships) in self.levels.iter().enumerate() {
            let clusters: Vec<NodeId> = (0..memberships.nrows())
                .map(|index| {
                    graph.add_node(
                        cluster_label(level, index),
                        NodeKind::Cluster {
                            level,
                            index,
                            is_root: level == max_level,
                        },
                    )
                })
                .collect();

            for (cluster_idx, &cluster) in clusters.iter().enumerate() {
                for (pos, &(leaf_idx, leaf)) in leaves.iter().enumerate() {
                    let weight = memberships[[cluster_idx, leaf_idx]];
                    if weight > 0.0 {
                        if level == 0 {
                            graph.set_edge(cluster, leaf, EdgeData { weight });
                        } else {
                            for &prior in &frontier[pos] {
                                graph.set_edge(cluster, prior, EdgeData { weight });
                            }
                        }
                    }
                }
            }

            frontier = leaves
                .iter()
                .zip(&frontier)
                .map(|(&(_, leaf), below)| {
                    if level == 0 {
                        graph.parents(&leaf)
                    } else {
                        below
                            .iter()
                            .flat_map(|prior| graph.parents(prior))
                            .collect::<BTreeSet<_>>()
                            .into_iter()
                            .collect()
                    }
                })
                .collect();

            debug!(
                level,
                clusters = clusters.len(),
                edges = graph.edge_count(),
                "Linked hierarchy level"
            );
        }

        let pruned = prune_unreachable(&mut graph);
        let roots = graph.roots();
        if roots.len() != 1 {
            return Err(TopoTreeError::root_count(roots.len()));
        }

        info!(
            kind = %self.kind,
            levels = self.levels.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            pruned,
            "Built hierarchy graph"
        );
        Ok(graph)
    }
}

/// Remove every non-root node without a parent, repeating until none are
/// left. Returns how many nodes were removed.
pub fn prune_unreachable<G: HierarchyGraph>(graph: &mut G) -> usize {
    let mut removed = 0;
    loop {
        let orphans: Vec<NodeId> = graph
            .all_nodes()
            .into_iter()
            .filter(|id| {
                let is_root = graph.get_node(id).is_some_and(NodeData::is_root);
                !is_root && graph.parents(id).is_empty()
            })
            .collect();
        if orphans.is_empty() {
            return removed;
        }
        for id in &orphans {
            graph.remove_node(id);
        }
        removed += orphans.len();
    }
}

/// Convert a caller-supplied level into an index, bounded by `max_level`.
pub fn checked_level(requested: i64, max_level: usize) -> Result<usize> {
    if requested < 0 {
        return Err(ValidationError::LevelBelowMinimum { requested }.into());
    }
    let level = requested as usize;
    if level > max_level {
        return Err(ValidationError::LevelAboveMaximum {
            requested: level,
            max: max_level,
        }
        .into());
    }
    Ok(level)
}

/// Options for [`group_membership_graph`].
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipGraphOptions {
    /// One category per retained leaf.
    pub categories: Option<Vec<String>>,
    /// Level whose word-topics select the retained words (words only).
    pub top_words_for_level: i64,
    /// Words kept per word-topic (words only).
    pub top_num_words: usize,
}

impl Default for MembershipGraphOptions {
    fn default() -> Self {
        Self {
            categories: None,
            top_words_for_level: 0,
            top_num_words: 5,
        }
    }
}

/// Build the hierarchy graph of one leaf kind straight from a fitted model.
///
/// Documents are all retained. Words are narrowed to the top words of each
/// word-topic at `top_words_for_level`.
pub fn group_membership_graph<S: MembershipSource + ?Sized>(
    source: &S,
    kind: LeafKind,
    options: &MembershipGraphOptions,
) -> Result<PetHierarchyGraph> {
    let max_level = source.max_level().ok_or(ValidationError::NotFitted)?;
    let labels = source.leaf_labels(kind);

    let retained = match kind {
        LeafKind::Documents => None,
        LeafKind::Words => {
            let level = checked_level(options.top_words_for_level, max_level)?;
            Some(crate::top_words::top_word_indices_for_level(
                source,
                options.top_num_words,
                level,
            )?)
        }
    };

    let levels = (0..=max_level)
        .map(|level| source.membership_matrix(level, kind))
        .collect::<Result<Vec<_>>>()?;

    let mut builder = HierarchyBuilder::new(kind, labels).levels(levels);
    if let Some(indices) = retained {
        builder = builder.retain(indices);
    }
    if let Some(categories) = &options.categories {
        builder = builder.categories(categories.clone());
    }
    builder.build()
}
