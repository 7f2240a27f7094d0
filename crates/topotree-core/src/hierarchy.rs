//! Hierarchy graph: clusters pointing down at the nodes they subsume.
//!
//! Edges run from a cluster to a leaf (level 0) or to a cluster one level
//! below. A well-formed graph has exactly one root and every other node
//! has at least one parent.

use crate::types::*;

/// A handle to a hierarchy graph.
///
/// This is a trait rather than a concrete type so that the builder and the
/// tree conversion do not depend on one graph backend.
pub trait HierarchyGraph {
    /// Add a node. The node's id is assigned by the graph and returned.
    fn add_node(&mut self, label: String, kind: NodeKind) -> NodeId;

    /// Get node data by ID.
    fn get_node(&self, id: &NodeId) -> Option<&NodeData>;

    /// Add or update an edge. If the edge exists, its weight is replaced.
    fn set_edge(&mut self, from: NodeId, to: NodeId, data: EdgeData);

    /// Get edge data.
    fn get_edge(&self, from: &NodeId, to: &NodeId) -> Option<&EdgeData>;

    /// Nodes this node points at, in insertion order.
    fn children(&self, node: &NodeId) -> Vec<NodeId>;

    /// Nodes pointing at this node, in insertion order.
    fn parents(&self, node: &NodeId) -> Vec<NodeId>;

    /// Remove a node and all its edges. Returns its data if it existed.
    fn remove_node(&mut self, id: &NodeId) -> Option<NodeData>;

    /// All node IDs in insertion order.
    fn all_nodes(&self) -> Vec<NodeId>;

    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Number of edges.
    fn edge_count(&self) -> usize;

    /// Find nodes by exact label.
    fn find_by_label(&self, label: &str) -> Vec<NodeId>;

    /// All nodes flagged as root.
    fn roots(&self) -> Vec<NodeId> {
        self.all_nodes()
            .into_iter()
            .filter(|id| self.get_node(id).is_some_and(NodeData::is_root))
            .collect()
    }

    /// Whether every non-root node has exactly one parent.
    fn is_tree(&self) -> bool {
        self.all_nodes().iter().all(|id| {
            let is_root = self.get_node(id).is_some_and(NodeData::is_root);
            is_root || self.parents(id).len() == 1
        })
    }
}
