//! Concrete implementation of the HierarchyGraph trait using petgraph.
//!
//! Uses a `StableDiGraph` so pruning nodes never shifts the indices of the
//! survivors, with HashMap indices for O(1) node lookup by ID and label.

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;
use std::collections::HashMap;
use topotree_core::hierarchy::HierarchyGraph;
use topotree_core::types::*;

/// Petgraph-backed hierarchy graph.
#[derive(Debug, Clone)]
pub struct PetHierarchyGraph {
    graph: StableDiGraph<NodeData, EdgeData>,
    /// Map from our NodeId to petgraph's internal index.
    node_index: HashMap<NodeId, NodeIndex>,
    /// Index from label to node IDs.
    label_index: HashMap<String, Vec<NodeId>>,
    next_id: usize,
}

impl PetHierarchyGraph {
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            node_index: HashMap::new(),
            label_index: HashMap::new(),
            next_id: 0,
        }
    }

    fn sorted_neighbors(&self, node: &NodeId, dir: Direction) -> Vec<NodeId> {
        let Some(&idx) = self.node_index.get(node) else {
            return Vec::new();
        };
        let mut ids: Vec<NodeId> = self
            .graph
            .neighbors_directed(idx, dir)
            .map(|n| self.graph[n].id)
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

impl Default for PetHierarchyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyGraph for PetHierarchyGraph {
    fn add_node(&mut self, label: String, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.label_index.entry(label.clone()).or_default().push(id);
        let idx = self.graph.add_node(NodeData { id, label, kind });
        self.node_index.insert(id, idx);
        id
    }

    fn get_node(&self, id: &NodeId) -> Option<&NodeData> {
        self.node_index.get(id).and_then(|idx| self.graph.node_weight(*idx))
    }

    fn set_edge(&mut self, from: NodeId, to: NodeId, data: EdgeData) {
        let Some(&from_idx) = self.node_index.get(&from) else {
            return;
        };
        let Some(&to_idx) = self.node_index.get(&to) else {
            return;
        };
        self.graph.update_edge(from_idx, to_idx, data);
    }

    fn get_edge(&self, from: &NodeId, to: &NodeId) -> Option<&EdgeData> {
        let from_idx = self.node_index.get(from)?;
        let to_idx = self.node_index.get(to)?;
        let edge_idx = self.graph.find_edge(*from_idx, *to_idx)?;
        self.graph.edge_weight(edge_idx)
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.sorted_neighbors(node, Direction::Outgoing)
    }

    fn parents(&self, node: &NodeId) -> Vec<NodeId> {
        self.sorted_neighbors(node, Direction::Incoming)
    }

    fn remove_node(&mut self, id: &NodeId) -> Option<NodeData> {
        let idx = self.node_index.remove(id)?;
        let data = self.graph.remove_node(idx)?;
        if let Some(ids) = self.label_index.get_mut(&data.label) {
            ids.retain(|other| other != id);
            if ids.is_empty() {
                self.label_index.remove(&data.label);
            }
        }
        Some(data)
    }

    fn all_nodes(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .graph
            .node_indices()
            .map(|idx| self.graph[idx].id)
            .collect();
        ids.sort();
        ids
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn find_by_label(&self, label: &str) -> Vec<NodeId> {
        self.label_index.get(label).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(level: usize, index: usize, is_root: bool) -> NodeKind {
        NodeKind::Cluster {
            level,
            index,
            is_root,
        }
    }

    #[test]
    fn set_edge_replaces_weight() {
        let mut g = PetHierarchyGraph::new();
        let a = g.add_node("Level_0_0".into(), cluster(0, 0, false));
        let b = g.add_node("x".into(), NodeKind::Leaf { index: 0, category: None });
        g.set_edge(a, b, EdgeData { weight: 1.0 });
        g.set_edge(a, b, EdgeData { weight: 0.25 });
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.get_edge(&a, &b).unwrap().weight, 0.25);
        assert_eq!(g.children(&a), vec![b]);
        assert_eq!(g.parents(&b), vec![a]);
    }

    #[test]
    fn remove_keeps_other_ids_valid() {
        let mut g = PetHierarchyGraph::new();
        let a = g.add_node("a".into(), NodeKind::Leaf { index: 0, category: None });
        let b = g.add_node("b".into(), NodeKind::Leaf { index: 1, category: None });
        let c = g.add_node("c".into(), NodeKind::Leaf { index: 2, category: None });
        assert!(g.remove_node(&b).is_some());
        assert_eq!(g.all_nodes(), vec![a, c]);
        assert_eq!(g.get_node(&c).unwrap().label, "c");
        assert!(g.find_by_label("b").is_empty());
    }

    #[test]
    fn roots_and_tree_shape() {
        let mut g = PetHierarchyGraph::new();
        let root = g.add_node("Level_1_0".into(), cluster(1, 0, true));
        let c0 = g.add_node("Level_0_0".into(), cluster(0, 0, false));
        let c1 = g.add_node("Level_0_1".into(), cluster(0, 1, false));
        let leaf = g.add_node("a".into(), NodeKind::Leaf { index: 0, category: None });
        g.set_edge(root, c0, EdgeData { weight: 1.0 });
        g.set_edge(root, c1, EdgeData { weight: 1.0 });
        g.set_edge(c0, leaf, EdgeData { weight: 1.0 });
        assert_eq!(g.roots(), vec![root]);
        assert!(g.is_tree());
        g.set_edge(c1, leaf, EdgeData { weight: 0.5 });
        assert!(!g.is_tree());
    }
}
