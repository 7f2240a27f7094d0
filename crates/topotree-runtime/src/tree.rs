//! Nested tree view of a hierarchy graph.

use topotree_core::error::{InvariantError, Result, TopoTreeError};
use topotree_core::hierarchy::HierarchyGraph;
use topotree_core::types::*;

/// Convert a graph into its nested form rooted at the single root.
///
/// Children keep insertion order. Fails if the graph does not have exactly
/// one root or if any node hangs from more than one parent.
pub fn tree_from_graph<G: HierarchyGraph + ?Sized>(graph: &G) -> Result<TreeNode> {
    let roots = graph.roots();
    let [root] = roots.as_slice() else {
        return Err(TopoTreeError::root_count(roots.len()));
    };

    for id in graph.all_nodes() {
        let parents = graph.parents(&id).len();
        if parents > 1 {
            let node = graph
                .get_node(&id)
                .map(|n| n.label.clone())
                .unwrap_or_default();
            return Err(InvariantError::MultipleParents { node, parents }.into());
        }
    }

    Ok(subtree(graph, root))
}

fn subtree<G: HierarchyGraph + ?Sized>(graph: &G, id: &NodeId) -> TreeNode {
    let children = graph
        .children(id)
        .iter()
        .map(|child| subtree(graph, child))
        .collect();

    match graph.get_node(id) {
        Some(NodeData {
            label,
            kind: NodeKind::Cluster { level, is_root, .. },
            ..
        }) => TreeNode::cluster(label.clone(), *level, *is_root, children),
        Some(NodeData {
            label,
            kind: NodeKind::Leaf { category, .. },
            ..
        }) => TreeNode {
            category: category.clone(),
            children,
            ..TreeNode::leaf(label.clone())
        },
        None => TreeNode::leaf(String::new()),
    }
}

/// The root's level, i.e. the deepest merge depth the tree supports.
pub fn max_depth(tree: &TreeNode) -> usize {
    tree.level.unwrap_or(0)
}
