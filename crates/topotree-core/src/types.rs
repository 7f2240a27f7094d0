//! Shared types used across topotree crates.

use crate::error::{TopoTreeError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a node in a hierarchy graph.
///
/// Ids are assigned sequentially on insertion, so sorting by id
/// reproduces insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Which side of the document-word bipartite model a leaf comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafKind {
    Documents,
    Words,
}

impl LeafKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeafKind::Documents => "documents",
            LeafKind::Words => "words",
        }
    }
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeafKind {
    type Err = TopoTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "documents" | "document" | "docs" => Ok(LeafKind::Documents),
            "words" | "word" => Ok(LeafKind::Words),
            _ => Err(ValidationError::UnknownKind(s.to_string()).into()),
        }
    }
}

/// Layout used by the front end to draw a tree snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HierarchyStyle {
    /// Radial dendrogram, leaves on the outer ring.
    Radial,
    /// Collapsible left-to-right tree.
    Tree,
}

impl HierarchyStyle {
    /// Renderer script the front end loads for this style.
    pub fn renderer_asset(&self) -> &'static str {
        match self {
            HierarchyStyle::Radial => "radial-cluster.js",
            HierarchyStyle::Tree => "collapsible-tree.js",
        }
    }
}

impl FromStr for HierarchyStyle {
    type Err = TopoTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "radial" => Ok(HierarchyStyle::Radial),
            "tree" => Ok(HierarchyStyle::Tree),
            _ => Err(ValidationError::UnknownHierarchy(s.to_string()).into()),
        }
    }
}

/// What a hierarchy node stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeKind {
    /// An irreducible item: a document or a word.
    Leaf {
        /// Column index of the leaf in the membership matrices.
        index: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
    },
    /// A group at one level of the hierarchy.
    Cluster {
        level: usize,
        index: usize,
        is_root: bool,
    },
}

/// A node in the hierarchy graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: NodeId,
    pub label: String,
    pub kind: NodeKind,
}

impl NodeData {
    pub fn level(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Cluster { level, .. } => Some(level),
            NodeKind::Leaf { .. } => None,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, NodeKind::Cluster { is_root: true, .. })
    }

    pub fn category(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf { category, .. } => category.as_deref(),
            NodeKind::Cluster { .. } => None,
        }
    }
}

/// Data on an edge: the membership value that justified it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    pub weight: f64,
}

/// Deterministic label of a cluster node.
pub fn cluster_label(level: usize, index: usize) -> String {
    format!("Level_{level}_{index}")
}

/// One node of the nested tree form of a hierarchy.
///
/// Serializes as `{id, level?, is_root, category?, children?}`, the shape
/// the renderer scripts read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,
    #[serde(default)]
    pub is_root: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            level: None,
            is_root: false,
            category: None,
            children: Vec::new(),
        }
    }

    pub fn cluster(
        id: impl Into<String>,
        level: usize,
        is_root: bool,
        children: Vec<TreeNode>,
    ) -> Self {
        Self {
            id: id.into(),
            level: Some(level),
            is_root,
            category: None,
            children,
        }
    }

    /// Total number of nodes in this subtree, itself included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Ids of every leaf-kind node (no level) in depth-first order.
    pub fn leaf_ids(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaf_ids(&mut out);
        out
    }

    fn collect_leaf_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        if self.level.is_none() {
            out.push(&self.id);
        }
        for child in &self.children {
            child.collect_leaf_ids(out);
        }
    }

    /// Ids of the direct children.
    pub fn child_ids(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!("Documents".parse::<LeafKind>().unwrap(), LeafKind::Documents);
        assert_eq!("WORDS".parse::<LeafKind>().unwrap(), LeafKind::Words);
        assert!("sentences".parse::<LeafKind>().is_err());
        assert_eq!("radial".parse::<HierarchyStyle>().unwrap(), HierarchyStyle::Radial);
        let err = "sunburst".parse::<HierarchyStyle>().unwrap_err();
        assert!(err.to_string().contains("radial, tree"));
    }

    #[test]
    fn tree_node_serializes_without_empty_fields() {
        let tree = TreeNode::cluster("Level_1_0", 1, true, vec![TreeNode::leaf("a")]);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["level"], 1);
        assert_eq!(json["is_root"], true);
        let leaf = &json["children"][0];
        assert!(leaf.get("children").is_none());
        assert!(leaf.get("level").is_none());
        assert_eq!(tree.node_count(), 2);
    }
}
