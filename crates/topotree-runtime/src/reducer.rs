//! Progressive tree reduction.
//!
//! Merging to depth D removes every cluster below level D and hangs its
//! descendants directly from the level-D cluster above it. Depth D is
//! computed from the depth D-1 result, one level of clusters at a time:
//! the clusters at level D-1 are spliced out and their children take their
//! place.
//!
//! ```text
//! depth 0            depth 1
//! L1_0               L1_0
//! ├── L0_0           ├── a
//! │   ├── a          ├── b
//! │   └── b          └── c
//! └── L0_1
//!     └── c
//! ```

use crate::tree::max_depth;
use topotree_core::error::{Result, ValidationError};
use topotree_core::types::TreeNode;
use tracing::debug;

/// One merge step: splice out every node at level `depth - 1`.
///
/// `tree` must already be merged to `depth - 1`.
pub fn merge_step(tree: &TreeNode, depth: usize) -> TreeNode {
    debug_assert!(depth >= 1);
    let mut children = Vec::with_capacity(tree.children.len());
    for child in &tree.children {
        flatten_into(child, depth, &mut children);
    }
    TreeNode {
        children,
        ..shallow(tree)
    }
}

fn flatten_into(node: &TreeNode, depth: usize, out: &mut Vec<TreeNode>) {
    if node.level == Some(depth - 1) {
        out.extend(node.children.iter().cloned());
        return;
    }
    let mut children = Vec::with_capacity(node.children.len());
    for child in &node.children {
        flatten_into(child, depth, &mut children);
    }
    out.push(TreeNode {
        children,
        ..shallow(node)
    });
}

fn shallow(node: &TreeNode) -> TreeNode {
    TreeNode {
        id: node.id.clone(),
        level: node.level,
        is_root: node.is_root,
        category: node.category.clone(),
        children: Vec::new(),
    }
}

fn check_depth(requested: i64, max: usize) -> Result<usize> {
    if requested < 0 {
        return Err(ValidationError::DepthBelowMinimum { requested }.into());
    }
    let depth = requested as usize;
    if depth > max {
        return Err(ValidationError::DepthAboveMaximum { requested, max }.into());
    }
    Ok(depth)
}

/// Merge `tree` to `depth` without caching.
///
/// Depth 0 returns an identical tree. Depths outside `0..=root level` fail.
pub fn reduce(tree: &TreeNode, depth: i64) -> Result<TreeNode> {
    let depth = check_depth(depth, max_depth(tree))?;
    let mut current = tree.clone();
    for d in 1..=depth {
        current = merge_step(&current, d);
    }
    Ok(current)
}

/// Merged views of one tree, one per depth, filled in on demand.
///
/// Entries are immutable once computed and are produced strictly in
/// increasing depth order, each from the one before.
#[derive(Debug, Clone)]
pub struct MergeCache {
    views: Vec<TreeNode>,
    max_depth: usize,
}

impl MergeCache {
    /// Seed the cache with the unmerged tree as depth 0.
    pub fn new(tree: TreeNode) -> Self {
        let max_depth = max_depth(&tree);
        Self {
            views: vec![tree],
            max_depth,
        }
    }

    /// Compute every depth up front.
    pub fn collapse_all(tree: TreeNode) -> Self {
        let mut cache = Self::new(tree);
        cache.extend_to(cache.max_depth);
        cache
    }

    pub fn min_depth(&self) -> usize {
        0
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Depths computed so far are `0..cached_depths()`.
    pub fn cached_depths(&self) -> usize {
        self.views.len()
    }

    /// The view at `depth`, computing missing depths in order.
    ///
    /// Returns the new depths computed along the way (empty on a cache hit)
    /// together with the requested view.
    pub fn get(&mut self, depth: i64) -> Result<(&TreeNode, Vec<usize>)> {
        let depth = check_depth(depth, self.max_depth)?;
        let added = self.extend_to(depth);
        Ok((&self.views[depth], added))
    }

    /// Drop the depths at and above `depth`, keeping at least depth 0.
    /// Used to roll back views whose side effects failed.
    pub fn truncate(&mut self, depth: usize) {
        self.views.truncate(depth.max(1));
    }

    /// The view at `depth` if it has already been computed.
    pub fn peek(&self, depth: usize) -> Option<&TreeNode> {
        self.views.get(depth)
    }

    fn extend_to(&mut self, depth: usize) -> Vec<usize> {
        let mut added = Vec::new();
        while self.views.len() <= depth {
            let next = self.views.len();
            let merged = merge_step(&self.views[next - 1], next);
            debug!(depth = next, nodes = merged.node_count(), "Merged hierarchy depth");
            self.views.push(merged);
            added.push(next);
        }
        added
    }

    /// Iterate over computed `(depth, view)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &TreeNode)> {
        self.views.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        TreeNode::cluster(
            "Level_1_0",
            1,
            true,
            vec![
                TreeNode::cluster(
                    "Level_0_0",
                    0,
                    false,
                    vec![TreeNode::leaf("a"), TreeNode::leaf("b")],
                ),
                TreeNode::cluster("Level_0_1", 0, false, vec![TreeNode::leaf("c")]),
            ],
        )
    }

    #[test]
    fn depth_zero_is_identity() {
        let tree = sample();
        assert_eq!(reduce(&tree, 0).unwrap(), tree);
    }

    #[test]
    fn full_collapse_hangs_leaves_from_root() {
        let merged = reduce(&sample(), 1).unwrap();
        assert_eq!(merged.id, "Level_1_0");
        assert_eq!(merged.child_ids(), vec!["a", "b", "c"]);
        assert!(merged.is_root);
    }

    #[test]
    fn out_of_range_depths_fail() {
        let tree = sample();
        let err = reduce(&tree, 2).unwrap_err();
        assert!(err.to_string().contains("maximum depth of 1"), "{err}");
        assert!(reduce(&tree, -1).unwrap_err().is_validation());
    }

    #[test]
    fn cache_hits_do_not_recompute() {
        let mut cache = MergeCache::new(sample());
        assert_eq!(cache.cached_depths(), 1);
        let (first, added) = cache.get(1).unwrap();
        let first = first.clone();
        assert_eq!(added, vec![1]);
        let (second, added) = cache.get(1).unwrap();
        assert!(added.is_empty());
        assert_eq!(*second, first);
        assert_eq!(cache.cached_depths(), 2);
    }

    #[test]
    fn collapse_all_fills_every_depth() {
        let cache = MergeCache::collapse_all(sample());
        assert_eq!(cache.cached_depths(), cache.max_depth() + 1);
        assert_eq!(cache.peek(1).unwrap().child_ids(), vec!["a", "b", "c"]);
    }
}
