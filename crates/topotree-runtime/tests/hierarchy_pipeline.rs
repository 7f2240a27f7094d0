//! Integration tests — building, converting and merging hierarchies.

mod common;

use ndarray::array;
use topotree_core::hierarchy::HierarchyGraph;
use topotree_core::types::*;
use topotree_runtime::builder::{group_membership_graph, HierarchyBuilder, MembershipGraphOptions};
use topotree_runtime::reducer::{reduce, MergeCache};
use topotree_runtime::top_words::top_word_indices_for_level;
use topotree_runtime::tree::{max_depth, tree_from_graph};

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn three_level_tree() -> TreeNode {
    let leaves = labels(&["a", "b", "c", "d", "e", "f"]);
    let level0 = array![
        [1.0, 1.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 1.0, 1.0]
    ];
    let level1 = array![[1.0, 1.0, 1.0, 1.0, 0.0, 0.0], [0.0, 0.0, 0.0, 0.0, 1.0, 1.0]];
    let level2 = array![[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]];
    let graph = HierarchyBuilder::new(LeafKind::Documents, &leaves)
        .levels([level0.view(), level1.view(), level2.view()])
        .build()
        .unwrap();
    tree_from_graph(&graph).unwrap()
}

#[test]
fn two_level_words_collapse_to_root() {
    let leaves = labels(&["a", "b", "c"]);
    let level0 = array![[1.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    let level1 = array![[1.0, 1.0, 1.0]];
    let graph = HierarchyBuilder::new(LeafKind::Words, &leaves)
        .level(level0.view())
        .level(level1.view())
        .build()
        .unwrap();

    let tree = tree_from_graph(&graph).unwrap();
    assert_eq!(tree.id, "Level_1_0");
    assert!(tree.is_root);
    assert_eq!(tree.child_ids(), vec!["Level_0_0", "Level_0_1"]);
    assert_eq!(tree.children[0].child_ids(), vec!["a", "b"]);
    assert_eq!(tree.children[1].child_ids(), vec!["c"]);

    let merged = reduce(&tree, 1).unwrap();
    assert_eq!(merged.id, "Level_1_0");
    assert_eq!(merged.child_ids(), vec!["a", "b", "c"]);
    assert!(merged.children.iter().all(|c| c.children.is_empty()));
}

#[test]
fn leaves_without_membership_are_pruned() {
    let leaves = labels(&["a", "b", "c"]);
    let level0 = array![[1.0, 1.0, 0.0]];
    let level1 = array![[1.0, 1.0, 0.0]];
    let graph = HierarchyBuilder::new(LeafKind::Documents, &leaves)
        .levels([level0.view(), level1.view()])
        .build()
        .unwrap();

    assert!(graph.find_by_label("c").is_empty());
    assert_eq!(graph.roots().len(), 1);
    for id in graph.all_nodes() {
        let node = graph.get_node(&id).unwrap();
        assert!(node.is_root() || !graph.parents(&id).is_empty(), "{} is orphaned", node.label);
    }
}

#[test]
fn mismatched_categories_name_both_counts() {
    let leaves = labels(&["a", "b"]);
    let level0 = array![[1.0, 1.0]];
    let err = HierarchyBuilder::new(LeafKind::Words, &leaves)
        .level(level0.view())
        .categories(labels(&["x", "y", "z"]))
        .build()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Validation error: Mismatched number of categories (3) with number of words (2)."
    );
}

#[test]
fn categories_follow_leaves_into_the_tree() {
    let leaves = labels(&["a", "b"]);
    let level0 = array![[1.0, 1.0]];
    let graph = HierarchyBuilder::new(LeafKind::Documents, &leaves)
        .level(level0.view())
        .categories(labels(&["news", "blog"]))
        .build()
        .unwrap();
    let tree = tree_from_graph(&graph).unwrap();
    let categories: Vec<_> = tree.children.iter().map(|c| c.category.clone()).collect();
    assert_eq!(categories, vec![Some("news".to_string()), Some("blog".to_string())]);
}

#[test]
fn depth_zero_is_the_unmerged_tree() {
    let tree = three_level_tree();
    assert_eq!(reduce(&tree, 0).unwrap(), tree);
}

#[test]
fn merging_never_grows_the_tree() {
    let tree = three_level_tree();
    assert_eq!(max_depth(&tree), 2);

    let counts: Vec<usize> = (0..=2).map(|d| reduce(&tree, d).unwrap().node_count()).collect();
    assert_eq!(counts, vec![12, 9, 7]);
    assert!(counts.windows(2).all(|w| w[1] <= w[0]));

    let collapsed = reduce(&tree, 2).unwrap();
    let mut leaves = collapsed.leaf_ids();
    leaves.sort();
    assert_eq!(leaves, vec!["a", "b", "c", "d", "e", "f"]);
}

#[test]
fn intermediate_depth_keeps_upper_clusters() {
    let merged = reduce(&three_level_tree(), 1).unwrap();
    assert_eq!(merged.child_ids(), vec!["Level_1_0", "Level_1_1"]);
    assert_eq!(merged.children[0].child_ids(), vec!["a", "b", "c", "d"]);
    assert_eq!(merged.children[1].child_ids(), vec!["e", "f"]);
}

#[test]
fn cache_matches_direct_reduction() {
    let tree = three_level_tree();
    let mut cache = MergeCache::new(tree.clone());

    let (view, added) = cache.get(2).unwrap();
    assert_eq!(*view, reduce(&tree, 2).unwrap());
    assert_eq!(added, vec![1, 2]);

    let (again, added) = cache.get(2).unwrap();
    assert_eq!(*again, reduce(&tree, 2).unwrap());
    assert!(added.is_empty());
    assert_eq!(cache.peek(1), Some(&reduce(&tree, 1).unwrap()));
}

#[test]
fn out_of_range_depths_are_rejected() {
    let tree = three_level_tree();
    assert!(reduce(&tree, 3).unwrap_err().to_string().contains("maximum depth of 2"));
    assert!(reduce(&tree, -1).unwrap_err().is_validation());

    let mut cache = MergeCache::new(tree);
    assert!(cache.get(3).is_err());
    assert_eq!(cache.cached_depths(), 1);
}

#[test]
fn top_words_merge_every_topic() {
    let model = common::model();
    assert_eq!(top_word_indices_for_level(&model, 2, 0).unwrap(), vec![0, 1, 3, 4]);
    assert_eq!(top_word_indices_for_level(&model, 1, 0).unwrap(), vec![0, 3]);
    assert_eq!(top_word_indices_for_level(&model, 10, 0).unwrap(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn word_graph_keeps_only_top_words() {
    let model = common::model();
    let options = MembershipGraphOptions {
        top_num_words: 2,
        ..Default::default()
    };
    let graph = group_membership_graph(&model, LeafKind::Words, &options).unwrap();
    assert!(graph.find_by_label("w2").is_empty());

    let tree = tree_from_graph(&graph).unwrap();
    let mut leaves = tree.leaf_ids();
    leaves.sort();
    assert_eq!(leaves, vec!["w0", "w1", "w3", "w4"]);
}

#[test]
fn document_graph_keeps_every_document() {
    let model = common::model();
    let options = MembershipGraphOptions::default();
    let graph = group_membership_graph(&model, LeafKind::Documents, &options).unwrap();
    let tree = tree_from_graph(&graph).unwrap();
    assert_eq!(tree.child_ids(), vec!["Level_0_0", "Level_0_1"]);
    assert_eq!(reduce(&tree, 1).unwrap().child_ids(), vec!["d0", "d1", "d2", "d3"]);
}

#[test]
fn top_words_level_is_bounded() {
    let model = common::model();
    let options = MembershipGraphOptions {
        top_words_for_level: 2,
        ..Default::default()
    };
    let err = group_membership_graph(&model, LeafKind::Words, &options).unwrap_err();
    assert!(err.to_string().contains("Maximum level is 1"));

    let options = MembershipGraphOptions {
        top_words_for_level: -1,
        ..Default::default()
    };
    let err = group_membership_graph(&model, LeafKind::Words, &options).unwrap_err();
    assert!(err.to_string().contains("Minimum level is 0."));
}
