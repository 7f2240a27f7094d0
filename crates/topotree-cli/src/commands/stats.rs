//! Show model statistics.

use anyhow::Result;
use colored::Colorize;
use topotree::prelude::*;

use super::load_model;
use crate::config::Config;

pub fn run(model_path: &str) -> Result<()> {
    let config = Config::load()?;
    let model = load_model(model_path)?;

    println!("{}", "━━━ Model ━━━".bold());
    println!("  Documents: {}", model.leaf_labels(LeafKind::Documents).len());
    println!("  Words:     {}", model.leaf_labels(LeafKind::Words).len());
    println!("  Levels:    {}", model.num_levels());
    println!();

    println!("{}", "━━━ Clusters per level ━━━".bold());
    println!("  {:>5}  {:>9}  {:>6}", "level", "documents", "words");
    for level in 0..model.num_levels() {
        let docs = model.membership_matrix(level, LeafKind::Documents)?.nrows();
        let words = model.membership_matrix(level, LeafKind::Words)?.nrows();
        println!("  {:>5}  {:>9}  {:>6}", level, docs, words);
    }
    println!();

    for kind in [LeafKind::Documents, LeafKind::Words] {
        let graph = group_membership_graph(&model, kind, &config.graph_options(None))?;
        let cache = MergeCache::collapse_all(tree_from_graph(&graph)?);

        println!("{}", format!("━━━ {kind} hierarchy ━━━").bold());
        println!("  Graph: {} nodes, {} edges", graph.node_count(), graph.edge_count());
        for (depth, view) in cache.iter() {
            println!(
                "  depth {}: {} nodes, {} under the root",
                depth.to_string().cyan(),
                view.node_count(),
                view.children.len()
            );
        }
        println!();
    }

    Ok(())
}
