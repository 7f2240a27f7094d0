//! Build a hierarchy and print it merged to a depth.

use anyhow::{Context, Result};
use colored::Colorize;
use topotree::prelude::*;

use super::load_model;
use crate::config::Config;

pub struct TreeArgs {
    pub model: String,
    pub kind: String,
    pub depth: i64,
    pub hierarchy: Option<String>,
    pub categories: Option<String>,
    pub output: Option<String>,
    pub snapshots: bool,
}

pub fn run(args: TreeArgs) -> Result<()> {
    let config = Config::load()?;
    let kind: LeafKind = args.kind.parse()?;
    let hierarchy: HierarchyStyle = args
        .hierarchy
        .as_deref()
        .unwrap_or(&config.viz.hierarchy)
        .parse()?;

    let categories = match &args.categories {
        Some(path) => Some(read_categories(path)?),
        None => None,
    };

    let model = load_model(&args.model)?;
    let mut session = VizSession::from_model(
        &model,
        kind,
        hierarchy,
        &config.graph_options(categories),
        &config.viz_config(args.snapshots),
    )
    .with_context(|| format!("Failed to build the {kind} hierarchy"))?;

    let max_depth = session.max_depth();
    let tree = session.view(args.depth)?;
    let json = serde_json::to_string_pretty(tree)?;
    let summary = format!(
        "{} nodes, {} leaves at depth {} of {}",
        tree.node_count(),
        tree.leaf_ids().len(),
        args.depth,
        max_depth,
    );

    match &args.output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Failed to write {path}"))?;
            eprintln!("{} Wrote {} ({})", "✓".green(), path.bold(), summary);
        }
        None => {
            println!("{json}");
            eprintln!("{} {}", "•".blue(), summary);
        }
    }

    if args.snapshots {
        if let Some(dir) = session.persist() {
            eprintln!(
                "{} Snapshots for {} in {}",
                "✓".green(),
                hierarchy.renderer_asset().cyan(),
                dir.display()
            );
        }
    }

    Ok(())
}

fn read_categories(path: &str) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read categories: {path}"))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
