//! Write model results into a corpus file.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use topotree::prelude::*;

use super::load_model;
use crate::config::Config;

pub fn run(
    model_path: &str,
    corpus_path: &str,
    topic_level: Option<i64>,
    dtm: Option<String>,
) -> Result<()> {
    let config = Config::load()?;
    let model = load_model(model_path)?;
    let path = Path::new(corpus_path);
    let mut corpus =
        MemoryCorpus::load(path).with_context(|| format!("Failed to load corpus: {corpus_path}"))?;

    let options = config.results_options(topic_level, dtm);
    let bundle = add_results(&model, &mut corpus, &options)?;
    corpus
        .save(path)
        .with_context(|| format!("Failed to write corpus: {corpus_path}"))?;

    println!("{} Results added to {}", "✓".green(), corpus_path.bold());
    println!("  Metas ({}):", bundle.meta.len());
    for name in &bundle.meta {
        println!("    {}", name.cyan());
    }
    if !bundle.dtms.is_empty() {
        println!("  Matrices ({}):", bundle.dtms.len());
        for name in &bundle.dtms {
            println!("    {}", name.cyan());
        }
    }
    match &bundle.git {
        Some(git) => {
            let short = &git.commit[..git.commit.len().min(12)];
            println!("  Source: {} @ {}", git.origin, short);
        }
        None if options.capture_git => println!("  {} No git provenance recorded", "•".yellow()),
        None => {}
    }

    Ok(())
}
