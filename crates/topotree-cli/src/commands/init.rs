//! Initialize a topotree project.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::Config;

pub fn run(path: Option<String>) -> Result<()> {
    let base_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("{} Initializing topotree project...", "→".blue());

    let config = Config::default();
    let config_path = base_path.join("topotree.toml");
    if !config_path.exists() {
        config.save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    } else {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    }

    let snapshot_root = base_path.join(&config.viz.snapshot_root);
    std::fs::create_dir_all(&snapshot_root)
        .with_context(|| format!("Failed to create {}", snapshot_root.display()))?;
    println!("  {} Created {}", "✓".green(), snapshot_root.display());

    let gitignore_path = snapshot_root.join(".gitignore");
    if !gitignore_path.exists() {
        std::fs::write(&gitignore_path, "*\n")?;
        println!("  {} Created {}", "✓".green(), gitignore_path.display());
    }

    println!();
    println!("{} topotree project initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!("  {} topotree stats <model.json>", "1.".blue());
    println!("  {} topotree tree <model.json> --kind words --depth 1", "2.".blue());
    println!("  {} topotree results <model.json> <corpus.json>", "3.".blue());

    Ok(())
}
