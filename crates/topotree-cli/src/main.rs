//! topotree CLI - browse the cluster hierarchy of a fitted topic model.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "topotree")]
#[command(author, version, about = "topotree - Cluster hierarchies from hierarchical topic models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default topotree.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Build the hierarchy of a model and print it merged to a depth
    Tree {
        /// Fitted model snapshot (JSON)
        model: String,

        /// Leaves to build the hierarchy over: documents or words
        #[arg(short, long, default_value = "documents")]
        kind: String,

        /// Merge depth (0 keeps every level)
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        depth: i64,

        /// Renderer layout: radial or tree (default from config)
        #[arg(long)]
        hierarchy: Option<String>,

        /// File with one category per retained leaf, one per line
        #[arg(short, long)]
        categories: Option<String>,

        /// Write the tree here instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Keep the session's per-depth snapshots on disk
        #[arg(long)]
        snapshots: bool,
    },

    /// Show levels, cluster counts and merge depths of a model
    Stats {
        /// Fitted model snapshot (JSON)
        model: String,
    },

    /// Write cluster assignments and topic matrices into a corpus file
    Results {
        /// Fitted model snapshot (JSON)
        model: String,

        /// Corpus file (JSON), updated in place
        corpus: String,

        /// Level whose topics become matrices and distribution metas
        #[arg(short, long, allow_hyphen_values = true)]
        topic_level: Option<i64>,

        /// Registered matrix the model was fitted on (default: the corpus's own)
        #[arg(long)]
        dtm: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Tree {
            model,
            kind,
            depth,
            hierarchy,
            categories,
            output,
            snapshots,
        } => commands::tree::run(commands::tree::TreeArgs {
            model,
            kind,
            depth,
            hierarchy,
            categories,
            output,
            snapshots,
        }),
        Commands::Stats { model } => commands::stats::run(&model),
        Commands::Results {
            model,
            corpus,
            topic_level,
            dtm,
        } => commands::results::run(&model, &corpus, topic_level, dtm),
    }
}
