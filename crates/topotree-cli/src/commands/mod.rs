//! CLI command implementations.

pub mod init;
pub mod results;
pub mod stats;
pub mod tree;

use anyhow::{Context, Result};
use std::path::Path;
use topotree::prelude::FittedModel;

/// Load a model snapshot, naming the file on failure.
pub fn load_model(path: &str) -> Result<FittedModel> {
    FittedModel::load(Path::new(path)).with_context(|| format!("Failed to load model: {path}"))
}
