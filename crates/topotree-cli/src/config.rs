//! Configuration management for the topotree CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use topotree::prelude::{MembershipGraphOptions, ResultsOptions, VizConfig};

/// topotree project configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub viz: VizSection,
    #[serde(default)]
    pub build: BuildSection,
    #[serde(default)]
    pub results: ResultsSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizSection {
    #[serde(default = "default_hierarchy")]
    pub hierarchy: String,
    #[serde(default)]
    pub allow_hidden: bool,
    #[serde(default = "default_snapshot_root")]
    pub snapshot_root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildSection {
    #[serde(default)]
    pub top_words_for_level: i64,
    #[serde(default = "default_top_num_words")]
    pub top_num_words: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsSection {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_capture_git")]
    pub capture_git: bool,
}

// Default value functions
fn default_hierarchy() -> String { "radial".to_string() }
fn default_snapshot_root() -> PathBuf { PathBuf::from(".topotree") }
fn default_top_num_words() -> usize { 5 }
fn default_prefix() -> String { "topsbm".to_string() }
fn default_capture_git() -> bool { true }

impl Default for Config {
    fn default() -> Self {
        Self {
            viz: VizSection::default(),
            build: BuildSection::default(),
            results: ResultsSection::default(),
        }
    }
}

impl Default for VizSection {
    fn default() -> Self {
        Self {
            hierarchy: default_hierarchy(),
            allow_hidden: false,
            snapshot_root: default_snapshot_root(),
        }
    }
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            top_words_for_level: 0,
            top_num_words: default_top_num_words(),
        }
    }
}

impl Default for ResultsSection {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            capture_git: default_capture_git(),
        }
    }
}

impl Config {
    /// Load config from topotree.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        if let Some(path) = find_config_file() {
            Self::load_from(&path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    pub fn graph_options(&self, categories: Option<Vec<String>>) -> MembershipGraphOptions {
        MembershipGraphOptions {
            categories,
            top_words_for_level: self.build.top_words_for_level,
            top_num_words: self.build.top_num_words,
        }
    }

    /// Session settings. The CLI writes its own output files, so session
    /// snapshots are only kept when asked for.
    pub fn viz_config(&self, write_snapshots: bool) -> VizConfig {
        VizConfig {
            allow_hidden: self.viz.allow_hidden,
            snapshot_root: self.viz.snapshot_root.clone(),
            write_snapshots,
        }
    }

    pub fn results_options(
        &self,
        topic_level: Option<i64>,
        source_dtm: Option<String>,
    ) -> ResultsOptions {
        ResultsOptions {
            prefix: self.results.prefix.clone(),
            topic_level,
            source_dtm,
            capture_git: self.results.capture_git,
            git_dir: None,
        }
    }
}

/// Find topotree.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join("topotree.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
