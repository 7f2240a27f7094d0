//! Visualisation sessions.
//!
//! A session owns one hierarchy graph, its tree view and the merge cache
//! for one (leaf kind, hierarchy style) pair. Every merged view it hands
//! out is also written as a JSON snapshot into a per-session directory,
//! along with a manifest the front end reads to find them. The directory is
//! removed when the session is dropped unless it is persisted.

use crate::builder::{group_membership_graph, MembershipGraphOptions};
use crate::hierarchy_impl::PetHierarchyGraph;
use crate::reducer::MergeCache;
use crate::tree::tree_from_graph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use topotree_core::error::Result;
use topotree_core::source::MembershipSource;
use topotree_core::types::*;
use tracing::{debug, info};
use uuid::Uuid;

/// Session settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizConfig {
    /// Whether the front end can serve dot-prefixed paths. When it can, the
    /// session directory is a hidden directory directly under
    /// `snapshot_root`; otherwise a visible one under `snapshot_root/tmp`.
    pub allow_hidden: bool,
    pub snapshot_root: PathBuf,
    /// Write snapshots at all. Sessions used purely in memory turn this off.
    pub write_snapshots: bool,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            allow_hidden: false,
            snapshot_root: PathBuf::from("."),
            write_snapshots: true,
        }
    }
}

/// Index of the snapshots written so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotManifest {
    pub session_id: String,
    pub kind: LeafKind,
    pub hierarchy: HierarchyStyle,
    pub renderer: String,
    pub max_depth: usize,
    /// Merge depth to snapshot file name.
    pub snapshots: BTreeMap<usize, String>,
}

/// A browsable hierarchy with memoized merged views.
pub struct VizSession {
    id: Uuid,
    kind: LeafKind,
    hierarchy: HierarchyStyle,
    graph: PetHierarchyGraph,
    cache: MergeCache,
    dir: Option<TempDir>,
    manifest: SnapshotManifest,
}

impl VizSession {
    /// Start a session over an already built graph.
    ///
    /// Fails if the graph has no single root or is not a tree.
    pub fn new(
        kind: LeafKind,
        hierarchy: HierarchyStyle,
        graph: PetHierarchyGraph,
        config: &VizConfig,
    ) -> Result<Self> {
        let tree = tree_from_graph(&graph)?;
        let cache = MergeCache::new(tree);
        let id = Uuid::new_v4();

        let dir = if config.write_snapshots {
            Some(create_session_dir(config)?)
        } else {
            None
        };

        let manifest = SnapshotManifest {
            session_id: id.to_string(),
            kind,
            hierarchy,
            renderer: hierarchy.renderer_asset().to_string(),
            max_depth: cache.max_depth(),
            snapshots: BTreeMap::new(),
        };

        let mut session = Self {
            id,
            kind,
            hierarchy,
            graph,
            cache,
            dir,
            manifest,
        };
        session.write_snapshots(&[0])?;

        info!(
            session = %session.id,
            kind = %kind,
            max_depth = session.max_depth(),
            dir = ?session.snapshot_dir(),
            "Started visualisation session"
        );
        Ok(session)
    }

    /// Build the graph of `kind` from a fitted model and start a session.
    pub fn from_model<S: MembershipSource + ?Sized>(
        source: &S,
        kind: LeafKind,
        hierarchy: HierarchyStyle,
        options: &MembershipGraphOptions,
        config: &VizConfig,
    ) -> Result<Self> {
        let graph = group_membership_graph(source, kind, options)?;
        Self::new(kind, hierarchy, graph, config)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> LeafKind {
        self.kind
    }

    pub fn hierarchy(&self) -> HierarchyStyle {
        self.hierarchy
    }

    pub fn graph(&self) -> &PetHierarchyGraph {
        &self.graph
    }

    pub fn min_depth(&self) -> usize {
        self.cache.min_depth()
    }

    pub fn max_depth(&self) -> usize {
        self.cache.max_depth()
    }

    /// Depths whose views have been computed.
    pub fn cached_depths(&self) -> usize {
        self.cache.cached_depths()
    }

    /// The hierarchy merged to `depth`.
    ///
    /// Missing depths up to `depth` are computed in order and snapshotted;
    /// cached depths are returned as they are.
    pub fn view(&mut self, depth: i64) -> Result<&TreeNode> {
        let (_, added) = self.cache.get(depth)?;
        if let Err(e) = self.write_snapshots(&added) {
            if let Some(&first) = added.first() {
                self.cache.truncate(first);
            }
            return Err(e);
        }
        let (tree, _) = self.cache.get(depth)?;
        Ok(tree)
    }

    pub fn snapshot_dir(&self) -> Option<&Path> {
        self.dir.as_ref().map(TempDir::path)
    }

    /// Path of the snapshot for `depth`, once it has been written.
    pub fn snapshot_path(&self, depth: usize) -> Option<PathBuf> {
        let dir = self.snapshot_dir()?;
        self.manifest.snapshots.get(&depth).map(|name| dir.join(name))
    }

    pub fn manifest(&self) -> &SnapshotManifest {
        &self.manifest
    }

    /// End the session but keep its snapshot directory on disk.
    pub fn persist(self) -> Option<PathBuf> {
        let dir = self.dir?.keep();
        info!(session = %self.id, dir = %dir.display(), "Kept session snapshots");
        Some(dir)
    }

    fn write_snapshots(&mut self, depths: &[usize]) -> Result<()> {
        let Some(dir) = self.dir.as_ref().map(|d| d.path().to_path_buf()) else {
            return Ok(());
        };
        for &depth in depths {
            let Some(tree) = self.cache.peek(depth) else {
                continue;
            };
            let name = format!("depth_{depth}.json");
            std::fs::write(dir.join(&name), serde_json::to_string_pretty(tree)?)?;
            debug!(depth, file = %name, "Wrote tree snapshot");
            self.manifest.snapshots.insert(depth, name);
        }
        if !depths.is_empty() {
            std::fs::write(
                dir.join("manifest.json"),
                serde_json::to_string_pretty(&self.manifest)?,
            )?;
        }
        Ok(())
    }
}

fn create_session_dir(config: &VizConfig) -> Result<TempDir> {
    let dir = if config.allow_hidden {
        tempfile::Builder::new()
            .prefix(".topotree-")
            .tempdir_in(&config.snapshot_root)?
    } else {
        let parent = config.snapshot_root.join("tmp");
        std::fs::create_dir_all(&parent)?;
        tempfile::Builder::new()
            .prefix("topotree-")
            .tempdir_in(parent)?
    };
    Ok(dir)
}
