//! Fitted model snapshots.
//!
//! A fitted hSBM is exported as JSON: document ids, vocabulary and, per
//! level, the document and word memberships plus the topic-word and
//! topic-document probabilities. Matrices are stored as lists of rows.

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::path::Path;
use topotree_core::error::{Result, TopoTreeError, ValidationError};
use topotree_core::source::MembershipSource;
use topotree_core::types::LeafKind;
use tracing::info;

/// One level of a model snapshot as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedLevel {
    /// Document clusters x documents.
    pub doc_membership: Vec<Vec<f64>>,
    /// Word clusters x words.
    pub word_membership: Vec<Vec<f64>>,
    /// Word topics x words.
    #[serde(default)]
    pub topic_word: Vec<Vec<f64>>,
    /// Word topics x documents.
    #[serde(default)]
    pub topic_document: Vec<Vec<f64>>,
}

/// On-disk form of a fitted model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub documents: Vec<String>,
    pub words: Vec<String>,
    pub levels: Vec<SerializedLevel>,
}

#[derive(Debug, Clone)]
struct Level {
    doc_membership: Array2<f64>,
    word_membership: Array2<f64>,
    topic_word: Array2<f64>,
    topic_document: Array2<f64>,
}

/// A fitted model loaded from a snapshot.
#[derive(Debug, Clone)]
pub struct FittedModel {
    documents: Vec<String>,
    words: Vec<String>,
    levels: Vec<Level>,
}

/// Rows to a matrix with `cols` columns. An empty row list is a 0 x `cols`
/// matrix.
fn to_matrix(rows: &[Vec<f64>], cols: usize) -> Result<Array2<f64>> {
    if let Some((row, values)) = rows.iter().enumerate().find(|(_, v)| v.len() != cols) {
        return Err(ValidationError::RaggedMatrix {
            row,
            expected: cols,
            found: values.len(),
        }
        .into());
    }
    Ok(Array2::from_shape_fn((rows.len(), cols), |(r, c)| rows[r][c]))
}

fn to_rows(matrix: &Array2<f64>) -> Vec<Vec<f64>> {
    matrix.rows().into_iter().map(|r| r.to_vec()).collect()
}

impl FittedModel {
    /// Validate a snapshot and convert it into matrices.
    pub fn from_snapshot(snapshot: ModelSnapshot) -> Result<Self> {
        if snapshot.levels.is_empty() {
            return Err(ValidationError::NotFitted.into());
        }
        let num_docs = snapshot.documents.len();
        let num_words = snapshot.words.len();

        let levels = snapshot
            .levels
            .iter()
            .map(|level| {
                Ok(Level {
                    doc_membership: to_matrix(&level.doc_membership, num_docs)?,
                    word_membership: to_matrix(&level.word_membership, num_words)?,
                    topic_word: to_matrix(&level.topic_word, num_words)?,
                    topic_document: to_matrix(&level.topic_document, num_docs)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            documents: snapshot.documents,
            words: snapshot.words,
            levels,
        })
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: ModelSnapshot = serde_json::from_str(&content)?;
        let model = Self::from_snapshot(snapshot)?;
        info!(
            path = %path.display(),
            levels = model.levels.len(),
            documents = model.documents.len(),
            words = model.words.len(),
            "Loaded fitted model"
        );
        Ok(model)
    }

    /// Convert back into the on-disk form.
    pub fn to_snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            documents: self.documents.clone(),
            words: self.words.clone(),
            levels: self
                .levels
                .iter()
                .map(|level| SerializedLevel {
                    doc_membership: to_rows(&level.doc_membership),
                    word_membership: to_rows(&level.word_membership),
                    topic_word: to_rows(&level.topic_word),
                    topic_document: to_rows(&level.topic_document),
                })
                .collect(),
        }
    }

    fn level(&self, level: usize) -> Result<&Level> {
        self.levels
            .get(level)
            .ok_or_else(|| TopoTreeError::missing_level(level, self.levels.len()))
    }
}

impl MembershipSource for FittedModel {
    fn num_levels(&self) -> usize {
        self.levels.len()
    }

    fn leaf_labels(&self, kind: LeafKind) -> &[String] {
        match kind {
            LeafKind::Documents => &self.documents,
            LeafKind::Words => &self.words,
        }
    }

    fn membership_matrix(&self, level: usize, kind: LeafKind) -> Result<ArrayView2<'_, f64>> {
        let level = self.level(level)?;
        Ok(match kind {
            LeafKind::Documents => level.doc_membership.view(),
            LeafKind::Words => level.word_membership.view(),
        })
    }

    fn topic_word_probabilities(&self, level: usize) -> Result<ArrayView2<'_, f64>> {
        Ok(self.level(level)?.topic_word.view())
    }

    fn topic_document_probabilities(&self, level: usize) -> Result<ArrayView2<'_, f64>> {
        Ok(self.level(level)?.topic_document.view())
    }
}
