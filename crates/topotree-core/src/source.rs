//! The fitted model as seen by topotree.
//!
//! Fitting is someone else's job; topotree only reads per-level membership
//! and probability matrices out of a model that is already fitted.

use crate::error::Result;
use crate::types::LeafKind;
use ndarray::ArrayView2;

/// Read-only access to a fitted hierarchical topic model.
pub trait MembershipSource {
    /// Number of hierarchy levels. Zero means the model is not fitted.
    fn num_levels(&self) -> usize;

    /// Leaf identifiers of one kind, in membership column order.
    fn leaf_labels(&self, kind: LeafKind) -> &[String];

    /// Cluster x leaf memberships at `level`.
    fn membership_matrix(&self, level: usize, kind: LeafKind) -> Result<ArrayView2<'_, f64>>;

    /// Topic x word probabilities at `level`.
    fn topic_word_probabilities(&self, level: usize) -> Result<ArrayView2<'_, f64>>;

    /// Topic x document probabilities at `level`.
    fn topic_document_probabilities(&self, level: usize) -> Result<ArrayView2<'_, f64>>;

    /// Highest level index.
    fn max_level(&self) -> Option<usize> {
        self.num_levels().checked_sub(1)
    }
}
