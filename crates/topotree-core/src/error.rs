//! Error types for topotree operations.
//!
//! Errors fall into three groups: caller input that fails validation,
//! hierarchy invariants that do not hold after construction, and artifacts
//! that the model or corpus does not have.

use crate::types::LeafKind;
use thiserror::Error;

/// Result type for topotree operations.
pub type Result<T> = std::result::Result<T, TopoTreeError>;

/// Errors that can occur during topotree operations.
#[derive(Debug, Error)]
pub enum TopoTreeError {
    /// Malformed caller input.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    /// The built hierarchy breaks a structural invariant.
    #[error("Invariant violation: {0}")]
    Invariant(#[from] InvariantError),
    /// A requested level, meta or matrix does not exist.
    #[error("Missing artifact: {0}")]
    Missing(#[from] MissingArtifact),
    /// I/O errors (wrapped).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Caller input that cannot be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Mismatched number of categories ({categories}) with number of {kind} ({leaves}).")]
    CategoryCount {
        categories: usize,
        kind: LeafKind,
        leaves: usize,
    },
    #[error("Maximum level is {max}")]
    LevelAboveMaximum { requested: usize, max: usize },
    #[error("Minimum level is 0.")]
    LevelBelowMinimum { requested: i64 },
    #[error("Hierarchy has a maximum depth of {max} (requested {requested}).")]
    DepthAboveMaximum { requested: i64, max: usize },
    #[error("Hierarchy has a minimum depth of 0 (requested {requested}).")]
    DepthBelowMinimum { requested: i64 },
    #[error("Level {level} {kind} memberships have {found} columns, expected {expected}.")]
    MembershipShape {
        level: usize,
        kind: LeafKind,
        expected: usize,
        found: usize,
    },
    #[error("Mismatched number of terms: matrix has {dtm_terms}, memberships have {membership_terms}. Was this matrix used to fit the model?")]
    TermCount {
        dtm_terms: usize,
        membership_terms: usize,
    },
    #[error("Mismatched number of documents: expected {expected}, found {found}.")]
    DocumentCount { expected: usize, found: usize },
    #[error("Leaf index {index} out of range for {leaves} {kind}.")]
    LeafOutOfRange {
        index: usize,
        kind: LeafKind,
        leaves: usize,
    },
    #[error("Matrix row {row} has {found} values, expected {expected}.")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("{0} is not valid. Either documents or words.")]
    UnknownKind(String),
    #[error("{0} is not valid. Hierarchy must be one of radial, tree.")]
    UnknownHierarchy(String),
    #[error("At least one membership level is required.")]
    NoLevels,
    #[error("The model has not been fitted yet.")]
    NotFitted,
}

/// Structural invariants of a built hierarchy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantError {
    #[error("Expecting only 1 root but found {0}.")]
    RootCount(usize),
    #[error("{node} has {parents} parents; the hierarchy is not a tree.")]
    MultipleParents { node: String, parents: usize },
}

/// Something asked for that the model or corpus does not hold.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MissingArtifact {
    #[error("Level {level} is not available; the model has {levels} levels.")]
    Level { level: usize, levels: usize },
    #[error("Document-term matrix not found: {0}")]
    Dtm(String),
}

// Convenience constructors
impl TopoTreeError {
    pub fn category_count(categories: usize, kind: LeafKind, leaves: usize) -> Self {
        ValidationError::CategoryCount {
            categories,
            kind,
            leaves,
        }
        .into()
    }

    pub fn missing_level(level: usize, levels: usize) -> Self {
        MissingArtifact::Level { level, levels }.into()
    }

    pub fn root_count(found: usize) -> Self {
        InvariantError::RootCount(found).into()
    }

    /// Whether this error came from caller input rather than model state.
    pub fn is_validation(&self) -> bool {
        matches!(self, TopoTreeError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_message_names_both_counts() {
        let err = TopoTreeError::category_count(2, LeafKind::Documents, 3);
        let msg = err.to_string();
        assert!(msg.contains("(2)"), "{msg}");
        assert!(msg.contains("documents (3)"), "{msg}");
        assert!(err.is_validation());
    }

    #[test]
    fn depth_message_names_maximum() {
        let err: TopoTreeError = ValidationError::DepthAboveMaximum {
            requested: 7,
            max: 3,
        }
        .into();
        assert!(err.to_string().contains("maximum depth of 3"));
    }
}
