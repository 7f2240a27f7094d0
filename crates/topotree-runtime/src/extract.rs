//! Extraction adapters from a fitted model to corpus artifacts.

use ndarray::Array1;
use std::collections::BTreeMap;
use topotree_core::corpus::DocumentTermMatrix;
use topotree_core::error::{Result, ValidationError};
use topotree_core::source::MembershipSource;
use topotree_core::types::LeafKind;

/// One document-term matrix per word cluster at `level`.
///
/// Each term column of `from_dtm` is scaled by the cluster's membership of
/// that word, so terms outside the cluster are zeroed out. `from_dtm` must
/// be the matrix the model was fitted on.
pub fn topic_submatrices<S: MembershipSource + ?Sized>(
    source: &S,
    level: usize,
    from_dtm: &DocumentTermMatrix,
) -> Result<BTreeMap<usize, DocumentTermMatrix>> {
    let word_groups = source.membership_matrix(level, LeafKind::Words)?;
    if from_dtm.num_terms() != word_groups.ncols() {
        return Err(ValidationError::TermCount {
            dtm_terms: from_dtm.num_terms(),
            membership_terms: word_groups.ncols(),
        }
        .into());
    }

    word_groups
        .rows()
        .into_iter()
        .enumerate()
        .map(|(group, memberships)| from_dtm.scale_terms(memberships).map(|dtm| (group, dtm)))
        .collect()
}

/// Each topic's probability over documents at `level`.
pub fn topic_distributions<S: MembershipSource + ?Sized>(
    source: &S,
    level: usize,
) -> Result<BTreeMap<usize, Array1<f64>>> {
    let p_tw_d = source.topic_document_probabilities(level)?;
    Ok(p_tw_d
        .rows()
        .into_iter()
        .enumerate()
        .map(|(topic, dist)| (topic, dist.to_owned()))
        .collect())
}

/// Index of the strongest cluster for every document at `level`.
///
/// Ties go to the lowest cluster index; a document with no cluster rows
/// maps to 0.
pub fn document_clusters<S: MembershipSource + ?Sized>(
    source: &S,
    level: usize,
) -> Result<Vec<usize>> {
    let memberships = source.membership_matrix(level, LeafKind::Documents)?;
    Ok(memberships
        .columns()
        .into_iter()
        .map(|doc| {
            doc.iter()
                .enumerate()
                .fold((0, f64::NEG_INFINITY), |best, (cluster, &value)| {
                    if value > best.1 {
                        (cluster, value)
                    } else {
                        best
                    }
                })
                .0
        })
        .collect())
}
