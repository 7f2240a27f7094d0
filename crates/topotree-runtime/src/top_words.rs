//! Top-word selection for word hierarchies.
//!
//! A full vocabulary makes an unreadable tree, so word hierarchies keep only
//! the highest-probability words of every word-topic at one level.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use topotree_core::error::Result;
use topotree_core::source::MembershipSource;

/// Column indices of the `top` most probable words of each topic at
/// `level`, merged and sorted ascending. Words with zero probability in a
/// topic are never selected for it.
pub fn top_word_indices_for_level<S: MembershipSource + ?Sized>(
    source: &S,
    top: usize,
    level: usize,
) -> Result<Vec<usize>> {
    let p_w_tw = source.topic_word_probabilities(level)?;
    let mut selected = BTreeSet::new();

    for topic in p_w_tw.rows() {
        let mut ranked: Vec<(usize, f64)> = topic
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, p)| *p > 0.0)
            .collect();
        // Highest probability first; ties keep vocabulary order.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        selected.extend(ranked.into_iter().take(top).map(|(idx, _)| idx));
    }

    Ok(selected.into_iter().collect())
}
