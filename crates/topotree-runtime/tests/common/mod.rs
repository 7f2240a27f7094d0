//! Shared fixtures: a two-level model over four documents and five words.

#![allow(dead_code)]

use ndarray::array;
use topotree_core::corpus::DocumentTermMatrix;
use topotree_runtime::corpus::MemoryCorpus;
use topotree_runtime::model::{FittedModel, ModelSnapshot, SerializedLevel};

fn rows(matrix: ndarray::Array2<f64>) -> Vec<Vec<f64>> {
    matrix.rows().into_iter().map(|r| r.to_vec()).collect()
}

pub fn snapshot() -> ModelSnapshot {
    ModelSnapshot {
        documents: vec!["d0".into(), "d1".into(), "d2".into(), "d3".into()],
        words: vec!["w0".into(), "w1".into(), "w2".into(), "w3".into(), "w4".into()],
        levels: vec![
            SerializedLevel {
                doc_membership: rows(array![[1.0, 1.0, 0.0, 0.0], [0.0, 0.0, 1.0, 1.0]]),
                word_membership: rows(array![
                    [1.0, 1.0, 1.0, 0.0, 0.0],
                    [0.0, 0.0, 0.0, 1.0, 1.0]
                ]),
                topic_word: rows(array![
                    [0.5, 0.3, 0.2, 0.0, 0.0],
                    [0.0, 0.0, 0.0, 0.6, 0.4]
                ]),
                topic_document: rows(array![[0.9, 0.8, 0.1, 0.2], [0.1, 0.2, 0.9, 0.8]]),
            },
            SerializedLevel {
                doc_membership: rows(array![[1.0, 1.0, 1.0, 1.0]]),
                word_membership: rows(array![[1.0, 1.0, 1.0, 1.0, 1.0]]),
                topic_word: rows(array![[0.2, 0.2, 0.2, 0.2, 0.2]]),
                topic_document: rows(array![[1.0, 1.0, 1.0, 1.0]]),
            },
        ],
    }
}

pub fn model() -> FittedModel {
    FittedModel::from_snapshot(snapshot()).unwrap()
}

pub fn corpus() -> MemoryCorpus {
    let dtm = DocumentTermMatrix::from_matrix(
        array![
            [2.0, 1.0, 0.0, 0.0, 1.0],
            [1.0, 3.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 2.0, 2.0],
            [0.0, 1.0, 0.0, 1.0, 4.0]
        ],
        vec!["w0".into(), "w1".into(), "w2".into(), "w3".into(), "w4".into()],
    )
    .unwrap();
    MemoryCorpus::new("fixture", vec!["d0".into(), "d1".into(), "d2".into(), "d3".into()])
        .with_dtm(dtm)
        .unwrap()
}
