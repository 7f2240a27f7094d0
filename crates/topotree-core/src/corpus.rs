//! The corpus as seen by topotree: a key-value attribute store plus named
//! registries of per-document metas and document-term matrices.

use crate::error::{Result, TopoTreeError, ValidationError};
use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

/// A dense document x term count matrix with its vocabulary.
///
/// Deserialization goes through [`DocumentTermMatrix::from_matrix`], so a
/// loaded matrix always has one term per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDocumentTermMatrix")]
pub struct DocumentTermMatrix {
    pub terms: Vec<String>,
    pub matrix: Array2<f64>,
}

#[derive(Deserialize)]
struct RawDocumentTermMatrix {
    terms: Vec<String>,
    matrix: Array2<f64>,
}

impl TryFrom<RawDocumentTermMatrix> for DocumentTermMatrix {
    type Error = TopoTreeError;

    fn try_from(raw: RawDocumentTermMatrix) -> Result<Self> {
        Self::from_matrix(raw.matrix, raw.terms)
    }
}

impl DocumentTermMatrix {
    /// Pair a matrix with its terms; one term per column.
    pub fn from_matrix(matrix: Array2<f64>, terms: Vec<String>) -> Result<Self> {
        if matrix.ncols() != terms.len() {
            return Err(ValidationError::TermCount {
                dtm_terms: matrix.ncols(),
                membership_terms: terms.len(),
            }
            .into());
        }
        Ok(Self { terms, matrix })
    }

    pub fn num_docs(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Scale each term column by the matching entry of `weights`.
    pub fn scale_terms(&self, weights: ArrayView1<'_, f64>) -> Result<Self> {
        if weights.len() != self.matrix.ncols() || weights.len() != self.num_terms() {
            return Err(ValidationError::TermCount {
                dtm_terms: self.matrix.ncols(),
                membership_terms: weights.len(),
            }
            .into());
        }
        let matrix = &self.matrix * &weights.insert_axis(Axis(0));
        Ok(Self {
            terms: self.terms.clone(),
            matrix,
        })
    }
}

/// One value per document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum MetaSeries {
    /// Cluster index per document.
    Cluster(Vec<usize>),
    /// A numeric score per document (e.g. topic probability).
    Numeric(Vec<f64>),
}

impl MetaSeries {
    pub fn len(&self) -> usize {
        match self {
            MetaSeries::Cluster(v) => v.len(),
            MetaSeries::Numeric(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Storage the derived artifacts are written back into.
pub trait CorpusStore {
    /// Number of documents in the corpus.
    fn num_documents(&self) -> usize;

    /// Add a per-document meta. Fails if its length is not the document count.
    fn add_meta(&mut self, name: &str, series: MetaSeries) -> Result<()>;

    fn get_meta(&self, name: &str) -> Option<&MetaSeries>;

    /// Register a document-term matrix under `name`.
    fn add_dtm(&mut self, name: &str, dtm: DocumentTermMatrix) -> Result<()>;

    fn get_dtm(&self, name: &str) -> Option<&DocumentTermMatrix>;

    /// The corpus's default (token count) matrix, if one exists.
    fn default_dtm(&self) -> Option<&DocumentTermMatrix>;

    /// Attach a namespaced attribute bundle, replacing any previous one.
    fn set_attribute(&mut self, namespace: &str, value: serde_json::Value);

    fn attribute(&self, namespace: &str) -> Option<&serde_json::Value>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn scale_terms_masks_columns() {
        let dtm = DocumentTermMatrix::from_matrix(
            array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
            vec!["x".into(), "y".into(), "z".into()],
        )
        .unwrap();
        let masked = dtm.scale_terms(array![1.0, 0.0, 1.0].view()).unwrap();
        assert_eq!(masked.matrix, array![[1.0, 0.0, 3.0], [4.0, 0.0, 6.0]]);
        assert_eq!(masked.terms, dtm.terms);
    }

    fn two_terms() -> DocumentTermMatrix {
        DocumentTermMatrix::from_matrix(array![[1.0, 2.0]], vec!["x".into(), "y".into()]).unwrap()
    }

    #[test]
    fn scale_terms_rejects_wrong_length() {
        let dtm = two_terms();
        assert!(dtm.scale_terms(array![1.0].view()).is_err());
    }

    #[test]
    fn scale_terms_checks_matrix_columns() {
        let dtm = DocumentTermMatrix {
            terms: vec!["x".into(), "y".into(), "z".into()],
            matrix: array![[1.0, 2.0], [3.0, 4.0]],
        };
        let err = dtm.scale_terms(array![1.0, 0.0, 1.0].view()).unwrap_err();
        assert!(err.is_validation(), "{err}");
    }

    #[test]
    fn deserializing_checks_terms_against_columns() {
        let dtm = two_terms();
        let mut value = serde_json::to_value(&dtm).unwrap();
        assert_eq!(serde_json::from_value::<DocumentTermMatrix>(value.clone()).unwrap(), dtm);

        value["terms"] = serde_json::json!(["x", "y", "z"]);
        let err = serde_json::from_value::<DocumentTermMatrix>(value).unwrap_err();
        assert!(err.to_string().contains("Mismatched number of terms"), "{err}");
    }
}
