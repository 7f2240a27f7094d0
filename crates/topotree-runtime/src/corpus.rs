//! In-memory corpus store.
//!
//! Holds the registries topotree writes into and serializes to a single
//! JSON file, so the CLI can read a corpus, attach results and write it
//! back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use topotree_core::corpus::{CorpusStore, DocumentTermMatrix, MetaSeries};
use topotree_core::error::{Result, ValidationError};

/// A corpus held entirely in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryCorpus {
    pub name: String,
    pub documents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtm: Option<DocumentTermMatrix>,
    #[serde(default)]
    pub metas: BTreeMap<String, MetaSeries>,
    #[serde(default)]
    pub custom_dtms: BTreeMap<String, DocumentTermMatrix>,
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl MemoryCorpus {
    pub fn new(name: impl Into<String>, documents: Vec<String>) -> Self {
        Self {
            name: name.into(),
            documents,
            ..Default::default()
        }
    }

    /// Attach the token count matrix.
    pub fn with_dtm(mut self, dtm: DocumentTermMatrix) -> Result<Self> {
        self.check_docs(dtm.num_docs())?;
        self.dtm = Some(dtm);
        Ok(self)
    }

    fn check_docs(&self, found: usize) -> Result<()> {
        if found != self.documents.len() {
            return Err(ValidationError::DocumentCount {
                expected: self.documents.len(),
                found,
            }
            .into());
        }
        Ok(())
    }

    /// Load a corpus and check that every matrix and meta has one row
    /// per document.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let corpus: Self = serde_json::from_str(&content)?;
        if let Some(dtm) = &corpus.dtm {
            corpus.check_docs(dtm.num_docs())?;
        }
        for dtm in corpus.custom_dtms.values() {
            corpus.check_docs(dtm.num_docs())?;
        }
        for series in corpus.metas.values() {
            corpus.check_docs(series.len())?;
        }
        Ok(corpus)
    }

    /// Write the corpus as pretty JSON, replacing the file if it exists.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl CorpusStore for MemoryCorpus {
    fn num_documents(&self) -> usize {
        self.documents.len()
    }

    fn add_meta(&mut self, name: &str, series: MetaSeries) -> Result<()> {
        self.check_docs(series.len())?;
        self.metas.insert(name.to_string(), series);
        Ok(())
    }

    fn get_meta(&self, name: &str) -> Option<&MetaSeries> {
        self.metas.get(name)
    }

    fn add_dtm(&mut self, name: &str, dtm: DocumentTermMatrix) -> Result<()> {
        self.check_docs(dtm.num_docs())?;
        self.custom_dtms.insert(name.to_string(), dtm);
        Ok(())
    }

    fn get_dtm(&self, name: &str) -> Option<&DocumentTermMatrix> {
        self.custom_dtms.get(name)
    }

    fn default_dtm(&self) -> Option<&DocumentTermMatrix> {
        self.dtm.as_ref()
    }

    fn set_attribute(&mut self, namespace: &str, value: serde_json::Value) {
        self.attributes.insert(namespace.to_string(), value);
    }

    fn attribute(&self, namespace: &str) -> Option<&serde_json::Value> {
        self.attributes.get(namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_terms() -> DocumentTermMatrix {
        DocumentTermMatrix::from_matrix(ndarray::array![[1.0, 2.0]], vec!["x".into(), "y".into()])
            .unwrap()
    }

    #[test]
    fn meta_length_must_match_documents() {
        let mut corpus = MemoryCorpus::new("c", vec!["d0".into(), "d1".into()]);
        assert!(corpus.add_meta("ok", MetaSeries::Cluster(vec![0, 1])).is_ok());
        let err = corpus.add_meta("bad", MetaSeries::Numeric(vec![0.5])).unwrap_err();
        assert!(err.is_validation());
        assert!(corpus.get_meta("bad").is_none());
    }

    #[test]
    fn save_and_load_keep_registries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        let mut corpus = MemoryCorpus::new("c", vec!["d0".into()]);
        corpus.add_meta("m", MetaSeries::Numeric(vec![0.25])).unwrap();
        corpus.set_attribute("ns", serde_json::json!({"k": 1}));
        corpus.save(&path).unwrap();

        let loaded = MemoryCorpus::load(&path).unwrap();
        assert_eq!(loaded.get_meta("m"), Some(&MetaSeries::Numeric(vec![0.25])));
        assert_eq!(loaded.attribute("ns").unwrap()["k"], 1);
    }

    #[test]
    fn load_rejects_matrix_with_wrong_row_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        let mut corpus = MemoryCorpus::new("c", vec!["d0".into(), "d1".into()]);
        corpus.dtm = Some(two_terms());
        corpus.save(&path).unwrap();

        let err = MemoryCorpus::load(&path).unwrap_err();
        assert!(err.to_string().contains("expected 2, found 1"), "{err}");
    }

    #[test]
    fn load_rejects_terms_that_disagree_with_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        let corpus = MemoryCorpus::new("c", vec!["d0".into()])
            .with_dtm(two_terms())
            .unwrap();
        let mut value = serde_json::to_value(&corpus).unwrap();
        value["dtm"]["terms"] = serde_json::json!(["x", "y", "z"]);
        std::fs::write(&path, value.to_string()).unwrap();

        assert!(MemoryCorpus::load(&path).is_err());
    }
}
