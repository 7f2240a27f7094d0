//! Write model results back into a corpus.
//!
//! Everything is computed and checked first, then written, so a failing
//! call leaves the corpus untouched. Names that are already registered are
//! left as they are, which makes repeated calls cheap.

use crate::builder::checked_level;
use crate::extract::{document_clusters, topic_distributions, topic_submatrices};
use crate::provenance::GitProvenance;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use topotree_core::corpus::{CorpusStore, DocumentTermMatrix, MetaSeries};
use topotree_core::error::{MissingArtifact, Result, ValidationError};
use topotree_core::source::MembershipSource;
use topotree_core::types::LeafKind;
use tracing::{debug, info};

/// What to write and under which names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsOptions {
    /// Namespace of the attribute bundle and prefix of every artifact name.
    pub prefix: String,
    /// Level whose topics become DTMs and distribution metas.
    pub topic_level: Option<i64>,
    /// Registered DTM the model was fitted on; the corpus default if `None`.
    pub source_dtm: Option<String>,
    /// Record origin and commit of the enclosing git repository.
    pub capture_git: bool,
    /// Directory git is queried from; the current directory if `None`.
    pub git_dir: Option<PathBuf>,
}

impl Default for ResultsOptions {
    fn default() -> Self {
        Self {
            prefix: "topsbm".to_string(),
            topic_level: None,
            source_dtm: None,
            capture_git: true,
            git_dir: None,
        }
    }
}

impl ResultsOptions {
    pub fn cluster_meta_name(&self, level: usize) -> String {
        format!("{}_lvl_{level}_cluster", self.prefix)
    }

    pub fn topic_dtm_name(&self, level: usize, topic: usize) -> String {
        format!("{}_lvl_{level}_topic_{topic}_dtm", self.prefix)
    }

    pub fn topic_meta_name(&self, level: usize, topic: usize) -> String {
        format!("{}_lvl_{level}_topic_{topic}_dist", self.prefix)
    }
}

/// The attribute bundle attached under `ResultsOptions::prefix`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsBundle {
    pub meta: Vec<String>,
    #[serde(default)]
    pub dtms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<GitProvenance>,
}

/// Attach per-level document clusters, optional topic artifacts and a
/// provenance bundle to `corpus`.
pub fn add_results<S, C>(
    source: &S,
    corpus: &mut C,
    options: &ResultsOptions,
) -> Result<ResultsBundle>
where
    S: MembershipSource + ?Sized,
    C: CorpusStore + ?Sized,
{
    let max_level = source.max_level().ok_or(ValidationError::NotFitted)?;
    let model_docs = source.leaf_labels(LeafKind::Documents).len();
    if corpus.num_documents() != model_docs {
        return Err(ValidationError::DocumentCount {
            expected: model_docs,
            found: corpus.num_documents(),
        }
        .into());
    }

    let mut metas: Vec<(String, MetaSeries)> = Vec::new();
    for level in 0..=max_level {
        metas.push((
            options.cluster_meta_name(level),
            MetaSeries::Cluster(document_clusters(source, level)?),
        ));
    }

    let mut dtms: Vec<(String, DocumentTermMatrix)> = Vec::new();
    if let Some(requested) = options.topic_level {
        let level = checked_level(requested, max_level)?;
        let from_dtm = match &options.source_dtm {
            Some(name) => corpus
                .get_dtm(name)
                .ok_or_else(|| MissingArtifact::Dtm(name.clone()))?,
            None => corpus
                .default_dtm()
                .ok_or_else(|| MissingArtifact::Dtm("default".to_string()))?,
        };
        for (topic, dtm) in topic_submatrices(source, level, from_dtm)? {
            dtms.push((options.topic_dtm_name(level, topic), dtm));
        }
        for (topic, dist) in topic_distributions(source, level)? {
            metas.push((options.topic_meta_name(level, topic), MetaSeries::Numeric(dist.to_vec())));
        }
    }

    let num_docs = corpus.num_documents();
    let row_counts = metas
        .iter()
        .map(|(_, series)| series.len())
        .chain(dtms.iter().map(|(_, dtm)| dtm.num_docs()));
    for found in row_counts {
        if found != num_docs {
            return Err(ValidationError::DocumentCount {
                expected: num_docs,
                found,
            }
            .into());
        }
    }

    let mut bundle = ResultsBundle {
        meta: Vec::with_capacity(metas.len()),
        dtms: Vec::with_capacity(dtms.len()),
        git: None,
    };
    for (name, series) in metas {
        if corpus.get_meta(&name).is_none() {
            corpus.add_meta(&name, series)?;
        } else {
            debug!(meta = %name, "Meta already present, kept");
        }
        bundle.meta.push(name);
    }
    for (name, dtm) in dtms {
        if corpus.get_dtm(&name).is_none() {
            corpus.add_dtm(&name, dtm)?;
        } else {
            debug!(dtm = %name, "Document-term matrix already present, kept");
        }
        bundle.dtms.push(name);
    }

    if options.capture_git {
        bundle.git = GitProvenance::capture(options.git_dir.as_deref());
    }
    corpus.set_attribute(&options.prefix, serde_json::to_value(&bundle)?);

    info!(
        namespace = %options.prefix,
        metas = bundle.meta.len(),
        dtms = bundle.dtms.len(),
        "Added results to corpus"
    );
    Ok(bundle)
}
