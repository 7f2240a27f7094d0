//! # topotree Runtime
//!
//! Building, merging and browsing cluster hierarchies.
//!
//! The runtime turns the per-level membership matrices of a fitted model
//! into a petgraph-backed hierarchy, converts it into a nested tree, and
//! serves progressively merged views of that tree through a session that
//! memoizes every depth it has computed. It also writes cluster
//! assignments and per-topic matrices back into a corpus.

pub mod builder;
pub mod corpus;
pub mod extract;
pub mod hierarchy_impl;
pub mod model;
pub mod prelude;
pub mod provenance;
pub mod reducer;
pub mod results;
pub mod session;
pub mod top_words;
pub mod tree;
