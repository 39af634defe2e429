//! Work-history job-matching engine.
//!
//! Scores three content pools (resume components, individual work
//! records, project narratives) against free-text job postings by
//! deterministic keyword overlap, and proposes project groupings of
//! raw work records. Persistence and presentation are collaborators
//! behind the `HistoryStore` trait and the returned report types.

pub mod config;
pub mod engine;
pub mod errors;
pub mod grouping;
pub mod matching;
pub mod models;
pub mod store;

pub use config::Config;
pub use engine::MatchEngine;
pub use errors::EngineError;
pub use grouping::{GroupingStrategy, ProjectProposal};
pub use matching::{ExtractedKeywordSet, Lexicon, MatchReport, MatchResult, ScoringWeights};
pub use models::{MatchableDocument, Pool, SourceRecord};
pub use store::{HistoryStore, InMemoryStore};
