// Matching pipeline: lexicon → extractor → normalizer → scorer → ranker.
// Everything here is pure and synchronous; I/O lives in the store and
// engine layers.

pub mod extractor;
pub mod lexicon;
pub mod normalizer;
pub mod ranker;
pub mod scorer;

pub use extractor::{extract_keywords, ExtractedKeywordSet};
pub use lexicon::Lexicon;
pub use normalizer::normalize;
pub use ranker::{rank, MatchReport};
pub use scorer::{score_document, MatchResult, ScoringWeights};
