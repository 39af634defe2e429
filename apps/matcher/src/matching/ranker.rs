//! Aggregator/Ranker — scores every document against the keyword set
//! and returns per-pool ranked result lists. No cross-document state;
//! no threshold filtering (display buckets are the presentation
//! layer's concern).

use serde::{Deserialize, Serialize};

use crate::matching::extractor::ExtractedKeywordSet;
use crate::matching::scorer::{score_document, MatchResult, ScoringWeights};
use crate::models::{MatchableDocument, Pool};

/// Full ranked output of one matching request, partitioned by pool.
/// Echoes the extracted keywords so callers can explain the match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub keywords: ExtractedKeywordSet,
    pub components: Vec<MatchResult>,
    pub work_records: Vec<MatchResult>,
    pub projects: Vec<MatchResult>,
}

impl MatchReport {
    pub fn total_results(&self) -> usize {
        self.components.len() + self.work_records.len() + self.projects.len()
    }
}

/// Scores all documents independently, then sorts each pool by score
/// descending, value descending, id ascending — fully deterministic
/// for identical inputs.
pub fn rank(
    documents: &[MatchableDocument],
    keywords: &ExtractedKeywordSet,
    weights: &ScoringWeights,
) -> MatchReport {
    let mut report = MatchReport {
        keywords: keywords.clone(),
        components: Vec::new(),
        work_records: Vec::new(),
        projects: Vec::new(),
    };

    for doc in documents {
        let result = score_document(doc, keywords, weights);
        match doc.pool {
            Pool::Component => report.components.push(result),
            Pool::WorkRecord => report.work_records.push(result),
            Pool::Project => report.projects.push(result),
        }
    }

    sort_pool(&mut report.components);
    sort_pool(&mut report.work_records);
    sort_pool(&mut report.projects);
    report
}

fn sort_pool(results: &mut [MatchResult]) {
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.value.cmp_desc(&b.value))
            .then_with(|| a.document_id.cmp(&b.document_id))
    });
}
