//! Matchable documents — the uniform shape every stored record is
//! normalized into before scoring or grouping. Ephemeral: computed per
//! request, never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which content pool a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pool {
    Component,
    WorkRecord,
    Project,
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Pool::Component => "component",
            Pool::WorkRecord => "work_record",
            Pool::Project => "project",
        };
        f.write_str(label)
    }
}

/// Monetary/volume weight of a document. Used for ranking tie-breaks
/// and display only — never for scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueMetric {
    pub earnings: f64,
    pub unit_count: u32,
}

impl ValueMetric {
    /// Descending comparison: bigger earnings first, then more units.
    pub fn cmp_desc(&self, other: &ValueMetric) -> std::cmp::Ordering {
        other
            .earnings
            .partial_cmp(&self.earnings)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| other.unit_count.cmp(&self.unit_count))
    }
}

/// A normalized document ready for scoring or grouping.
///
/// `title` is kept in display case (the non-empty invariant is
/// enforced by the normalizer); `body` is already case-folded.
/// `technologies` and `skills` preserve first-listed order — the
/// grouping advisor's dominant-technology tie-break depends on it —
/// while membership checks treat them as sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchableDocument {
    pub id: Uuid,
    pub pool: Pool,
    pub title: String,
    pub body: String,
    pub technologies: Vec<String>,
    pub skills: Vec<String>,
    pub category: Option<String>,
    pub value: ValueMetric,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub client: Option<String>,
    pub location: Option<String>,
    pub rating: Option<f64>,
}

impl MatchableDocument {
    pub fn has_technology(&self, term: &str) -> bool {
        self.technologies.iter().any(|t| t == term)
    }

    pub fn has_skill(&self, term: &str) -> bool {
        self.skills.iter().any(|s| s == term)
    }
}
