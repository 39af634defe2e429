//! Scorer — computes a 0–100 match score plus a matched-term
//! explanation for one document against one extracted keyword set.
//! Pure and deterministic; no I/O, no shared state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matching::extractor::ExtractedKeywordSet;
use crate::models::{MatchableDocument, Pool, ValueMetric};

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

/// Named scoring weights. The defaults fix the contract ordering:
/// technology bonus > skill weight > body weight, and title hits count
/// double. Magnitudes are tunable; the ordering is not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight of a keyword hit in the document body.
    pub body_weight: f64,
    /// Weight of a keyword hit in the document title (double the body).
    pub title_weight: f64,
    /// Weight of a keyword matching a declared skill.
    pub skill_weight: f64,
    /// Flat bonus per exact technology-token match.
    pub technology_bonus: f64,
    /// Per-term frequency cap: a word repeated N times in the posting
    /// counts at most `frequency_cap` times.
    pub frequency_cap: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            body_weight: 1.0,
            title_weight: 2.0,
            skill_weight: 1.5,
            technology_bonus: 2.5,
            frequency_cap: 5,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Result model
// ────────────────────────────────────────────────────────────────────────────

/// Scored match of one document against one keyword set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub document_id: Uuid,
    pub pool: Pool,
    pub title: String,
    /// 0–100. Round only for display.
    pub score: f64,
    /// Distinct contributing terms, highest contribution first; ties
    /// broken by first occurrence in the posting text.
    pub matched_terms: Vec<String>,
    pub technology_bonus_applied: bool,
    /// Carried through for display and ranking tie-breaks only.
    pub value: ValueMetric,
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Scores `doc` against `keywords`.
///
/// Per required term (frequency capped at `frequency_cap`):
/// body substring hit × `body_weight`, title hit × `title_weight`,
/// declared-skill hit × `skill_weight`; plus a flat
/// `technology_bonus` when a flagged technology term exactly matches
/// a document technology token. The raw sum is normalized against the
/// posting's total weighted mass (body weight per term + bonus per
/// technology term), so a document matching every term in its body
/// and every technology exactly reaches 100; title and skill hits
/// push borderline documents up and clamp at 100.
pub fn score_document(
    doc: &MatchableDocument,
    keywords: &ExtractedKeywordSet,
    weights: &ScoringWeights,
) -> MatchResult {
    let mut result = MatchResult {
        document_id: doc.id,
        pool: doc.pool,
        title: doc.title.clone(),
        score: 0.0,
        matched_terms: Vec::new(),
        technology_bonus_applied: false,
        value: doc.value,
    };

    // No extractable signal: valid zero outcome, not an error.
    if keywords.is_empty() {
        return result;
    }

    let title_folded = doc.title.to_lowercase();

    let mut raw = 0.0_f64;
    let mut denominator = 0.0_f64;
    // (term, contribution, first-occurrence index)
    let mut contributions: Vec<(&str, f64, usize)> = Vec::new();

    for (index, term) in keywords.required_terms.iter().enumerate() {
        let frequency = keywords
            .raw_term_frequency
            .get(term)
            .copied()
            .unwrap_or(1)
            .min(weights.frequency_cap) as f64;

        let is_technology = keywords.technology_terms.contains(term);

        denominator += frequency * weights.body_weight;
        if is_technology {
            denominator += weights.technology_bonus;
        }

        let mut contribution = 0.0;
        if doc.body.contains(term.as_str()) {
            contribution += frequency * weights.body_weight;
        }
        if title_folded.contains(term.as_str()) {
            contribution += frequency * weights.title_weight;
        }
        if doc.has_skill(term) {
            contribution += frequency * weights.skill_weight;
        }
        if is_technology && doc.has_technology(term) {
            contribution += weights.technology_bonus;
            result.technology_bonus_applied = true;
        }

        if contribution > 0.0 {
            raw += contribution;
            contributions.push((term.as_str(), contribution, index));
        }
    }

    if contributions.is_empty() || denominator <= 0.0 {
        return result;
    }

    // Highest contribution first; ties in posting order.
    contributions.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.2.cmp(&b.2))
    });

    result.matched_terms = contributions.iter().map(|(t, _, _)| t.to_string()).collect();
    result.score = (raw / denominator * 100.0).clamp(0.0, 100.0);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::extractor::extract_keywords;
    use crate::matching::lexicon::Lexicon;

    fn make_doc(title: &str, body: &str, technologies: &[&str], skills: &[&str]) -> MatchableDocument {
        MatchableDocument {
            id: Uuid::new_v4(),
            pool: Pool::WorkRecord,
            title: title.to_string(),
            body: body.to_lowercase(),
            technologies: technologies.iter().map(|s| s.to_string()).collect(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            category: None,
            value: ValueMetric::default(),
            date_range: None,
            client: None,
            location: None,
            rating: None,
        }
    }

    fn keywords_for(text: &str) -> ExtractedKeywordSet {
        extract_keywords(&Lexicon::default(), text)
    }

    #[test]
    fn test_default_weights_preserve_contract_ordering() {
        let w = ScoringWeights::default();
        assert!(w.technology_bonus > w.skill_weight);
        assert!(w.skill_weight > w.body_weight);
        assert!((w.title_weight - 2.0 * w.body_weight).abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_always_within_bounds() {
        let w = ScoringWeights::default();
        let keywords = keywords_for("sccm imaging deployment sccm sccm");
        let docs = [
            make_doc("SCCM imaging", "sccm imaging deployment", &["sccm"], &["imaging"]),
            make_doc("Nothing relevant", "gardening and landscaping", &[], &[]),
            make_doc("Empty", "", &[], &[]),
        ];
        for doc in &docs {
            let result = score_document(doc, &keywords, &w);
            assert!(
                (0.0..=100.0).contains(&result.score),
                "score out of bounds: {}",
                result.score
            );
        }
    }

    #[test]
    fn test_empty_keywords_scores_zero() {
        let w = ScoringWeights::default();
        let keywords = keywords_for("");
        let doc = make_doc("SCCM expert", "sccm everything", &["sccm"], &[]);
        let result = score_document(&doc, &keywords, &w);
        assert_eq!(result.score, 0.0);
        assert!(result.matched_terms.is_empty());
        assert!(!result.technology_bonus_applied);
    }

    #[test]
    fn test_zero_matches_scores_exactly_zero() {
        let w = ScoringWeights::default();
        let keywords = keywords_for("kubernetes docker terraform");
        let doc = make_doc("Cabling job", "pulled structured cabling runs", &[], &[]);
        let result = score_document(&doc, &keywords, &w);
        assert_eq!(result.score, 0.0);
        assert!(result.matched_terms.is_empty());
    }

    #[test]
    fn test_technology_bonus_strictly_increases_score() {
        let w = ScoringWeights::default();
        let keywords = keywords_for("Need Active Directory and Group Policy plus onsite cabling");
        let without = make_doc("Support work", "general onsite support", &[], &[]);
        let with = make_doc(
            "Support work",
            "general onsite support",
            &["active directory", "group policy"],
            &[],
        );
        let base = score_document(&without, &keywords, &w);
        let boosted = score_document(&with, &keywords, &w);
        assert!(!base.technology_bonus_applied);
        assert!(boosted.technology_bonus_applied);
        assert!(
            boosted.score > base.score,
            "exact technology match must raise the score ({} vs {})",
            boosted.score,
            base.score
        );
    }

    #[test]
    fn test_title_hit_outweighs_body_hit() {
        let w = ScoringWeights::default();
        let keywords = keywords_for("imaging technician");
        let title_hit = make_doc("Imaging technician", "did various tasks", &[], &[]);
        let body_hit = make_doc("Various tasks", "imaging technician work", &[], &[]);
        let title_score = score_document(&title_hit, &keywords, &w).score;
        let body_score = score_document(&body_hit, &keywords, &w).score;
        assert!(
            title_score > body_score,
            "title hits count double ({title_score} vs {body_score})"
        );
    }

    #[test]
    fn test_body_monotonicity() {
        let w = ScoringWeights::default();
        let keywords = keywords_for("sccm imaging rollout workstation");
        let before = make_doc("Refresh", "sccm imaging rollout", &[], &[]);
        let mut after = before.clone();
        after.body.push_str(" workstation");
        let score_before = score_document(&before, &keywords, &w).score;
        let score_after = score_document(&after, &keywords, &w).score;
        assert!(
            score_after >= score_before,
            "adding a newly matching body term must not lower the score"
        );
        assert!(score_after > score_before, "here it should strictly rise");
    }

    #[test]
    fn test_frequency_cap_bounds_repeated_terms() {
        let w = ScoringWeights::default();
        let spam = "sccm ".repeat(40) + "imaging";
        let keywords = keywords_for(&spam);
        assert_eq!(keywords.raw_term_frequency.get("sccm"), Some(&40));

        let doc = make_doc("Endpoint refresh", "sccm", &[], &[]);
        let result = score_document(&doc, &keywords, &w);
        // Capped numerator: 5×1 body. Denominator: 5 + bonus + 1 + bonus.
        let expected = 5.0 / (5.0 + 2.5 + 1.0 + 2.5) * 100.0;
        assert!(
            (result.score - expected).abs() < 1e-9,
            "got {} want {expected}",
            result.score
        );
    }

    #[test]
    fn test_matched_terms_ordered_by_contribution_then_occurrence() {
        let w = ScoringWeights::default();
        // "imaging" appears twice (freq 2), "rollout" and "cabling" once each.
        let keywords = keywords_for("rollout imaging cabling imaging");
        let doc = make_doc("Site work", "rollout imaging cabling", &[], &[]);
        let result = score_document(&doc, &keywords, &w);
        // imaging contributes 2, rollout and cabling tie at 1 and fall
        // back to posting order.
        assert_eq!(result.matched_terms, vec!["imaging", "rollout", "cabling"]);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let w = ScoringWeights::default();
        let keywords = keywords_for("Desktop Support with SCCM imaging and Windows 10");
        let doc = make_doc(
            "Desktop Support Technician",
            "windows 10 imaging via sccm",
            &["sccm", "windows 10"],
            &["imaging"],
        );
        let a = score_document(&doc, &keywords, &w);
        let b = score_document(&doc, &keywords, &w);
        assert_eq!(a.score, b.score);
        assert_eq!(a.matched_terms, b.matched_terms);
    }

    /// Worked example from the design contract: multiple exact
    /// technology matches plus body overlap must land materially
    /// above 50.
    #[test]
    fn test_desktop_support_worked_example() {
        let w = ScoringWeights::default();
        let keywords = keywords_for(
            "Looking for a Desktop Support Technician with Active Directory, \
             Group Policy, and Windows 10 deployment experience",
        );
        let doc = make_doc(
            "Field technician",
            "Led Windows 10 deployment using Active Directory and Group Policy \
             across 150 workstations",
            &["windows 10", "active directory", "group policy"],
            &[],
        );
        let result = score_document(&doc, &keywords, &w);
        assert!(result.technology_bonus_applied);
        assert!(
            result.score > 50.0,
            "expected a strong match, got {}",
            result.score
        );
        assert!(result.matched_terms.contains(&"active directory".to_string()));
    }
}
