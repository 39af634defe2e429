//! Content Normalizer — flattens heterogeneous stored records into
//! `MatchableDocument`s.
//!
//! The normalizer and the extractor share the lexicon's token-cleaning
//! rules, so a technology token parsed from a stored record compares
//! equal (plain string equality) to the same technology extracted from
//! a job posting. That equality is what makes the exact-match
//! technology bonus work.

use tracing::warn;
use uuid::Uuid;

use crate::matching::lexicon::Lexicon;
use crate::models::{
    ComponentRecord, MatchableDocument, Pool, ProjectRecord, SourceRecord, ValueMetric,
    WorkOrderRecord,
};

/// Normalizes one stored record into a matchable document.
pub fn normalize(lexicon: &Lexicon, record: &SourceRecord) -> MatchableDocument {
    match record {
        SourceRecord::Component(c) => normalize_component(lexicon, c),
        SourceRecord::WorkRecord(w) => normalize_work_order(lexicon, w),
        SourceRecord::Project(p) => normalize_project(lexicon, p),
    }
}

fn normalize_component(lexicon: &Lexicon, c: &ComponentRecord) -> MatchableDocument {
    MatchableDocument {
        id: c.id,
        pool: Pool::Component,
        title: display_title(&c.title),
        body: fold_body(&[Some(c.title.as_str()), Some(c.content.as_str())]),
        technologies: Vec::new(),
        skills: parse_token_list(lexicon, c.keywords.as_deref(), c.id, "keywords"),
        category: c.section_type.clone(),
        value: ValueMetric::default(),
        date_range: None,
        client: None,
        location: None,
        rating: None,
    }
}

fn normalize_work_order(lexicon: &Lexicon, w: &WorkOrderRecord) -> MatchableDocument {
    MatchableDocument {
        id: w.id,
        pool: Pool::WorkRecord,
        title: display_title(&w.title),
        body: fold_body(&[
            Some(w.title.as_str()),
            w.work_description.as_deref(),
            w.challenges.as_deref(),
            w.solutions.as_deref(),
            w.lessons_learned.as_deref(),
        ]),
        technologies: parse_token_list(
            lexicon,
            w.technologies_used.as_deref(),
            w.id,
            "technologies_used",
        ),
        skills: parse_token_list(
            lexicon,
            w.skills_demonstrated.as_deref(),
            w.id,
            "skills_demonstrated",
        ),
        category: w.work_category.clone(),
        value: ValueMetric {
            earnings: w.pay_amount.unwrap_or(0.0),
            unit_count: 1,
        },
        date_range: w.service_date.map(|d| (d, d)),
        client: w.company_name.clone(),
        location: w.state.clone(),
        rating: w.satisfaction_rating,
    }
}

fn normalize_project(lexicon: &Lexicon, p: &ProjectRecord) -> MatchableDocument {
    let date_range = match (p.start_date, p.end_date) {
        (Some(start), Some(end)) => Some((start, end)),
        (Some(start), None) => Some((start, start)),
        (None, Some(end)) => Some((end, end)),
        (None, None) => None,
    };
    MatchableDocument {
        id: p.id,
        pool: Pool::Project,
        title: display_title(&p.project_name),
        body: fold_body(&[
            Some(p.project_name.as_str()),
            p.description.as_deref(),
            p.scope.as_deref(),
            p.achievements.as_deref(),
            p.business_impact.as_deref(),
            p.lessons_learned.as_deref(),
        ]),
        technologies: parse_token_list(
            lexicon,
            p.technologies_used.as_deref(),
            p.id,
            "technologies_used",
        ),
        skills: parse_token_list(
            lexicon,
            p.skills_demonstrated.as_deref(),
            p.id,
            "skills_demonstrated",
        ),
        category: p.project_type.clone(),
        value: ValueMetric {
            earnings: p.aggregate.total_earnings,
            unit_count: p.aggregate.work_order_count,
        },
        date_range,
        client: p.client_name.clone(),
        location: None,
        rating: p.aggregate.average_rating,
    }
}

/// Every document must expose a non-empty title; blank stored titles
/// degrade to a placeholder rather than invalidating the record.
fn display_title(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        "Untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Concatenates the pool-specific free-text fields and case-folds the
/// result once, so the scorer can do plain substring checks.
fn fold_body(parts: &[Option<&str>]) -> String {
    let joined: Vec<&str> = parts
        .iter()
        .filter_map(|p| *p)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    joined.join("\n").to_lowercase()
}

/// Parses a serialized JSON array of terms into normalized tokens.
/// Malformed or missing input degrades to an empty list with a warning
/// — one bad field must never invalidate the whole document.
fn parse_token_list(
    lexicon: &Lexicon,
    raw: Option<&str>,
    record_id: Uuid,
    field: &str,
) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let entries: Vec<String> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(%record_id, field, error = %e, "malformed token list, treating as empty");
            return Vec::new();
        }
    };

    let mut tokens = Vec::new();
    for entry in entries {
        if let Some(term) = normalize_term(lexicon, &entry) {
            if !tokens.contains(&term) {
                tokens.push(term);
            }
        }
    }
    tokens
}

/// Folds one stored term to the extractor's normal form: lowercase,
/// single-spaced, outer punctuation stripped per word (keeping the
/// intra-word punctuation of known technology names).
pub fn normalize_term(lexicon: &Lexicon, entry: &str) -> Option<String> {
    let folded = entry.to_lowercase();
    let words: Vec<String> = folded
        .split_whitespace()
        .filter_map(|w| lexicon.clean_token(w))
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
