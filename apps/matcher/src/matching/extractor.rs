//! Keyword Extractor — turns free job-posting text into a normalized,
//! ordered keyword set with term frequencies and a flagged technology
//! subset. Deterministic: no randomness, no external calls.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::matching::lexicon::Lexicon;

/// Normalized keywords extracted from a single job posting.
///
/// `required_terms` preserves first-occurrence order in the source
/// text; the scorer relies on that order for reproducible tie-breaks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedKeywordSet {
    pub required_terms: Vec<String>,
    pub technology_terms: HashSet<String>,
    pub raw_term_frequency: HashMap<String, u32>,
}

impl ExtractedKeywordSet {
    pub fn is_empty(&self) -> bool {
        self.required_terms.is_empty()
    }
}

/// Extracts the keyword set for `text`.
///
/// Pipeline: case-fold, tokenize, emit known multi-word phrases
/// longest-match-wins (suppressing their constituent unigrams at the
/// same span), drop stop-words and boilerplate, count frequencies,
/// flag technology terms. Intentionally permissive — selectivity
/// happens at scoring time, not here.
pub fn extract_keywords(lexicon: &Lexicon, text: &str) -> ExtractedKeywordSet {
    let folded = text.to_lowercase();
    let tokens = tokenize(lexicon, &folded);
    let terms = emit_terms(lexicon, &tokens);

    let mut set = ExtractedKeywordSet::default();
    for term in terms {
        if term.len() < 2 && !lexicon.is_technology(&term) {
            continue;
        }
        if lexicon.is_noise(&term) {
            continue;
        }
        let count = set.raw_term_frequency.entry(term.clone()).or_insert(0);
        if *count == 0 {
            if lexicon.is_technology(&term) {
                set.technology_terms.insert(term.clone());
            }
            set.required_terms.push(term);
        }
        *count += 1;
    }
    set
}

/// Splits folded text into raw tokens. A token is a maximal run of
/// alphanumerics plus the punctuation that can occur inside technology
/// names (`+ . / - #`); outer punctuation is stripped afterwards by
/// `Lexicon::clean_token`.
fn tokenize(lexicon: &Lexicon, folded: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in folded.chars() {
        if ch.is_alphanumeric() || matches!(ch, '+' | '.' | '/' | '-' | '#') {
            current.push(ch);
        } else if !current.is_empty() {
            if let Some(clean) = lexicon.clean_token(&current) {
                tokens.push(clean);
            }
            current.clear();
        }
    }
    if let Some(clean) = lexicon.clean_token(&current) {
        tokens.push(clean);
    }
    tokens
}

/// Walks the token stream emitting phrase terms where a known phrase
/// matches (longest wins, constituents consumed) and unigrams
/// everywhere else.
fn emit_terms(lexicon: &Lexicon, tokens: &[String]) -> Vec<String> {
    let mut terms = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let mut advanced = false;
        for phrase in lexicon.phrases() {
            let n = phrase.len();
            if i + n <= tokens.len()
                && phrase
                    .iter()
                    .zip(&tokens[i..i + n])
                    .all(|(p, t)| *p == t.as_str())
            {
                terms.push(phrase.join(" "));
                i += n;
                advanced = true;
                break;
            }
        }
        if !advanced {
            terms.push(tokens[i].clone());
            i += 1;
        }
    }
    terms
}
