//! Lexicon — the shared dictionaries behind keyword extraction and
//! record normalization: stop-words, resume-boilerplate noise words,
//! and the technology name list (single tokens and multi-word phrases).
//!
//! Built once at startup and passed by shared reference; never mutated
//! at runtime.

use std::collections::HashSet;

/// Generic English function words carrying no matching signal.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "as",
    "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "will", "would",
    "should", "could", "may", "might", "can", "do", "does", "did", "not", "no", "yes", "this",
    "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "our", "your", "their",
    "his", "her", "its", "from", "into", "over", "under", "about", "across", "per", "via", "if",
    "then", "than", "so", "such", "all", "any", "each", "both", "more", "most", "other", "some",
    "who", "whom", "what", "which", "when", "where", "how", "while", "during", "up", "out",
];

/// Job-posting and resume boilerplate that matches everything and
/// therefore distinguishes nothing.
const BOILERPLATE: &[&str] = &[
    "experience",
    "experienced",
    "responsible",
    "responsibilities",
    "ability",
    "abilities",
    "looking",
    "seeking",
    "candidate",
    "candidates",
    "opportunity",
    "role",
    "position",
    "company",
    "join",
    "years",
    "including",
    "etc",
];

/// Single-token technology names. Exact matches against a document's
/// technology list earn the technology bonus.
const TECH_SINGLE: &[&str] = &[
    "windows",
    "linux",
    "macos",
    "servicenow",
    "azure",
    "aws",
    "vmware",
    "citrix",
    "troubleshooting",
    "networking",
    "vpn",
    "dns",
    "dhcp",
    "tcp/ip",
    "sccm",
    "intune",
    "jamf",
    "bitlocker",
    "powershell",
    "bash",
    "python",
    "rust",
    "kubernetes",
    "docker",
    "terraform",
    "ansible",
    "itil",
    "imaging",
    "deployment",
    "migration",
    "automation",
    "scripting",
    "virtualization",
    "c++",
    "c#",
    "node.js",
    "ci/cd",
    "salesforce",
    "jira",
    "confluence",
    "okta",
    "duo",
];

/// Multi-word technology and domain phrases. Matched longest-first
/// against the token stream; a phrase hit suppresses its constituent
/// unigrams at the same span.
const TECH_PHRASES: &[&str] = &[
    "active directory",
    "group policy",
    "desktop support",
    "help desk",
    "technical support",
    "field service",
    "incident management",
    "asset management",
    "change management",
    "customer service",
    "problem solving",
    "point of sale",
    "access control",
    "structured cabling",
    "remote desktop",
    "microsoft 365",
    "office 365",
    "google workspace",
    "windows 10",
    "windows 11",
    "windows server",
    "sql server",
    "mobile device management",
    "endpoint management",
    "network security",
    "system center",
];

/// Immutable term dictionaries shared by the extractor and normalizer.
#[derive(Debug)]
pub struct Lexicon {
    stop_words: HashSet<&'static str>,
    boilerplate: HashSet<&'static str>,
    /// Phrases as token sequences, longest first so the extractor can
    /// try them in longest-match-wins order.
    phrases: Vec<Vec<&'static str>>,
    /// Every known technology term in normalized form, phrases joined
    /// with a single space.
    technologies: HashSet<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        let mut technologies: HashSet<String> =
            TECH_SINGLE.iter().map(|t| (*t).to_string()).collect();
        technologies.extend(TECH_PHRASES.iter().map(|p| (*p).to_string()));

        let mut phrases: Vec<Vec<&'static str>> = TECH_PHRASES
            .iter()
            .map(|p| p.split_whitespace().collect())
            .collect();
        // Longest first, then lexicographic for a stable probe order.
        phrases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            boilerplate: BOILERPLATE.iter().copied().collect(),
            phrases,
            technologies,
        }
    }
}

impl Lexicon {
    /// True when `token` is a stop-word or boilerplate and should be
    /// dropped from the extracted stream. Technology terms are never
    /// noise, whatever the other lists say.
    pub fn is_noise(&self, token: &str) -> bool {
        if self.technologies.contains(token) {
            return false;
        }
        self.stop_words.contains(token) || self.boilerplate.contains(token)
    }

    /// True when `term` (unigram or space-joined phrase) is a known
    /// technology name.
    pub fn is_technology(&self, term: &str) -> bool {
        self.technologies.contains(term)
    }

    /// Known phrases as token sequences, longest first.
    pub fn phrases(&self) -> &[Vec<&'static str>] {
        &self.phrases
    }

    /// Strips outer punctuation from a raw lowercase token while
    /// preserving intra-word `+ . / -` that belong to recognized
    /// technology names ("c++", "node.js", "ci/cd").
    pub fn clean_token(&self, raw: &str) -> Option<String> {
        let mut token = raw.trim_matches(|c: char| c.is_whitespace()).to_string();
        loop {
            if token.is_empty() {
                return None;
            }
            if self.technologies.contains(token.as_str()) {
                return Some(token);
            }
            let before = token.len();
            while token.ends_with(['.', '/', '-', '+', ',']) {
                token.pop();
                if self.technologies.contains(token.as_str()) {
                    return Some(token);
                }
            }
            while token.starts_with(['.', '/', '-', '+', ',']) {
                token.remove(0);
                if self.technologies.contains(token.as_str()) {
                    return Some(token);
                }
            }
            if token.len() == before {
                break;
            }
        }
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }
}
