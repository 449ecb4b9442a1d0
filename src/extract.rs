use crate::types::{OutreachChannel, Platform};
use regex::Regex;
use std::collections::BTreeSet;

/// Email extraction and outreach-channel inference.
pub struct ContactExtractor {
    email_re: Regex,
}

impl ContactExtractor {
    pub fn new() -> Self {
        Self {
            email_re: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
                .expect("email regex is valid"),
        }
    }

    /// All well-formed email addresses in the text, deduplicated and sorted.
    pub fn emails(&self, text: &str) -> Vec<String> {
        let unique: BTreeSet<String> = self
            .email_re
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();
        unique.into_iter().collect()
    }

    /// Strict priority order: email beats any DM channel; otherwise the
    /// platform's own DM path.
    pub fn outreach_channel(platform: Platform, emails: &[String]) -> OutreachChannel {
        if !emails.is_empty() {
            return OutreachChannel::Email;
        }
        match platform {
            Platform::X => OutreachChannel::DmX,
            Platform::Reddit => OutreachChannel::DmReddit,
        }
    }
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

// Trigger-phrase patterns for company/project names. Order matters: more
// specific patterns first. Triggers are case-insensitive, the captured name
// must start uppercase.
const COMPANY_PATTERNS: &[&str] = &[
    r"(?i:my|our)\s+(?i:startup|project)\s+([A-Z][A-Za-z0-9&.-]*(?:\s+[A-Z][A-Za-z0-9&.-]*)?)",
    r"(?i:pre-launch\s+for)\s+([A-Z][A-Za-z0-9&.-]*)",
    r"(?i:launching\s+soon)\s*[:,]\s*([A-Z][A-Za-z0-9&.-]*)",
    r"(?i:founder|co-founder|ceo|cto|coo)\s+(?i:of)\s+([A-Z][A-Za-z0-9&.-]*(?:\s+[A-Z][A-Za-z0-9&.-]*){0,2})",
    r"(?i:building|launching|launched|starting)\s+([A-Z][A-Za-z0-9&.-]*(?:\s+[A-Z][A-Za-z0-9&.-]*){0,2})",
    r"\b(?i:we|our team)\s+at\s+([A-Z][A-Za-z0-9&.-]*)",
    r"\bat\s+([A-Z][A-Za-z0-9&.-]*)",
    r"([A-Z][A-Za-z0-9&.-]*)\s+is\s+(?i:launching|validating|testing)",
];

// Capitalized words that are never company names.
const COMPANY_BLACKLIST: &[&str] = &[
    "linkedin",
    "twitter",
    "facebook",
    "instagram",
    "google",
    "amazon",
    "reddit",
    "market",
    "customer",
    "product",
    "launch",
    "idea",
    "fit",
    "research",
    "trends",
    "opportunities",
    "segments",
    "competitors",
    "soon",
    "tbd",
];

const AUTHOR_PATTERNS: &[&str] = &[
    r"(?:I'm|I am)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)\s*[,.]",
    r"(?:This is|Hi,)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)\s*[,.]",
    r"([A-Z][a-z]+\s+[A-Z][a-z]+),\s*(?i:founder|co-founder|ceo)",
];

/// Best-effort company and author-name extraction. Absence is an expected
/// outcome, represented as `None`, never an error.
pub struct CompanyAuthorExtractor {
    company_patterns: Vec<Regex>,
    author_patterns: Vec<Regex>,
}

impl CompanyAuthorExtractor {
    pub fn new() -> Self {
        let compile = |patterns: &[&str]| {
            patterns
                .iter()
                .map(|p| Regex::new(p).expect("extraction regex is valid"))
                .collect::<Vec<_>>()
        };
        Self {
            company_patterns: compile(COMPANY_PATTERNS),
            author_patterns: compile(AUTHOR_PATTERNS),
        }
    }

    /// First plausible company name triggered by any pattern.
    pub fn company(&self, content: &str) -> Option<String> {
        let text = content.trim();
        if text.is_empty() {
            return None;
        }
        for pattern in &self.company_patterns {
            for caps in pattern.captures_iter(text) {
                if let Some(candidate) = caps.get(1).map(|m| clean_candidate(m.as_str())) {
                    if plausible_company(&candidate) {
                        return Some(candidate);
                    }
                }
            }
        }
        None
    }

    /// Author name from self-introductions in the content ("I'm Jane, ...").
    pub fn author(&self, content: &str) -> Option<String> {
        let text = content.trim();
        if text.is_empty() {
            return None;
        }
        for pattern in &self.author_patterns {
            if let Some(caps) = pattern.captures(text) {
                if let Some(name) = caps.get(1).map(|m| m.as_str().trim().to_string()) {
                    if (2..=50).contains(&name.len()) {
                        return Some(name);
                    }
                }
            }
        }
        None
    }
}

impl Default for CompanyAuthorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn clean_candidate(raw: &str) -> String {
    raw.trim().trim_end_matches(['.', ',', '&', '-']).to_string()
}

fn plausible_company(candidate: &str) -> bool {
    if candidate.chars().count() < 3 {
        return false;
    }
    if !candidate.chars().next().is_some_and(|c| c.is_uppercase()) {
        return false;
    }
    // Blacklist applies to whole words, so "FitTrack" is not rejected for
    // containing "fit".
    let lower = candidate.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    !words.iter().any(|w| COMPANY_BLACKLIST.contains(w))
}

/// Collapse whitespace and truncate to at most `max_chars` characters.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(max_chars).collect()
}
