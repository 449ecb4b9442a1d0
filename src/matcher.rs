use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Configured intent tiers, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentTier {
    High,
    Medium,
}

/// Result of matching one post against the configured term lists.
#[derive(Debug, Clone, Default)]
pub struct TermMatches {
    /// Every term that matched, across all tiers.
    pub terms: BTreeSet<String>,
    /// Every tier with at least one matching term. A term configured in
    /// multiple tiers reports all of them; precedence is the classifier's.
    pub tiers: BTreeSet<IntentTier>,
}

impl TermMatches {
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Case-insensitive substring matcher over tiered term lists. Terms are
/// lowercased once at construction; matching allocates only the result.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    tiers: Vec<(IntentTier, Vec<String>)>,
}

impl TermMatcher {
    pub fn new(high_terms: &[String], medium_terms: &[String]) -> Self {
        let normalize = |terms: &[String]| {
            terms
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
        };
        Self {
            tiers: vec![
                (IntentTier::High, normalize(high_terms)),
                (IntentTier::Medium, normalize(medium_terms)),
            ],
        }
    }

    /// Match `text` against every configured tier. Empty or whitespace-only
    /// text yields an empty match, not an error.
    pub fn match_text(&self, text: &str) -> TermMatches {
        let haystack = text.trim().to_lowercase();
        let mut matches = TermMatches::default();
        if haystack.is_empty() {
            return matches;
        }
        for (tier, terms) in &self.tiers {
            for term in terms {
                if haystack.contains(term.as_str()) {
                    matches.terms.insert(term.clone());
                    matches.tiers.insert(*tier);
                }
            }
        }
        matches
    }
}
