use crate::config::RadarConfig;
use crate::matcher::{IntentTier, TermMatcher, TermMatches};
use crate::types::{SignalType, Urgency};
use std::collections::BTreeSet;

/// Outcome of classifying one post's text.
#[derive(Debug, Clone)]
pub struct Classification {
    pub signal_type: SignalType,
    pub weight: u32,
    pub urgency: Urgency,
    pub matched_terms: BTreeSet<String>,
}

/// Deterministic keyword classifier. Same text + same config always yields
/// the same classification, which is what makes re-runs idempotent.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    matcher: TermMatcher,
    urgency_terms: Vec<String>,
    weight_high: u32,
    weight_medium: u32,
    weight_other: u32,
}

impl IntentClassifier {
    pub fn from_config(config: &RadarConfig) -> Self {
        Self {
            matcher: TermMatcher::new(&config.high_intent_terms, &config.medium_intent_terms),
            urgency_terms: config
                .urgency_terms
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            weight_high: config.weight_high,
            weight_medium: config.weight_medium,
            weight_other: config.weight_other,
        }
    }

    /// Classify post text. Tier precedence is high > medium > other; a term
    /// present in both tiers classifies as high. Absent or empty text falls
    /// through to `other` rather than failing.
    pub fn classify(&self, text: &str) -> Classification {
        let matches = self.matcher.match_text(text);
        let (signal_type, weight) = self.resolve_tier(&matches);
        Classification {
            signal_type,
            weight,
            urgency: self.urgency(text),
            matched_terms: matches.terms,
        }
    }

    fn resolve_tier(&self, matches: &TermMatches) -> (SignalType, u32) {
        if matches.tiers.contains(&IntentTier::High) {
            (SignalType::HighIntent, self.weight_high)
        } else if matches.tiers.contains(&IntentTier::Medium) {
            (SignalType::MediumIntent, self.weight_medium)
        } else {
            (SignalType::Other, self.weight_other)
        }
    }

    /// Urgency tier from the separate urgency-term list: one hit is
    /// elevated, two or more is high. Never feeds into SPI.
    pub fn urgency(&self, text: &str) -> Urgency {
        let haystack = text.to_lowercase();
        let hits = self
            .urgency_terms
            .iter()
            .filter(|t| haystack.contains(t.as_str()))
            .count();
        match hits {
            0 => Urgency::None,
            1 => Urgency::Elevated,
            _ => Urgency::High,
        }
    }
}
