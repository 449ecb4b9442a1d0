use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Reddit,
    X,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Reddit => write!(f, "reddit"),
            Platform::X => write!(f, "x"),
        }
    }
}

/// One scraped item, immutable for the duration of a cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPost {
    pub platform: Platform,
    /// Platform-unique identifier (Reddit base36 id, X status id).
    pub post_id: String,
    /// Platform-provided author handle. Empty when the platform lost it
    /// (deleted accounts); classification still proceeds.
    pub author: String,
    pub author_profile_url: Option<String>,
    pub source_url: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Subreddit or other grouping context, when the platform has one.
    pub context: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    HighIntent,
    MediumIntent,
    Other,
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalType::HighIntent => write!(f, "high_intent"),
            SignalType::MediumIntent => write!(f, "medium_intent"),
            SignalType::Other => write!(f, "other"),
        }
    }
}

/// Urgency tier derived from the urgency-term list. Reported alongside SPI
/// but never folded into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    None,
    Elevated,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutreachChannel {
    Email,
    DmX,
    DmReddit,
    None,
}

impl OutreachChannel {
    /// Lower rank wins when selecting a lead's best channel.
    pub fn precedence(self) -> u8 {
        match self {
            OutreachChannel::Email => 0,
            OutreachChannel::DmX => 1,
            OutreachChannel::DmReddit => 2,
            OutreachChannel::None => 3,
        }
    }
}

impl fmt::Display for OutreachChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutreachChannel::Email => write!(f, "email"),
            OutreachChannel::DmX => write!(f, "dm_x"),
            OutreachChannel::DmReddit => write!(f, "dm_reddit"),
            OutreachChannel::None => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Pure function of SPI; thresholds are inclusive lower bounds.
    pub fn from_spi(spi: u32, high_threshold: u32, medium_threshold: u32) -> Self {
        if spi >= high_threshold {
            Priority::High
        } else if spi >= medium_threshold {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

/// A classified post. Derived from exactly one `RawPost` and never mutated
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedSignal {
    pub platform: Platform,
    pub post_id: String,
    pub author: String,
    pub author_profile_url: Option<String>,
    pub source_url: String,
    pub created_at: DateTime<Utc>,
    pub context: Option<String>,
    pub matched_terms: BTreeSet<String>,
    pub signal_type: SignalType,
    pub weight: u32,
    pub urgency: Urgency,
    pub emails_found: Vec<String>,
    pub outreach_channel: OutreachChannel,
    pub company: Option<String>,
    pub extracted_author: Option<String>,
    /// Whitespace-collapsed content excerpt carried into aggregates and the
    /// CSV export.
    pub excerpt: String,
}

/// Rolled-up record per company-or-author identity. `spi` is always the sum
/// of the weights in `signals`; `priority` and `best_outreach_channel` are
/// recomputed on every append.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadAggregate {
    pub company: Option<String>,
    pub author: String,
    pub spi: u32,
    pub priority: Priority,
    pub best_outreach_channel: OutreachChannel,
    /// Contributing signals in discovery order, append-only.
    pub signals: Vec<ClassifiedSignal>,
}

#[derive(Debug, thiserror::Error)]
pub enum RadarError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No resolvable identity for post {post_id} on {platform}")]
    UnresolvedIdentity { platform: Platform, post_id: String },

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, RadarError>;
