use crate::types::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration surface consumed by the core: term lists per tier, urgency
/// terms, scoring weights, SPI thresholds, and source settings. Defaults
/// match the documented constants; a JSON file can override any subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    /// Strong pre-launch / validation language.
    pub high_intent_terms: Vec<String>,
    /// Exploratory / research language.
    pub medium_intent_terms: Vec<String>,
    /// Urgency markers, orthogonal to the intent tiers.
    pub urgency_terms: Vec<String>,
    /// Terms fed to the platform search endpoints.
    pub search_terms: Vec<String>,
    /// Subreddits worth polling; searches are restricted to these.
    pub subreddits: Vec<String>,

    pub weight_high: u32,
    pub weight_medium: u32,
    pub weight_other: u32,

    /// SPI >= this -> High priority.
    pub spi_high_threshold: u32,
    /// SPI >= this -> Medium priority (below: Low).
    pub spi_medium_threshold: u32,

    /// Cap on posts pulled from each source per cycle.
    pub max_posts_per_source: usize,
    /// Posts shorter than this are noise and skipped at the source.
    pub min_content_chars: usize,
    pub excerpt_max_chars: usize,

    /// Base URL of a Nitter instance for the X source; `None` disables it.
    pub nitter_base_url: Option<String>,

    pub fetch: FetchConfig,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            high_intent_terms: vec![
                "pre-launch".to_string(),
                "launching soon".to_string(),
                "validating an idea".to_string(),
                "validating our idea".to_string(),
                "testing product-market fit".to_string(),
                "finding target customers".to_string(),
                "market research for launch".to_string(),
                "looking for beta testers".to_string(),
                "early adopters".to_string(),
                "mvp launch".to_string(),
                "soft launch".to_string(),
                "coming soon".to_string(),
            ],
            medium_intent_terms: vec![
                "looking for growth opportunities".to_string(),
                "exploring new markets".to_string(),
                "analyzing competitors".to_string(),
                "potential customer segments".to_string(),
                "industry trends".to_string(),
                "market validation".to_string(),
                "customer discovery".to_string(),
                "pilot program".to_string(),
            ],
            urgency_terms: vec![
                "asap".to_string(),
                "urgent".to_string(),
                "immediately".to_string(),
                "today".to_string(),
                "right now".to_string(),
                "this week".to_string(),
            ],
            search_terms: vec![
                "validating an idea".to_string(),
                "pre-launch".to_string(),
                "launching soon".to_string(),
                "testing product-market fit".to_string(),
                "finding target customers".to_string(),
                "market research for launch".to_string(),
            ],
            subreddits: vec![
                "startups".to_string(),
                "Entrepreneur".to_string(),
                "SaaS".to_string(),
                "SideProject".to_string(),
                "IndieHackers".to_string(),
                "ProductManagement".to_string(),
            ],
            weight_high: 100,
            weight_medium: 50,
            weight_other: 20,
            spi_high_threshold: 70,
            spi_medium_threshold: 50,
            max_posts_per_source: 50,
            min_content_chars: 10,
            excerpt_max_chars: 500,
            nitter_base_url: Some("https://nitter.net".to_string()),
            fetch: FetchConfig::default(),
        }
    }
}

impl RadarConfig {
    /// Load a config file, falling back to defaults for any missing field.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    /// Minimum spacing between requests to the same host.
    pub min_host_interval_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "SignalRadar/1.0 (pre-launch signal finder)".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            retry_delay_seconds: 2,
            min_host_interval_ms: 1000,
        }
    }
}
