pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod dedup;
pub mod export;
pub mod extract;
pub mod fetcher;
pub mod matcher;
pub mod pipeline;
pub mod sources;
pub mod state;
pub mod traits;
pub mod types;

pub use aggregator::LeadAggregator;
pub use classifier::IntentClassifier;
pub use config::{FetchConfig, RadarConfig};
pub use dedup::DedupStore;
pub use extract::{CompanyAuthorExtractor, ContactExtractor};
pub use fetcher::Fetcher;
pub use matcher::TermMatcher;
pub use pipeline::{CycleReport, SignalRadar};
pub use state::RadarState;
pub use traits::PullSource;
pub use types::*;
