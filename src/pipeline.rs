use crate::aggregator::LeadAggregator;
use crate::classifier::IntentClassifier;
use crate::config::RadarConfig;
use crate::extract::{excerpt, CompanyAuthorExtractor, ContactExtractor};
use crate::state::RadarState;
use crate::traits::PullSource;
use crate::types::{ClassifiedSignal, RadarError, RawPost, Result};
use tracing::{error, info, warn};

/// Counters for one polling cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleReport {
    /// Posts pulled from all sources, pre-dedup.
    pub fetched: usize,
    /// Posts dropped because they were already seen.
    pub duplicates: usize,
    /// New posts classified and folded into aggregates.
    pub classified: usize,
    /// New posts dropped for having no resolvable identity.
    pub dropped: usize,
    /// Sources whose fetch failed this cycle.
    pub source_errors: usize,
    /// Lead table size after the cycle.
    pub leads_total: usize,
}

/// The core pipeline: pull -> dedup -> classify -> aggregate. All state is
/// passed in explicitly and every signal ingestion is independently
/// consistent, so an interrupted cycle leaves valid aggregates behind.
pub struct SignalRadar {
    sources: Vec<Box<dyn PullSource>>,
    classifier: IntentClassifier,
    contacts: ContactExtractor,
    companies: CompanyAuthorExtractor,
    aggregator: LeadAggregator,
    search_terms: Vec<String>,
    max_posts_per_source: usize,
    excerpt_max_chars: usize,
}

impl SignalRadar {
    pub fn new(config: &RadarConfig) -> Self {
        Self {
            sources: Vec::new(),
            classifier: IntentClassifier::from_config(config),
            contacts: ContactExtractor::new(),
            companies: CompanyAuthorExtractor::new(),
            aggregator: LeadAggregator::from_config(config),
            search_terms: config.search_terms.clone(),
            max_posts_per_source: config.max_posts_per_source,
            excerpt_max_chars: config.excerpt_max_chars,
        }
    }

    pub fn add_source(&mut self, source: Box<dyn PullSource>) {
        info!("Adding source: {}", source.source_name());
        self.sources.push(source);
    }

    /// Enrich one raw post into a classified signal. Pure with respect to
    /// the post and config; missing fields degrade to empty/absent values.
    pub fn classify_post(&self, post: &RawPost) -> ClassifiedSignal {
        let classification = self.classifier.classify(&post.content);
        let emails = self.contacts.emails(&post.content);
        let outreach_channel = ContactExtractor::outreach_channel(post.platform, &emails);
        let company = self.companies.company(&post.content);
        let extracted_author = self.companies.author(&post.content);

        ClassifiedSignal {
            platform: post.platform,
            post_id: post.post_id.clone(),
            author: post.author.clone(),
            author_profile_url: post.author_profile_url.clone(),
            source_url: post.source_url.clone(),
            created_at: post.created_at,
            context: post.context.clone(),
            matched_terms: classification.matched_terms,
            signal_type: classification.signal_type,
            weight: classification.weight,
            urgency: classification.urgency,
            emails_found: emails,
            outreach_channel,
            company,
            extracted_author,
            excerpt: excerpt(&post.content, self.excerpt_max_chars),
        }
    }

    /// Run one cycle: pull a bounded batch from every source and fold each
    /// unseen post into the lead table. A source failure is logged and
    /// skipped; the state stays valid and re-saveable either way.
    pub async fn run_cycle(&self, state: &mut RadarState) -> Result<CycleReport> {
        let mut report = CycleReport::default();

        for source in &self.sources {
            let posts = match source
                .fetch(&self.search_terms, self.max_posts_per_source)
                .await
            {
                Ok(posts) => {
                    info!("Pulled {} posts from {}", posts.len(), source.source_name());
                    posts
                }
                Err(e) => {
                    error!("Failed to pull from {}: {}", source.source_name(), e);
                    report.source_errors += 1;
                    continue;
                }
            };

            for post in posts {
                report.fetched += 1;
                self.ingest_post(state, post, &mut report);
            }
        }

        report.leads_total = state.leads.len();
        info!(
            "Cycle done: fetched={} new={} duplicates={} dropped={} leads={}",
            report.fetched, report.classified, report.duplicates, report.dropped, report.leads_total
        );
        Ok(report)
    }

    fn ingest_post(&self, state: &mut RadarState, post: RawPost, report: &mut CycleReport) {
        if state.seen.has_seen(post.platform, &post.post_id) {
            report.duplicates += 1;
            return;
        }

        let platform = post.platform;
        let post_id = post.post_id.clone();
        let signal = self.classify_post(&post);

        match self.aggregator.ingest(&mut state.leads, signal) {
            Ok(_) => report.classified += 1,
            Err(RadarError::UnresolvedIdentity { platform, post_id }) => {
                // Reported, not silently discarded: an operator should be
                // able to find the mis-shaped source post.
                warn!(
                    "Dropping signal with no resolvable identity: {} post {}",
                    platform, post_id
                );
                report.dropped += 1;
            }
            Err(e) => {
                warn!("Failed to ingest {} post {}: {}", platform, post_id, e);
                report.dropped += 1;
            }
        }

        // The post reached classification exactly once; never again.
        state.seen.mark_seen(platform, &post_id);
    }
}
