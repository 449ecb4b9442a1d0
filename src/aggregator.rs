use crate::config::RadarConfig;
use crate::types::{
    ClassifiedSignal, LeadAggregate, OutreachChannel, Priority, RadarError, Result,
};
use std::collections::HashMap;
use tracing::debug;

/// Folds classified signals into per-identity lead aggregates. Owns the SPI
/// thresholds; the aggregate table itself is passed in explicitly so the
/// caller controls its lifecycle and persistence.
#[derive(Debug, Clone)]
pub struct LeadAggregator {
    spi_high_threshold: u32,
    spi_medium_threshold: u32,
}

impl LeadAggregator {
    pub fn from_config(config: &RadarConfig) -> Self {
        Self {
            spi_high_threshold: config.spi_high_threshold,
            spi_medium_threshold: config.spi_medium_threshold,
        }
    }

    /// Resolve the identity key for a signal: company when present, else the
    /// author name extracted from content, else the platform author handle.
    /// `None` means the signal has no usable identity at all.
    pub fn identity_key(signal: &ClassifiedSignal) -> Option<String> {
        if let Some(company) = non_empty(signal.company.as_deref()) {
            return Some(format!("company:{}", company.to_lowercase()));
        }
        if let Some(author) = non_empty(signal.extracted_author.as_deref()) {
            return Some(format!("author:{}", author.to_lowercase()));
        }
        non_empty(Some(&signal.author)).map(|a| format!("author:{}", a.to_lowercase()))
    }

    /// Fold one signal into the lead table, creating the aggregate on first
    /// sight of its identity. Returns the key of the updated aggregate. A
    /// signal with no resolvable identity is rejected without touching any
    /// existing aggregate.
    pub fn ingest(
        &self,
        leads: &mut HashMap<String, LeadAggregate>,
        signal: ClassifiedSignal,
    ) -> Result<String> {
        let key = Self::identity_key(&signal).ok_or_else(|| RadarError::UnresolvedIdentity {
            platform: signal.platform,
            post_id: signal.post_id.clone(),
        })?;

        let lead = leads.entry(key.clone()).or_insert_with(|| LeadAggregate {
            company: signal.company.clone(),
            author: display_author(&signal),
            spi: 0,
            priority: Priority::Low,
            best_outreach_channel: OutreachChannel::None,
            signals: Vec::new(),
        });

        lead.signals.push(signal);
        self.recompute(lead);
        debug!(key = %key, spi = lead.spi, priority = %lead.priority, "lead updated");
        Ok(key)
    }

    /// Re-derive every field that depends on the signal list. SPI is always
    /// the sum of the constituent weights, priority is a pure function of
    /// SPI, and the best channel is the highest-precedence channel any
    /// signal ever supplied.
    fn recompute(&self, lead: &mut LeadAggregate) {
        lead.spi = lead.signals.iter().map(|s| s.weight).sum();
        lead.priority =
            Priority::from_spi(lead.spi, self.spi_high_threshold, self.spi_medium_threshold);
        lead.best_outreach_channel = lead
            .signals
            .iter()
            .map(|s| s.outreach_channel)
            .min_by_key(|c| c.precedence())
            .unwrap_or(OutreachChannel::None);
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn display_author(signal: &ClassifiedSignal) -> String {
    non_empty(Some(&signal.author))
        .or_else(|| non_empty(signal.extracted_author.as_deref()))
        .unwrap_or("unknown")
        .to_string()
}
