use crate::config::FetchConfig;
use crate::types::{RadarError, Result};
use backoff::backoff::Backoff;
use backoff::exponential::ExponentialBackoff;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

/// HTTP fetcher shared by the platform sources: one `Client` with the
/// configured user agent and timeout, per-host rate limiting, and retry with
/// exponential backoff.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
    rate_limiter: Arc<RwLock<HashMap<String, Instant>>>,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Self {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config,
            rate_limiter: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// GET a URL as text, retrying transient failures. Non-2xx statuses are
    /// retried up to `max_retries` and then surfaced as errors.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        self.apply_rate_limit(url).await?;

        let mut backoff: ExponentialBackoff<backoff::SystemClock> = ExponentialBackoff {
            current_interval: Duration::from_secs(self.config.retry_delay_seconds),
            initial_interval: Duration::from_secs(self.config.retry_delay_seconds),
            max_interval: Duration::from_secs(self.config.retry_delay_seconds * 16),
            multiplier: 2.0,
            max_elapsed_time: Some(Duration::from_secs(self.config.retry_delay_seconds * 60)),
            ..Default::default()
        };

        let mut last_error: Option<RadarError> = None;

        for attempt in 0..=self.config.max_retries {
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body = response.text().await?;
                        debug!("Fetched {} ({} bytes)", url, body.len());
                        return Ok(body);
                    }
                    last_error = Some(RadarError::General(format!(
                        "HTTP {}: {}",
                        status,
                        status.canonical_reason().unwrap_or("Unknown")
                    )));
                }
                Err(e) => last_error = Some(RadarError::Http(e)),
            }

            if attempt < self.config.max_retries {
                if let Some(delay) = backoff.next_backoff() {
                    warn!("Attempt {} failed for {}, retrying in {:?}", attempt + 1, url, delay);
                    tokio::time::sleep(delay).await;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| RadarError::General("Unknown fetch error".to_string())))
    }

    /// Keep at least `min_host_interval_ms` between requests to one host.
    async fn apply_rate_limit(&self, url: &str) -> Result<()> {
        let parsed = Url::parse(url)?;
        let host = parsed.host_str().unwrap_or("").to_string();

        let now = Instant::now();
        let min_interval = Duration::from_millis(self.config.min_host_interval_ms);

        let mut rate_limiter = self.rate_limiter.write().await;
        if let Some(last_request) = rate_limiter.get(&host) {
            let elapsed = now.duration_since(*last_request);
            if elapsed < min_interval {
                let wait = min_interval - elapsed;
                debug!("Rate limiting {}: waiting {:?}", host, wait);
                tokio::time::sleep(wait).await;
            }
        }
        rate_limiter.insert(host, Instant::now());

        Ok(())
    }
}
