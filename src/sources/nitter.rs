use crate::fetcher::Fetcher;
use crate::traits::PullSource;
use crate::types::{Platform, RadarError, RawPost, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// X ingestion through a Nitter instance's search RSS. Nitter exposes tweet
/// search results as a plain feed, which keeps this source credential-free.
pub struct NitterSource {
    fetcher: Arc<Fetcher>,
    base_url: String,
}

impl NitterSource {
    pub fn new(fetcher: Arc<Fetcher>, base_url: String) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn search_url(&self, term: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/search/rss", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("f", "tweets")
            .append_pair("q", term);
        Ok(url)
    }

    fn entry_to_post(&self, entry: feed_rs::model::Entry) -> Option<RawPost> {
        let link = entry.links.first().map(|l| l.href.clone())?;
        let post_id = status_id(&link).unwrap_or_else(|| entry.id.clone());
        if post_id.is_empty() {
            return None;
        }

        // Nitter puts the tweet text in the title and the author handle
        // ("@user") in the creator field.
        let content = entry
            .title
            .map(|t| t.content)
            .or_else(|| entry.summary.map(|s| s.content))
            .unwrap_or_default();
        if content.trim().is_empty() {
            return None;
        }

        let author = entry
            .authors
            .first()
            .map(|p| p.name.trim_start_matches('@').to_string())
            .unwrap_or_default();
        let author_profile_url = if author.is_empty() {
            None
        } else {
            Some(format!("https://x.com/{}", author))
        };

        Some(RawPost {
            platform: Platform::X,
            post_id,
            author,
            author_profile_url,
            source_url: link,
            content,
            created_at: entry.published.unwrap_or_else(Utc::now),
            context: None,
        })
    }
}

#[async_trait]
impl PullSource for NitterSource {
    fn platform(&self) -> Platform {
        Platform::X
    }

    fn source_name(&self) -> String {
        format!("x({})", self.base_url)
    }

    async fn fetch(&self, terms: &[String], limit: usize) -> Result<Vec<RawPost>> {
        let mut posts = Vec::new();
        let mut seen_ids: HashSet<String> = HashSet::new();

        'outer: for term in terms {
            if posts.len() >= limit {
                break;
            }
            let url = self.search_url(term)?;
            debug!("Searching X for {:?}", term);

            let body = match self.fetcher.get_text(url.as_str()).await {
                Ok(body) => body,
                Err(e) => {
                    warn!("X search failed for {:?}: {}", term, e);
                    continue;
                }
            };
            let feed = feed_rs::parser::parse(body.as_bytes())
                .map_err(|e| RadarError::Parse(e.to_string()))?;

            for entry in feed.entries {
                if posts.len() >= limit {
                    break 'outer;
                }
                if let Some(post) = self.entry_to_post(entry) {
                    if seen_ids.insert(post.post_id.clone()) {
                        posts.push(post);
                    }
                }
            }
        }

        Ok(posts)
    }
}

/// Pull the numeric status id out of a tweet permalink
/// (`https://host/user/status/123#m`).
fn status_id(link: &str) -> Option<String> {
    let after = link.split("/status/").nth(1)?;
    let id: String = after.chars().take_while(|c| c.is_ascii_digit()).collect();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
