use crate::config::RadarConfig;
use crate::fetcher::Fetcher;
use crate::traits::PullSource;
use crate::types::{Platform, RawPost, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Reddit ingestion via the public subreddit search JSON endpoint. No
/// credentials; searches are restricted to the configured high-intent
/// subreddits.
pub struct RedditSource {
    fetcher: Arc<Fetcher>,
    subreddits: Vec<String>,
    min_content_chars: usize,
}

#[derive(Debug, Deserialize)]
struct Listing {
    #[serde(default)]
    data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: RedditPost,
}

#[derive(Debug, Deserialize)]
struct RedditPost {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    subreddit: String,
    #[serde(default)]
    created_utc: f64,
}

impl RedditSource {
    pub fn new(fetcher: Arc<Fetcher>, config: &RadarConfig) -> Self {
        Self {
            fetcher,
            subreddits: config.subreddits.clone(),
            min_content_chars: config.min_content_chars,
        }
    }

    fn search_url(subreddit: &str, term: &str, limit: usize) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "https://www.reddit.com/r/{}/search.json",
            subreddit
        ))?;
        url.query_pairs_mut()
            .append_pair("q", term)
            .append_pair("restrict_sr", "on")
            .append_pair("sort", "new")
            .append_pair("limit", &limit.min(100).to_string());
        Ok(url)
    }

    fn to_raw_post(&self, post: RedditPost) -> Option<RawPost> {
        let title = post.title.trim();
        let selftext = post.selftext.trim();
        let content = if selftext.is_empty() {
            title.to_string()
        } else {
            format!("{}\n{}", title, selftext)
        };
        if content.chars().count() < self.min_content_chars {
            return None;
        }

        // Deleted accounts come through as the literal "[deleted]"; treat
        // that as an absent handle so extraction can still supply identity.
        let author = if post.author == "[deleted]" {
            String::new()
        } else {
            post.author
        };
        let author_profile_url = if author.is_empty() {
            None
        } else {
            Some(format!("https://www.reddit.com/user/{}", author))
        };

        let source_url = if post.permalink.is_empty() {
            format!("https://www.reddit.com/comments/{}", post.id)
        } else {
            format!("https://www.reddit.com{}", post.permalink)
        };

        let created_at = DateTime::<Utc>::from_timestamp(post.created_utc as i64, 0)
            .unwrap_or_else(Utc::now);

        Some(RawPost {
            platform: Platform::Reddit,
            post_id: post.id,
            author,
            author_profile_url,
            source_url,
            content,
            created_at,
            context: Some(post.subreddit),
        })
    }
}

#[async_trait]
impl PullSource for RedditSource {
    fn platform(&self) -> Platform {
        Platform::Reddit
    }

    fn source_name(&self) -> String {
        format!("reddit({})", self.subreddits.join(","))
    }

    async fn fetch(&self, terms: &[String], limit: usize) -> Result<Vec<RawPost>> {
        let mut posts = Vec::new();
        let mut seen_ids: HashSet<String> = HashSet::new();

        'outer: for subreddit in &self.subreddits {
            for term in terms {
                if posts.len() >= limit {
                    break 'outer;
                }
                let url = Self::search_url(subreddit, term, limit - posts.len() + 5)?;
                debug!("Searching r/{} for {:?}", subreddit, term);

                let body = match self.fetcher.get_text(url.as_str()).await {
                    Ok(body) => body,
                    Err(e) => {
                        // One failing subreddit/term pair should not sink
                        // the whole batch.
                        warn!("Reddit search failed for r/{} {:?}: {}", subreddit, term, e);
                        continue;
                    }
                };
                let listing: Listing = serde_json::from_str(&body)?;

                for child in listing.data.children {
                    if posts.len() >= limit {
                        break 'outer;
                    }
                    if child.data.id.is_empty() || !seen_ids.insert(child.data.id.clone()) {
                        continue;
                    }
                    if let Some(post) = self.to_raw_post(child.data) {
                        posts.push(post);
                    }
                }
            }
        }

        Ok(posts)
    }
}
