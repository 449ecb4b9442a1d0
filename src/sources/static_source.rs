use crate::traits::PullSource;
use crate::types::{Platform, RawPost, Result};
use async_trait::async_trait;
use chrono::Utc;

/// In-memory source serving a fixed post list. Backs `--demo` runs and the
/// integration tests; no network involved.
pub struct StaticSource {
    platform: Platform,
    posts: Vec<RawPost>,
}

impl StaticSource {
    pub fn new(platform: Platform, posts: Vec<RawPost>) -> Self {
        Self { platform, posts }
    }

    /// The mock batch used by demo mode.
    pub fn demo() -> Self {
        let posts = vec![
            demo_post(
                "demo-1",
                "jane_doe",
                "We at BuildRight are pre-launch and validating an idea in construction tech. \
                 Looking for beta testers! Reach me at jane@buildright.dev",
            ),
            demo_post(
                "demo-2",
                "",
                "Launching soon: FitTrack. Testing product-market fit in health wearables. \
                 Finding target customers in the EU.",
            ),
            demo_post(
                "demo-3",
                "alex_smith",
                "Exploring new markets and analyzing competitors. Our team at DataFlow is \
                 doing market research for launch.",
            ),
        ];
        Self::new(Platform::Reddit, posts)
    }
}

fn demo_post(id: &str, author: &str, content: &str) -> RawPost {
    RawPost {
        platform: Platform::Reddit,
        post_id: id.to_string(),
        author: author.to_string(),
        author_profile_url: None,
        source_url: format!("https://www.reddit.com/comments/{}", id),
        content: content.to_string(),
        created_at: Utc::now(),
        context: Some("startups".to_string()),
    }
}

#[async_trait]
impl PullSource for StaticSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn source_name(&self) -> String {
        format!("static({} posts)", self.posts.len())
    }

    async fn fetch(&self, _terms: &[String], limit: usize) -> Result<Vec<RawPost>> {
        Ok(self.posts.iter().take(limit).cloned().collect())
    }
}
