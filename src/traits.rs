use crate::types::{Platform, RawPost, Result};
use async_trait::async_trait;

/// Narrow interface over a platform ingestion collaborator. The core only
/// consumes the `RawPost` shape; how a source gets it (public JSON search,
/// RSS bridge, canned posts) is its own business.
#[async_trait]
pub trait PullSource: Send + Sync {
    /// Which platform this source's posts belong to.
    fn platform(&self) -> Platform;

    /// Human-readable name for logs.
    fn source_name(&self) -> String;

    /// Pull a bounded batch of posts matching the given search terms.
    async fn fetch(&self, terms: &[String], limit: usize) -> Result<Vec<RawPost>>;
}
