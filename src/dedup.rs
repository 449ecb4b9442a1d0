use crate::types::Platform;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Seen-set over `(platform, post_id)`. Lives inside the persisted state
/// snapshot, so a post seen in a previous run is still recognized after a
/// restart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DedupStore {
    seen: HashSet<(Platform, String)>,
}

impl DedupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_seen(&self, platform: Platform, post_id: &str) -> bool {
        self.seen.contains(&(platform, post_id.to_string()))
    }

    pub fn mark_seen(&mut self, platform: Platform, post_id: &str) {
        self.seen.insert((platform, post_id.to_string()));
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
