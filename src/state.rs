use crate::dedup::DedupStore;
use crate::types::{LeadAggregate, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Process-wide pipeline state: the seen-set and the lead table. Explicitly
/// loaded at startup and saved after every cycle; no hidden module-level
/// state anywhere.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RadarState {
    pub seen: DedupStore,
    pub leads: HashMap<String, LeadAggregate>,
}

impl RadarState {
    /// Load a previously saved snapshot. A missing file is a fresh start,
    /// not an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No state snapshot at {}, starting fresh", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let state: Self = serde_json::from_str(&raw)?;
        info!(
            "Loaded state: {} seen posts, {} leads",
            state.seen.len(),
            state.leads.len()
        );
        Ok(state)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}
