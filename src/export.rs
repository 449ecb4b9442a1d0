use crate::types::{LeadAggregate, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

const EXPORT_COLUMNS: &str = "company,author,signal_type,weight,SPI,priority,channel,content";

/// Render the lead table as CSV, sorted by SPI descending so the hottest
/// leads come first. The representative signal per lead is the most recently
/// discovered one.
pub fn leads_to_csv(leads: &HashMap<String, LeadAggregate>) -> String {
    let mut rows: Vec<&LeadAggregate> = leads.values().collect();
    rows.sort_by(|a, b| b.spi.cmp(&a.spi).then_with(|| a.author.cmp(&b.author)));

    let mut out = String::from(EXPORT_COLUMNS);
    out.push('\n');
    for lead in rows {
        let representative = lead.signals.last();
        let signal_type = representative
            .map(|s| s.signal_type.to_string())
            .unwrap_or_default();
        let weight = representative.map(|s| s.weight).unwrap_or_default();
        let content = representative.map(|s| s.excerpt.as_str()).unwrap_or("");

        out.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            csv_field(lead.company.as_deref().unwrap_or("")),
            csv_field(&lead.author),
            signal_type,
            weight,
            lead.spi,
            lead.priority,
            lead.best_outreach_channel,
            csv_field(content),
        ));
    }
    out
}

pub fn write_leads_csv(path: &Path, leads: &HashMap<String, LeadAggregate>) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, leads_to_csv(leads))?;
    info!("Exported {} leads to {}", leads.len(), path.display());
    Ok(())
}

/// Quote a field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
