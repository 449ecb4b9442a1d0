use clap::Parser;
use signal_radar::sources::{NitterSource, RedditSource, StaticSource};
use signal_radar::{export, Fetcher, RadarConfig, RadarState, SignalRadar};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Interval bounds for scheduled polling (seconds).
const MIN_INTERVAL_SECS: u64 = 5;
const MAX_INTERVAL_SECS: u64 = 43_200;

#[derive(Debug, Parser)]
#[command(
    name = "signal-radar",
    about = "Harvest pre-launch / market-validation signals from Reddit and X into ranked leads"
)]
struct Cli {
    /// Path to a JSON config file; defaults apply for missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the state snapshot and CSV export.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Poll continuously with this many seconds between cycles
    /// (clamped to 5-43200). Omit to run a single cycle.
    #[arg(long)]
    interval_secs: Option<u64>,

    /// Override the per-source post cap.
    #[arg(long)]
    limit: Option<usize>,

    /// Override the configured search terms.
    #[arg(long)]
    terms: Vec<String>,

    /// Run the pipeline over canned demo posts, no network.
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RadarConfig::from_file(path)?,
        None => RadarConfig::default(),
    };
    if let Some(limit) = cli.limit {
        config.max_posts_per_source = limit;
    }
    if !cli.terms.is_empty() {
        config.search_terms = cli.terms.clone();
    }

    let state_path = cli.data_dir.join("radar_state.json");
    let csv_path = cli.data_dir.join("hot_leads.csv");

    let mut radar = SignalRadar::new(&config);
    if cli.demo {
        info!("Demo mode: using canned posts");
        radar.add_source(Box::new(StaticSource::demo()));
    } else {
        let fetcher = Arc::new(Fetcher::new(config.fetch.clone()));
        radar.add_source(Box::new(RedditSource::new(fetcher.clone(), &config)));
        if let Some(base_url) = config.nitter_base_url.clone() {
            radar.add_source(Box::new(NitterSource::new(fetcher, base_url)));
        }
    }

    let mut state = RadarState::load(&state_path)?;

    let interval = cli
        .interval_secs
        .map(|secs| secs.clamp(MIN_INTERVAL_SECS, MAX_INTERVAL_SECS));

    let mut run = 0u64;
    loop {
        run += 1;
        info!("--- Cycle #{} ---", run);
        let report = radar.run_cycle(&mut state).await?;
        state.save(&state_path)?;
        export::write_leads_csv(&csv_path, &state.leads)?;
        info!(
            "Saved state ({} leads) and export to {}",
            report.leads_total,
            csv_path.display()
        );

        match interval {
            Some(secs) => {
                info!("Sleeping {}s until next cycle", secs);
                tokio::time::sleep(Duration::from_secs(secs)).await;
            }
            None => break,
        }
    }

    Ok(())
}
