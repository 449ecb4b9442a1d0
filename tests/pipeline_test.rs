use chrono::Utc;
use signal_radar::sources::StaticSource;
use signal_radar::types::{
    OutreachChannel, Platform, Priority, RawPost, Result, SignalType,
};
use signal_radar::{export, LeadAggregator, RadarConfig, RadarState, SignalRadar};
use tracing::info;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .try_init();
}

fn post(platform: Platform, id: &str, author: &str, content: &str) -> RawPost {
    RawPost {
        platform,
        post_id: id.to_string(),
        author: author.to_string(),
        author_profile_url: None,
        source_url: format!("https://example.com/{}", id),
        content: content.to_string(),
        created_at: Utc::now(),
        context: None,
    }
}

fn radar_with(posts: Vec<RawPost>) -> SignalRadar {
    let config = RadarConfig::default();
    let mut radar = SignalRadar::new(&config);
    radar.add_source(Box::new(StaticSource::new(Platform::Reddit, posts)));
    radar
}

#[tokio::test]
async fn high_intent_post_with_email_becomes_high_priority_lead() -> Result<()> {
    init_tracing();

    let radar = radar_with(vec![post(
        Platform::Reddit,
        "abc123",
        "u/founder1",
        "We're pre-launch and validating our idea, email me at founder@acme.io",
    )]);
    let mut state = RadarState::default();

    let report = radar.run_cycle(&mut state).await?;
    assert_eq!(report.fetched, 1);
    assert_eq!(report.classified, 1);
    assert_eq!(report.dropped, 0);

    assert_eq!(state.leads.len(), 1);
    let lead = state.leads.values().next().unwrap();
    assert_eq!(lead.spi, 100);
    assert_eq!(lead.priority, Priority::High);
    assert_eq!(lead.best_outreach_channel, OutreachChannel::Email);

    let signal = &lead.signals[0];
    assert_eq!(signal.signal_type, SignalType::HighIntent);
    assert_eq!(signal.weight, 100);
    assert!(signal.matched_terms.contains("pre-launch"));
    assert_eq!(signal.emails_found, vec!["founder@acme.io".to_string()]);
    assert_eq!(signal.outreach_channel, OutreachChannel::Email);
    Ok(())
}

#[tokio::test]
async fn three_low_signals_for_one_company_reach_medium_priority() -> Result<()> {
    init_tracing();

    // Three distinct authors, all attributed to the same company, each
    // matching no intent terms (weight 20).
    let radar = radar_with(vec![
        post(Platform::Reddit, "p1", "u/one", "Our team at Acme is hiring designers"),
        post(Platform::Reddit, "p2", "u/two", "Our team at Acme shipped a dashboard"),
        post(Platform::Reddit, "p3", "u/three", "Our team at Acme moved offices"),
    ]);
    let mut state = RadarState::default();

    radar.run_cycle(&mut state).await?;

    assert_eq!(state.leads.len(), 1);
    let lead = state.leads.get("company:acme").expect("lead keyed by company");
    assert_eq!(lead.spi, 60);
    assert_eq!(lead.priority, Priority::Medium);
    assert_eq!(lead.signals.len(), 3);

    // Discovery order is preserved.
    let ids: Vec<&str> = lead.signals.iter().map(|s| s.post_id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3"]);
    Ok(())
}

#[tokio::test]
async fn rerunning_the_same_batch_changes_nothing() -> Result<()> {
    init_tracing();

    let posts = vec![
        post(Platform::Reddit, "r1", "u/alpha", "We're pre-launch, looking for beta testers"),
        post(Platform::Reddit, "r2", "u/beta", "Doing customer discovery for a pilot program"),
    ];
    let radar = radar_with(posts);
    let mut state = RadarState::default();

    let first = radar.run_cycle(&mut state).await?;
    assert_eq!(first.classified, 2);
    let snapshot = serde_json::to_string(&state.leads).unwrap();

    let second = radar.run_cycle(&mut state).await?;
    assert_eq!(second.classified, 0);
    assert_eq!(second.duplicates, 2);
    assert_eq!(serde_json::to_string(&state.leads).unwrap(), snapshot);
    Ok(())
}

#[tokio::test]
async fn dedup_survives_a_state_save_and_reload() -> Result<()> {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("radar_state.json");

    let radar = radar_with(vec![post(
        Platform::Reddit,
        "persist-1",
        "u/founder",
        "MVP launch next week, early adopters wanted",
    )]);

    let mut state = RadarState::default();
    radar.run_cycle(&mut state).await?;
    state.save(&state_path)?;

    // Simulated restart: reload and re-poll the same post.
    let mut restored = RadarState::load(&state_path)?;
    let report = radar.run_cycle(&mut restored).await?;
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.classified, 0);

    let lead = restored.leads.values().next().unwrap();
    assert_eq!(lead.spi, 100);
    assert_eq!(lead.signals.len(), 1);
    Ok(())
}

#[tokio::test]
async fn spi_always_equals_the_sum_of_signal_weights() -> Result<()> {
    init_tracing();

    let radar = radar_with(vec![
        post(Platform::Reddit, "s1", "u/maker", "We're pre-launch at last"),
        post(Platform::Reddit, "s2", "u/maker", "Running market validation interviews"),
        post(Platform::Reddit, "s3", "u/maker", "Just a regular update post today"),
    ]);
    let mut state = RadarState::default();
    radar.run_cycle(&mut state).await?;

    for lead in state.leads.values() {
        let sum: u32 = lead.signals.iter().map(|s| s.weight).sum();
        assert_eq!(lead.spi, sum, "SPI drifted for {}", lead.author);
        assert_eq!(
            lead.priority,
            Priority::from_spi(lead.spi, 70, 50),
            "priority inconsistent with SPI for {}",
            lead.author
        );
    }
    Ok(())
}

#[test]
fn priority_is_monotone_in_spi() {
    let spis = [0u32, 20, 40, 49, 50, 60, 69, 70, 100, 500];
    let priorities: Vec<Priority> = spis
        .iter()
        .map(|&spi| Priority::from_spi(spi, 70, 50))
        .collect();
    for pair in priorities.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    assert_eq!(Priority::from_spi(50, 70, 50), Priority::Medium);
    assert_eq!(Priority::from_spi(70, 70, 50), Priority::High);
    assert_eq!(Priority::from_spi(49, 70, 50), Priority::Low);
}

#[tokio::test]
async fn a_lead_that_ever_supplied_an_email_keeps_the_email_channel() -> Result<()> {
    init_tracing();

    let radar = radar_with(vec![
        post(
            Platform::Reddit,
            "c1",
            "u/builder",
            "Our team at FitTrack is pre-launch, write to hello@fittrack.app",
        ),
        post(
            Platform::Reddit,
            "c2",
            "u/builder",
            "Our team at FitTrack pushed an update",
        ),
    ]);
    let mut state = RadarState::default();
    radar.run_cycle(&mut state).await?;

    let lead = state.leads.get("company:fittrack").expect("company lead");
    assert_eq!(lead.signals.len(), 2);
    assert_eq!(lead.signals[1].outreach_channel, OutreachChannel::DmReddit);
    assert_eq!(lead.best_outreach_channel, OutreachChannel::Email);
    Ok(())
}

#[tokio::test]
async fn identityless_posts_are_dropped_and_reported_once() -> Result<()> {
    init_tracing();

    // No author handle, no company trigger, no self-introduction.
    let radar = radar_with(vec![post(Platform::Reddit, "x1", "", "asdf qwerty zzz nothing here")]);
    let mut state = RadarState::default();

    let first = radar.run_cycle(&mut state).await?;
    assert_eq!(first.dropped, 1);
    assert!(state.leads.is_empty());

    // Seen anyway, so the next cycle does not re-report it.
    let second = radar.run_cycle(&mut state).await?;
    assert_eq!(second.duplicates, 1);
    assert_eq!(second.dropped, 0);
    Ok(())
}

#[tokio::test]
async fn csv_export_is_sorted_by_spi_and_quotes_content() -> Result<()> {
    init_tracing();

    let radar = radar_with(vec![
        post(Platform::Reddit, "e1", "u/low", "Nothing interesting happening"),
        post(
            Platform::Reddit,
            "e2",
            "u/hot",
            "We're pre-launch, looking for beta testers, early adopters welcome",
        ),
    ]);
    let mut state = RadarState::default();
    radar.run_cycle(&mut state).await?;

    let csv = export::leads_to_csv(&state.leads);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "company,author,signal_type,weight,SPI,priority,channel,content"
    );
    assert_eq!(lines.len(), 3);
    // Highest SPI first.
    assert!(lines[1].contains("u/hot"));
    assert!(lines[1].contains("high_intent"));
    assert!(lines[2].contains("u/low"));

    // Content with commas gets quoted.
    info!("csv:\n{}", csv);
    assert!(lines[1].contains("\"We're pre-launch, looking for beta testers"));
    Ok(())
}

#[test]
fn identity_key_falls_back_from_company_to_authors() {
    let config = RadarConfig::default();
    let radar = SignalRadar::new(&config);

    let company_signal = radar.classify_post(&post(
        Platform::Reddit,
        "k1",
        "u/someone",
        "Our team at DataFlow is doing market research for launch",
    ));
    assert_eq!(
        LeadAggregator::identity_key(&company_signal).as_deref(),
        Some("company:dataflow")
    );

    let author_signal = radar.classify_post(&post(
        Platform::Reddit,
        "k2",
        "u/someone",
        "Nothing that names a company",
    ));
    assert_eq!(
        LeadAggregator::identity_key(&author_signal).as_deref(),
        Some("author:u/someone")
    );

    let extracted_signal = radar.classify_post(&post(
        Platform::X,
        "k3",
        "",
        "I'm Jane, validating an idea in health tech.",
    ));
    assert_eq!(
        LeadAggregator::identity_key(&extracted_signal).as_deref(),
        Some("author:jane")
    );
}
