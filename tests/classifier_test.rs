use signal_radar::matcher::{IntentTier, TermMatcher};
use signal_radar::types::{SignalType, Urgency};
use signal_radar::{IntentClassifier, RadarConfig};

#[test]
fn empty_or_whitespace_text_matches_nothing() {
    let matcher = TermMatcher::new(
        &["pre-launch".to_string()],
        &["industry trends".to_string()],
    );
    assert!(matcher.match_text("").is_empty());
    assert!(matcher.match_text("   \n\t ").is_empty());
}

#[test]
fn matching_is_case_insensitive_and_reports_all_tiers() {
    let matcher = TermMatcher::new(
        &["pre-launch".to_string()],
        &["industry trends".to_string()],
    );
    let matches = matcher.match_text("PRE-LAUNCH thoughts on Industry Trends");
    assert!(matches.terms.contains("pre-launch"));
    assert!(matches.terms.contains("industry trends"));
    assert!(matches.tiers.contains(&IntentTier::High));
    assert!(matches.tiers.contains(&IntentTier::Medium));
}

#[test]
fn high_tier_wins_over_medium_when_both_match() {
    let classifier = IntentClassifier::from_config(&RadarConfig::default());
    let result =
        classifier.classify("We're pre-launch and tracking industry trends closely");
    assert_eq!(result.signal_type, SignalType::HighIntent);
    assert_eq!(result.weight, 100);
}

#[test]
fn a_term_configured_in_both_tiers_classifies_as_high() {
    let mut config = RadarConfig::default();
    config.high_intent_terms.push("pilot program".to_string());
    // "pilot program" is already in the default medium tier.
    let classifier = IntentClassifier::from_config(&config);
    let result = classifier.classify("Starting a pilot program next month");
    assert_eq!(result.signal_type, SignalType::HighIntent);
}

#[test]
fn medium_only_and_no_match_tiers() {
    let classifier = IntentClassifier::from_config(&RadarConfig::default());

    let medium = classifier.classify("We are deep into customer discovery right here");
    assert_eq!(medium.signal_type, SignalType::MediumIntent);
    assert_eq!(medium.weight, 50);

    let other = classifier.classify("Completely unrelated post about cooking");
    assert_eq!(other.signal_type, SignalType::Other);
    assert_eq!(other.weight, 20);
    assert!(other.matched_terms.is_empty());
}

#[test]
fn empty_content_degrades_to_other_not_an_error() {
    let classifier = IntentClassifier::from_config(&RadarConfig::default());
    let result = classifier.classify("");
    assert_eq!(result.signal_type, SignalType::Other);
    assert_eq!(result.weight, 20);
    assert_eq!(result.urgency, Urgency::None);
}

#[test]
fn urgency_tiers_from_hit_count() {
    let classifier = IntentClassifier::from_config(&RadarConfig::default());
    assert_eq!(classifier.urgency("calm and steady progress"), Urgency::None);
    assert_eq!(classifier.urgency("need feedback asap"), Urgency::Elevated);
    assert_eq!(
        classifier.urgency("need this ASAP, ideally today"),
        Urgency::High
    );
}

#[test]
fn classification_is_deterministic() {
    let classifier = IntentClassifier::from_config(&RadarConfig::default());
    let text = "Pre-launch and validating an idea, need beta testers asap";
    let a = classifier.classify(text);
    let b = classifier.classify(text);
    assert_eq!(a.signal_type, b.signal_type);
    assert_eq!(a.weight, b.weight);
    assert_eq!(a.urgency, b.urgency);
    assert_eq!(a.matched_terms, b.matched_terms);
}
