//! Unit tests for sidebar strings and relative-time labels.

use chrono::{DateTime, Duration, Utc};
use flightmarks::services::localization_engine::{LocalizationEngine, LocalizationEngineTrait};
use rstest::rstest;

fn now() -> DateTime<Utc> {
    "2024-06-15T12:00:00Z".parse().unwrap()
}

fn engine(lang: &str) -> LocalizationEngine {
    LocalizationEngine::for_language(lang).unwrap()
}

#[rstest]
#[case(Duration::seconds(10), "less than a minute ago")]
#[case(Duration::seconds(45), "1 minute ago")]
#[case(Duration::minutes(5), "5 minutes ago")]
#[case(Duration::minutes(44), "44 minutes ago")]
#[case(Duration::minutes(60), "about 1 hour ago")]
#[case(Duration::hours(3), "about 3 hours ago")]
#[case(Duration::hours(30), "1 day ago")]
#[case(Duration::days(3), "3 days ago")]
#[case(Duration::days(35), "about 1 month ago")]
#[case(Duration::days(100), "3 months ago")]
#[case(Duration::days(400), "about 1 year ago")]
#[case(Duration::days(600), "over 1 year ago")]
#[case(Duration::days(700), "almost 2 years ago")]
fn test_english_distance_labels(#[case] age: Duration, #[case] expected: &str) {
    assert_eq!(engine("en").format_distance(now() - age, now()), expected);
}

#[rstest]
#[case(Duration::seconds(10), "vor weniger als 1 Minute")]
#[case(Duration::minutes(5), "vor 5 Minuten")]
#[case(Duration::minutes(60), "vor etwa 1 Stunde")]
#[case(Duration::days(1), "vor 1 Tag")]
#[case(Duration::days(3), "vor 3 Tagen")]
fn test_german_distance_labels(#[case] age: Duration, #[case] expected: &str) {
    assert_eq!(engine("de").format_distance(now() - age, now()), expected);
}

#[rstest]
#[case("en", "History", "Pinned")]
#[case("de", "Verlauf", "Angeheftet")]
fn test_section_titles(#[case] lang: &str, #[case] history: &str, #[case] pinned: &str) {
    let engine = engine(lang);
    assert_eq!(engine.t("sidebar.history", None), history);
    assert_eq!(engine.t("sidebar.pinned", None), pinned);
}

#[test]
fn test_missing_keys_fall_back_to_key() {
    let engine = engine("en");
    assert_eq!(engine.t("sidebar.nope", None), "sidebar.nope");
    assert_eq!(engine.plural("distance.nope", 3, None), "distance.nope");
}

#[test]
fn test_set_locale_rejects_unknown() {
    let mut engine = engine("en");
    assert!(engine.set_locale("xx").is_err());
    assert_eq!(engine.get_locale(), "en");
    engine.set_locale("de").unwrap();
    assert_eq!(engine.get_locale(), "de");
}
