//! Theory-day classification.
//!
//! A calendar day counts as a theory day when its weekday is in the
//! configured weekly set (0 = Monday .. 6 = Sunday) or when the date itself
//! appears in the calendar overrides. The result is derived state,
//! recomputed exactly once per distinct date observed during the process
//! lifetime and cached for the rest of that date.

use chrono::{Datelike, NaiveDate};
use ponto_config::Config;
use ponto_core::format_override_date;
use tracing::debug;

/// Classification of one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClassification {
    pub as_of: NaiveDate,
    pub is_theory_day: bool,
}

/// Classify a date against the current configuration.
#[must_use]
pub fn classify(today: NaiveDate, config: &Config) -> DayClassification {
    let weekday = today.weekday().num_days_from_monday();
    let formatted = format_override_date(today);

    let is_theory_day = config.dias_teoria.contains(&weekday)
        || config.dias_especiais_teoria.iter().any(|d| d == &formatted);

    DayClassification {
        as_of: today,
        is_theory_day,
    }
}

/// Per-date classification cache.
///
/// The cached value is only valid for its `as_of` date; the intake loop
/// invalidates it when the observed wall-clock date advances (which also
/// triggers a configuration reload).
#[derive(Debug, Default)]
pub struct DayClassifier {
    cached: Option<DayClassification>,
}

impl DayClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self { cached: None }
    }

    /// The classification for `today`, computing it at most once per date.
    pub fn classification_for(&mut self, today: NaiveDate, config: &Config) -> DayClassification {
        if let Some(cached) = self.cached
            && cached.as_of == today
        {
            return cached;
        }

        let classification = classify(today, config);
        debug!(
            date = %format_override_date(today),
            is_theory_day = classification.is_theory_day,
            "day_classified"
        );
        self.cached = Some(classification);
        classification
    }

    /// Drop the cached value (called after a configuration reload).
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ponto_core::parse_override_date;
    use rstest::rstest;

    // 06/01/2026 is a Tuesday (ordinal 1), 07/01/2026 a Wednesday
    #[rstest]
    #[case("05/01/2026", false)] // Monday
    #[case("06/01/2026", true)] // Tuesday, in default weekly set
    #[case("07/01/2026", false)] // Wednesday
    #[case("08/01/2026", true)] // Thursday, in default weekly set
    #[case("11/01/2026", false)] // Sunday
    fn test_default_weekly_set(#[case] date: &str, #[case] expected: bool) {
        let config = Config::default();
        let date = parse_override_date(date).unwrap();
        assert_eq!(classify(date, &config).is_theory_day, expected);
    }

    #[test]
    fn test_override_flips_classification() {
        let mut config = Config::default();
        let date = parse_override_date("07/01/2026").unwrap(); // Wednesday

        assert!(!classify(date, &config).is_theory_day);

        config.add_special_day("07/01/2026").unwrap();
        assert!(classify(date, &config).is_theory_day);

        // Idempotent: adding twice changes nothing
        config.add_special_day("07/01/2026").unwrap_or(false);
        assert_eq!(config.dias_especiais_teoria.len(), 1);
        assert!(classify(date, &config).is_theory_day);
    }

    #[test]
    fn test_custom_weekly_set() {
        let mut config = Config::default();
        config.dias_teoria = vec![5, 6]; // weekend only

        let saturday = parse_override_date("10/01/2026").unwrap();
        let tuesday = parse_override_date("06/01/2026").unwrap();

        assert!(classify(saturday, &config).is_theory_day);
        assert!(!classify(tuesday, &config).is_theory_day);
    }

    #[test]
    fn test_classifier_caches_per_date() {
        let mut config = Config::default();
        let mut classifier = DayClassifier::new();
        let wednesday = parse_override_date("07/01/2026").unwrap();

        assert!(!classifier.classification_for(wednesday, &config).is_theory_day);

        // The config changed, but the cache still answers for the same date
        config.add_special_day("07/01/2026").unwrap();
        assert!(!classifier.classification_for(wednesday, &config).is_theory_day);

        // Invalidation (as done on reload) picks up the new override
        classifier.invalidate();
        assert!(classifier.classification_for(wednesday, &config).is_theory_day);
    }

    #[test]
    fn test_classifier_recomputes_on_new_date() {
        let config = Config::default();
        let mut classifier = DayClassifier::new();

        let tuesday = parse_override_date("06/01/2026").unwrap();
        let wednesday = parse_override_date("07/01/2026").unwrap();

        assert!(classifier.classification_for(tuesday, &config).is_theory_day);
        assert!(!classifier.classification_for(wednesday, &config).is_theory_day);
    }
}
