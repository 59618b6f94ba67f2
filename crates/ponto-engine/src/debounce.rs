//! Scan validation and duplicate suppression.
//!
//! A card held against a keyboard-emulating reader repeats its UID several
//! times per second, and stray keyboard input can land on the same stream.
//! The debouncer is the single gate between raw input lines and accepted
//! [`ScanEvent`]s: format validation first, then a single global time
//! window. The window is global across badges, not per-badge: two different
//! cards scanned within the window are treated identically and the second
//! is suppressed.

use ponto_core::{BadgeId, ScanEvent};
use std::time::{Duration, Instant};
use tracing::debug;

/// Why an input line was not turned into a scan event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The line was empty after trimming.
    Empty,

    /// The line is not all decimal digits of sufficient length.
    BadFormat,

    /// A scan was already accepted within the debounce window.
    Debounced,
}

/// Outcome of feeding one raw input line through the debouncer.
#[derive(Debug)]
pub enum ScanOutcome {
    Accepted(ScanEvent),
    Rejected(RejectReason),
}

/// Duplicate-scan suppressor with a single global window.
///
/// The "last accepted" timestamp is owned by the instance, not process-wide
/// state, and uses the monotonic clock so wall-clock adjustments cannot
/// reopen or stretch the window.
#[derive(Debug)]
pub struct ScanDebouncer {
    interval: Duration,
    last_accepted: Option<Instant>,
}

impl ScanDebouncer {
    /// Create a debouncer with the given suppression window.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_accepted: None,
        }
    }

    /// Replace the suppression window (applied on configuration reload).
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// The current suppression window.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Validate one raw input line at time `now`.
    ///
    /// Rejections are silent towards the operator (debug-logged only); the
    /// loop simply proceeds to the next line. The window timestamp advances
    /// only on acceptance.
    pub fn accept(&mut self, raw_line: &str, now: Instant) -> ScanOutcome {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            return ScanOutcome::Rejected(RejectReason::Empty);
        }

        let badge = match BadgeId::new(trimmed) {
            Ok(badge) => badge,
            Err(e) => {
                debug!(input = %trimmed, error = %e, "scan_not_recognized");
                return ScanOutcome::Rejected(RejectReason::BadFormat);
            }
        };

        if let Some(last) = self.last_accepted
            && now.duration_since(last) < self.interval
        {
            debug!(badge = %badge, "scan_debounced");
            return ScanOutcome::Rejected(RejectReason::Debounced);
        }

        self.last_accepted = Some(now);
        ScanOutcome::Accepted(ScanEvent::now(badge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn debouncer() -> ScanDebouncer {
        ScanDebouncer::new(Duration::from_millis(1200))
    }

    #[rstest]
    #[case("", RejectReason::Empty)]
    #[case("   \t ", RejectReason::Empty)]
    #[case("abc", RejectReason::BadFormat)]
    #[case("1234567", RejectReason::BadFormat)] // 7 digits
    #[case("16018731a2", RejectReason::BadFormat)]
    fn test_rejects_invalid_input(#[case] input: &str, #[case] expected: RejectReason) {
        let mut debouncer = debouncer();
        match debouncer.accept(input, Instant::now()) {
            ScanOutcome::Rejected(reason) => assert_eq!(reason, expected),
            ScanOutcome::Accepted(event) => panic!("unexpected accept: {:?}", event),
        }
    }

    #[rstest]
    #[case("1601873172")]
    #[case("  1601873172  ")]
    #[case("00000000")]
    fn test_accepts_valid_scan(#[case] input: &str) {
        let mut debouncer = debouncer();
        match debouncer.accept(input, Instant::now()) {
            ScanOutcome::Accepted(event) => assert_eq!(event.badge.as_str(), input.trim()),
            ScanOutcome::Rejected(reason) => panic!("unexpected reject: {:?}", reason),
        }
    }

    #[test]
    fn test_debounce_suppresses_same_badge() {
        let mut debouncer = debouncer();
        let t0 = Instant::now();

        assert!(matches!(
            debouncer.accept("1601873172", t0),
            ScanOutcome::Accepted(_)
        ));
        assert!(matches!(
            debouncer.accept("1601873172", t0 + Duration::from_millis(300)),
            ScanOutcome::Rejected(RejectReason::Debounced)
        ));
    }

    #[test]
    fn test_debounce_is_global_across_badges() {
        let mut debouncer = debouncer();
        let t0 = Instant::now();

        assert!(matches!(
            debouncer.accept("1601873172", t0),
            ScanOutcome::Accepted(_)
        ));
        // Different badge, same window: still suppressed
        assert!(matches!(
            debouncer.accept("1601901111", t0 + Duration::from_millis(500)),
            ScanOutcome::Rejected(RejectReason::Debounced)
        ));
    }

    #[test]
    fn test_window_reopens_after_interval() {
        let mut debouncer = debouncer();
        let t0 = Instant::now();

        assert!(matches!(
            debouncer.accept("1601873172", t0),
            ScanOutcome::Accepted(_)
        ));
        assert!(matches!(
            debouncer.accept("1601901111", t0 + Duration::from_millis(1200)),
            ScanOutcome::Accepted(_)
        ));
    }

    #[test]
    fn test_rejection_does_not_advance_window() {
        let mut debouncer = debouncer();
        let t0 = Instant::now();

        assert!(matches!(
            debouncer.accept("1601873172", t0),
            ScanOutcome::Accepted(_)
        ));
        // Suppressed repeat at t0+1s must not push the window forward
        assert!(matches!(
            debouncer.accept("1601873172", t0 + Duration::from_millis(1000)),
            ScanOutcome::Rejected(RejectReason::Debounced)
        ));
        assert!(matches!(
            debouncer.accept("1601873172", t0 + Duration::from_millis(1300)),
            ScanOutcome::Accepted(_)
        ));
    }

    #[test]
    fn test_zero_interval_disables_debounce() {
        let mut debouncer = ScanDebouncer::new(Duration::ZERO);
        let t0 = Instant::now();

        assert!(matches!(
            debouncer.accept("1601873172", t0),
            ScanOutcome::Accepted(_)
        ));
        assert!(matches!(
            debouncer.accept("1601873172", t0),
            ScanOutcome::Accepted(_)
        ));
    }
}
