//! Core constants for the badge-scan attendance pipeline.
//!
//! This module centralizes the domain constants shared by the intake loop,
//! the configuration store and the delivery client. Several of these values
//! are fixed by the legacy configuration document and the collection
//! endpoint's payload contract; changing them breaks compatibility with
//! deployments already in the field.

// ============================================================================
// Badge Format Constraints
// ============================================================================

/// Minimum badge id length (decimal digits).
///
/// Keyboard-emulating NFC readers type the card UID as a decimal number of
/// at least 8 digits. Shorter all-digit lines are treated as stray keyboard
/// input, not scans.
///
/// # Value: 8 digits
pub const MIN_BADGE_DIGITS: usize = 8;

// ============================================================================
// Intake Timing
// ============================================================================

/// Default debounce interval between accepted scans (seconds).
///
/// A card held against the reader repeats its UID several times per second;
/// anything arriving within this window of the previously accepted scan is
/// suppressed. The window is global across badges (single-reader kiosk).
///
/// # Value: 1.2 seconds
pub const DEFAULT_DEBOUNCE_SECONDS: f64 = 1.2;

// ============================================================================
// Theory-Day Calendar
// ============================================================================

/// Default weekly theory days as weekday ordinals (0 = Monday .. 6 = Sunday).
///
/// # Value: Tuesday and Thursday
pub const DEFAULT_THEORY_WEEKDAYS: [u32; 2] = [1, 3];

/// Date format used for calendar overrides and operator-facing dates.
///
/// # Value: `dd/mm/yyyy`
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Weekday names for operator-facing listings, indexed by ordinal
/// (0 = Monday).
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado", "Domingo",
];

// ============================================================================
// Delivery
// ============================================================================

/// Bounded timeout for the outbound HTTP POST (seconds).
///
/// Covers the whole request including DNS, connect, TLS and body read. A
/// delivery that exceeds this is reported as a transport failure and the
/// event is dropped; there is no retry.
///
/// # Value: 10 seconds
pub const DELIVERY_TIMEOUT_SECS: u64 = 10;

/// Default collection endpoint used when no configuration file is found.
pub const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbwNNwndI5_oh7klQI9zgeW5eiKhdkhHPlVbOeOuxFPF6XrEsFDtQrwqqD0J2q1CdLXy/exec";

// ============================================================================
// Roster
// ============================================================================

/// Display name forwarded for badges with no roster entry.
pub const UNKNOWN_DISPLAY_NAME: &str = "Unknown";

// ============================================================================
// Configuration Document
// ============================================================================

/// File name of the JSON configuration document.
///
/// Probed in the working directory, next to the executable, and under the
/// per-user configuration directory, in that order.
pub const CONFIG_FILE_NAME: &str = "config_ponto.json";

/// Default log file path seeded into a freshly generated configuration file.
///
/// Only written by the config-generation command; the built-in defaults used
/// when no file exists leave file logging off.
pub const DEFAULT_LOG_FILE: &str = "logs/ponto.log";
