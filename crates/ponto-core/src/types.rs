use crate::{
    Result,
    constants::{DATE_FORMAT, MIN_BADGE_DIGITS},
    error::Error,
};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// Badge identifier as typed by the NFC reader (decimal digits, length >= 8)
///
/// # Security
/// This type implements constant-time comparison to prevent timing attacks
/// when comparing badge identifiers during roster lookups.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct BadgeId(String);

impl BadgeId {
    /// Create a new badge id with validation.
    ///
    /// The raw input is trimmed before validation, matching what a
    /// keyboard-emulating reader produces (digits followed by Enter).
    ///
    /// # Errors
    /// Returns `Error::InvalidBadgeFormat` if:
    /// - The trimmed input is empty
    /// - The trimmed input contains non-digit characters
    /// - The trimmed input has fewer than 8 digits
    pub fn new(raw: &str) -> Result<Self> {
        let uid = raw.trim();

        if uid.is_empty() {
            return Err(Error::InvalidBadgeFormat("empty input".to_string()));
        }

        if !uid.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidBadgeFormat(format!(
                "badge must be decimal digits, got '{uid}'"
            )));
        }

        if uid.len() < MIN_BADGE_DIGITS {
            return Err(Error::InvalidBadgeFormat(format!(
                "badge must have at least {MIN_BADGE_DIGITS} digits, got {}",
                uid.len()
            )));
        }

        Ok(BadgeId(uid.to_string()))
    }

    /// Get the badge id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BadgeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BadgeId::new(s)
    }
}

/// Constant-time comparison implementation for BadgeId
///
/// This prevents timing attacks by ensuring comparison takes the same time
/// regardless of where the strings differ.
impl PartialEq for BadgeId {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

/// Hash implementation for BadgeId
///
/// Implements standard hashing for use in hash-based collections.
impl std::hash::Hash for BadgeId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// A single accepted badge scan.
///
/// Created once per accepted input line and consumed within the same loop
/// iteration; never persisted.
#[derive(Debug, Clone)]
pub struct ScanEvent {
    /// Badge identifier read from the input stream.
    pub badge: BadgeId,

    /// Wall-clock timestamp of the accepted scan.
    pub received_at: DateTime<Local>,
}

impl ScanEvent {
    /// Create a scan event stamped with the current local time.
    #[must_use]
    pub fn now(badge: BadgeId) -> Self {
        Self {
            badge,
            received_at: Local::now(),
        }
    }
}

/// Operating mode for the intake loop.
///
/// Interactive mode may block on console input (inline registration);
/// unattended mode never prompts and forwards unknown badges as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    Interactive,
    Unattended,
}

impl OperatingMode {
    /// Returns `true` if the mode allows blocking on console input.
    #[inline]
    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(self, OperatingMode::Interactive)
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OperatingMode::Interactive => write!(f, "interactive"),
            OperatingMode::Unattended => write!(f, "unattended"),
        }
    }
}

/// Parse a calendar-override date in the configured `dd/mm/yyyy` format.
///
/// # Errors
/// Returns `Error::InvalidDate` if the string does not match the format or
/// does not denote a real calendar date.
pub fn parse_override_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| Error::InvalidDate {
        value: s.to_string(),
        expected: "dd/mm/yyyy".to_string(),
    })
}

/// Format a date in the configured `dd/mm/yyyy` override format.
#[must_use]
pub fn format_override_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
