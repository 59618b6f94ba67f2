//! Configuration document model.
//!
//! The on-disk format is the legacy JSON document shared with earlier
//! deployments of this system. Key names (`endpoint`, `debounce_seconds`,
//! `nomes`, `alunos`, `dias_teoria`, `dias_especiais_teoria`, `log_file`)
//! are fixed; unknown keys are ignored so newer files still load on older
//! binaries.
//!
//! Two roster representations coexist:
//!
//! - `nomes` — the legacy flat map of badge id to display name
//! - `alunos` — the structured roster with email and registration timestamp
//!
//! Lookups treat the two as a single namespace with `alunos` taking
//! precedence; registration writes both so old tooling keeps working.

use chrono::{DateTime, Local};
use ponto_core::constants::{
    DEFAULT_DEBOUNCE_SECONDS, DEFAULT_ENDPOINT, DEFAULT_THEORY_WEEKDAYS,
};
use ponto_core::{Result, format_override_date, parse_override_date};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// A structured roster entry, keyed by badge id in [`Config::alunos`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Full display name.
    pub nome: String,

    /// Optional contact email. Never populated by inline registration;
    /// filled in by operators editing the file directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// When the badge was registered, if it went through inline registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrado_em: Option<DateTime<Local>>,
}

impl RosterEntry {
    /// Create an entry stamped with the current local time.
    #[must_use]
    pub fn registered_now(nome: impl Into<String>) -> Self {
        Self {
            nome: nome.into(),
            email: None,
            registrado_em: Some(Local::now()),
        }
    }
}

/// The full configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Collection endpoint URL for the attendance POST.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Debounce window between accepted scans, in seconds.
    #[serde(default = "default_debounce_seconds")]
    pub debounce_seconds: f64,

    /// Legacy flat roster: badge id -> display name.
    #[serde(default)]
    pub nomes: BTreeMap<String, String>,

    /// Structured roster: badge id -> entry.
    #[serde(default)]
    pub alunos: BTreeMap<String, RosterEntry>,

    /// Weekly theory days as weekday ordinals (0 = Monday .. 6 = Sunday).
    #[serde(default = "default_theory_weekdays")]
    pub dias_teoria: Vec<u32>,

    /// Calendar override dates (`dd/mm/yyyy`), kept chronologically sorted.
    #[serde(default)]
    pub dias_especiais_teoria: Vec<String>,

    /// Optional log file; parent directories are created on demand.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_debounce_seconds() -> f64 {
    DEFAULT_DEBOUNCE_SECONDS
}

fn default_theory_weekdays() -> Vec<u32> {
    DEFAULT_THEORY_WEEKDAYS.to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            debounce_seconds: default_debounce_seconds(),
            nomes: BTreeMap::new(),
            alunos: BTreeMap::new(),
            dias_teoria: default_theory_weekdays(),
            dias_especiais_teoria: Vec::new(),
            log_file: None,
        }
    }
}

impl Config {
    /// Debounce window as a `Duration`.
    ///
    /// Non-finite or negative values in the document collapse to zero
    /// (debounce disabled) rather than failing the load.
    #[must_use]
    pub fn debounce_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.debounce_seconds).unwrap_or(Duration::ZERO)
    }

    /// Look up the display name for a badge.
    ///
    /// The structured roster takes precedence over the legacy flat map.
    #[must_use]
    pub fn display_name(&self, badge: &str) -> Option<&str> {
        self.alunos
            .get(badge)
            .map(|entry| entry.nome.as_str())
            .or_else(|| self.nomes.get(badge).map(String::as_str))
    }

    /// Register a badge under the given name.
    ///
    /// Writes both the structured and the legacy mapping so that older
    /// tooling reading only `nomes` still sees the entry. Overwrites any
    /// previous entry for the badge.
    pub fn register(&mut self, badge: &str, nome: &str) -> RosterEntry {
        let entry = RosterEntry::registered_now(nome);
        self.alunos.insert(badge.to_string(), entry.clone());
        self.nomes.insert(badge.to_string(), nome.to_string());
        entry
    }

    /// The merged roster view: every known badge exactly once, structured
    /// entries taking precedence over legacy ones.
    #[must_use]
    pub fn merged_roster(&self) -> BTreeMap<String, RosterEntry> {
        let mut merged: BTreeMap<String, RosterEntry> = self
            .nomes
            .iter()
            .map(|(badge, nome)| {
                (
                    badge.clone(),
                    RosterEntry {
                        nome: nome.clone(),
                        email: None,
                        registrado_em: None,
                    },
                )
            })
            .collect();
        for (badge, entry) in &self.alunos {
            merged.insert(badge.clone(), entry.clone());
        }
        merged
    }

    /// Add a calendar theory-day override.
    ///
    /// Returns `true` if the date was inserted, `false` if it was already
    /// present (the list is left unchanged either way in that case). The
    /// list is kept sorted by actual calendar date.
    ///
    /// # Errors
    /// Returns an error if `date` is not a valid `dd/mm/yyyy` date.
    pub fn add_special_day(&mut self, date: &str) -> Result<bool> {
        let parsed = parse_override_date(date)?;
        let canonical = format_override_date(parsed);

        if self.dias_especiais_teoria.contains(&canonical) {
            return Ok(false);
        }

        self.dias_especiais_teoria.push(canonical);
        self.dias_especiais_teoria.sort_by_key(|d| {
            // Entries hand-edited into an unparseable shape sort last
            parse_override_date(d).unwrap_or(chrono::NaiveDate::MAX)
        });
        Ok(true)
    }

    /// Remove a calendar theory-day override.
    ///
    /// Returns `true` if the date was present and removed.
    pub fn remove_special_day(&mut self, date: &str) -> bool {
        let before = self.dias_especiais_teoria.len();
        self.dias_especiais_teoria.retain(|d| d != date);
        self.dias_especiais_teoria.len() != before
    }
}
