//! Configuration discovery, loading and persistence.
//!
//! The store probes an ordered list of candidate paths and keeps the first
//! file that exists and parses. A missing or malformed file is never fatal:
//! the store falls back to built-in defaults with a warning and the program
//! continues. Registration and override management write the whole document
//! back through [`ConfigStore::save`].

use crate::error::{ConfigError, ConfigResult};
use crate::model::Config;
use ponto_core::constants::{CONFIG_FILE_NAME, DEFAULT_LOG_FILE};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// The configuration store: a loaded [`Config`] plus the path it came from.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    /// Path of the backing file, if one was discovered or assigned.
    path: Option<PathBuf>,
    config: Config,
}

impl ConfigStore {
    /// Candidate configuration paths, in probe order:
    /// working directory, executable directory, per-user config directory.
    #[must_use]
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];

        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            paths.push(dir.join(CONFIG_FILE_NAME));
        }

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("ponto").join(CONFIG_FILE_NAME));
        }

        paths
    }

    /// Probe the candidate paths and load the first parseable file.
    ///
    /// Malformed or unreadable files produce a warning and the probe
    /// continues; if nothing loads, built-in defaults are used.
    #[must_use]
    pub fn discover() -> Self {
        for path in Self::candidate_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_file(&path) {
                Ok(config) => {
                    info!(path = %path.display(), "config_loaded");
                    return Self {
                        path: Some(path),
                        config,
                    };
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "config_load_failed");
                }
            }
        }

        Self {
            path: None,
            config: Config::default(),
        }
    }

    /// Open a specific configuration file, falling back to defaults with a
    /// warning when it is missing or malformed. The path is remembered for
    /// subsequent saves either way.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let config = match Self::load_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config_load_failed");
                Config::default()
            }
        };
        Self {
            path: Some(path),
            config,
        }
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load_file(path: &Path) -> ConfigResult<Config> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access for registration and override management.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Path of the backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Reload the configuration wholesale.
    ///
    /// Re-reads the backing file (or re-runs discovery when none was found
    /// yet) so roster and calendar edits made externally are picked up. A
    /// file that has become unreadable degrades to defaults with a warning.
    pub fn reload(&mut self) {
        *self = match self.path.take() {
            Some(path) => Self::open(path),
            None => Self::discover(),
        };
    }

    /// Persist the current configuration as pretty-printed JSON.
    ///
    /// When no file was discovered, writes to the default file name in the
    /// working directory and remembers it. Parent directories are created
    /// on demand.
    ///
    /// # Errors
    /// Returns an error if serialization or the filesystem write fails.
    pub fn save(&mut self) -> ConfigResult<PathBuf> {
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.config)?;
        fs::write(&path, json)?;
        self.path = Some(path.clone());
        Ok(path)
    }

    /// Write a default configuration file for the operator to edit.
    ///
    /// The written file carries a default `log_file` path; the in-memory
    /// defaults used when no file exists leave file logging off.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn write_default(path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        let mut config = Config::default();
        config.log_file = Some(PathBuf::from(DEFAULT_LOG_FILE));

        let json = serde_json::to_string_pretty(&config)?;
        fs::write(&path, json).map_err(ConfigError::Io)?;
        Ok(path)
    }
}
