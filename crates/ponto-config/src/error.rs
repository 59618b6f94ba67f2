use thiserror::Error;

/// Configuration-store error types.
///
/// These errors represent failures while reading, parsing or persisting the
/// JSON configuration document. A load failure is never fatal to the intake
/// loop; callers fall back to built-in defaults with a warning.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the configuration file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A domain value inside the document is invalid (e.g. an override date)
    #[error(transparent)]
    Domain(#[from] ponto_core::Error),
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
