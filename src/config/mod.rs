pub mod prompt;
pub mod settings;

pub use settings::{ ModelSettings, SearchSettings, SessionSettings, Settings, TlsSettings };

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {reason}")]
    Invalid {
        name: &'static str,
        reason: String,
    },
}

/// Returns the value of a required setting, treating blank values as absent.
pub fn required(value: &Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ConfigError::Missing(name)),
    }
}

/// Returns the setting or `default` when it is absent or blank. Never fails.
pub fn with_default(value: &Option<String>, default: &str) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

pub(crate) fn positive(value: u64, name: &'static str) -> Result<u64, ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            name,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}
