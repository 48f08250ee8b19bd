//! Core error types for focusflow-core.
//!
//! Planning has exactly one domain failure, [`PlanError::InsufficientTime`].
//! Everything else is input validation or configuration I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Schedule planning errors
    #[error("Planning error: {0}")]
    Plan(#[from] PlanError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML rendering errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Errors raised by the schedule planner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// The requested breaks leave no room for work before the end time.
    #[error(
        "No space for work segments: {available_min} min available, {break_min} min of breaks requested"
    )]
    InsufficientTime { available_min: u64, break_min: u64 },
}

impl PlanError {
    /// Marker the presentation layer uses to show its "not enough time" message.
    pub fn is_insufficient_time(&self) -> bool {
        matches!(self, PlanError::InsufficientTime { .. })
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not determine or create the configuration directory
    #[error("Configuration directory unavailable: {0}")]
    DirUnavailable(String),

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// End time is not a valid `HH:MM` clock time
    #[error("Invalid end time '{0}': expected HH:MM (00:00-23:59)")]
    InvalidEndTime(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_time_is_distinguishable() {
        let err = PlanError::InsufficientTime {
            available_min: 60,
            break_min: 75,
        };
        assert!(err.is_insufficient_time());

        let core: CoreError = err.into();
        assert!(matches!(core, CoreError::Plan(e) if e.is_insufficient_time()));
    }

    #[test]
    fn foreign_errors_convert() {
        let io: CoreError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed").into();
        assert!(matches!(io, CoreError::Io(_)));

        fn decode(raw: &str) -> Result<serde_json::Value> {
            Ok(serde_json::from_str(raw)?)
        }
        assert!(matches!(decode("{"), Err(CoreError::Json(_))));

        let core: CoreError = ConfigError::UnknownKey("session.colour".into()).into();
        assert_eq!(
            core.to_string(),
            "Configuration error: unknown config key: session.colour"
        );
    }

    #[test]
    fn messages_carry_context() {
        let err = PlanError::InsufficientTime {
            available_min: 60,
            break_min: 75,
        };
        let msg = err.to_string();
        assert!(msg.contains("60 min available"));
        assert!(msg.contains("75 min"));

        let err = ValidationError::InvalidEndTime("25:00".into());
        assert!(err.to_string().contains("25:00"));
    }
}
