//! Unified error handling for ipmi-node-exporter
//!
//! This crate provides the single error type shared by the sensor crate and the
//! exporter binary. It uses thiserror for the Display and Error trait impls.

use std::io;
use std::num::ParseFloatError;
use std::time::Duration;

/// Result type alias using ExporterError
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Unified error type for all exporter operations
#[derive(thiserror::Error, Debug)]
pub enum ExporterError {
    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: String,
        source: io::Error,
    },

    // ============================================================================
    // External Command Errors
    // ============================================================================
    #[error("Failed to execute `{command}`: {source}")]
    CommandSpawn {
        command: String,
        source: io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("`{command}` did not finish within {}s", timeout.as_secs())]
    Timeout {
        command: String,
        timeout: Duration,
    },

    // ============================================================================
    // Parse Errors
    // ============================================================================
    #[error("Failed to parse value {value:?} for sensor {sensor}: {source}")]
    ValueParse {
        sensor: String,
        value: String,
        source: ParseFloatError,
    },

    // ============================================================================
    // Metrics Errors
    // ============================================================================
    #[error("Metrics registry error: {0}")]
    Metrics(String),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig {
        field: String,
        reason: String,
    },
}

impl ExporterError {
    /// Create a value parse error for a sensor
    pub fn value_parse(
        sensor: impl Into<String>,
        value: impl Into<String>,
        source: ParseFloatError,
    ) -> Self {
        Self::ValueParse {
            sensor: sensor.into(),
            value: value.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a metrics registry error from anything displayable
    pub fn metrics(err: impl std::fmt::Display) -> Self {
        Self::Metrics(err.to_string())
    }
}
