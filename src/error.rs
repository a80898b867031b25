//! Unified error type hierarchy for the node command composer
//!
//! Provides structured error handling with NodeCommandError, ConfigError and
//! ReleaseError.

use std::io;
use thiserror::Error;

/// Node command composition errors.
///
/// Every variant is terminal for the composition attempt that raised it: no
/// partial argument list is ever returned alongside one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeCommandError {
    /// Parameter bundle variant does not match the requested action
    #[error("Parameter type mismatch: expected {expected} parameters, got {actual} parameters")]
    TypeMismatch { expected: String, actual: String },

    /// Required process-wide setting is absent
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// Bundle (or a record it points at) lacks a required identifier
    #[error("Missing reference: {0}")]
    MissingReference(String),

    /// Referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Software version has no resolvable package
    #[error("Unable to fetch yugabyte release for version: {0}")]
    ReleaseNotFound(String),

    /// Required sub-kind/role property missing or unrecognized
    #[error("Invalid {name} property: {}", .value.as_deref().unwrap_or("<none>"))]
    InvalidProperty { name: String, value: Option<String> },

    /// Required collection is absent or empty
    #[error("Empty input: {0}")]
    EmptyInput(String),
}

impl NodeCommandError {
    /// Get an operator-facing message suitable for task failure output
    pub fn user_message(&self) -> String {
        match self {
            NodeCommandError::TypeMismatch { expected, actual } => format!(
                "Node task was given {} parameters but the {} command needs its own",
                actual, expected
            ),
            NodeCommandError::MissingConfiguration(msg) => {
                format!("Platform configuration incomplete: {}", msg)
            }
            NodeCommandError::MissingReference(msg) => format!("Task parameters incomplete: {}", msg),
            NodeCommandError::NotFound(msg) => format!("Record lookup failed: {}", msg),
            NodeCommandError::ReleaseNotFound(version) => {
                format!("No release package registered for version {}", version)
            }
            NodeCommandError::InvalidProperty { name, value } => match value {
                Some(v) => format!("Unrecognized value '{}' for task property '{}'", v, name),
                None => format!("Task property '{}' is required", name),
            },
            NodeCommandError::EmptyInput(msg) => format!("Nothing to apply: {}", msg),
        }
    }
}

/// Configuration and inventory file parsing errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid JSON in config: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid TOML in config: {0}")]
    InvalidToml(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("IO error during config operations: {0}")]
    IoError(#[from] io::Error),
}

/// Release directory scanning errors.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Releases directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("IO error while scanning releases: {0}")]
    Io(#[from] io::Error),
}

/// Top-level result type for the binary and other catch-all callers.
/// Library operations return their specific error enum instead.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
