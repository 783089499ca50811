//! Configuration error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Failed to load configuration from {directory}: {source}")]
    Load {
        directory: String,
        source: ::config::ConfigError,
    },

    #[error("Configuration file error: {path}: {reason}")]
    File { path: String, reason: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingRequired { field: String },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigurationError {
    pub fn load(directory: impl Into<String>, source: ::config::ConfigError) -> Self {
        Self::Load {
            directory: directory.into(),
            source,
        }
    }

    pub fn file(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::File {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_required(field: impl Into<String>) -> Self {
        Self::MissingRequired {
            field: field.into(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigurationError>;
