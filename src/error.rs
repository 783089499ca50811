use crate::config::ConfigurationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Duplicate handler name: {name}")]
    DuplicateHandler { name: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown handler kind: {label}")]
    UnknownHandlerKind { label: String },

    #[error(transparent)]
    Config(#[from] ConfigurationError),
}

impl ChainError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn duplicate_handler(name: impl Into<String>) -> Self {
        Self::DuplicateHandler { name: name.into() }
    }

    pub fn unknown_handler_kind(label: impl Into<String>) -> Self {
        Self::UnknownHandlerKind {
            label: label.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChainError>;
