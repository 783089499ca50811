//! # Chain Configuration
//!
//! Describes which handlers make up the ring, which items to dispatch when the
//! caller names none, and how logging is set up. Configuration is layered by
//! [`ConfigManager`]: a base `chain.yaml`, an optional per-environment file and
//! `CHAIN_DISPATCH_*` environment variables.
//!
//! Handler order in configuration is ring order.
//!
//! ## Example
//!
//! ```yaml
//! handlers:
//!   - name: Dog            # built-in catalog entry, accepted-set implied
//!   - name: Parrot         # custom handler
//!     accepts: [Seeds, Crackers]
//! items: [Meat, Seeds, Chocolates]
//! logging:
//!   level: debug
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use chain_dispatch::config::ChainConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ChainConfig::from_yaml_str(
//!     "handlers:\n  - name: Dog\n  - name: Parrot\n    accepts: [Seeds]\n",
//! )?;
//! config.validate()?;
//!
//! let kinds = config.handler_kinds()?;
//! assert_eq!(kinds[0].accepts, vec!["Ball", "Meat"]);
//! assert_eq!(kinds[1].accepts, vec!["Seeds"]);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use crate::catalog::AnimalKind;
use crate::chain::{ChainAssembler, Ring};
use crate::constants::DEFAULT_ITEMS;
use crate::handler::HandlerKind;
use crate::validation::validate_handler_kinds;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// One ring member as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HandlerSpec {
    pub name: String,

    /// Omitted for built-in catalog entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepts: Option<Vec<String>>,
}

impl HandlerSpec {
    pub fn catalog(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accepts: None,
        }
    }

    pub fn custom<I, S>(name: impl Into<String>, accepts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            accepts: Some(accepts.into_iter().map(Into::into).collect()),
        }
    }

    /// Turn this entry into a descriptor, consulting the catalog when no
    /// accepted-set is given
    pub fn resolve(&self) -> crate::Result<HandlerKind> {
        match &self.accepts {
            Some(accepts) => Ok(HandlerKind::new(self.name.clone(), accepts.iter().cloned())),
            None => {
                let kind = AnimalKind::from_label(&self.name)?;
                Ok(kind.descriptor())
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive such as `info` or `chain_dispatch=debug`
    pub level: Option<String>,

    /// Directory for log files; console only when unset
    pub directory: Option<PathBuf>,

    /// Write log files as JSON lines
    pub json: bool,
}

/// Root configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    pub handlers: Vec<HandlerSpec>,
    pub items: Vec<String>,
    pub logging: LoggingConfig,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            handlers: AnimalKind::ALL
                .iter()
                .map(|kind| HandlerSpec::catalog(kind.label()))
                .collect(),
            items: DEFAULT_ITEMS.iter().map(|item| item.to_string()).collect(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ChainConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Resolved descriptors in ring order
    pub fn handler_kinds(&self) -> crate::Result<Vec<HandlerKind>> {
        self.handlers.iter().map(HandlerSpec::resolve).collect()
    }

    /// Validate, then build the ring in configured order
    pub fn assemble(&self) -> crate::Result<Ring> {
        self.validate()?;
        ChainAssembler::build(&self.handler_kinds()?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.handlers.is_empty() {
            return Err(ConfigurationError::missing_required("handlers"));
        }

        let kinds = self.handler_kinds().map_err(|e| {
            ConfigurationError::invalid_value("handlers", self.handler_names(), e.to_string())
        })?;
        validate_handler_kinds(&kinds).map_err(|e| {
            ConfigurationError::invalid_value("handlers", self.handler_names(), e.to_string())
        })?;

        if let Some(level) = &self.logging.level {
            EnvFilter::try_new(level).map_err(|e| {
                ConfigurationError::invalid_value("logging.level", level.clone(), e.to_string())
            })?;
        }

        Ok(())
    }

    fn handler_names(&self) -> String {
        self.handlers
            .iter()
            .map(|h| h.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
