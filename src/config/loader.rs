//! Configuration Loader
//!
//! Environment-aware loading built on the `config` crate. Sources are layered
//! with later ones winning:
//!
//! 1. `<dir>/chain.yaml`
//! 2. `<dir>/environments/<environment>.yaml`
//! 3. `CHAIN_DISPATCH_*` environment variables (`__` separates nested keys,
//!    `CHAIN_DISPATCH_ITEMS` is a comma-separated list)
//!
//! Missing files are skipped; anything that is present must parse and the
//! merged result must pass [`ChainConfig::validate`].

use super::error::{ConfigResult, ConfigurationError};
use super::ChainConfig;
use crate::constants::{env as env_vars, files, DEFAULT_ENVIRONMENT};
use ::config::{Config, Environment, File, Map};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

pub struct ConfigManager {
    config: ChainConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load with an explicit environment, reading overrides from the process
    /// environment
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        Self::load_with_overrides(config_dir, environment, None)
    }

    /// Load with an explicit environment and an explicit set of
    /// `CHAIN_DISPATCH_*` variables in place of the process environment.
    /// `None` reads the process environment. The environment name is
    /// normalized before the overlay file is looked up.
    pub fn load_with_overrides(
        config_dir: Option<PathBuf>,
        environment: &str,
        overrides: Option<Map<String, String>>,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::normalize_environment(environment);
        let environment = environment.as_str();
        let config_directory = config_dir.unwrap_or_else(Self::default_config_directory);

        debug!(
            environment = environment,
            directory = %config_directory.display(),
            "Loading chain configuration"
        );

        let base_file = config_directory.join(files::BASE_CONFIG_FILE);
        let environment_file = config_directory
            .join(files::ENVIRONMENTS_DIR)
            .join(format!("{environment}.yaml"));

        Self::check_config_file(&base_file)?;
        Self::check_config_file(&environment_file)?;

        let env_source = Environment::with_prefix(env_vars::CONFIG_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("items")
            .source(overrides);

        let settings = Config::builder()
            .add_source(File::from(base_file).required(false))
            .add_source(File::from(environment_file).required(false))
            .add_source(env_source)
            .build()
            .map_err(|e| ConfigurationError::load(config_directory.display().to_string(), e))?;

        let config: ChainConfig = settings
            .try_deserialize()
            .map_err(|e| ConfigurationError::load(config_directory.display().to_string(), e))?;

        config.validate()?;

        debug!(
            environment = environment,
            handlers = config.handlers.len(),
            items = config.items.len(),
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Resolved configuration as JSON, for diagnostics
    pub fn debug_config(&self) -> serde_json::Value {
        serde_json::json!({
            "environment": self.environment,
            "config_directory": self.config_directory.display().to_string(),
            "config": self.config,
        })
    }

    /// `CHAIN_ENV`, then `APP_ENV`, else `development`; always normalized
    pub fn detect_environment() -> String {
        let raw = env::var(env_vars::CHAIN_ENV)
            .or_else(|_| env::var(env_vars::APP_ENV))
            .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());
        Self::normalize_environment(&raw)
    }

    /// Trimmed and lower-cased; blank falls back to `development`
    pub fn normalize_environment(raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            DEFAULT_ENVIRONMENT.to_string()
        } else {
            trimmed.to_lowercase()
        }
    }

    fn default_config_directory() -> PathBuf {
        env::var(env_vars::CHAIN_CONFIG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(files::DEFAULT_CONFIG_DIR))
    }

    /// Reject oversized or non-regular files before handing them to the parser
    fn check_config_file(path: &Path) -> ConfigResult<()> {
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(ConfigurationError::file(path.display().to_string(), e.to_string())),
        };

        if !metadata.is_file() {
            return Err(ConfigurationError::file(
                path.display().to_string(),
                "configuration path must point to a regular file",
            ));
        }

        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigurationError::file(
                path.display().to_string(),
                format!(
                    "configuration file too large ({} bytes > {MAX_CONFIG_FILE_SIZE} bytes)",
                    metadata.len()
                ),
            ));
        }

        Ok(())
    }
}
