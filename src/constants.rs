//! # System Constants
//!
//! Names, defaults and fixed strings shared by the chain engine, the
//! configuration loader and the command line tool.

/// Environment variables consulted at startup
pub mod env {
    /// Primary environment selector (`development`, `test`, `production`, ...)
    pub const CHAIN_ENV: &str = "CHAIN_ENV";
    /// Fallback environment selector shared with other services
    pub const APP_ENV: &str = "APP_ENV";
    /// Overrides the configuration directory
    pub const CHAIN_CONFIG_DIR: &str = "CHAIN_CONFIG_DIR";
    /// Prefix for configuration overrides, e.g. `CHAIN_DISPATCH_ITEMS=Meat,Ball`
    pub const CONFIG_PREFIX: &str = "CHAIN_DISPATCH";
}

/// Configuration file layout
pub mod files {
    pub const DEFAULT_CONFIG_DIR: &str = "config";
    pub const BASE_CONFIG_FILE: &str = "chain.yaml";
    pub const ENVIRONMENTS_DIR: &str = "environments";
}

pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Separator used when rendering a ring, `Dog > Cat > Dog`
pub const RING_DELIMITER: &str = ">";

/// Longest handler name accepted by validation
pub const MAX_HANDLER_NAME_LENGTH: usize = 64;

/// Items offered when neither the caller nor configuration supplies any
pub const DEFAULT_ITEMS: &[&str] = &["Meat", "Ball", "Rings", "Banana", "Milk", "Chocolates"];
