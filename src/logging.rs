//! # Structured Logging Module
//!
//! Environment-aware structured logging. Console output goes to stderr so
//! dispatch results printed on stdout stay machine-readable; an optional file
//! layer writes to the configured log directory.

use crate::config::LoggingConfig;
use chrono::Utc;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize structured logging once per process.
///
/// `environment` is the one the configuration was loaded for; it picks the
/// default level and names the log file.
pub fn init_structured_logging(config: &LoggingConfig, environment: &str) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let log_level = resolve_log_level(config, environment);

        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_filter(build_filter(&log_level));

        let mut directory_error = None;
        let log_file = match config.directory.as_deref() {
            Some(dir) => prepare_log_file(dir, environment)
                .map_err(|e| directory_error = Some((dir.display().to_string(), e)))
                .ok(),
            None => None,
        };

        let file_layer = log_file.as_ref().map(|(dir, file_name)| {
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);

            let layer = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(false);
            let layer = if config.json {
                layer.json().boxed()
            } else {
                layer.boxed()
            };
            layer.with_filter(build_filter(&log_level))
        });

        if tracing_subscriber::registry()
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .is_err()
        {
            tracing::debug!("Global tracing subscriber already initialized, keeping it");
        }

        if let Some((dir, e)) = directory_error {
            tracing::warn!(directory = %dir, error = %e, "Cannot create log directory, logging to console only");
        }

        tracing::info!(
            pid = process::id(),
            environment = %environment,
            level = %log_level,
            log_file = ?log_file.as_ref().map(|(dir, name)| dir.join(name)),
            "Structured logging initialized"
        );
    });
}

/// Configured level, else the environment default
fn resolve_log_level(config: &LoggingConfig, environment: &str) -> String {
    config
        .level
        .clone()
        .unwrap_or_else(|| default_log_level(environment).to_string())
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Create the log directory and pick `<environment>.<pid>.<timestamp>.log`
fn prepare_log_file(dir: &Path, environment: &str) -> io::Result<(PathBuf, String)> {
    fs::create_dir_all(dir)?;
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let file_name = format!("{environment}.{}.{timestamp}.log", process::id());
    Ok((dir.to_path_buf(), file_name))
}

/// Default filter for an environment when none is configured
fn default_log_level(environment: &str) -> &'static str {
    match environment {
        "test" => "debug",
        "development" => "info",
        "production" => "warn",
        _ => "info",
    }
}

/// Log structured data for chain assembly
pub fn log_chain_operation(operation: &str, handler_count: usize, status: &str, details: Option<&str>) {
    tracing::debug!(
        operation = %operation,
        handler_count = handler_count,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "CHAIN_OPERATION"
    );
}

/// Log structured data for registry changes
pub fn log_registry_operation(operation: &str, name: &str, status: &str, details: Option<&str>) {
    tracing::debug!(
        operation = %operation,
        name = %name,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "REGISTRY_OPERATION"
    );
}

/// Log structured data for a completed dispatch run
pub fn log_dispatch_operation(operation: &str, items: usize, accepted: usize, not_accepted: usize) {
    tracing::debug!(
        operation = %operation,
        items = items,
        accepted = accepted,
        not_accepted = not_accepted,
        timestamp = %Utc::now().to_rfc3339(),
        "DISPATCH_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "ERROR"
    );
}
