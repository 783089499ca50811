//! # Chain Dispatch CLI
//!
//! Assembles the configured handler ring and dispatches request items through
//! it. Results go to stdout, logs go to stderr.

use anyhow::{Context, Result};
use chain_dispatch::catalog::AnimalKind;
use chain_dispatch::config::ConfigManager;
use chain_dispatch::constants::RING_DELIMITER;
use chain_dispatch::logging::{init_structured_logging, log_error};
use chain_dispatch::{DispatchSummary, Dispatcher};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "chain-dispatch")]
#[command(about = "Dispatch items through a ring of handlers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration directory (default: ./config)
    #[arg(short, long, global = true, env = "CHAIN_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Environment overlay to apply (development, test, production, ...)
    #[arg(short, long, global = true)]
    environment: Option<String>,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Dispatch items through the ring (default)
    Dispatch {
        /// Items to dispatch; the configured items are used when none are given
        items: Vec<String>,

        /// Include the handlers each item visited
        #[arg(long)]
        trace: bool,
    },

    /// Show the assembled ring
    Chain,

    /// List the built-in handler kinds
    Catalog,

    /// Print the resolved configuration as YAML
    Config,
}

fn main() {
    let cli = Cli::parse();

    let manager = match load_config(&cli) {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        }
    };

    let mut logging = manager.config().logging.clone();
    if let Some(level) = verbosity_level(cli.verbose) {
        logging.level = Some(level.to_string());
    }
    init_structured_logging(&logging, manager.environment());

    info!(
        environment = manager.environment(),
        directory = %manager.config_directory().display(),
        "Configuration ready"
    );

    let result = match &cli.command {
        Some(Commands::Dispatch { items, trace }) => run_dispatch(&cli, &manager, items, *trace),
        Some(Commands::Chain) => show_chain(&cli, &manager),
        Some(Commands::Catalog) => show_catalog(&cli),
        Some(Commands::Config) => show_config(&manager),
        None => run_dispatch(&cli, &manager, &[], false),
    };

    if let Err(e) = result {
        log_error("cli", "run", &format!("{e:#}"), None);
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Arc<ConfigManager>> {
    let manager = match &cli.environment {
        Some(environment) => {
            ConfigManager::load_from_directory_with_env(cli.config_dir.clone(), environment)
        }
        None => ConfigManager::load_from_directory(cli.config_dir.clone()),
    };
    manager.context("failed to load chain configuration")
}

fn verbosity_level(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn build_dispatcher(manager: &ConfigManager) -> Result<Dispatcher> {
    let ring = manager
        .config()
        .assemble()
        .context("failed to assemble handler ring")?;
    Ok(Dispatcher::new(Arc::new(ring)))
}

fn run_dispatch(cli: &Cli, manager: &ConfigManager, items: &[String], trace: bool) -> Result<()> {
    let dispatcher = build_dispatcher(manager)?;
    let items = if items.is_empty() {
        manager.config().items.as_slice()
    } else {
        items
    };

    let traces = dispatcher.dispatch_traced(items);
    let summary = DispatchSummary::from_results(traces.iter().map(|t| &t.result));

    match cli.format {
        OutputFormat::Text => {
            for entry in &traces {
                if trace {
                    println!("{} [{}]", entry.result, entry.visited.join(" -> "));
                } else {
                    println!("{}", entry.result);
                }
            }
        }
        OutputFormat::Json => {
            let output = if trace {
                serde_json::json!({ "results": traces, "summary": summary })
            } else {
                let results: Vec<_> = traces.iter().map(|t| &t.result).collect();
                serde_json::json!({ "results": results, "summary": summary })
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn show_chain(cli: &Cli, manager: &ConfigManager) -> Result<()> {
    let dispatcher = build_dispatcher(manager)?;
    let ring = dispatcher.ring();

    match cli.format {
        OutputFormat::Text => {
            println!("{}", ring.describe(RING_DELIMITER));
            for (index, name) in ring.order().iter().enumerate() {
                let successor = ring
                    .successor_index(index)
                    .and_then(|next| ring.order().get(next))
                    .map_or("-", String::as_str);
                println!("  {index}: {name} -> {successor}");
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "ring": ring.describe(RING_DELIMITER),
                "order": ring.order(),
                "entry": ring.entry().name(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn show_catalog(cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            for kind in AnimalKind::ALL {
                println!("{kind}: {}", kind.accepted_items().join(", "));
            }
        }
        OutputFormat::Json => {
            let kinds: Vec<_> = AnimalKind::ALL.iter().map(AnimalKind::descriptor).collect();
            println!("{}", serde_json::to_string_pretty(&kinds)?);
        }
    }

    Ok(())
}

fn show_config(manager: &ConfigManager) -> Result<()> {
    print!("{}", manager.config().to_yaml()?);
    Ok(())
}
