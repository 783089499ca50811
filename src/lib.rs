#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Chain Dispatch
//!
//! Ring-shaped chain-of-responsibility dispatch.
//!
//! ## Overview
//!
//! A fixed set of handlers is linked into a closed ring. Each request item
//! enters the ring at a single entry handler and moves from handler to
//! successor until one handler accepts it or every handler has declined once.
//! Each item is dispatched in its own epoch with a fresh visitation state, so
//! items never interfere with each other.
//!
//! ## Module Organization
//!
//! - [`handler`] - Handler contract, descriptors and per-epoch visitation state
//! - [`catalog`] - Built-in handler kinds
//! - [`registry`] - Ordered handler registration
//! - [`chain`] - Ring assembly and successor links
//! - [`dispatcher`] - Bounded epoch loop and dispatch results
//! - [`shared`] - Process-wide default ring
//! - [`config`] - Layered configuration
//! - [`logging`] - Structured logging setup
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use chain_dispatch::shared::default_dispatcher;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dispatcher = default_dispatcher()?;
//! for result in dispatcher.dispatch(["Meat", "Banana", "Chocolates"]) {
//!     println!("{result}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod chain;
pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod logging;
pub mod registry;
pub mod shared;
pub mod validation;

pub use catalog::AnimalKind;
pub use chain::{ChainAssembler, Ring, RingNode};
pub use crate::config::{ChainConfig, ConfigManager};
pub use dispatcher::{DispatchResult, DispatchSummary, DispatchTrace, Dispatcher};
pub use error::{ChainError, Result};
pub use handler::{AttemptOutcome, Handler, HandlerKind, StaticHandler, VisitationState};
pub use registry::HandlerRegistry;
