//! # Dispatcher
//!
//! Drives request items through a [`Ring`] one epoch per item. An epoch starts
//! at the ring's entry with a fresh [`VisitationState`] holding every handler
//! name and walks successor links until a handler accepts the item or the walk
//! has tried each handler once.
//!
//! The walk is an explicit loop capped at `order.len()` steps. It also stops
//! before entering a handler whose name has already left the visitation state,
//! so a ring can never be circled twice within one epoch.
//!
//! ## Usage
//!
//! ```rust
//! use chain_dispatch::catalog::builtin_kinds;
//! use chain_dispatch::chain::ChainAssembler;
//! use chain_dispatch::dispatcher::{DispatchResult, Dispatcher};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dispatcher = Dispatcher::new(Arc::new(ChainAssembler::build(&builtin_kinds())?));
//! let results = dispatcher.dispatch(["Rings", "Chocolates"]);
//!
//! assert_eq!(results[0].accepted_by(), Some("Dolphin"));
//! assert_eq!(results[1], DispatchResult::not_accepted("Chocolates"));
//! assert_eq!(results[0].to_string(), "Rings: accepted by Dolphin");
//! assert_eq!(results[1].to_string(), "Chocolates: not accepted");
//! # Ok(())
//! # }
//! ```

use crate::chain::{Ring, RingNode};
use crate::handler::{AttemptOutcome, VisitationState};
use crate::logging::log_dispatch_operation;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Outcome of one epoch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchResult {
    Accepted { item: String, by: String },
    NotAccepted { item: String },
}

impl DispatchResult {
    pub fn accepted(item: impl Into<String>, by: impl Into<String>) -> Self {
        Self::Accepted {
            item: item.into(),
            by: by.into(),
        }
    }

    pub fn not_accepted(item: impl Into<String>) -> Self {
        Self::NotAccepted { item: item.into() }
    }

    pub fn item(&self) -> &str {
        match self {
            Self::Accepted { item, .. } | Self::NotAccepted { item } => item,
        }
    }

    pub fn accepted_by(&self) -> Option<&str> {
        match self {
            Self::Accepted { by, .. } => Some(by),
            Self::NotAccepted { .. } => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

impl fmt::Display for DispatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted { item, by } => write!(f, "{item}: accepted by {by}"),
            Self::NotAccepted { item } => write!(f, "{item}: not accepted"),
        }
    }
}

/// Result of one epoch plus the handlers it visited, in visit order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchTrace {
    pub result: DispatchResult,
    pub visited: Vec<String>,
}

impl DispatchTrace {
    pub fn visits(&self) -> usize {
        self.visited.len()
    }
}

/// Run a single epoch for `item` starting at `entry`.
///
/// `order` seeds the visitation state and bounds the walk, so it must be the
/// order of the ring `entry` belongs to ([`Ring::order`]). The loop ends on
/// acceptance, when the state is exhausted, when the next handler has already
/// been visited, or after `order.len()` visits, whichever comes first.
pub fn run_epoch(entry: RingNode<'_>, order: &[String], item: &str) -> DispatchTrace {
    debug_assert_eq!(
        order,
        entry.ring().order(),
        "dispatch order must come from the entry's ring"
    );
    let mut state = VisitationState::for_epoch(order);
    let mut visited = Vec::with_capacity(order.len());

    if state.is_exhausted() {
        return DispatchTrace {
            result: DispatchResult::not_accepted(item),
            visited,
        };
    }

    let mut node = entry;
    for _ in 0..order.len() {
        if !state.contains(node.name()) {
            trace!(item = %item, handler = %node.name(), "Handler already visited this epoch");
            break;
        }

        visited.push(node.name().to_string());
        match node.handler().attempt(item, &mut state) {
            AttemptOutcome::Accepted { by } => {
                debug!(item = %item, handler = %by, visits = visited.len(), "Item accepted");
                return DispatchTrace {
                    result: DispatchResult::accepted(item, by),
                    visited,
                };
            }
            AttemptOutcome::Delegate => {
                trace!(
                    item = %item,
                    handler = %node.name(),
                    remaining = state.remaining(),
                    "Handler declined, delegating to successor"
                );
            }
        }

        if state.is_exhausted() {
            break;
        }
        node = node.successor();
    }

    debug!(item = %item, visits = visited.len(), "Item not accepted by any handler");
    DispatchTrace {
        result: DispatchResult::not_accepted(item),
        visited,
    }
}

/// Dispatch every item in order, one independent epoch each.
///
/// `order` must be the order of the ring `entry` belongs to.
pub fn dispatch<I, S>(entry: RingNode<'_>, order: &[String], items: I) -> Vec<DispatchResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| run_epoch(entry, order, item.as_ref()).result)
        .collect()
}

/// Dispatches items against one shared, immutable ring
#[derive(Debug, Clone)]
pub struct Dispatcher {
    ring: Arc<Ring>,
}

impl Dispatcher {
    pub fn new(ring: Arc<Ring>) -> Self {
        Self { ring }
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn dispatch_item(&self, item: &str) -> DispatchTrace {
        run_epoch(self.ring.entry(), self.ring.order(), item)
    }

    /// One result per item, in input order
    pub fn dispatch<I, S>(&self, items: I) -> Vec<DispatchResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dispatch_traced(items)
            .into_iter()
            .map(|trace| trace.result)
            .collect()
    }

    pub fn dispatch_traced<I, S>(&self, items: I) -> Vec<DispatchTrace>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let traces: Vec<DispatchTrace> = items
            .into_iter()
            .map(|item| self.dispatch_item(item.as_ref()))
            .collect();

        let summary = DispatchSummary::from_results(traces.iter().map(|t| &t.result));
        info!(
            items = summary.total,
            accepted = summary.accepted,
            not_accepted = summary.not_accepted,
            handlers = self.ring.len(),
            "Dispatch complete"
        );
        log_dispatch_operation(
            "dispatch",
            summary.total,
            summary.accepted,
            summary.not_accepted,
        );

        traces
    }
}

/// Tally of a dispatch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    pub total: usize,
    pub accepted: usize,
    pub not_accepted: usize,
    /// Accepted item count per handler name
    pub by_handler: BTreeMap<String, usize>,
}

impl DispatchSummary {
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a DispatchResult>,
    {
        let mut summary = Self::default();
        for result in results {
            summary.total += 1;
            match result.accepted_by() {
                Some(by) => {
                    summary.accepted += 1;
                    *summary.by_handler.entry(by.to_string()).or_default() += 1;
                }
                None => summary.not_accepted += 1,
            }
        }
        summary
    }
}
