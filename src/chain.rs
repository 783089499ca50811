//! # Chain Assembly
//!
//! Links an ordered set of handlers into a closed ring: every handler points
//! at the next one in registration order and the last points back at the
//! first. With a single handler the ring is a self-loop.
//!
//! The ring is immutable once built. Successor links are stored as indices
//! owned by the [`Ring`] itself, so handlers never reference each other and a
//! built ring can be shared across threads behind an `Arc`.
//!
//! ## Usage
//!
//! ```rust
//! use chain_dispatch::catalog::builtin_kinds;
//! use chain_dispatch::chain::ChainAssembler;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ring = ChainAssembler::build(&builtin_kinds())?;
//!
//! assert_eq!(ring.order(), ["Dog", "Cat", "Monkey", "Dolphin"]);
//! assert_eq!(ring.entry().name(), "Dog");
//! assert_eq!(ring.entry().successor().name(), "Cat");
//! assert_eq!(ring.describe(">"), "Dog > Cat > Monkey > Dolphin > Dog");
//! # Ok(())
//! # }
//! ```

use crate::error::{ChainError, Result};
use crate::handler::{Handler, HandlerKind};
use crate::logging::log_chain_operation;
use crate::registry::HandlerRegistry;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Closed successor topology over a fixed set of handlers
pub struct Ring {
    handlers: Vec<Arc<dyn Handler>>,
    successors: Vec<usize>,
    order: Vec<String>,
}

impl Ring {
    /// Number of handlers in the ring (never zero)
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handler names in ring order, starting at the entry
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// The handler every dispatch starts from
    pub fn entry(&self) -> RingNode<'_> {
        RingNode {
            ring: self,
            index: 0,
        }
    }

    pub fn node(&self, index: usize) -> Option<RingNode<'_>> {
        (index < self.handlers.len()).then_some(RingNode { ring: self, index })
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.order.iter().position(|n| n == name)
    }

    pub fn successor_index(&self, index: usize) -> Option<usize> {
        self.successors.get(index).copied()
    }

    /// Ring rendered as names joined by `delimiter`, closing back on the entry
    pub fn describe(&self, delimiter: &str) -> String {
        let separator = format!(" {delimiter} ");
        let mut names: Vec<&str> = self.order.iter().map(String::as_str).collect();
        if let Some(first) = self.order.first() {
            names.push(first);
        }
        names.join(&separator)
    }
}

impl fmt::Debug for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring")
            .field("order", &self.order)
            .field("successors", &self.successors)
            .finish()
    }
}

/// Borrowed position within a [`Ring`]
#[derive(Clone, Copy)]
pub struct RingNode<'a> {
    ring: &'a Ring,
    index: usize,
}

impl<'a> RingNode<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &'a str {
        &self.ring.order[self.index]
    }

    pub fn handler(&self) -> &'a dyn Handler {
        self.ring.handlers[self.index].as_ref()
    }

    pub fn successor(&self) -> RingNode<'a> {
        RingNode {
            ring: self.ring,
            index: self.ring.successors[self.index],
        }
    }

    pub fn ring(&self) -> &'a Ring {
        self.ring
    }
}

impl PartialEq for RingNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.ring, other.ring) && self.index == other.index
    }
}

impl Eq for RingNode<'_> {}

impl fmt::Debug for RingNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingNode")
            .field("index", &self.index)
            .field("name", &self.name())
            .finish()
    }
}

/// Builds rings from descriptors, registries or handler lists
pub struct ChainAssembler;

impl ChainAssembler {
    /// One handler per kind, linked in input order
    pub fn build(kinds: &[HandlerKind]) -> Result<Ring> {
        let registry = HandlerRegistry::from_kinds(kinds)?;
        Self::from_registry(registry)
    }

    pub fn from_registry(registry: HandlerRegistry) -> Result<Ring> {
        Self::link(registry.into_handlers())
    }

    /// Link pre-built handlers; names must be unique
    pub fn from_handlers(handlers: Vec<Arc<dyn Handler>>) -> Result<Ring> {
        let mut registry = HandlerRegistry::new();
        for handler in handlers {
            registry.register(handler)?;
        }
        Self::from_registry(registry)
    }

    fn link(handlers: Vec<Arc<dyn Handler>>) -> Result<Ring> {
        let count = handlers.len();
        if count == 0 {
            log_chain_operation("build", 0, "failed", Some("no handler kinds supplied"));
            return Err(ChainError::configuration(
                "Cannot assemble a chain from zero handler kinds",
            ));
        }

        // i -> i + 1 for every i < n - 1, then n - 1 -> 0
        let mut successors: Vec<usize> = (1..count).collect();
        successors.push(0);

        let order: Vec<String> = handlers.iter().map(|h| h.name().to_string()).collect();

        let ring = Ring {
            handlers,
            successors,
            order,
        };

        debug!(
            handlers = count,
            entry = %ring.order[0],
            ring = %ring.describe(crate::constants::RING_DELIMITER),
            "Assembled handler ring"
        );
        log_chain_operation("build", count, "assembled", None);

        Ok(ring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_kinds;
    use crate::handler::StaticHandler;

    fn kinds(names: &[&str]) -> Vec<HandlerKind> {
        names
            .iter()
            .map(|name| HandlerKind::new(*name, [format!("{name}-item")]))
            .collect()
    }

    #[test]
    fn test_zero_kinds_is_configuration_error() {
        let err = ChainAssembler::build(&[]).unwrap_err();
        assert!(matches!(err, ChainError::ConfigurationError(_)));

        let err = ChainAssembler::from_handlers(Vec::new()).unwrap_err();
        assert!(matches!(err, ChainError::ConfigurationError(_)));
    }

    #[test]
    fn test_single_handler_is_self_loop() {
        let ring = ChainAssembler::build(&kinds(&["Dog"])).unwrap();
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.entry().successor(), ring.entry());
        assert_eq!(ring.successor_index(0), Some(0));
        assert_eq!(ring.describe(">"), "Dog > Dog");
    }

    #[test]
    fn test_two_handlers_point_at_each_other() {
        let ring = ChainAssembler::build(&kinds(&["Dog", "Cat"])).unwrap();
        let entry = ring.entry();
        assert_eq!(entry.successor().name(), "Cat");
        assert_eq!(entry.successor().successor(), entry);
    }

    #[test]
    fn test_successor_links_follow_input_order() {
        let ring = ChainAssembler::build(&kinds(&["A", "B", "C", "D", "E"])).unwrap();
        let successors: Vec<usize> = (0..ring.len())
            .map(|i| ring.successor_index(i).unwrap())
            .collect();
        assert_eq!(successors, vec![1, 2, 3, 4, 0]);
        assert_eq!(ring.successor_index(5), None);
    }

    #[test]
    fn test_walk_visits_every_handler_once_before_closing() {
        let ring = ChainAssembler::build(&builtin_kinds()).unwrap();
        let mut node = ring.entry();
        let mut seen = Vec::new();
        for _ in 0..ring.len() {
            seen.push(node.name());
            node = node.successor();
        }
        assert_eq!(node, ring.entry());
        assert_eq!(seen, ring.order());
    }

    #[test]
    fn test_duplicate_handlers_rejected() {
        let handlers: Vec<Arc<dyn Handler>> = vec![
            Arc::new(StaticHandler::new("Dog", ["Ball"])),
            Arc::new(StaticHandler::new("Dog", ["Meat"])),
        ];
        let err = ChainAssembler::from_handlers(handlers).unwrap_err();
        assert!(matches!(err, ChainError::DuplicateHandler { .. }));
    }

    #[test]
    fn test_node_lookup() {
        let ring = ChainAssembler::build(&builtin_kinds()).unwrap();
        assert_eq!(ring.node(2).unwrap().name(), "Monkey");
        assert!(ring.node(4).is_none());
        assert_eq!(ring.position("Dolphin"), Some(3));
        assert_eq!(ring.position("Giraffe"), None);
        assert!(ring.node(3).unwrap().handler().accepts("Rings"));
    }

    #[test]
    fn test_ring_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Ring>();
    }
}
