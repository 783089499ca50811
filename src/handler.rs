//! # Handlers
//!
//! A handler is a named unit that claims a fixed set of request items. When
//! offered an item it either accepts it or marks itself visited for the
//! current epoch and asks to be passed over.
//!
//! Handlers never hold a reference to their successor: successor links belong
//! to the [`Ring`](crate::chain::Ring) that owns them. The [`Dispatcher`](crate::dispatcher::Dispatcher)
//! follows those links in a bounded loop, so [`Handler::attempt`] never recurses.
//!
//! ## Usage
//!
//! ```rust
//! use chain_dispatch::handler::{AttemptOutcome, Handler, HandlerKind, StaticHandler, VisitationState};
//!
//! let dog = StaticHandler::from_kind(&HandlerKind::new("Dog", ["Ball", "Meat"]));
//! let order = vec!["Dog".to_string()];
//!
//! let mut state = VisitationState::for_epoch(&order);
//! assert_eq!(dog.attempt("Meat", &mut state), AttemptOutcome::Accepted { by: "Dog" });
//! assert_eq!(state.remaining(), 1);
//!
//! assert_eq!(dog.attempt("Rings", &mut state), AttemptOutcome::Delegate);
//! assert!(state.is_exhausted());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Result of offering one item to one handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome<'a> {
    /// The handler claims the item; the epoch ends here
    Accepted { by: &'a str },

    /// The handler declined and marked itself visited; try the successor
    Delegate,
}

impl AttemptOutcome<'_> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AttemptOutcome::Accepted { .. })
    }
}

/// Contract shared by every handler that can sit in a ring
pub trait Handler: Send + Sync + fmt::Debug {
    /// Unique name within a ring
    fn name(&self) -> &str;

    /// Whether `item` belongs to this handler's accepted-set
    fn accepts(&self, item: &str) -> bool;

    /// Offer `item` to this handler.
    ///
    /// An accepting handler leaves `state` untouched. A declining handler
    /// removes its own name from `state` (a no-op if already removed) and
    /// returns [`AttemptOutcome::Delegate`].
    fn attempt(&self, item: &str, state: &mut VisitationState) -> AttemptOutcome<'_> {
        if self.accepts(item) {
            return AttemptOutcome::Accepted { by: self.name() };
        }
        state.mark_visited(self.name());
        AttemptOutcome::Delegate
    }
}

/// Descriptor for a handler kind: a name and the items it claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerKind {
    pub name: String,
    pub accepts: Vec<String>,
}

impl HandlerKind {
    pub fn new<I, S>(name: impl Into<String>, accepts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            accepts: accepts.into_iter().map(Into::into).collect(),
        }
    }
}

/// Pure-data handler built from a [`HandlerKind`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticHandler {
    name: String,
    accepted: BTreeSet<String>,
}

impl StaticHandler {
    pub fn new<I, S>(name: impl Into<String>, accepts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            accepted: accepts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_kind(kind: &HandlerKind) -> Self {
        Self::new(kind.name.clone(), kind.accepts.iter().cloned())
    }

    /// Accepted-set in sorted order
    pub fn accepted_items(&self) -> impl Iterator<Item = &str> {
        self.accepted.iter().map(String::as_str)
    }
}

impl Handler for StaticHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn accepts(&self, item: &str) -> bool {
        self.accepted.contains(item)
    }
}

/// Names of handlers not yet tried during the current epoch.
///
/// Created full at the start of every epoch and only ever shrinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitationState {
    pending: HashSet<String>,
}

impl VisitationState {
    pub fn for_epoch<S: AsRef<str>>(order: &[S]) -> Self {
        Self {
            pending: order.iter().map(|name| name.as_ref().to_string()).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pending.contains(name)
    }

    /// Remove `name`; returns whether it was still pending
    pub fn mark_visited(&mut self, name: &str) -> bool {
        self.pending.remove(name)
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_accepting_handler_leaves_state_untouched() {
        let cat = StaticHandler::new("Cat", ["Milk", "Sausage"]);
        let mut state = VisitationState::for_epoch(&order(&["Dog", "Cat"]));

        let outcome = cat.attempt("Milk", &mut state);

        assert_eq!(outcome, AttemptOutcome::Accepted { by: "Cat" });
        assert!(outcome.is_accepted());
        assert_eq!(state.remaining(), 2);
        assert!(state.contains("Cat"));
    }

    #[test]
    fn test_declining_handler_marks_itself_visited() {
        let cat = StaticHandler::new("Cat", ["Milk", "Sausage"]);
        let mut state = VisitationState::for_epoch(&order(&["Dog", "Cat"]));

        assert_eq!(cat.attempt("Rings", &mut state), AttemptOutcome::Delegate);
        assert!(!state.contains("Cat"));
        assert!(state.contains("Dog"));

        // Revisit is a no-op removal
        assert_eq!(cat.attempt("Rings", &mut state), AttemptOutcome::Delegate);
        assert_eq!(state.remaining(), 1);
    }

    #[test]
    fn test_empty_item_is_never_accepted_by_builtin_sets() {
        let dog = StaticHandler::new("Dog", ["Ball", "Meat"]);
        assert!(!dog.accepts(""));
    }

    #[test]
    fn test_matching_is_exact() {
        let dog = StaticHandler::new("Dog", ["Ball", "Meat"]);
        assert!(dog.accepts("Ball"));
        assert!(!dog.accepts("ball"));
        assert!(!dog.accepts("Ball "));
    }

    #[test]
    fn test_from_kind_preserves_accepted_set() {
        let kind = HandlerKind::new("Monkey", ["Banana", "Coconut", "Camera"]);
        let monkey = StaticHandler::from_kind(&kind);

        assert_eq!(monkey.name(), "Monkey");
        let items: Vec<&str> = monkey.accepted_items().collect();
        assert_eq!(items, vec!["Banana", "Camera", "Coconut"]);
    }

    #[test]
    fn test_visitation_state_only_shrinks() {
        let mut state = VisitationState::for_epoch(&order(&["A", "B", "C"]));
        assert_eq!(state.remaining(), 3);
        assert!(state.mark_visited("B"));
        assert!(!state.mark_visited("B"));
        assert!(!state.mark_visited("Z"));
        assert_eq!(state.remaining(), 2);
        assert!(state.mark_visited("A"));
        assert!(state.mark_visited("C"));
        assert!(state.is_exhausted());
    }

    #[test]
    fn test_empty_order_starts_exhausted() {
        let state = VisitationState::for_epoch::<String>(&[]);
        assert!(state.is_exhausted());
    }
}
