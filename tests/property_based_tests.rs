mod common;

use chain_dispatch::chain::ChainAssembler;
use chain_dispatch::dispatcher::DispatchResult;
use common::strategies::*;
use common::dispatcher_for;
use proptest::prelude::*;

proptest! {
    /// Property: following successor links n times from the entry returns to the entry
    #[test]
    fn ring_closes_after_n_steps(kinds in handler_kinds_strategy(12)) {
        let ring = ChainAssembler::build(&kinds).unwrap();
        let entry = ring.entry();

        let mut node = entry;
        for step in 1..=ring.len() {
            node = node.successor();
            if step < ring.len() {
                prop_assert_ne!(node, entry, "returned to entry early at step {}", step);
            }
        }
        prop_assert_eq!(node, entry);
    }

    /// Property: ring order is registration order
    #[test]
    fn ring_order_matches_input_order(kinds in handler_kinds_strategy(12)) {
        let ring = ChainAssembler::build(&kinds).unwrap();
        let expected: Vec<&str> = kinds.iter().map(|k| k.name.as_str()).collect();
        prop_assert_eq!(ring.order(), expected.as_slice());
    }

    /// Property: an item owned by exactly one handler is accepted by it wherever it sits
    #[test]
    fn uniquely_owned_items_reach_their_handler(
        kinds in handler_kinds_strategy(12),
        pick in any::<prop::sample::Index>(),
    ) {
        let dispatcher = dispatcher_for(&kinds);
        let position = pick.index(kinds.len());
        let item = format!("Item{position}");

        let trace = dispatcher.dispatch_item(&item);
        prop_assert_eq!(
            trace.result,
            DispatchResult::accepted(item.as_str(), kinds[position].name.as_str())
        );
        prop_assert_eq!(trace.visited.len(), position + 1);
    }

    /// Property: an item nobody accepts costs exactly one visit per handler
    #[test]
    fn unaccepted_items_visit_every_handler_once(kinds in handler_kinds_strategy(12)) {
        let dispatcher = dispatcher_for(&kinds);
        let trace = dispatcher.dispatch_item("NOBODY-ACCEPTS-THIS");

        prop_assert!(!trace.result.is_accepted());
        prop_assert_eq!(trace.visits(), kinds.len());

        let mut visited = trace.visited.clone();
        visited.sort();
        visited.dedup();
        prop_assert_eq!(visited.len(), kinds.len());
    }

    /// Property: dispatching the same batch twice yields identical results
    #[test]
    fn dispatch_is_idempotent(
        kinds in handler_kinds_strategy(12),
        batch in item_batch_strategy(),
    ) {
        let dispatcher = dispatcher_for(&kinds);
        let first = dispatcher.dispatch(&batch);
        let second = dispatcher.dispatch(&batch);

        prop_assert_eq!(first.len(), batch.len());
        prop_assert_eq!(first, second);
    }

    /// Property: results preserve input order and empty items are never accepted
    #[test]
    fn results_follow_input_order(
        kinds in handler_kinds_strategy(8),
        batch in item_batch_strategy(),
    ) {
        let dispatcher = dispatcher_for(&kinds);
        let results = dispatcher.dispatch(&batch);

        for (item, result) in batch.iter().zip(&results) {
            prop_assert_eq!(result.item(), item.as_str());
            if item.is_empty() {
                prop_assert!(!result.is_accepted());
            }
        }
    }
}
