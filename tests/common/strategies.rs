use chain_dispatch::handler::HandlerKind;
use proptest::prelude::*;

/// Strategy for valid handler names
pub fn handler_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9_]{0,31}"
}

/// Strategy for item labels that never collide with ring-generated items
pub fn item_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,15}"
}

/// Strategy for 1..=max handler kinds with distinct names.
///
/// Handler `i` accepts `Item<i>` plus a few random items; the numbered item
/// gives every handler exactly one item nobody else accepts.
pub fn handler_kinds_strategy(max: usize) -> impl Strategy<Value = Vec<HandlerKind>> {
    prop::collection::btree_set(handler_name_strategy(), 1..=max).prop_flat_map(|names| {
        let count = names.len();
        prop::collection::vec(prop::collection::vec(item_strategy(), 0..4), count).prop_map(
            move |extras| {
                names
                    .iter()
                    .zip(extras)
                    .enumerate()
                    .map(|(i, (name, mut accepts))| {
                        accepts.push(format!("Item{i}"));
                        HandlerKind::new(name.clone(), accepts)
                    })
                    .collect::<Vec<_>>()
            },
        )
    })
}

/// Strategy for request batches mixing known and unknown items
pub fn item_batch_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            (0usize..16).prop_map(|i| format!("Item{i}")),
            item_strategy(),
            Just(String::new()),
        ],
        0..24,
    )
}
