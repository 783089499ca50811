#![allow(dead_code)]

pub mod strategies;

use chain_dispatch::catalog::builtin_kinds;
use chain_dispatch::chain::{ChainAssembler, Ring};
use chain_dispatch::dispatcher::Dispatcher;
use chain_dispatch::handler::HandlerKind;
use std::sync::Arc;

pub fn builtin_ring() -> Arc<Ring> {
    Arc::new(ChainAssembler::build(&builtin_kinds()).expect("builtin ring should assemble"))
}

pub fn builtin_dispatcher() -> Dispatcher {
    Dispatcher::new(builtin_ring())
}

pub fn dispatcher_for(kinds: &[HandlerKind]) -> Dispatcher {
    Dispatcher::new(Arc::new(
        ChainAssembler::build(kinds).expect("ring should assemble"),
    ))
}

/// Owned string list from literals
pub fn items(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
