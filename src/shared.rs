//! Process-wide default ring
//!
//! The built-in catalog ring is assembled on first use and cached for the rest
//! of the process. Access goes through a single mutex: the accessor locks,
//! builds the ring if the slot is empty, clones the `Arc` and releases the lock
//! before returning.

use crate::catalog::builtin_kinds;
use crate::chain::{ChainAssembler, Ring};
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use parking_lot::{const_mutex, Mutex};
use std::sync::Arc;
use tracing::debug;

static DEFAULT_RING: Mutex<Option<Arc<Ring>>> = const_mutex(None);

/// Shared ring over the built-in catalog
pub fn default_ring() -> Result<Arc<Ring>> {
    let mut slot = DEFAULT_RING.lock();
    if let Some(ring) = slot.as_ref() {
        return Ok(Arc::clone(ring));
    }

    debug!("Assembling process-wide default ring");
    let ring = Arc::new(ChainAssembler::build(&builtin_kinds())?);
    *slot = Some(Arc::clone(&ring));
    Ok(ring)
}

pub fn default_dispatcher() -> Result<Dispatcher> {
    Ok(Dispatcher::new(default_ring()?))
}
