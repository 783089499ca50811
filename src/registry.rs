//! # Handler Registry
//!
//! Ordered, caller-supplied registry of handlers. Registration order is ring
//! order: the first handler registered becomes the ring's entry point.
//!
//! ## Usage
//!
//! ```rust
//! use chain_dispatch::handler::HandlerKind;
//! use chain_dispatch::registry::HandlerRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = HandlerRegistry::new();
//! registry.register_kind(HandlerKind::new("Dog", ["Ball", "Meat"]))?;
//! registry.register_kind(HandlerKind::new("Cat", ["Milk", "Sausage"]))?;
//!
//! assert_eq!(registry.names(), vec!["Dog", "Cat"]);
//! assert!(registry.register_kind(HandlerKind::new("Dog", ["Bone"])).is_err());
//! # Ok(())
//! # }
//! ```

use crate::catalog;
use crate::error::{ChainError, Result};
use crate::handler::{Handler, HandlerKind, StaticHandler};
use crate::logging::log_registry_operation;
use crate::validation::{validate_handler_kind, validate_handler_name};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
pub struct HandlerRegistry {
    handlers: Vec<Arc<dyn Handler>>,
    positions: HashMap<String, usize>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in catalog in catalog order
    pub fn with_builtin() -> Result<Self> {
        Self::from_kinds(&catalog::builtin_kinds())
    }

    pub fn from_kinds(kinds: &[HandlerKind]) -> Result<Self> {
        let mut registry = Self::new();
        for kind in kinds {
            registry.register_kind(kind.clone())?;
        }
        Ok(registry)
    }

    /// Append a handler; its name must not already be registered
    pub fn register(&mut self, handler: Arc<dyn Handler>) -> Result<()> {
        let name = handler.name().to_string();
        validate_handler_name(&name)?;

        if self.positions.contains_key(&name) {
            log_registry_operation("register", &name, "rejected", Some("duplicate name"));
            return Err(ChainError::duplicate_handler(name));
        }

        let position = self.handlers.len();
        debug!(handler = %name, position = position, "Registering handler");
        self.positions.insert(name.clone(), position);
        self.handlers.push(handler);

        log_registry_operation("register", &name, "registered", None);
        Ok(())
    }

    pub fn register_kind(&mut self, kind: HandlerKind) -> Result<()> {
        validate_handler_kind(&kind)?;
        self.register(Arc::new(StaticHandler::from_kind(&kind)))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Handler>> {
        self.positions
            .get(name)
            .and_then(|&position| self.handlers.get(position))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            total_handlers: self.handlers.len(),
            handler_names: self.names().into_iter().map(str::to_string).collect(),
        }
    }

    pub(crate) fn into_handlers(self) -> Vec<Arc<dyn Handler>> {
        self.handlers
    }
}

/// Snapshot of registry contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    pub total_handlers: usize,
    pub handler_names: Vec<String>,
}
