//! Descriptor validation for handler kinds
//!
//! Rules applied before a handler may join a registry or a ring: names are
//! non-empty, trimmed, bounded in length and free of the ring delimiter;
//! accepted-sets contain no empty items; names are unique.

use crate::constants::{MAX_HANDLER_NAME_LENGTH, RING_DELIMITER};
use crate::error::{ChainError, Result};
use crate::handler::HandlerKind;
use std::collections::HashSet;

/// Validates a single handler name
pub fn validate_handler_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ChainError::validation("Handler name cannot be empty"));
    }

    if name.trim() != name {
        return Err(ChainError::validation(format!(
            "Handler name has surrounding whitespace: '{name}'"
        )));
    }

    if name.chars().count() > MAX_HANDLER_NAME_LENGTH {
        return Err(ChainError::validation(format!(
            "Handler name too long: {} characters (max: {MAX_HANDLER_NAME_LENGTH})",
            name.chars().count()
        )));
    }

    if name.contains(RING_DELIMITER) {
        return Err(ChainError::validation(format!(
            "Handler name '{name}' contains the ring delimiter '{RING_DELIMITER}'"
        )));
    }

    Ok(())
}

/// Validates one descriptor in isolation
pub fn validate_handler_kind(kind: &HandlerKind) -> Result<()> {
    validate_handler_name(&kind.name)?;

    if kind.accepts.iter().any(String::is_empty) {
        return Err(ChainError::validation(format!(
            "Handler '{}' lists an empty accepted item",
            kind.name
        )));
    }

    Ok(())
}

/// Validates an ordered descriptor list destined for one ring
pub fn validate_handler_kinds(kinds: &[HandlerKind]) -> Result<()> {
    if kinds.is_empty() {
        return Err(ChainError::configuration(
            "At least one handler kind is required to build a chain",
        ));
    }

    let mut seen = HashSet::with_capacity(kinds.len());
    for kind in kinds {
        validate_handler_kind(kind)?;
        if !seen.insert(kind.name.as_str()) {
            return Err(ChainError::duplicate_handler(&kind.name));
        }
    }

    Ok(())
}
