//! # Built-in Handler Catalog
//!
//! A fixed set of labeled handler kinds that ship with the engine. Each label
//! maps to exactly one [`HandlerKind`] descriptor; configuration can refer to
//! a catalog entry by label instead of spelling out its accepted-set.

use crate::error::{ChainError, Result};
use crate::handler::HandlerKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalKind {
    Dog,
    Cat,
    Monkey,
    Dolphin,
}

impl AnimalKind {
    /// Catalog order, which is also the default ring order
    pub const ALL: [AnimalKind; 4] = [
        AnimalKind::Dog,
        AnimalKind::Cat,
        AnimalKind::Monkey,
        AnimalKind::Dolphin,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AnimalKind::Dog => "Dog",
            AnimalKind::Cat => "Cat",
            AnimalKind::Monkey => "Monkey",
            AnimalKind::Dolphin => "Dolphin",
        }
    }

    pub fn accepted_items(&self) -> &'static [&'static str] {
        match self {
            AnimalKind::Dog => &["Ball", "Meat"],
            AnimalKind::Cat => &["Milk", "Sausage"],
            AnimalKind::Monkey => &["Banana", "Coconut", "Camera"],
            AnimalKind::Dolphin => &["Rings"],
        }
    }

    pub fn descriptor(&self) -> HandlerKind {
        HandlerKind::new(self.label(), self.accepted_items().iter().copied())
    }

    /// Case-insensitive lookup by label
    pub fn from_label(label: &str) -> Result<Self> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ChainError::unknown_handler_kind(label))
    }
}

impl fmt::Display for AnimalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AnimalKind {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_label(s)
    }
}

/// Descriptors for every catalog entry, in catalog order
pub fn builtin_kinds() -> Vec<HandlerKind> {
    AnimalKind::ALL.iter().map(AnimalKind::descriptor).collect()
}
