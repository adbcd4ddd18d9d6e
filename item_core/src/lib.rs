//! item_core - Item definitions and the stat effects they carry
//!
//! Items are shared, read-only reference data. An item's effect is a single
//! `stat:value` pair parsed into an [`Effect`] when the catalog is loaded.

pub mod item;
pub mod types;

pub use item::{Effect, Item};
pub use types::{ItemId, ItemKind, Stat, UnknownItemKind};

use thiserror::Error;

/// Error parsing a `stat:value` effect string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EffectError {
    #[error("Effect '{0}' is missing the ':' separator")]
    MissingSeparator(String),
    #[error("Unknown stat: {0}")]
    UnknownStat(String),
    #[error("Effect value '{0}' is not an integer")]
    InvalidValue(String),
}
