//! Configuration loading

mod constants;

pub use constants::{
    CharacterConstants, CombatConstants, GameConstants, InventoryConstants,
    ProgressionConstants,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}
