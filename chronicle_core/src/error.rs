//! Engine error type
//!
//! Every engine operation returns [`GameError`]. Callers that only need to
//! know how to react can match on [`GameError::category`] instead of the
//! individual variants.

use crate::config::ConfigError;
use crate::types::Side;
use catalog_core::{CatalogError, QuestGraphError, QuestId};
use item_core::{ItemId, ItemKind};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Broad classes of failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The caller asked for something that does not exist or is malformed
    Validation,
    /// The request conflicts with the current game state
    StateConflict,
    /// Not enough gold, space or level
    ResourceExhaustion,
    /// Stored data (save files, catalogs) is broken
    DataIntegrity,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::StateConflict => write!(f, "state conflict"),
            ErrorCategory::ResourceExhaustion => write!(f, "resource exhaustion"),
            ErrorCategory::DataIntegrity => write!(f, "data integrity"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GameError {
    // Validation
    #[error("Invalid character class: '{0}'")]
    InvalidClass(String),
    #[error("Unknown enemy type: '{0}'")]
    InvalidTarget(String),
    #[error("Item '{item_id}' is a {actual}, expected {expected}")]
    InvalidItemType {
        item_id: ItemId,
        expected: ItemKind,
        actual: ItemKind,
    },
    #[error("Unknown item: '{0}'")]
    UnknownItem(ItemId),
    #[error("Quest not found: '{0}'")]
    QuestNotFound(QuestId),
    #[error("No saved character named '{0}'")]
    CharacterNotFound(String),
    #[error("Invalid character name: '{0}'")]
    InvalidCharacterName(String),

    // State conflicts
    #[error("Quest '{0}' is not active")]
    QuestNotActive(QuestId),
    #[error("Quest '{0}' is already completed")]
    QuestAlreadyCompleted(QuestId),
    #[error("Quest '{quest}' requires '{prerequisite}' to be completed first")]
    QuestRequirementsNotMet {
        quest: QuestId,
        prerequisite: QuestId,
    },
    #[error("{ability} is on cooldown for {rounds} more round(s)")]
    AbilityOnCooldown { ability: String, rounds: u32 },
    #[error("No battle is in progress")]
    CombatNotActive,
    #[error("Battle has already started")]
    CombatAlreadyStarted,
    #[error("It is the {expected}'s turn")]
    OutOfTurn { expected: Side },
    #[error("Character is dead")]
    CharacterDead,
    #[error("Character is not dead")]
    CharacterNotDead,
    #[error("Item '{0}' is not in the inventory")]
    ItemNotFound(ItemId),

    // Resource exhaustion
    #[error("Inventory is full ({capacity} items)")]
    InventoryFull { capacity: usize },
    #[error("Not enough gold: need {required}, have {available}")]
    InsufficientResources { required: u32, available: u32 },
    #[error("Requires level {required}, character is level {current}")]
    InsufficientLevel { required: u32, current: u32 },

    // Data integrity
    #[error("Save file '{path:?}' is corrupted: {reason}")]
    SaveFileCorrupted { path: PathBuf, reason: String },
    #[error("Save file '{path:?}' has invalid data: {reason}")]
    InvalidSaveData { path: PathBuf, reason: String },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    QuestGraph(QuestGraphError),
    #[error("Invalid game constants: {0}")]
    Config(#[from] ConfigError),
    #[error("Storage error at '{path:?}': {error}")]
    Storage {
        path: PathBuf,
        error: std::io::Error,
    },
}

impl GameError {
    pub fn category(&self) -> ErrorCategory {
        use GameError::*;
        match self {
            InvalidClass(_)
            | InvalidTarget(_)
            | InvalidItemType { .. }
            | UnknownItem(_)
            | QuestNotFound(_)
            | CharacterNotFound(_)
            | InvalidCharacterName(_) => ErrorCategory::Validation,

            QuestNotActive(_)
            | QuestAlreadyCompleted(_)
            | QuestRequirementsNotMet { .. }
            | AbilityOnCooldown { .. }
            | CombatNotActive
            | CombatAlreadyStarted
            | OutOfTurn { .. }
            | CharacterDead
            | CharacterNotDead
            | ItemNotFound(_) => ErrorCategory::StateConflict,

            InventoryFull { .. } | InsufficientResources { .. } | InsufficientLevel { .. } => {
                ErrorCategory::ResourceExhaustion
            }

            SaveFileCorrupted { .. }
            | InvalidSaveData { .. }
            | Catalog(_)
            | QuestGraph(_)
            | Config(_)
            | Storage { .. } => ErrorCategory::DataIntegrity,
        }
    }
}

impl From<QuestGraphError> for GameError {
    fn from(error: QuestGraphError) -> Self {
        match error {
            // Asking for a quest that isn't there is the caller's mistake
            QuestGraphError::QuestNotFound(id) => GameError::QuestNotFound(id),
            other => GameError::QuestGraph(other),
        }
    }
}
