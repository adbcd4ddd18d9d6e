//! Prelude module for convenient imports
//!
//! ```rust
//! use chronicle_core::prelude::*;
//! ```

// Core types
pub use crate::character::{create_character, Character};
pub use crate::error::{ErrorCategory, GameError};
pub use crate::session::GameSession;
pub use crate::types::{CharacterClass, EnemyKind, EquipmentSlot, Side};

// Combat
pub use crate::combat::{
    create_enemy, AbilityEffect, Battle, BattleOutcome, BattleResult, BattleState, CombatEvent,
    Enemy, PlayerAction, SpecialAbility,
};

// Quests and inventory
pub use crate::inventory::InventoryEntry;
pub use crate::quest::{AcceptOutcome, QuestProgress, QuestReward};

// Config
pub use crate::config::GameConstants;

// Persistence
pub use crate::persist::SaveStore;

// Re-exports from the data crates
pub use catalog_core::{ItemCatalog, Quest, QuestCatalog, QuestId};
pub use item_core::{Effect, Item, ItemId, ItemKind, Stat};
