//! chronicle_core - Game engine for Quest Chronicles
//!
//! This library provides:
//! - Character: creation, leveling, death and revival
//! - Inventory: capacity-limited item storage, equipment slots and the shop
//! - Quests: prerequisite-gated acceptance, completion rewards and progress
//! - Combat: turn-based battles with class abilities and seeded randomness
//! - Persistence: plain-text save files, one per character
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use chronicle_core::prelude::*;
//!
//! let mut session = GameSession::new_game(
//!     "Aria",
//!     "warrior",
//!     QuestCatalog::builtin()?,
//!     ItemCatalog::builtin()?,
//!     GameConstants::default(),
//!     42,
//! )?;
//!
//! session.accept_quest("first_steps")?;
//! let outcome = session.explore(|_| PlayerAction::Attack)?;
//! if outcome.is_victory() {
//!     session.complete_quest("first_steps")?;
//! }
//! session.save(&SaveStore::new("saves"))?;
//! ```

pub mod character;
pub mod combat;
pub mod config;
pub mod error;
pub mod inventory;
pub mod persist;
pub mod prelude;
pub mod progression;
pub mod quest;
pub mod session;
pub mod types;

// Core API - what most users need
pub use character::{create_character, Character};
pub use error::{ErrorCategory, GameError};
pub use session::GameSession;
pub use types::{CharacterClass, EnemyKind, EquipmentSlot, Side};

// Combat
pub use combat::{Battle, BattleOutcome, BattleResult, Enemy, PlayerAction, SpecialAbility};

// Configuration
pub use config::{ConfigError, GameConstants};

// Persistence
pub use persist::SaveStore;

// Re-export catalog and item types callers need to build a session
pub use catalog_core::{ItemCatalog, Quest, QuestCatalog, QuestId};
pub use item_core::{Effect, Item, ItemId, ItemKind, Stat};
