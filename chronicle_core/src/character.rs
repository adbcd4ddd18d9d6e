//! Character - the player's persistent stat record

use crate::config::{CharacterConstants, GameConstants};
use crate::error::GameError;
use crate::types::CharacterClass;
use catalog_core::QuestId;
use item_core::{Effect, ItemId, Stat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::info;

/// A player character
///
/// Name and class are fixed at creation. Everything else is mutated by the
/// engine operations, which keep these invariants:
/// - `health <= max_health` and `max_health >= 1`
/// - `inventory.len()` never exceeds the configured capacity
/// - no quest is in both `active_quests` and `completed_quests`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    name: String,
    class: CharacterClass,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub strength: u32,
    pub magic: u32,
    pub experience: u32,
    pub gold: u32,
    pub inventory: Vec<ItemId>,
    pub equipped_weapon: Option<ItemId>,
    pub equipped_armor: Option<ItemId>,
    pub active_quests: BTreeSet<QuestId>,
    pub completed_quests: BTreeSet<QuestId>,
}

/// Check that a name can identify a character and its save file
///
/// Rejects blank names, surrounding whitespace, control characters, path
/// separators and the `.`/`..` directory names.
pub fn validate_name(name: &str) -> Result<(), GameError> {
    let invalid = name.trim().is_empty()
        || name.trim() != name
        || name.chars().any(char::is_control)
        || name.contains(['/', '\\', std::path::MAIN_SEPARATOR])
        || name == "."
        || name == "..";
    if invalid {
        return Err(GameError::InvalidCharacterName(name.to_string()));
    }
    Ok(())
}

/// Create a character from a class name such as `"warrior"`
pub fn create_character(
    name: &str,
    class_name: &str,
    rules: &GameConstants,
) -> Result<Character, GameError> {
    validate_name(name)?;
    let class: CharacterClass = class_name.parse()?;
    let mut character = Character::new(name, class);
    character.gold = rules.character.starting_gold;
    info!(name = %character.name, class = %class, "created character");
    Ok(character)
}

impl Character {
    /// A fresh level-1 character with the class's base stats
    pub fn new(name: impl Into<String>, class: CharacterClass) -> Self {
        let base = class.base_stats();
        Character {
            name: name.into(),
            class,
            level: 1,
            health: base.health,
            max_health: base.health,
            strength: base.strength,
            magic: base.magic,
            experience: 0,
            gold: CharacterConstants::default().starting_gold,
            inventory: Vec::new(),
            equipped_weapon: None,
            equipped_armor: None,
            active_quests: BTreeSet::new(),
            completed_quests: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> CharacterClass {
        self.class
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn can_fight(&self) -> bool {
        !self.is_dead()
    }

    /// Lose up to `amount` health, returning what was actually lost
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.health);
        self.health -= lost;
        lost
    }

    /// Restore up to `amount` health, returning what was actually restored
    ///
    /// The dead can only be brought back by [`Character::revive`].
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.is_dead() {
            return 0;
        }
        let healed = amount.min(self.max_health.saturating_sub(self.health));
        self.health += healed;
        healed
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn spend_gold(&mut self, amount: u32) -> Result<(), GameError> {
        self.gold = self
            .gold
            .checked_sub(amount)
            .ok_or(GameError::InsufficientResources {
                required: amount,
                available: self.gold,
            })?;
        Ok(())
    }

    /// Bring a dead character back for gold
    ///
    /// Returns the health restored.
    pub fn revive(&mut self, rules: &GameConstants) -> Result<u32, GameError> {
        if !self.is_dead() {
            return Err(GameError::CharacterNotDead);
        }
        self.spend_gold(rules.character.revive_cost)?;

        let restored = (u64::from(self.max_health)
            * u64::from(rules.character.revive_health_percent)
            / 100) as u32;
        self.health = restored.max(1).min(self.max_health);

        info!(name = %self.name, health = self.health, "character revived");
        Ok(self.health)
    }

    /// Apply an additive stat effect
    ///
    /// Health is clamped to `0..=max_health`. Max health never drops below 1
    /// and pulls current health down with it. Strength and magic floor at 0.
    pub fn apply_effect(&mut self, effect: &Effect) {
        match effect.stat {
            Stat::Health => {
                self.health = offset(self.health, effect.delta).min(self.max_health);
            }
            Stat::MaxHealth => {
                self.max_health = offset(self.max_health, effect.delta).max(1);
                self.health = self.health.min(self.max_health);
            }
            Stat::Strength => self.strength = offset(self.strength, effect.delta),
            Stat::Magic => self.magic = offset(self.magic, effect.delta),
        }
    }

    /// Returns a description of the first violated invariant
    pub fn check_invariants(&self, rules: &GameConstants) -> Result<(), String> {
        validate_name(&self.name).map_err(|e| e.to_string())?;
        if self.level == 0 {
            return Err("level must be at least 1".to_string());
        }
        if self.max_health == 0 {
            return Err("max_health must be positive".to_string());
        }
        if self.health > self.max_health {
            return Err(format!(
                "health {} exceeds max_health {}",
                self.health, self.max_health
            ));
        }
        if self.inventory.len() > rules.inventory.max_size {
            return Err(format!(
                "inventory holds {} items, capacity is {}",
                self.inventory.len(),
                rules.inventory.max_size
            ));
        }
        if let Some(quest) = self.active_quests.intersection(&self.completed_quests).next() {
            return Err(format!("quest '{}' is both active and completed", quest));
        }
        Ok(())
    }

    /// Rebuild a character from stored fields; callers validate afterwards
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        name: String,
        class: CharacterClass,
        level: u32,
        health: u32,
        max_health: u32,
        strength: u32,
        magic: u32,
        experience: u32,
        gold: u32,
    ) -> Self {
        Character {
            name,
            class,
            level,
            health,
            max_health,
            strength,
            magic,
            experience,
            gold,
            inventory: Vec::new(),
            equipped_weapon: None,
            equipped_armor: None,
            active_quests: BTreeSet::new(),
            completed_quests: BTreeSet::new(),
        }
    }
}

fn offset(value: u32, delta: i32) -> u32 {
    (i64::from(value) + i64::from(delta)).clamp(0, i64::from(u32::MAX)) as u32
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} the {} ===", self.name, self.class)?;
        writeln!(f, "Level: {} (XP {})", self.level, self.experience)?;
        writeln!(f, "Health: {}/{}", self.health, self.max_health)?;
        writeln!(f, "Strength: {}  Magic: {}", self.strength, self.magic)?;
        writeln!(f, "Gold: {}", self.gold)?;
        writeln!(
            f,
            "Weapon: {}  Armor: {}",
            self.equipped_weapon.as_deref().unwrap_or("none"),
            self.equipped_armor.as_deref().unwrap_or("none")
        )?;
        write!(
            f,
            "Inventory: {} items  Quests: {} active, {} completed",
            self.inventory.len(),
            self.active_quests.len(),
            self.completed_quests.len()
        )
    }
}
