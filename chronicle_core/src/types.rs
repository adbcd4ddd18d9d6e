//! Core types for the game engine

use crate::error::GameError;
use item_core::ItemKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Character Classes
// ============================================================================

/// Playable character classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Cleric,
}

/// Starting stats for a class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassStats {
    pub health: u32,
    pub strength: u32,
    pub magic: u32,
}

impl CharacterClass {
    pub fn all() -> &'static [CharacterClass] {
        &[
            CharacterClass::Warrior,
            CharacterClass::Mage,
            CharacterClass::Rogue,
            CharacterClass::Cleric,
        ]
    }

    /// Base stats at level 1
    pub fn base_stats(&self) -> ClassStats {
        let (health, strength, magic) = match self {
            CharacterClass::Warrior => (120, 15, 5),
            CharacterClass::Mage => (80, 8, 20),
            CharacterClass::Rogue => (90, 12, 10),
            CharacterClass::Cleric => (100, 10, 15),
        };
        ClassStats {
            health,
            strength,
            magic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Cleric => "Cleric",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterClass {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        CharacterClass::all()
            .iter()
            .copied()
            .find(|class| class.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| GameError::InvalidClass(s.to_string()))
    }
}

// ============================================================================
// Enemies
// ============================================================================

/// Enemy types an encounter can spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Goblin,
    Orc,
    Dragon,
}

/// Stat template an enemy is instantiated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyTemplate {
    pub health: u32,
    pub strength: u32,
    pub magic: u32,
    pub xp_reward: u32,
    pub gold_reward: u32,
}

impl EnemyKind {
    pub fn all() -> &'static [EnemyKind] {
        &[EnemyKind::Goblin, EnemyKind::Orc, EnemyKind::Dragon]
    }

    pub fn template(&self) -> EnemyTemplate {
        let (health, strength, magic, xp_reward, gold_reward) = match self {
            EnemyKind::Goblin => (50, 8, 2, 25, 10),
            EnemyKind::Orc => (80, 12, 5, 50, 25),
            EnemyKind::Dragon => (200, 25, 15, 200, 100),
        };
        EnemyTemplate {
            health,
            strength,
            magic,
            xp_reward,
            gold_reward,
        }
    }

    /// Pick an enemy appropriate for a character level
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=2 => EnemyKind::Goblin,
            3..=5 => EnemyKind::Orc,
            _ => EnemyKind::Dragon,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Goblin => "Goblin",
            EnemyKind::Orc => "Orc",
            EnemyKind::Dragon => "Dragon",
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnemyKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        EnemyKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| GameError::InvalidTarget(s.to_string()))
    }
}

// ============================================================================
// Equipment & Turn Order
// ============================================================================

/// Equipment slots on a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

impl EquipmentSlot {
    /// The item kind this slot accepts
    pub fn accepts(&self) -> ItemKind {
        match self {
            EquipmentSlot::Weapon => ItemKind::Weapon,
            EquipmentSlot::Armor => ItemKind::Armor,
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentSlot::Weapon => write!(f, "weapon"),
            EquipmentSlot::Armor => write!(f, "armor"),
        }
    }
}

/// A side in a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_base_stats() {
        let warrior = CharacterClass::Warrior.base_stats();
        assert_eq!((warrior.health, warrior.strength, warrior.magic), (120, 15, 5));
        let mage = CharacterClass::Mage.base_stats();
        assert_eq!((mage.health, mage.strength, mage.magic), (80, 8, 20));
        let rogue = CharacterClass::Rogue.base_stats();
        assert_eq!((rogue.health, rogue.strength, rogue.magic), (90, 12, 10));
        let cleric = CharacterClass::Cleric.base_stats();
        assert_eq!((cleric.health, cleric.strength, cleric.magic), (100, 10, 15));
    }

    #[test]
    fn test_parse_class() {
        assert_eq!("warrior".parse::<CharacterClass>().unwrap(), CharacterClass::Warrior);
        assert_eq!(" MAGE ".parse::<CharacterClass>().unwrap(), CharacterClass::Mage);
        assert!(matches!(
            "bard".parse::<CharacterClass>(),
            Err(GameError::InvalidClass(_))
        ));
    }

    #[test]
    fn test_enemy_templates() {
        let orc = EnemyKind::Orc.template();
        assert_eq!(orc.health, 80);
        assert_eq!(orc.xp_reward, 50);
        assert_eq!(EnemyKind::Dragon.template().gold_reward, 100);
    }

    #[test]
    fn test_enemy_for_level() {
        assert_eq!(EnemyKind::for_level(1), EnemyKind::Goblin);
        assert_eq!(EnemyKind::for_level(2), EnemyKind::Goblin);
        assert_eq!(EnemyKind::for_level(3), EnemyKind::Orc);
        assert_eq!(EnemyKind::for_level(5), EnemyKind::Orc);
        assert_eq!(EnemyKind::for_level(6), EnemyKind::Dragon);
    }

    #[test]
    fn test_parse_enemy() {
        assert_eq!("Goblin".parse::<EnemyKind>().unwrap(), EnemyKind::Goblin);
        assert!(matches!(
            "troll".parse::<EnemyKind>(),
            Err(GameError::InvalidTarget(_))
        ));
    }
}
