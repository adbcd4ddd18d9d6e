use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::EffectError;

/// Identifier of an item definition in the item catalog
pub type ItemId = String;

/// Character stats that item effects can modify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Health,
    MaxHealth,
    Strength,
    Magic,
}

impl Stat {
    /// Get all stat variants
    pub fn all() -> &'static [Stat] {
        &[Stat::Health, Stat::MaxHealth, Stat::Strength, Stat::Magic]
    }

    /// The lowercase name used in data files (`max_health`, `strength`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Health => "health",
            Stat::MaxHealth => "max_health",
            Stat::Strength => "strength",
            Stat::Magic => "magic",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Health => write!(f, "Health"),
            Stat::MaxHealth => write!(f, "Max Health"),
            Stat::Strength => write!(f, "Strength"),
            Stat::Magic => write!(f, "Magic"),
        }
    }
}

impl FromStr for Stat {
    type Err = EffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "health" => Ok(Stat::Health),
            "max_health" => Ok(Stat::MaxHealth),
            "strength" => Ok(Stat::Strength),
            "magic" => Ok(Stat::Magic),
            _ => Err(EffectError::UnknownStat(s.trim().to_string())),
        }
    }
}

/// Item categories
///
/// Weapons and armor are equipped into their slot; consumables are used up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Weapon,
    Armor,
    Consumable,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Weapon => "weapon",
            ItemKind::Armor => "armor",
            ItemKind::Consumable => "consumable",
        }
    }

    pub fn is_equipment(&self) -> bool {
        matches!(self, ItemKind::Weapon | ItemKind::Armor)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an item type outside `weapon | armor | consumable`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown item type: {0}")]
pub struct UnknownItemKind(pub String);

impl FromStr for ItemKind {
    type Err = UnknownItemKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weapon" => Ok(ItemKind::Weapon),
            "armor" => Ok(ItemKind::Armor),
            "consumable" => Ok(ItemKind::Consumable),
            _ => Err(UnknownItemKind(s.trim().to_string())),
        }
    }
}
