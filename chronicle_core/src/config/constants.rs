//! Game constants configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use super::ConfigError;

/// Tunable game constants
///
/// Every field has a default, so a TOML file only needs the values it
/// changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub character: CharacterConstants,
    #[serde(default)]
    pub progression: ProgressionConstants,
    #[serde(default)]
    pub inventory: InventoryConstants,
    #[serde(default)]
    pub combat: CombatConstants,
}

impl GameConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let constants = Self::parse(&content)?;
        debug!(path = ?path, "loaded game constants");
        Ok(constants)
    }

    /// Parse and validate constants from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let constants: GameConstants = toml::from_str(content)?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: &str| Err(ConfigError::Validation(msg.to_string()));

        if self.progression.xp_per_level == 0 {
            return fail("progression.xp_per_level must be positive");
        }
        if self.inventory.max_size == 0 {
            return fail("inventory.max_size must be positive");
        }
        if self.inventory.sell_divisor == 0 {
            return fail("inventory.sell_divisor must be positive");
        }
        if self.combat.defense_divisor == 0 {
            return fail("combat.defense_divisor must be positive");
        }
        if self.combat.minimum_damage == 0 {
            return fail("combat.minimum_damage must be at least 1");
        }
        if self.character.revive_health_percent == 0 || self.character.revive_health_percent > 100 {
            return fail("character.revive_health_percent must be in 1..=100");
        }
        for (name, chance) in [
            ("combat.escape_chance", self.combat.escape_chance),
            ("combat.critical_strike_chance", self.combat.critical_strike_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::Validation(format!(
                    "{} must be between 0 and 1, got {}",
                    name, chance
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterConstants {
    /// Gold a new character starts with
    #[serde(default = "default_starting_gold")]
    pub starting_gold: u32,
    #[serde(default = "default_revive_cost")]
    pub revive_cost: u32,
    /// Percentage of max health restored on revive
    #[serde(default = "default_revive_health_percent")]
    pub revive_health_percent: u32,
}

impl Default for CharacterConstants {
    fn default() -> Self {
        CharacterConstants {
            starting_gold: default_starting_gold(),
            revive_cost: default_revive_cost(),
            revive_health_percent: default_revive_health_percent(),
        }
    }
}

fn default_starting_gold() -> u32 {
    100
}
fn default_revive_cost() -> u32 {
    50
}
fn default_revive_health_percent() -> u32 {
    50
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConstants {
    /// Level-up threshold is `level * xp_per_level`
    #[serde(default = "default_xp_per_level")]
    pub xp_per_level: u32,
    #[serde(default = "default_max_health_per_level")]
    pub max_health_per_level: u32,
    #[serde(default = "default_stat_per_level")]
    pub strength_per_level: u32,
    #[serde(default = "default_stat_per_level")]
    pub magic_per_level: u32,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            xp_per_level: default_xp_per_level(),
            max_health_per_level: default_max_health_per_level(),
            strength_per_level: default_stat_per_level(),
            magic_per_level: default_stat_per_level(),
        }
    }
}

fn default_xp_per_level() -> u32 {
    100
}
fn default_max_health_per_level() -> u32 {
    10
}
fn default_stat_per_level() -> u32 {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryConstants {
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    /// Items sell for `cost / sell_divisor`, rounded down
    #[serde(default = "default_sell_divisor")]
    pub sell_divisor: u32,
}

impl Default for InventoryConstants {
    fn default() -> Self {
        InventoryConstants {
            max_size: default_max_size(),
            sell_divisor: default_sell_divisor(),
        }
    }
}

fn default_max_size() -> usize {
    20
}
fn default_sell_divisor() -> u32 {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatConstants {
    /// damage = max(minimum_damage, strength - defender_strength / defense_divisor)
    #[serde(default = "default_defense_divisor")]
    pub defense_divisor: u32,
    #[serde(default = "default_minimum_damage")]
    pub minimum_damage: u32,
    #[serde(default = "default_half_chance")]
    pub escape_chance: f64,
    #[serde(default = "default_half_chance")]
    pub critical_strike_chance: f64,
    #[serde(default = "default_heal_amount")]
    pub heal_amount: u32,
    /// Rounds a special ability is unavailable after use
    #[serde(default = "default_ability_cooldown")]
    pub ability_cooldown: u32,
    #[serde(default = "default_double")]
    pub power_strike_multiplier: u32,
    #[serde(default = "default_double")]
    pub fireball_multiplier: u32,
    #[serde(default = "default_triple")]
    pub critical_strike_multiplier: u32,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            defense_divisor: default_defense_divisor(),
            minimum_damage: default_minimum_damage(),
            escape_chance: default_half_chance(),
            critical_strike_chance: default_half_chance(),
            heal_amount: default_heal_amount(),
            ability_cooldown: default_ability_cooldown(),
            power_strike_multiplier: default_double(),
            fireball_multiplier: default_double(),
            critical_strike_multiplier: default_triple(),
        }
    }
}

fn default_defense_divisor() -> u32 {
    4
}
fn default_minimum_damage() -> u32 {
    1
}
fn default_half_chance() -> f64 {
    0.5
}
fn default_heal_amount() -> u32 {
    30
}
fn default_ability_cooldown() -> u32 {
    2
}
fn default_double() -> u32 {
    2
}
fn default_triple() -> u32 {
    3
}
