//! Combat results and the battle log

use super::ability::{AbilityEffect, SpecialAbility};
use super::enemy::Enemy;
use crate::types::Side;
use serde::{Deserialize, Serialize};

/// Rewards for defeating an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rewards {
    pub xp: u32,
    pub gold: u32,
}

/// Rewards for defeating `enemy`; depends on nothing but the enemy record
pub fn victory_rewards(enemy: &Enemy) -> Rewards {
    Rewards {
        xp: enemy.xp_reward,
        gold: enemy.gold_reward,
    }
}

/// A battle that ended with one side at zero health
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    pub winner: Side,
    pub xp_gained: u32,
    pub gold_gained: u32,
    pub levels_gained: u32,
    /// Number of the round the battle ended in
    pub turns: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Resolved(BattleResult),
    /// The player fled; no rewards
    Escaped,
}

impl BattleOutcome {
    pub fn is_victory(&self) -> bool {
        matches!(self, BattleOutcome::Resolved(r) if r.winner == Side::Player)
    }
}

/// One entry in the battle log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    Started {
        enemy: String,
    },
    Attack {
        attacker: Side,
        damage: u32,
        /// Defender health after the hit
        remaining: u32,
    },
    Ability {
        ability: SpecialAbility,
        effect: AbilityEffect,
    },
    FleeFailed,
    Escaped,
    Victory {
        xp: u32,
        gold: u32,
    },
    Defeat,
}

/// Events produced by one turn (or round) and the outcome if the battle ended
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TurnReport {
    pub events: Vec<CombatEvent>,
    pub outcome: Option<BattleOutcome>,
}
