//! Combat - enemies, damage resolution, abilities and the battle state machine

mod ability;
mod battle;
mod enemy;
mod resolution;
mod result;

pub use ability::{AbilityEffect, SpecialAbility};
pub use battle::{Battle, BattleState, PlayerAction};
pub use enemy::{create_enemy, Enemy};
pub use resolution::{calculate_damage, resolve_attack, Combatant};
pub use result::{victory_rewards, BattleOutcome, BattleResult, CombatEvent, Rewards, TurnReport};
