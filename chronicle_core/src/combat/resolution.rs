//! Damage resolution shared by both sides of a battle

use super::enemy::Enemy;
use crate::character::Character;
use crate::config::CombatConstants;

/// Anything that can attack and be attacked
pub trait Combatant {
    fn name(&self) -> &str;
    fn strength(&self) -> u32;
    fn magic(&self) -> u32;
    fn health(&self) -> u32;

    /// Lose up to `amount` health, returning what was actually lost
    fn take_damage(&mut self, amount: u32) -> u32;

    fn is_defeated(&self) -> bool {
        self.health() == 0
    }
}

impl Combatant for Character {
    fn name(&self) -> &str {
        Character::name(self)
    }

    fn strength(&self) -> u32 {
        self.strength
    }

    fn magic(&self) -> u32 {
        self.magic
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn take_damage(&mut self, amount: u32) -> u32 {
        Character::take_damage(self, amount)
    }
}

impl Combatant for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn strength(&self) -> u32 {
        self.strength
    }

    fn magic(&self) -> u32 {
        self.magic
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.health);
        self.health -= lost;
        lost
    }
}

/// Basic attack damage
///
/// `max(minimum_damage, attacker.strength - defender.strength / defense_divisor)`
pub fn calculate_damage(
    attacker: &impl Combatant,
    defender: &impl Combatant,
    rules: &CombatConstants,
) -> u32 {
    let mitigation = defender.strength() / rules.defense_divisor.max(1);
    attacker
        .strength()
        .saturating_sub(mitigation)
        .max(rules.minimum_damage)
}

/// Resolve a basic attack, returning the damage dealt
pub fn resolve_attack(
    attacker: &impl Combatant,
    defender: &mut impl Combatant,
    rules: &CombatConstants,
) -> u32 {
    let damage = calculate_damage(attacker, defender, rules);
    defender.take_damage(damage)
}
