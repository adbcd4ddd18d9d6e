//! Class special abilities

use super::enemy::Enemy;
use super::resolution::Combatant;
use crate::character::Character;
use crate::config::CombatConstants;
use crate::types::CharacterClass;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialAbility {
    /// Warrior: strength-scaled hit
    PowerStrike,
    /// Mage: magic-scaled hit
    Fireball,
    /// Rogue: large strength-scaled hit that can miss
    CriticalStrike,
    /// Cleric: restore health
    Heal,
}

/// What an ability did when used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityEffect {
    Damage(u32),
    Healed(u32),
    Missed,
}

impl SpecialAbility {
    pub fn for_class(class: CharacterClass) -> Self {
        match class {
            CharacterClass::Warrior => SpecialAbility::PowerStrike,
            CharacterClass::Mage => SpecialAbility::Fireball,
            CharacterClass::Rogue => SpecialAbility::CriticalStrike,
            CharacterClass::Cleric => SpecialAbility::Heal,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpecialAbility::PowerStrike => "Power Strike",
            SpecialAbility::Fireball => "Fireball",
            SpecialAbility::CriticalStrike => "Critical Strike",
            SpecialAbility::Heal => "Heal",
        }
    }

    /// Use the ability; damage abilities ignore the enemy's strength
    pub fn resolve(
        &self,
        character: &mut Character,
        enemy: &mut Enemy,
        rules: &CombatConstants,
        rng: &mut impl Rng,
    ) -> AbilityEffect {
        match self {
            SpecialAbility::PowerStrike => AbilityEffect::Damage(
                enemy.take_damage(character.strength.saturating_mul(rules.power_strike_multiplier)),
            ),
            SpecialAbility::Fireball => AbilityEffect::Damage(
                enemy.take_damage(character.magic.saturating_mul(rules.fireball_multiplier)),
            ),
            SpecialAbility::CriticalStrike => {
                if rng.gen::<f64>() < rules.critical_strike_chance {
                    AbilityEffect::Damage(enemy.take_damage(
                        character
                            .strength
                            .saturating_mul(rules.critical_strike_multiplier),
                    ))
                } else {
                    AbilityEffect::Missed
                }
            }
            SpecialAbility::Heal => AbilityEffect::Healed(character.heal(rules.heal_amount)),
        }
    }
}

impl fmt::Display for SpecialAbility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EnemyKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(class: CharacterClass) -> (Character, Enemy, CombatConstants, ChaCha8Rng) {
        (
            Character::new("Tess", class),
            Enemy::new(EnemyKind::Dragon),
            CombatConstants::default(),
            ChaCha8Rng::seed_from_u64(7),
        )
    }

    #[test]
    fn test_power_strike() {
        let (mut character, mut enemy, rules, mut rng) = setup(CharacterClass::Warrior);
        let ability = SpecialAbility::for_class(character.class());
        let effect = ability.resolve(&mut character, &mut enemy, &rules, &mut rng);
        assert_eq!(effect, AbilityEffect::Damage(30));
        assert_eq!(enemy.health, 170);
    }

    #[test]
    fn test_fireball() {
        let (mut character, mut enemy, rules, mut rng) = setup(CharacterClass::Mage);
        let effect =
            SpecialAbility::Fireball.resolve(&mut character, &mut enemy, &rules, &mut rng);
        assert_eq!(effect, AbilityEffect::Damage(40));
    }

    #[test]
    fn test_heal_clamps() {
        let (mut character, mut enemy, rules, mut rng) = setup(CharacterClass::Cleric);
        character.take_damage(10);
        let effect = SpecialAbility::Heal.resolve(&mut character, &mut enemy, &rules, &mut rng);
        assert_eq!(effect, AbilityEffect::Healed(10));
        assert_eq!(character.health, character.max_health);
        assert_eq!(enemy.health, enemy.max_health);
    }

    #[test]
    fn test_critical_strike_outcomes() {
        let (mut character, _, mut rules, mut rng) = setup(CharacterClass::Rogue);

        rules.critical_strike_chance = 1.0;
        let mut enemy = Enemy::new(EnemyKind::Dragon);
        let effect =
            SpecialAbility::CriticalStrike.resolve(&mut character, &mut enemy, &rules, &mut rng);
        assert_eq!(effect, AbilityEffect::Damage(36));

        rules.critical_strike_chance = 0.0;
        let effect =
            SpecialAbility::CriticalStrike.resolve(&mut character, &mut enemy, &rules, &mut rng);
        assert_eq!(effect, AbilityEffect::Missed);
        assert_eq!(enemy.health, 200 - 36);
    }

    #[test]
    fn test_critical_strike_rate() {
        let (mut character, _, rules, mut rng) = setup(CharacterClass::Rogue);
        let trials = 10_000;
        let mut hits = 0;

        for _ in 0..trials {
            let mut enemy = Enemy::new(EnemyKind::Dragon);
            let effect = SpecialAbility::CriticalStrike.resolve(
                &mut character,
                &mut enemy,
                &rules,
                &mut rng,
            );
            if matches!(effect, AbilityEffect::Damage(_)) {
                hits += 1;
            }
        }

        let rate = hits as f64 / trials as f64;
        assert!(rate > 0.47 && rate < 0.53, "Hit rate was {}", rate);
    }
}
