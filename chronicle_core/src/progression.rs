//! Experience and level-ups

use crate::character::Character;
use crate::config::GameConstants;
use crate::error::GameError;
use tracing::info;

/// XP needed to advance from `level` to the next
pub fn xp_to_next_level(level: u32, rules: &GameConstants) -> u32 {
    level.saturating_mul(rules.progression.xp_per_level).max(1)
}

/// Grant experience, applying every level-up it pays for
///
/// Each level-up spends `level * xp_per_level` experience, raises max health,
/// strength and magic, and fully restores health. Returns the number of
/// levels gained.
pub fn gain_experience(
    character: &mut Character,
    amount: u32,
    rules: &GameConstants,
) -> Result<u32, GameError> {
    if character.is_dead() {
        return Err(GameError::CharacterDead);
    }

    character.experience = character.experience.saturating_add(amount);

    let progression = &rules.progression;
    let mut levels = 0;
    loop {
        let threshold = xp_to_next_level(character.level, rules);
        if character.experience < threshold {
            break;
        }
        character.experience -= threshold;
        character.level += 1;
        character.max_health = character
            .max_health
            .saturating_add(progression.max_health_per_level);
        character.strength = character
            .strength
            .saturating_add(progression.strength_per_level);
        character.magic = character.magic.saturating_add(progression.magic_per_level);
        character.health = character.max_health;
        levels += 1;

        info!(
            name = %character.name(),
            level = character.level,
            max_health = character.max_health,
            "level up"
        );
    }

    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CharacterClass;

    fn setup() -> (Character, GameConstants) {
        (Character::new("Brom", CharacterClass::Warrior), GameConstants::default())
    }

    #[test]
    fn test_no_level_up_below_threshold() {
        let (mut character, rules) = setup();
        assert_eq!(gain_experience(&mut character, 99, &rules).unwrap(), 0);
        assert_eq!(character.level, 1);
        assert_eq!(character.experience, 99);
    }

    #[test]
    fn test_single_level_up() {
        let (mut character, rules) = setup();
        character.take_damage(40);

        assert_eq!(gain_experience(&mut character, 100, &rules).unwrap(), 1);
        assert_eq!(character.level, 2);
        assert_eq!(character.experience, 0);
        assert_eq!(character.max_health, 130);
        assert_eq!(character.health, 130);
    }

    #[test]
    fn test_multiple_level_ups_from_one_grant() {
        let (mut character, rules) = setup();
        let base = CharacterClass::Warrior.base_stats();

        // 100 for level 2, 200 for level 3, 50 left over
        let levels = gain_experience(&mut character, 350, &rules).unwrap();
        assert_eq!(levels, 2);
        assert_eq!(character.level, 3);
        assert_eq!(character.experience, 50);
        assert_eq!(character.max_health, base.health + 20);
        assert_eq!(character.strength, base.strength + 4);
        assert_eq!(character.magic, base.magic + 4);
        assert_eq!(character.health, character.max_health);
    }

    #[test]
    fn test_threshold_scales_with_level() {
        let (mut character, rules) = setup();
        let levels = gain_experience(&mut character, 250, &rules).unwrap();
        assert_eq!(levels, 1);
        assert_eq!(character.level, 2);
        assert_eq!(character.experience, 150);
        assert_eq!(xp_to_next_level(character.level, &rules), 200);
    }

    #[test]
    fn test_custom_xp_rate() {
        let (mut character, mut rules) = setup();
        rules.progression.xp_per_level = 50;
        // 50 + 100 spent, 100 left which is short of the 150 for level 4
        assert_eq!(gain_experience(&mut character, 250, &rules).unwrap(), 2);
        assert_eq!(character.level, 3);
        assert_eq!(character.experience, 100);
    }

    #[test]
    fn test_dead_character_gains_nothing() {
        let (mut character, rules) = setup();
        character.take_damage(character.health);
        assert!(matches!(
            gain_experience(&mut character, 500, &rules),
            Err(GameError::CharacterDead)
        ));
        assert_eq!(character.experience, 0);
    }
}
