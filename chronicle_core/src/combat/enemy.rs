//! Enemies spawned for an encounter

use crate::error::GameError;
use crate::types::EnemyKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub strength: u32,
    pub magic: u32,
    pub xp_reward: u32,
    pub gold_reward: u32,
}

impl Enemy {
    pub fn new(kind: EnemyKind) -> Self {
        let template = kind.template();
        Enemy {
            kind,
            name: kind.to_string(),
            health: template.health,
            max_health: template.health,
            strength: template.strength,
            magic: template.magic,
            xp_reward: template.xp_reward,
            gold_reward: template.gold_reward,
        }
    }

    /// An enemy suited to a character level
    pub fn for_level(level: u32) -> Self {
        Self::new(EnemyKind::for_level(level))
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

/// Spawn an enemy by type name
pub fn create_enemy(name: &str) -> Result<Enemy, GameError> {
    Ok(Enemy::new(name.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_enemy() {
        let goblin = create_enemy("goblin").unwrap();
        assert_eq!(goblin.kind, EnemyKind::Goblin);
        assert_eq!(goblin.health, 50);
        assert_eq!(goblin.max_health, 50);
        assert_eq!(goblin.strength, 8);
        assert_eq!(goblin.xp_reward, 25);
        assert_eq!(goblin.gold_reward, 10);
    }

    #[test]
    fn test_unknown_enemy() {
        assert!(matches!(
            create_enemy("beholder"),
            Err(GameError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_for_level() {
        assert_eq!(Enemy::for_level(4).kind, EnemyKind::Orc);
        assert_eq!(Enemy::for_level(9).name, "Dragon");
    }
}
