//! Aggregate quest statistics

use crate::character::Character;
use catalog_core::QuestCatalog;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestProgress {
    pub active: usize,
    pub completed: usize,
    /// Quests in the catalog
    pub total: usize,
    /// `completed / total * 100`, or 0 for an empty catalog
    pub completion_percent: f64,
    pub total_xp: u64,
    pub total_gold: u64,
}

pub fn quest_progress(character: &Character, catalog: &QuestCatalog) -> QuestProgress {
    let completed: Vec<_> = character
        .completed_quests
        .iter()
        .filter_map(|id| catalog.get(id))
        .collect();

    let total = catalog.len();
    let completion_percent = if total == 0 {
        0.0
    } else {
        completed.len() as f64 / total as f64 * 100.0
    };

    QuestProgress {
        active: character.active_quests.len(),
        completed: completed.len(),
        total,
        completion_percent,
        total_xp: completed.iter().map(|q| u64::from(q.reward_xp)).sum(),
        total_gold: completed.iter().map(|q| u64::from(q.reward_gold)).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CharacterClass;
    use catalog_core::{Prerequisite, Quest};

    #[test]
    fn test_empty_catalog() {
        let character = Character::new("Nim", CharacterClass::Mage);
        let progress = quest_progress(&character, &QuestCatalog::new());
        assert_eq!(progress.total, 0);
        assert_eq!(progress.completion_percent, 0.0);
    }

    #[test]
    fn test_progress_totals() {
        let mut catalog = QuestCatalog::new();
        for (id, xp, gold) in [("a", 50, 25), ("b", 100, 40), ("c", 10, 5), ("d", 1, 1)] {
            catalog.insert(Quest::new(id, id, xp, gold, 1, Prerequisite::None));
        }

        let mut character = Character::new("Nim", CharacterClass::Mage);
        character.completed_quests.insert("a".into());
        character.completed_quests.insert("b".into());
        character.active_quests.insert("c".into());

        let progress = quest_progress(&character, &catalog);
        assert_eq!(progress.active, 1);
        assert_eq!(progress.completed, 2);
        assert_eq!(progress.total, 4);
        assert!((progress.completion_percent - 50.0).abs() < f64::EPSILON);
        assert_eq!(progress.total_xp, 150);
        assert_eq!(progress.total_gold, 65);
    }
}
