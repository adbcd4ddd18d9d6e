//! Per-character quest state machine
//!
//! A quest is unseen, active or completed for a given character:
//!
//! ```text
//! unseen --accept--> active --complete--> completed
//!    ^                  |
//!    +-----abandon------+
//! ```

mod stats;

pub use stats::{quest_progress, QuestProgress};

use crate::character::Character;
use crate::config::GameConstants;
use crate::error::GameError;
use crate::progression::gain_experience;
use catalog_core::{Quest, QuestCatalog, QuestId};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Result of a successful `accept_quest` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptOutcome {
    Accepted,
    /// The quest was already active; nothing changed
    AlreadyActive,
}

/// Rewards granted on quest completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestReward {
    pub quest_id: QuestId,
    pub xp_gained: u32,
    pub gold_gained: u32,
    pub levels_gained: u32,
}

fn find<'c>(catalog: &'c QuestCatalog, quest_id: &str) -> Result<&'c Quest, GameError> {
    catalog
        .get(quest_id)
        .ok_or_else(|| GameError::QuestNotFound(quest_id.to_string()))
}

/// Check every acceptance rule except "already active"
fn check_acceptable(character: &Character, quest: &Quest) -> Result<(), GameError> {
    if character.level < quest.required_level {
        return Err(GameError::InsufficientLevel {
            required: quest.required_level,
            current: character.level,
        });
    }
    if let Some(prerequisite) = quest.prerequisite.quest_id() {
        if !character.completed_quests.contains(prerequisite) {
            return Err(GameError::QuestRequirementsNotMet {
                quest: quest.id.clone(),
                prerequisite: prerequisite.to_string(),
            });
        }
    }
    if character.completed_quests.contains(&quest.id) {
        return Err(GameError::QuestAlreadyCompleted(quest.id.clone()));
    }
    Ok(())
}

pub fn accept_quest(
    character: &mut Character,
    quest_id: &str,
    catalog: &QuestCatalog,
) -> Result<AcceptOutcome, GameError> {
    let quest = find(catalog, quest_id)?;
    check_acceptable(character, quest)?;

    if !character.active_quests.insert(quest.id.clone()) {
        return Ok(AcceptOutcome::AlreadyActive);
    }

    info!(quest = quest_id, "quest accepted");
    Ok(AcceptOutcome::Accepted)
}

pub fn complete_quest(
    character: &mut Character,
    quest_id: &str,
    catalog: &QuestCatalog,
    rules: &GameConstants,
) -> Result<QuestReward, GameError> {
    let quest = find(catalog, quest_id)?;
    if !character.active_quests.contains(quest_id) {
        return Err(GameError::QuestNotActive(quest_id.to_string()));
    }
    if character.is_dead() {
        return Err(GameError::CharacterDead);
    }

    character.active_quests.remove(quest_id);
    character.completed_quests.insert(quest.id.clone());
    let levels_gained = gain_experience(character, quest.reward_xp, rules)?;
    character.add_gold(quest.reward_gold);

    info!(
        quest = quest_id,
        xp = quest.reward_xp,
        gold = quest.reward_gold,
        "quest completed"
    );
    Ok(QuestReward {
        quest_id: quest.id.clone(),
        xp_gained: quest.reward_xp,
        gold_gained: quest.reward_gold,
        levels_gained,
    })
}

pub fn abandon_quest(character: &mut Character, quest_id: &str) -> Result<(), GameError> {
    if !character.active_quests.remove(quest_id) {
        return Err(GameError::QuestNotActive(quest_id.to_string()));
    }
    info!(quest = quest_id, "quest abandoned");
    Ok(())
}

pub fn is_active(character: &Character, quest_id: &str) -> bool {
    character.active_quests.contains(quest_id)
}

pub fn is_completed(character: &Character, quest_id: &str) -> bool {
    character.completed_quests.contains(quest_id)
}

/// Whether `accept_quest` would newly activate the quest
pub fn can_accept(character: &Character, quest_id: &str, catalog: &QuestCatalog) -> bool {
    catalog.get(quest_id).is_some_and(|quest| {
        !is_active(character, quest_id) && check_acceptable(character, quest).is_ok()
    })
}

/// Every quest the character could accept right now
pub fn available_quests<'c>(character: &Character, catalog: &'c QuestCatalog) -> Vec<&'c Quest> {
    catalog
        .iter()
        .filter(|quest| can_accept(character, &quest.id, catalog))
        .collect()
}

/// Quest ids from the root of the prerequisite chain to `quest_id`
pub fn prerequisite_chain(
    catalog: &QuestCatalog,
    quest_id: &str,
) -> Result<Vec<QuestId>, GameError> {
    Ok(catalog.prerequisite_chain(quest_id)?)
}

pub fn active_quest_details<'c>(character: &Character, catalog: &'c QuestCatalog) -> Vec<&'c Quest> {
    character
        .active_quests
        .iter()
        .filter_map(|id| catalog.get(id))
        .collect()
}

pub fn completed_quest_details<'c>(
    character: &Character,
    catalog: &'c QuestCatalog,
) -> Vec<&'c Quest> {
    character
        .completed_quests
        .iter()
        .filter_map(|id| catalog.get(id))
        .collect()
}
