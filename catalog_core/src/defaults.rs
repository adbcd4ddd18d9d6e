//! Built-in content shipped with the game

use crate::CatalogError;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_QUESTS: &str = "\
QUEST_ID: first_steps
TITLE: First Steps
DESCRIPTION: Clear the rats out of the tavern cellar.
REWARD_XP: 50
REWARD_GOLD: 25
REQUIRED_LEVEL: 1
PREREQUISITE: NONE

QUEST_ID: goblin_trouble
TITLE: Goblin Trouble
DESCRIPTION: Drive the goblins away from the farmlands.
REWARD_XP: 100
REWARD_GOLD: 40
REQUIRED_LEVEL: 1
PREREQUISITE: first_steps

QUEST_ID: saving_freetown
TITLE: Saving FreeTown
DESCRIPTION: Save the town from the enemy!
REWARD_XP: 250
REWARD_GOLD: 50
REQUIRED_LEVEL: 2
PREREQUISITE: goblin_trouble

QUEST_ID: lost_relic
TITLE: The Lost Relic
DESCRIPTION: Recover the temple relic from the old ruins.
REWARD_XP: 150
REWARD_GOLD: 75
REQUIRED_LEVEL: 3
PREREQUISITE: first_steps

QUEST_ID: orc_raid
TITLE: Orc Raid
DESCRIPTION: Break the orc warband before it reaches the walls.
REWARD_XP: 300
REWARD_GOLD: 120
REQUIRED_LEVEL: 4
PREREQUISITE: saving_freetown

QUEST_ID: dragon_lair
TITLE: The Dragon's Lair
DESCRIPTION: Slay the dragon nesting in the northern peaks.
REWARD_XP: 1000
REWARD_GOLD: 500
REQUIRED_LEVEL: 6
PREREQUISITE: orc_raid
";

pub const DEFAULT_ITEMS: &str = "\
ITEM_ID: rusty_sword
NAME: Rusty Sword
TYPE: weapon
EFFECT: strength:2
COST: 15
DESCRIPTION: An old sword.

ITEM_ID: iron_sword
NAME: Iron Sword
TYPE: weapon
EFFECT: strength:5
COST: 60
DESCRIPTION: A well balanced blade.

ITEM_ID: arcane_focus
NAME: Arcane Focus
TYPE: weapon
EFFECT: magic:5
COST: 60
DESCRIPTION: A crystal that sharpens spellwork.

ITEM_ID: leather_armor
NAME: Leather Armor
TYPE: armor
EFFECT: max_health:10
COST: 30
DESCRIPTION: Light and flexible.

ITEM_ID: chainmail
NAME: Chainmail
TYPE: armor
EFFECT: max_health:25
COST: 90
DESCRIPTION: Heavy rings of steel.

ITEM_ID: health_potion
NAME: Health Potion
TYPE: consumable
EFFECT: health:20
COST: 25
DESCRIPTION: Restores a little health.

ITEM_ID: greater_health_potion
NAME: Greater Health Potion
TYPE: consumable
EFFECT: health:50
COST: 60
DESCRIPTION: Restores a lot of health.

ITEM_ID: strength_tonic
NAME: Strength Tonic
TYPE: consumable
EFFECT: strength:1
COST: 100
DESCRIPTION: Permanently hardens the drinker's muscles.
";

/// Write `quests.txt` and `items.txt` into `dir` unless they already exist
///
/// Returns the paths that were created.
pub fn write_default_data_files(dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    std::fs::create_dir_all(dir).map_err(|error| CatalogError::Io {
        error,
        path: dir.to_path_buf(),
    })?;

    let mut created = Vec::new();
    for (name, content) in [("quests.txt", DEFAULT_QUESTS), ("items.txt", DEFAULT_ITEMS)] {
        let path = dir.join(name);
        if path.exists() {
            continue;
        }
        std::fs::write(&path, content).map_err(|error| CatalogError::Io {
            error,
            path: path.clone(),
        })?;
        info!(path = ?path, "created default data file");
        created.push(path);
    }

    Ok(created)
}
