//! Save files
//!
//! One `{name}_save.txt` per character, holding `KEY: value` lines:
//!
//! ```text
//! NAME: Aria
//! CLASS: Warrior
//! LEVEL: 2
//! ...
//! INVENTORY: health_potion,rusty_sword
//! ACTIVE_QUESTS:
//! COMPLETED_QUESTS: first_steps
//! EQUIPPED_WEAPON: iron_sword
//! EQUIPPED_ARMOR:
//! ```
//!
//! List values are comma-joined; an empty value is an empty list.

use crate::character::{validate_name, Character};
use crate::config::GameConstants;
use crate::error::GameError;
use crate::types::CharacterClass;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const SAVE_SUFFIX: &str = "_save.txt";

/// Directory of character save files
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

/// Ids are written comma-joined on one trimmed line, so only ids that
/// survive that encoding can be saved
fn check_ids(character: &Character, path: &Path) -> Result<(), GameError> {
    let ids = character
        .inventory
        .iter()
        .chain(&character.active_quests)
        .chain(&character.completed_quests)
        .chain(&character.equipped_weapon)
        .chain(&character.equipped_armor);

    for id in ids {
        let unsavable = id.is_empty()
            || id.trim() != id
            || id.contains(',')
            || id.chars().any(char::is_control);
        if unsavable {
            return Err(GameError::InvalidSaveData {
                path: path.to_path_buf(),
                reason: format!("id {:?} cannot be stored in a save file", id),
            });
        }
    }
    Ok(())
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SaveStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the save file for `name`
    pub fn path_for(&self, name: &str) -> Result<PathBuf, GameError> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{}{}", name, SAVE_SUFFIX)))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Write a character's save file, creating the directory if needed
    pub fn save(&self, character: &Character) -> Result<PathBuf, GameError> {
        let path = self.path_for(character.name())?;
        check_ids(character, &path)?;
        std::fs::create_dir_all(&self.dir).map_err(|error| GameError::Storage {
            path: self.dir.clone(),
            error,
        })?;
        std::fs::write(&path, serialize(character)).map_err(|error| GameError::Storage {
            path: path.clone(),
            error,
        })?;

        info!(name = %character.name(), path = ?path, "saved character");
        Ok(path)
    }

    pub fn load(&self, name: &str, rules: &GameConstants) -> Result<Character, GameError> {
        let path = self.path_for(name)?;
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => GameError::CharacterNotFound(name.to_string()),
            _ => GameError::SaveFileCorrupted {
                path: path.clone(),
                reason: e.to_string(),
            },
        })?;

        let character = deserialize(&content, &path, rules)?;
        info!(name = %character.name(), path = ?path, "loaded character");
        Ok(character)
    }

    /// Names of all saved characters, sorted
    pub fn list(&self) -> Result<Vec<String>, GameError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => {
                return Err(GameError::Storage {
                    path: self.dir.clone(),
                    error,
                })
            }
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|error| GameError::Storage {
                path: self.dir.clone(),
                error,
            })?;
            let file_name = entry.file_name();
            if let Some(name) = file_name
                .to_str()
                .and_then(|f| f.strip_suffix(SAVE_SUFFIX))
                .filter(|n| !n.is_empty())
            {
                names.push(name.to_string());
            }
        }
        names.sort();
        debug!(dir = ?self.dir, count = names.len(), "listed saves");
        Ok(names)
    }

    pub fn delete(&self, name: &str) -> Result<(), GameError> {
        let path = self.path_for(name)?;
        std::fs::remove_file(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => GameError::CharacterNotFound(name.to_string()),
            _ => GameError::Storage {
                path: path.clone(),
                error: e,
            },
        })?;
        info!(name, "deleted save");
        Ok(())
    }
}

// ============================================================================
// Format
// ============================================================================

fn join<'s>(values: impl IntoIterator<Item = &'s String>) -> String {
    values
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

pub fn serialize(character: &Character) -> String {
    let fields = [
        ("NAME", character.name().to_string()),
        ("CLASS", character.class().to_string()),
        ("LEVEL", character.level.to_string()),
        ("HEALTH", character.health.to_string()),
        ("MAX_HEALTH", character.max_health.to_string()),
        ("STRENGTH", character.strength.to_string()),
        ("MAGIC", character.magic.to_string()),
        ("EXPERIENCE", character.experience.to_string()),
        ("GOLD", character.gold.to_string()),
        ("INVENTORY", join(&character.inventory)),
        ("ACTIVE_QUESTS", join(&character.active_quests)),
        ("COMPLETED_QUESTS", join(&character.completed_quests)),
        ("EQUIPPED_WEAPON", character.equipped_weapon.clone().unwrap_or_default()),
        ("EQUIPPED_ARMOR", character.equipped_armor.clone().unwrap_or_default()),
    ];

    fields
        .iter()
        .map(|(key, value)| format!("{}: {}\n", key, value))
        .collect()
}

struct Fields<'c> {
    values: HashMap<String, &'c str>,
    path: &'c Path,
}

impl<'c> Fields<'c> {
    fn invalid(&self, reason: String) -> GameError {
        GameError::InvalidSaveData {
            path: self.path.to_path_buf(),
            reason,
        }
    }

    fn text(&self, key: &str) -> Result<&'c str, GameError> {
        self.values
            .get(key)
            .copied()
            .ok_or_else(|| self.invalid(format!("missing field {}", key)))
    }

    fn number(&self, key: &str) -> Result<u32, GameError> {
        let value = self.text(key)?;
        value
            .parse()
            .map_err(|_| self.invalid(format!("{} is not a number: '{}'", key, value)))
    }

    fn list(&self, key: &str) -> Result<Vec<String>, GameError> {
        Ok(split_list(self.text(key)?))
    }

    fn optional(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn deserialize(
    content: &str,
    path: &Path,
    rules: &GameConstants,
) -> Result<Character, GameError> {
    let mut values = HashMap::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| GameError::SaveFileCorrupted {
                path: path.to_path_buf(),
                reason: format!("line {} has no ':' separator", idx + 1),
            })?;
        let key = key.trim().to_ascii_uppercase();
        if values.contains_key(&key) {
            return Err(GameError::SaveFileCorrupted {
                path: path.to_path_buf(),
                reason: format!("line {} repeats field {}", idx + 1, key),
            });
        }
        values.insert(key, value.trim());
    }
    let fields = Fields { values, path };

    let class: CharacterClass = fields
        .text("CLASS")?
        .parse()
        .map_err(|e: GameError| fields.invalid(e.to_string()))?;

    let mut character = Character::restore(
        fields.text("NAME")?.to_string(),
        class,
        fields.number("LEVEL")?,
        fields.number("HEALTH")?,
        fields.number("MAX_HEALTH")?,
        fields.number("STRENGTH")?,
        fields.number("MAGIC")?,
        fields.number("EXPERIENCE")?,
        fields.number("GOLD")?,
    );
    character.inventory = fields.list("INVENTORY")?;
    character.active_quests = fields.list("ACTIVE_QUESTS")?.into_iter().collect();
    character.completed_quests = fields.list("COMPLETED_QUESTS")?.into_iter().collect();
    character.equipped_weapon = fields.optional("EQUIPPED_WEAPON");
    character.equipped_armor = fields.optional("EQUIPPED_ARMOR");

    character
        .check_invariants(rules)
        .map_err(|reason| fields.invalid(reason))?;
    Ok(character)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, SaveStore, GameConstants) {
        let dir = TempDir::new().unwrap();
        let store = SaveStore::new(dir.path().join("saves"));
        (dir, store, GameConstants::default())
    }

    fn sample() -> Character {
        let mut character = Character::new("Aria", CharacterClass::Rogue);
        character.level = 3;
        character.experience = 42;
        character.health = 70;
        character.gold = 315;
        character.inventory = vec!["health_potion".into(), "health_potion".into(), "chainmail".into()];
        character.active_quests.insert("orc_raid".into());
        character.completed_quests.insert("first_steps".into());
        character.completed_quests.insert("goblin_trouble".into());
        character.equipped_weapon = Some("iron_sword".into());
        character
    }

    #[test]
    fn test_save_and_load() {
        let (_dir, store, rules) = setup();
        let character = sample();

        let path = store.save(&character).unwrap();
        assert!(path.ends_with("Aria_save.txt"));
        assert!(store.exists("Aria"));

        let loaded = store.load("Aria", &rules).unwrap();
        assert_eq!(loaded, character);
    }

    #[test]
    fn test_single_and_empty_lists() {
        let (_dir, store, rules) = setup();
        let mut character = Character::new("Solo", CharacterClass::Mage);
        character.inventory = vec!["health_potion".into()];

        store.save(&character).unwrap();
        let loaded = store.load("Solo", &rules).unwrap();
        assert_eq!(loaded.inventory, vec!["health_potion".to_string()]);
        assert!(loaded.active_quests.is_empty());
        assert!(loaded.equipped_armor.is_none());
    }

    #[test]
    fn test_load_missing() {
        let (_dir, store, rules) = setup();
        assert!(matches!(
            store.load("Ghost", &rules),
            Err(GameError::CharacterNotFound(_))
        ));
    }

    #[test]
    fn test_load_unreadable() {
        let (_dir, store, rules) = setup();
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(store.dir().join("Bad_save.txt"), [0xc3, 0x28, 0xff]).unwrap();
        assert!(matches!(
            store.load("Bad", &rules),
            Err(GameError::SaveFileCorrupted { .. })
        ));
    }

    #[test]
    fn test_line_without_separator() {
        let rules = GameConstants::default();
        let content = serialize(&sample()) + "garbage line\n";
        assert!(matches!(
            deserialize(&content, Path::new("x"), &rules),
            Err(GameError::SaveFileCorrupted { .. })
        ));
    }

    #[test]
    fn test_repeated_field() {
        let rules = GameConstants::default();
        let content = serialize(&sample()) + "GOLD: 999999\n";
        match deserialize(&content, Path::new("x"), &rules) {
            Err(GameError::SaveFileCorrupted { reason, .. }) => assert!(reason.contains("GOLD")),
            other => panic!("Expected SaveFileCorrupted, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_field() {
        let rules = GameConstants::default();
        let content: String = serialize(&sample())
            .lines()
            .filter(|l| !l.starts_with("GOLD"))
            .map(|l| format!("{}\n", l))
            .collect();
        match deserialize(&content, Path::new("x"), &rules) {
            Err(GameError::InvalidSaveData { reason, .. }) => assert!(reason.contains("GOLD")),
            other => panic!("Expected InvalidSaveData, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_number_and_class() {
        let rules = GameConstants::default();
        let content = serialize(&sample()).replace("LEVEL: 3", "LEVEL: three");
        assert!(matches!(
            deserialize(&content, Path::new("x"), &rules),
            Err(GameError::InvalidSaveData { .. })
        ));

        let content = serialize(&sample()).replace("CLASS: Rogue", "CLASS: Bard");
        assert!(matches!(
            deserialize(&content, Path::new("x"), &rules),
            Err(GameError::InvalidSaveData { .. })
        ));
    }

    #[test]
    fn test_invariant_violation_rejected() {
        let rules = GameConstants::default();
        let content = serialize(&sample()).replace("HEALTH: 70", "HEALTH: 7000");
        assert!(matches!(
            deserialize(&content, Path::new("x"), &rules),
            Err(GameError::InvalidSaveData { .. })
        ));
    }

    #[test]
    fn test_list_and_delete() {
        let (_dir, store, _) = setup();
        assert!(store.list().unwrap().is_empty());

        store.save(&Character::new("Zed", CharacterClass::Cleric)).unwrap();
        store.save(&Character::new("Abe", CharacterClass::Warrior)).unwrap();
        std::fs::write(store.dir().join("notes.txt"), "not a save").unwrap();
        assert_eq!(store.list().unwrap(), vec!["Abe", "Zed"]);

        store.delete("Zed").unwrap();
        assert_eq!(store.list().unwrap(), vec!["Abe"]);
        assert!(matches!(
            store.delete("Zed"),
            Err(GameError::CharacterNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_names() {
        let (_dir, store, rules) = setup();
        for name in ["", "   ", "../escape", "a/b", ".."] {
            assert!(matches!(
                store.load(name, &rules),
                Err(GameError::InvalidCharacterName(_))
            ));
        }
        for name in ["bad/name", "Eve\nGOLD: 999999\nX", " padded"] {
            let character = Character::new(name, CharacterClass::Rogue);
            assert!(matches!(
                store.save(&character),
                Err(GameError::InvalidCharacterName(_))
            ));
        }
        assert!(!store.dir().exists());
    }

    #[test]
    fn test_unsavable_ids_rejected() {
        let (_dir, store, rules) = setup();
        for id in ["a,b", " spaced ", ""] {
            let mut character = sample();
            character.inventory.push(id.to_string());
            assert!(matches!(
                store.save(&character),
                Err(GameError::InvalidSaveData { .. })
            ));
        }

        let mut character = sample();
        character.completed_quests.insert("one,two".into());
        assert!(store.save(&character).is_err());
        assert!(!store.exists("Aria"));

        // Ids that survive the encoding load back unchanged
        let mut character = sample();
        character.inventory.push("Odd Item-2".into());
        store.save(&character).unwrap();
        assert_eq!(store.load("Aria", &rules).unwrap(), character);
    }
}
