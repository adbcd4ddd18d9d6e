use crate::config::{parse_blocks, Block, ItemConfig, QuestConfig};
use crate::defaults::{DEFAULT_ITEMS, DEFAULT_QUESTS};
use crate::quest::{Prerequisite, Quest, QuestId};
use crate::{CatalogError, QuestGraphError};
use item_core::{Effect, Item, ItemId, ItemKind};
use std::collections::{BTreeMap, HashSet};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Read a catalog file, mapping IO failures to catalog errors
fn read_catalog(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CatalogError::MissingDataFile {
            path: path.to_path_buf(),
        },
        _ => CatalogError::CorruptedData {
            reason: e.to_string(),
            path: path.to_path_buf(),
        },
    })
}

/// Split content into blocks, tagging format errors with the origin path
fn read_blocks(content: &str, origin: &Path) -> Result<Vec<Block>, CatalogError> {
    parse_blocks(content).map_err(|(line, message)| CatalogError::InvalidDataFormat {
        message,
        line,
        path: origin.to_path_buf(),
    })
}

fn invalid(block: &Block, message: String, origin: &Path) -> CatalogError {
    CatalogError::InvalidDataFormat {
        message,
        line: block.line,
        path: origin.to_path_buf(),
    }
}

/// Registry of all quest definitions
#[derive(Debug, Clone, Default)]
pub struct QuestCatalog {
    quests: BTreeMap<QuestId, Quest>,
}

impl QuestCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a quest catalog file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = read_catalog(path)?;
        let catalog = Self::parse(&content, path)?;
        info!(path = ?path, quests = catalog.len(), "loaded quest catalog");
        Ok(catalog)
    }

    /// Parse catalog text; `origin` is only used in error messages
    pub fn parse(content: &str, origin: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        for block in read_blocks(content, origin)? {
            let config =
                QuestConfig::from_block(&block).map_err(|m| invalid(&block, m, origin))?;
            if catalog.contains(&config.quest_id) {
                return Err(invalid(
                    &block,
                    format!("duplicate quest_id '{}'", config.quest_id),
                    origin,
                ));
            }
            catalog.insert(Quest::from_config(config));
        }

        Ok(catalog)
    }

    /// The built-in quest line
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::parse(DEFAULT_QUESTS, Path::new("builtin/quests.txt"))
    }

    /// Add or replace a quest, returning the previous definition
    pub fn insert(&mut self, quest: Quest) -> Option<Quest> {
        self.quests.insert(quest.id.clone(), quest)
    }

    pub fn get(&self, id: &str) -> Option<&Quest> {
        self.quests.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.quests.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    /// All quests, ordered by id
    pub fn iter(&self) -> impl Iterator<Item = &Quest> {
        self.quests.values()
    }

    pub fn quest_ids(&self) -> impl Iterator<Item = &str> {
        self.quests.keys().map(|s| s.as_str())
    }

    /// Quests whose required level lies in `min..=max`
    pub fn quests_by_level(&self, min: u32, max: u32) -> Vec<&Quest> {
        self.iter()
            .filter(|q| (min..=max).contains(&q.required_level))
            .collect()
    }

    /// Walk prerequisite links back from `id` to the root quest
    ///
    /// Returns the chain earliest-first, ending with `id` itself.
    pub fn prerequisite_chain(&self, id: &str) -> Result<Vec<QuestId>, QuestGraphError> {
        let mut current = self
            .get(id)
            .ok_or_else(|| QuestGraphError::QuestNotFound(id.to_string()))?;

        let mut chain = vec![current.id.clone()];
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(current.id.as_str());

        while let Prerequisite::Quest(previous) = &current.prerequisite {
            if !visited.insert(previous.as_str()) {
                chain.push(previous.clone());
                chain.reverse();
                return Err(QuestGraphError::CycleDetected(chain));
            }

            current = self
                .get(previous)
                .ok_or_else(|| QuestGraphError::MissingPrerequisite {
                    quest: current.id.clone(),
                    prerequisite: previous.clone(),
                })?;
            chain.push(current.id.clone());
        }

        chain.reverse();
        Ok(chain)
    }

    /// Check that every prerequisite exists and that no quest requires itself
    pub fn validate_prerequisites(&self) -> Result<(), QuestGraphError> {
        for quest in self.iter() {
            if let Some(prerequisite) = quest.prerequisite.quest_id() {
                if !self.contains(prerequisite) {
                    return Err(QuestGraphError::MissingPrerequisite {
                        quest: quest.id.clone(),
                        prerequisite: prerequisite.to_string(),
                    });
                }
            }
        }

        for id in self.quest_ids() {
            self.prerequisite_chain(id)?;
        }

        debug!(quests = self.len(), "quest prerequisites validated");
        Ok(())
    }
}

/// Registry of all item definitions
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: BTreeMap<ItemId, Item>,
}

impl ItemCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an item catalog file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = read_catalog(path)?;
        let catalog = Self::parse(&content, path)?;
        info!(path = ?path, items = catalog.len(), "loaded item catalog");
        Ok(catalog)
    }

    /// Parse catalog text; `origin` is only used in error messages
    pub fn parse(content: &str, origin: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        for block in read_blocks(content, origin)? {
            let config = ItemConfig::from_block(&block).map_err(|m| invalid(&block, m, origin))?;

            let kind: ItemKind = config
                .item_type
                .parse()
                .map_err(|e: item_core::UnknownItemKind| invalid(&block, e.to_string(), origin))?;

            let effect =
                Effect::parse(&config.effect).map_err(|error| CatalogError::MalformedEffect {
                    item_id: config.item_id.clone(),
                    error,
                    path: origin.to_path_buf(),
                })?;

            if catalog.contains(&config.item_id) {
                return Err(invalid(
                    &block,
                    format!("duplicate item_id '{}'", config.item_id),
                    origin,
                ));
            }

            catalog.insert(Item::new(
                config.item_id,
                config.name,
                kind,
                effect,
                config.cost,
                config.description,
            ));
        }

        Ok(catalog)
    }

    /// The built-in shop stock
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::parse(DEFAULT_ITEMS, Path::new("builtin/items.txt"))
    }

    /// Add or replace an item, returning the previous definition
    pub fn insert(&mut self, item: Item) -> Option<Item> {
        self.items.insert(item.id.clone(), item)
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items, ordered by id
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(|s| s.as_str())
    }

    pub fn by_kind(&self, kind: ItemKind) -> Vec<&Item> {
        self.iter().filter(|item| item.kind == kind).collect()
    }
}
