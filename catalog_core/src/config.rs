//! Block reader for catalog files
//!
//! ```text
//! QUEST_ID: first_steps
//! TITLE: First Steps
//! ...
//!
//! QUEST_ID: next_quest
//! ...
//! ```
//!
//! Keys are case-insensitive and the first `:` separates key from value, so
//! values such as `EFFECT: strength:2` survive intact.

/// One `KEY: value` block
#[derive(Debug, Clone)]
pub struct Block {
    /// 1-based line number of the block's first line
    pub line: usize,
    fields: Vec<(String, String)>,
}

impl Block {
    /// Get a field value by lowercase key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn require(&self, key: &str) -> Result<&str, String> {
        self.get(key)
            .ok_or_else(|| format!("missing required field '{}'", key))
    }

    pub fn require_u32(&self, key: &str) -> Result<u32, String> {
        let value = self.require(key)?;
        value
            .parse::<u32>()
            .map_err(|_| format!("field '{}' must be a non-negative integer, got '{}'", key, value))
    }
}

/// Split catalog text into blocks
pub fn parse_blocks(content: &str) -> Result<Vec<Block>, (usize, String)> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            continue;
        }

        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| (line_no, format!("line '{}' has no ':' separator", line)))?;
        let key = key.trim().to_ascii_lowercase();

        let block = current.get_or_insert_with(|| Block {
            line: line_no,
            fields: Vec::new(),
        });

        if block.get(&key).is_some() {
            return Err((block.line, format!("duplicate field '{}'", key)));
        }
        block.fields.push((key, value.trim().to_string()));
    }

    if let Some(block) = current.take() {
        blocks.push(block);
    }

    Ok(blocks)
}

/// Ids end up in comma-joined lists, so they may not contain commas
fn check_id(key: &str, id: &str) -> Result<(), String> {
    if id.is_empty() {
        return Err(format!("{} must not be empty", key));
    }
    if id.contains(',') {
        return Err(format!("{} '{}' must not contain ','", key, id));
    }
    Ok(())
}

/// Typed quest record read from a block
#[derive(Debug)]
pub struct QuestConfig {
    pub quest_id: String,
    pub title: String,
    pub description: String,
    pub reward_xp: u32,
    pub reward_gold: u32,
    pub required_level: u32,
    pub prerequisite: String,
}

impl QuestConfig {
    pub fn from_block(block: &Block) -> Result<Self, String> {
        let config = QuestConfig {
            quest_id: block.require("quest_id")?.to_string(),
            title: block.require("title")?.to_string(),
            description: block.require("description")?.to_string(),
            reward_xp: block.require_u32("reward_xp")?,
            reward_gold: block.require_u32("reward_gold")?,
            required_level: block.require_u32("required_level")?,
            prerequisite: block.require("prerequisite")?.to_string(),
        };

        check_id("quest_id", &config.quest_id)?;
        if config.required_level == 0 {
            return Err(format!(
                "quest '{}' has required_level 0 (levels start at 1)",
                config.quest_id
            ));
        }

        Ok(config)
    }
}

/// Typed item record read from a block (effect still unparsed)
#[derive(Debug)]
pub struct ItemConfig {
    pub item_id: String,
    pub name: String,
    pub item_type: String,
    pub effect: String,
    pub cost: u32,
    pub description: String,
}

impl ItemConfig {
    pub fn from_block(block: &Block) -> Result<Self, String> {
        let config = ItemConfig {
            item_id: block.require("item_id")?.to_string(),
            name: block.require("name")?.to_string(),
            item_type: block.require("type")?.to_string(),
            effect: block.require("effect")?.to_string(),
            cost: block.require_u32("cost")?,
            description: block.require("description")?.to_string(),
        };

        check_id("item_id", &config.item_id)?;

        Ok(config)
    }
}
