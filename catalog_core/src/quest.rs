use crate::config::QuestConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a quest definition in the quest catalog
pub type QuestId = String;

/// The quest that must be completed before another can be accepted
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Prerequisite {
    #[default]
    None,
    Quest(QuestId),
}

impl Prerequisite {
    /// Parse a prerequisite field; the sentinel `none` is case-insensitive
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("none") {
            Prerequisite::None
        } else {
            Prerequisite::Quest(value.to_string())
        }
    }

    pub fn quest_id(&self) -> Option<&str> {
        match self {
            Prerequisite::None => None,
            Prerequisite::Quest(id) => Some(id.as_str()),
        }
    }
}

impl fmt::Display for Prerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prerequisite::None => write!(f, "NONE"),
            Prerequisite::Quest(id) => write!(f, "{}", id),
        }
    }
}

/// A quest definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub title: String,
    pub description: String,
    pub reward_xp: u32,
    pub reward_gold: u32,
    /// Minimum character level to accept (always >= 1)
    pub required_level: u32,
    pub prerequisite: Prerequisite,
}

impl Quest {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        reward_xp: u32,
        reward_gold: u32,
        required_level: u32,
        prerequisite: Prerequisite,
    ) -> Self {
        Quest {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            reward_xp,
            reward_gold,
            required_level: required_level.max(1),
            prerequisite,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub(crate) fn from_config(config: QuestConfig) -> Self {
        Quest {
            id: config.quest_id,
            title: config.title,
            description: config.description,
            reward_xp: config.reward_xp,
            reward_gold: config.reward_gold,
            required_level: config.required_level,
            prerequisite: Prerequisite::parse(&config.prerequisite),
        }
    }
}

impl fmt::Display for Quest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ===", self.title)?;
        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
        }
        writeln!(f, "Level Required: {}", self.required_level)?;
        writeln!(f, "Prerequisite: {}", self.prerequisite)?;
        write!(f, "Rewards: {} XP | {} Gold", self.reward_xp, self.reward_gold)
    }
}
