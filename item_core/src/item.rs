use crate::types::*;
use crate::EffectError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single additive stat modification, parsed from `"stat:value"`
///
/// Parsed once when the item catalog is loaded; applying it never re-parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Effect {
    /// The stat this modifies
    pub stat: Stat,
    /// Signed amount added to the stat
    pub delta: i32,
}

impl Effect {
    pub fn new(stat: Stat, delta: i32) -> Self {
        Effect { stat, delta }
    }

    /// Parse an effect string such as `strength:5` or `health:-10`
    pub fn parse(s: &str) -> Result<Self, EffectError> {
        let (stat, value) = s
            .split_once(':')
            .ok_or_else(|| EffectError::MissingSeparator(s.to_string()))?;

        let stat: Stat = stat.parse()?;
        let value = value.trim();
        let delta = value
            .strip_prefix('+')
            .unwrap_or(value)
            .parse::<i32>()
            .map_err(|_| EffectError::InvalidValue(value.to_string()))?;

        Ok(Effect { stat, delta })
    }

    /// The effect that undoes this one
    pub fn reversed(&self) -> Self {
        Effect {
            stat: self.stat,
            delta: self.delta.saturating_neg(),
        }
    }
}

impl FromStr for Effect {
    type Err = EffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Effect::parse(s)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+} {}", self.delta, self.stat)
    }
}

/// An item definition from the item catalog
///
/// Characters never own these; they hold [`ItemId`]s that look them up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique catalog key
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Weapon, armor or consumable
    pub kind: ItemKind,
    /// The stat change applied when used or equipped
    pub effect: Effect,
    /// Shop price in gold
    pub cost: u32,
    pub description: String,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ItemKind,
        effect: Effect,
        cost: u32,
        description: impl Into<String>,
    ) -> Self {
        Item {
            id: id.into(),
            name: name.into(),
            kind,
            effect,
            cost,
            description: description.into(),
        }
    }

    pub fn is_consumable(&self) -> bool {
        self.kind == ItemKind::Consumable
    }

    /// Gold received when selling this item back to a shop
    pub fn sell_price(&self, divisor: u32) -> u32 {
        self.cost / divisor.max(1)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "══ {} ══", self.name)?;
        writeln!(f, "{} ({})", self.kind, self.id)?;
        writeln!(f, "  {}", self.effect)?;
        writeln!(f, "  Cost: {} gold", self.cost)?;
        if !self.description.is_empty() {
            write!(f, "{}", self.description)?;
        }
        Ok(())
    }
}
