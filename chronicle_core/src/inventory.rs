//! Inventory, equipment and shop operations
//!
//! Every operation validates fully before mutating, so a failed call leaves
//! the character untouched.

use crate::character::Character;
use crate::config::GameConstants;
use crate::error::GameError;
use crate::types::EquipmentSlot;
use catalog_core::ItemCatalog;
use item_core::{Effect, Item, ItemId, ItemKind};
use tracing::{debug, info};

/// One line of a grouped inventory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub item_id: ItemId,
    /// Catalog name, if the item is still in the catalog
    pub name: Option<String>,
    pub kind: Option<ItemKind>,
    pub count: usize,
}

fn lookup<'c>(catalog: &'c ItemCatalog, item_id: &str) -> Result<&'c Item, GameError> {
    catalog
        .get(item_id)
        .ok_or_else(|| GameError::UnknownItem(item_id.to_string()))
}

fn ensure_space(character: &Character, rules: &GameConstants) -> Result<(), GameError> {
    if character.inventory.len() >= rules.inventory.max_size {
        return Err(GameError::InventoryFull {
            capacity: rules.inventory.max_size,
        });
    }
    Ok(())
}

fn position(character: &Character, item_id: &str) -> Result<usize, GameError> {
    character
        .inventory
        .iter()
        .position(|id| id == item_id)
        .ok_or_else(|| GameError::ItemNotFound(item_id.to_string()))
}

// ============================================================================
// Basic inventory
// ============================================================================

pub fn add_item(
    character: &mut Character,
    item_id: &str,
    rules: &GameConstants,
) -> Result<(), GameError> {
    ensure_space(character, rules)?;
    character.inventory.push(item_id.to_string());
    Ok(())
}

/// Remove one copy of an item
pub fn remove_item(character: &mut Character, item_id: &str) -> Result<ItemId, GameError> {
    let idx = position(character, item_id)?;
    Ok(character.inventory.remove(idx))
}

pub fn has_item(character: &Character, item_id: &str) -> bool {
    character.inventory.iter().any(|id| id == item_id)
}

pub fn count_item(character: &Character, item_id: &str) -> usize {
    character.inventory.iter().filter(|id| *id == item_id).count()
}

pub fn space_remaining(character: &Character, rules: &GameConstants) -> usize {
    rules
        .inventory
        .max_size
        .saturating_sub(character.inventory.len())
}

/// Empty the inventory, returning what was in it
pub fn clear_inventory(character: &mut Character) -> Vec<ItemId> {
    std::mem::take(&mut character.inventory)
}

/// Group the inventory by item, in first-seen order
pub fn inventory_summary(character: &Character, catalog: &ItemCatalog) -> Vec<InventoryEntry> {
    let mut entries: Vec<InventoryEntry> = Vec::new();
    for id in &character.inventory {
        match entries.iter_mut().find(|e| &e.item_id == id) {
            Some(entry) => entry.count += 1,
            None => {
                let item = catalog.get(id);
                entries.push(InventoryEntry {
                    item_id: id.clone(),
                    name: item.map(|i| i.name.clone()),
                    kind: item.map(|i| i.kind),
                    count: 1,
                });
            }
        }
    }
    entries
}

// ============================================================================
// Consumables
// ============================================================================

/// Consume an item, applying its effect
pub fn use_item(
    character: &mut Character,
    item_id: &str,
    catalog: &ItemCatalog,
) -> Result<Effect, GameError> {
    let idx = position(character, item_id)?;
    let item = lookup(catalog, item_id)?;
    if item.kind != ItemKind::Consumable {
        return Err(GameError::InvalidItemType {
            item_id: item_id.to_string(),
            expected: ItemKind::Consumable,
            actual: item.kind,
        });
    }

    character.apply_effect(&item.effect);
    character.inventory.remove(idx);

    debug!(item = item_id, effect = %item.effect, "used item");
    Ok(item.effect)
}

// ============================================================================
// Equipment
// ============================================================================

fn slot_mut(character: &mut Character, slot: EquipmentSlot) -> &mut Option<ItemId> {
    match slot {
        EquipmentSlot::Weapon => &mut character.equipped_weapon,
        EquipmentSlot::Armor => &mut character.equipped_armor,
    }
}

pub fn equipped(character: &Character, slot: EquipmentSlot) -> Option<&str> {
    match slot {
        EquipmentSlot::Weapon => character.equipped_weapon.as_deref(),
        EquipmentSlot::Armor => character.equipped_armor.as_deref(),
    }
}

/// Equip an item from the inventory into `slot`
///
/// Whatever was in the slot goes back to the inventory with its effect
/// reversed. Returns the previously equipped item.
pub fn equip(
    character: &mut Character,
    slot: EquipmentSlot,
    item_id: &str,
    catalog: &ItemCatalog,
) -> Result<Option<ItemId>, GameError> {
    let idx = position(character, item_id)?;
    let item = lookup(catalog, item_id)?;
    if item.kind != slot.accepts() {
        return Err(GameError::InvalidItemType {
            item_id: item_id.to_string(),
            expected: slot.accepts(),
            actual: item.kind,
        });
    }
    let previous = match equipped(character, slot) {
        Some(old_id) => Some(lookup(catalog, old_id)?),
        None => None,
    };

    // Swapping one item for another never changes the inventory size
    character.inventory.remove(idx);
    if let Some(old) = previous {
        character.apply_effect(&old.effect.reversed());
        character.inventory.push(old.id.clone());
    }
    character.apply_effect(&item.effect);
    let replaced = slot_mut(character, slot).replace(item.id.clone());

    info!(slot = %slot, item = item_id, replaced = ?replaced, "equipped item");
    Ok(replaced)
}

/// Move the item in `slot` back to the inventory
///
/// Returns `Ok(None)` if the slot was already empty.
pub fn unequip(
    character: &mut Character,
    slot: EquipmentSlot,
    catalog: &ItemCatalog,
    rules: &GameConstants,
) -> Result<Option<ItemId>, GameError> {
    let Some(item_id) = equipped(character, slot) else {
        return Ok(None);
    };
    let item = lookup(catalog, item_id)?;
    ensure_space(character, rules)?;

    character.apply_effect(&item.effect.reversed());
    let removed = slot_mut(character, slot).take();
    character.inventory.push(item.id.clone());

    info!(slot = %slot, item = %item.id, "unequipped item");
    Ok(removed)
}

pub fn equip_weapon(
    character: &mut Character,
    item_id: &str,
    catalog: &ItemCatalog,
) -> Result<Option<ItemId>, GameError> {
    equip(character, EquipmentSlot::Weapon, item_id, catalog)
}

pub fn equip_armor(
    character: &mut Character,
    item_id: &str,
    catalog: &ItemCatalog,
) -> Result<Option<ItemId>, GameError> {
    equip(character, EquipmentSlot::Armor, item_id, catalog)
}

pub fn unequip_weapon(
    character: &mut Character,
    catalog: &ItemCatalog,
    rules: &GameConstants,
) -> Result<Option<ItemId>, GameError> {
    unequip(character, EquipmentSlot::Weapon, catalog, rules)
}

pub fn unequip_armor(
    character: &mut Character,
    catalog: &ItemCatalog,
    rules: &GameConstants,
) -> Result<Option<ItemId>, GameError> {
    unequip(character, EquipmentSlot::Armor, catalog, rules)
}

// ============================================================================
// Shop
// ============================================================================

/// Buy an item, returning the price paid
pub fn purchase_item(
    character: &mut Character,
    item_id: &str,
    catalog: &ItemCatalog,
    rules: &GameConstants,
) -> Result<u32, GameError> {
    let item = lookup(catalog, item_id)?;
    if character.gold < item.cost {
        return Err(GameError::InsufficientResources {
            required: item.cost,
            available: character.gold,
        });
    }
    ensure_space(character, rules)?;

    character.spend_gold(item.cost)?;
    character.inventory.push(item.id.clone());

    info!(item = item_id, cost = item.cost, gold = character.gold, "purchased item");
    Ok(item.cost)
}

/// Sell one copy of an item, returning the gold received
pub fn sell_item(
    character: &mut Character,
    item_id: &str,
    catalog: &ItemCatalog,
    rules: &GameConstants,
) -> Result<u32, GameError> {
    let idx = position(character, item_id)?;
    let price = lookup(catalog, item_id)?.sell_price(rules.inventory.sell_divisor);

    character.inventory.remove(idx);
    character.add_gold(price);

    info!(item = item_id, price, gold = character.gold, "sold item");
    Ok(price)
}
