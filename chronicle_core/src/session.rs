//! GameSession - one player's game, with everything the engine needs
//!
//! A session owns its character, the content catalogs, the tuning constants
//! and a seeded RNG. Nothing is global, so sessions are independent and a
//! session built from the same seed replays identically.

use crate::character::{create_character, Character};
use crate::combat::{create_enemy, Battle, BattleOutcome, Enemy, PlayerAction};
use crate::config::GameConstants;
use crate::error::GameError;
use crate::inventory::{self, InventoryEntry};
use crate::persist::SaveStore;
use crate::quest::{self, AcceptOutcome, QuestProgress, QuestReward};
use catalog_core::{ItemCatalog, Quest, QuestCatalog, QuestId};
use item_core::{Effect, ItemId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing::info;

pub struct GameSession {
    character: Character,
    quests: QuestCatalog,
    items: ItemCatalog,
    rules: GameConstants,
    rng: ChaCha8Rng,
}

impl GameSession {
    /// Build a session, validating the constants and the quest graph
    pub fn new(
        character: Character,
        quests: QuestCatalog,
        items: ItemCatalog,
        rules: GameConstants,
        seed: u64,
    ) -> Result<Self, GameError> {
        rules.validate()?;
        quests.validate_prerequisites()?;
        Ok(GameSession {
            character,
            quests,
            items,
            rules,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Start a new game with a freshly created character
    pub fn new_game(
        name: &str,
        class_name: &str,
        quests: QuestCatalog,
        items: ItemCatalog,
        rules: GameConstants,
        seed: u64,
    ) -> Result<Self, GameError> {
        let character = create_character(name, class_name, &rules)?;
        Self::new(character, quests, items, rules, seed)
    }

    /// Resume a saved game
    pub fn load(
        store: &SaveStore,
        name: &str,
        quests: QuestCatalog,
        items: ItemCatalog,
        rules: GameConstants,
        seed: u64,
    ) -> Result<Self, GameError> {
        let character = store.load(name, &rules)?;
        Self::new(character, quests, items, rules, seed)
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn quests(&self) -> &QuestCatalog {
        &self.quests
    }

    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    pub fn rules(&self) -> &GameConstants {
        &self.rules
    }

    pub fn into_character(self) -> Character {
        self.character
    }

    // ------------------------------------------------------------------------
    // Quests
    // ------------------------------------------------------------------------

    pub fn accept_quest(&mut self, quest_id: &str) -> Result<AcceptOutcome, GameError> {
        quest::accept_quest(&mut self.character, quest_id, &self.quests)
    }

    pub fn complete_quest(&mut self, quest_id: &str) -> Result<QuestReward, GameError> {
        quest::complete_quest(&mut self.character, quest_id, &self.quests, &self.rules)
    }

    pub fn abandon_quest(&mut self, quest_id: &str) -> Result<(), GameError> {
        quest::abandon_quest(&mut self.character, quest_id)
    }

    pub fn can_accept(&self, quest_id: &str) -> bool {
        quest::can_accept(&self.character, quest_id, &self.quests)
    }

    pub fn available_quests(&self) -> Vec<&Quest> {
        quest::available_quests(&self.character, &self.quests)
    }

    pub fn active_quests(&self) -> Vec<&Quest> {
        quest::active_quest_details(&self.character, &self.quests)
    }

    pub fn completed_quests(&self) -> Vec<&Quest> {
        quest::completed_quest_details(&self.character, &self.quests)
    }

    pub fn prerequisite_chain(&self, quest_id: &str) -> Result<Vec<QuestId>, GameError> {
        quest::prerequisite_chain(&self.quests, quest_id)
    }

    pub fn quest_progress(&self) -> QuestProgress {
        quest::quest_progress(&self.character, &self.quests)
    }

    // ------------------------------------------------------------------------
    // Inventory and shop
    // ------------------------------------------------------------------------

    pub fn use_item(&mut self, item_id: &str) -> Result<Effect, GameError> {
        inventory::use_item(&mut self.character, item_id, &self.items)
    }

    pub fn equip_weapon(&mut self, item_id: &str) -> Result<Option<ItemId>, GameError> {
        inventory::equip_weapon(&mut self.character, item_id, &self.items)
    }

    pub fn equip_armor(&mut self, item_id: &str) -> Result<Option<ItemId>, GameError> {
        inventory::equip_armor(&mut self.character, item_id, &self.items)
    }

    pub fn unequip_weapon(&mut self) -> Result<Option<ItemId>, GameError> {
        inventory::unequip_weapon(&mut self.character, &self.items, &self.rules)
    }

    pub fn unequip_armor(&mut self) -> Result<Option<ItemId>, GameError> {
        inventory::unequip_armor(&mut self.character, &self.items, &self.rules)
    }

    pub fn purchase_item(&mut self, item_id: &str) -> Result<u32, GameError> {
        inventory::purchase_item(&mut self.character, item_id, &self.items, &self.rules)
    }

    pub fn sell_item(&mut self, item_id: &str) -> Result<u32, GameError> {
        inventory::sell_item(&mut self.character, item_id, &self.items, &self.rules)
    }

    pub fn inventory_summary(&self) -> Vec<InventoryEntry> {
        inventory::inventory_summary(&self.character, &self.items)
    }

    // ------------------------------------------------------------------------
    // Combat and recovery
    // ------------------------------------------------------------------------

    /// Fight an enemy matched to the character's level
    pub fn explore<F>(&mut self, choose: F) -> Result<BattleOutcome, GameError>
    where
        F: FnMut(&Battle<'_>) -> PlayerAction,
    {
        let enemy = Enemy::for_level(self.character.level);
        info!(level = self.character.level, enemy = %enemy.name, "exploring");
        self.fight(enemy, choose)
    }

    /// Fight a named enemy type
    pub fn challenge<F>(&mut self, enemy_name: &str, choose: F) -> Result<BattleOutcome, GameError>
    where
        F: FnMut(&Battle<'_>) -> PlayerAction,
    {
        let enemy = create_enemy(enemy_name)?;
        self.fight(enemy, choose)
    }

    fn fight<F>(&mut self, enemy: Enemy, choose: F) -> Result<BattleOutcome, GameError>
    where
        F: FnMut(&Battle<'_>) -> PlayerAction,
    {
        let mut battle = Battle::new(&mut self.character, enemy, &self.rules);
        battle.fight(&mut self.rng, choose)
    }

    pub fn revive(&mut self) -> Result<u32, GameError> {
        self.character.revive(&self.rules)
    }

    pub fn save(&self, store: &SaveStore) -> Result<PathBuf, GameError> {
        store.save(&self.character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn setup(class: &str) -> GameSession {
        GameSession::new_game(
            "Hero",
            class,
            QuestCatalog::builtin().unwrap(),
            ItemCatalog::builtin().unwrap(),
            GameConstants::default(),
            1234,
        )
        .unwrap()
    }

    #[test]
    fn test_new_game() {
        let session = setup("cleric");
        assert_eq!(session.character().gold, 100);
        assert_eq!(session.available_quests().len(), 1);
        assert!(matches!(
            GameSession::new_game(
                "Hero",
                "pirate",
                QuestCatalog::new(),
                ItemCatalog::new(),
                GameConstants::default(),
                0
            ),
            Err(GameError::InvalidClass(_))
        ));
    }

    #[test]
    fn test_rejects_broken_quest_graph() {
        let quests = QuestCatalog::parse(
            "QUEST_ID: a\nTITLE: A\nDESCRIPTION: a\nREWARD_XP: 1\nREWARD_GOLD: 1\nREQUIRED_LEVEL: 1\nPREREQUISITE: b\n",
            std::path::Path::new("test"),
        )
        .unwrap();
        let result = GameSession::new(
            Character::new("Hero", crate::types::CharacterClass::Mage),
            quests,
            ItemCatalog::new(),
            GameConstants::default(),
            0,
        );
        assert!(matches!(result, Err(GameError::QuestGraph(_))));
    }

    #[test]
    fn test_rejects_invalid_constants() {
        let mut rules = GameConstants::default();
        rules.combat.escape_chance = 2.0;
        let result = GameSession::new(
            Character::new("Hero", crate::types::CharacterClass::Mage),
            QuestCatalog::new(),
            ItemCatalog::new(),
            rules,
            0,
        );
        assert!(matches!(result, Err(GameError::Config(_))));
    }

    #[test]
    fn test_quest_line() {
        let mut session = setup("warrior");
        session.accept_quest("first_steps").unwrap();
        let reward = session.complete_quest("first_steps").unwrap();
        assert_eq!(reward.xp_gained, 50);
        assert_eq!(session.character().gold, 125);
        assert!(session.can_accept("goblin_trouble"));

        let progress = session.quest_progress();
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.total, 6);
    }

    #[test]
    fn test_shop_round_trip() {
        let mut session = setup("rogue");
        session.purchase_item("rusty_sword").unwrap();
        session.equip_weapon("rusty_sword").unwrap();
        assert_eq!(session.character().strength, 14);

        session.unequip_weapon().unwrap();
        assert_eq!(session.sell_item("rusty_sword").unwrap(), 7);
        assert_eq!(session.character().gold, 100 - 15 + 7);
    }

    #[test]
    fn test_explore_goblin() {
        let mut session = setup("warrior");
        let outcome = session.explore(|_| PlayerAction::Attack).unwrap();
        assert!(outcome.is_victory());
        assert_eq!(session.character().experience, 25);
        assert_eq!(session.character().gold, 110);
    }

    #[test]
    fn test_challenge_unknown_enemy() {
        let mut session = setup("mage");
        assert!(matches!(
            session.challenge("lich", |_| PlayerAction::Attack),
            Err(GameError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_death_and_revive() {
        let mut session = setup("mage");
        let outcome = session.challenge("dragon", |_| PlayerAction::Attack).unwrap();
        assert!(!outcome.is_victory());
        assert!(session.character().is_dead());

        assert!(matches!(
            session.explore(|_| PlayerAction::Attack),
            Err(GameError::CharacterDead)
        ));

        assert_eq!(session.revive().unwrap(), 40);
        assert_eq!(session.character().gold, 50);
        assert!(session.character().can_fight());
    }

    #[test]
    fn test_same_seed_replays() {
        let run = || {
            let mut session = setup("rogue");
            session.challenge("orc", |_| PlayerAction::Ability).unwrap();
            session.into_character()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_save_and_resume() {
        let dir = TempDir::new().unwrap();
        let store = SaveStore::new(dir.path());

        let mut session = setup("cleric");
        session.purchase_item("health_potion").unwrap();
        session.accept_quest("first_steps").unwrap();
        session.save(&store).unwrap();

        let resumed = GameSession::load(
            &store,
            "Hero",
            QuestCatalog::builtin().unwrap(),
            ItemCatalog::builtin().unwrap(),
            GameConstants::default(),
            1,
        )
        .unwrap();
        assert_eq!(resumed.character(), session.character());
    }

    // ------------------------------------------------------------------------
    // Invariants over random play
    // ------------------------------------------------------------------------

    const QUEST_IDS: &[&str] = &[
        "first_steps",
        "goblin_trouble",
        "saving_freetown",
        "lost_relic",
        "orc_raid",
        "dragon_lair",
        "no_such_quest",
    ];

    const ITEM_IDS: &[&str] = &[
        "rusty_sword",
        "iron_sword",
        "arcane_focus",
        "leather_armor",
        "chainmail",
        "health_potion",
        "greater_health_potion",
        "strength_tonic",
        "no_such_item",
    ];

    #[derive(Debug, Clone)]
    enum Op {
        Accept(usize),
        Complete(usize),
        Abandon(usize),
        Buy(usize),
        Sell(usize),
        Use(usize),
        EquipWeapon(usize),
        EquipArmor(usize),
        UnequipWeapon,
        UnequipArmor,
        Explore(u8),
        Revive,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let quest = 0..QUEST_IDS.len();
        let item = 0..ITEM_IDS.len();
        prop_oneof![
            quest.clone().prop_map(Op::Accept),
            quest.clone().prop_map(Op::Complete),
            quest.prop_map(Op::Abandon),
            item.clone().prop_map(Op::Buy),
            item.clone().prop_map(Op::Sell),
            item.clone().prop_map(Op::Use),
            item.clone().prop_map(Op::EquipWeapon),
            item.prop_map(Op::EquipArmor),
            Just(Op::UnequipWeapon),
            Just(Op::UnequipArmor),
            (0u8..3).prop_map(Op::Explore),
            Just(Op::Revive),
        ]
    }

    fn policy(choice: u8) -> PlayerAction {
        match choice {
            0 => PlayerAction::Attack,
            1 => PlayerAction::Ability,
            _ => PlayerAction::Flee,
        }
    }

    fn apply(session: &mut GameSession, op: &Op) -> Result<(), GameError> {
        match *op {
            Op::Accept(i) => session.accept_quest(QUEST_IDS[i]).map(|_| ()),
            Op::Complete(i) => session.complete_quest(QUEST_IDS[i]).map(|_| ()),
            Op::Abandon(i) => session.abandon_quest(QUEST_IDS[i]),
            Op::Buy(i) => session.purchase_item(ITEM_IDS[i]).map(|_| ()),
            Op::Sell(i) => session.sell_item(ITEM_IDS[i]).map(|_| ()),
            Op::Use(i) => session.use_item(ITEM_IDS[i]).map(|_| ()),
            Op::EquipWeapon(i) => session.equip_weapon(ITEM_IDS[i]).map(|_| ()),
            Op::EquipArmor(i) => session.equip_armor(ITEM_IDS[i]).map(|_| ()),
            Op::UnequipWeapon => session.unequip_weapon().map(|_| ()),
            Op::UnequipArmor => session.unequip_armor().map(|_| ()),
            Op::Explore(choice) => session.explore(|_| policy(choice)).map(|_| ()),
            Op::Revive => session.revive().map(|_| ()),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_invariants_hold_under_random_play(
            class in prop::sample::select(vec!["warrior", "mage", "rogue", "cleric"]),
            gold in 0u32..2000,
            ops in prop::collection::vec(op_strategy(), 1..60),
        ) {
            let mut session = setup(class);
            session.character.gold = gold;

            for op in &ops {
                let before = session.character.clone();
                let result = apply(&mut session, op);

                let character = session.character();
                prop_assert!(character.check_invariants(session.rules()).is_ok(),
                    "{:?} broke an invariant: {:?}", op, character.check_invariants(session.rules()));
                prop_assert!(character.health <= character.max_health);
                prop_assert!(character.inventory.len() <= 20);
                prop_assert!(character.active_quests.is_disjoint(&character.completed_quests));

                // Failed operations leave the character untouched
                if result.is_err() {
                    prop_assert_eq!(&before, character);
                }
            }
        }

        #[test]
        fn test_buy_then_sell_costs_half(cost in 0u32..10_000) {
            let mut session = setup("warrior");
            session.items.insert(item_core::Item::new(
                "trinket",
                "Trinket",
                item_core::ItemKind::Consumable,
                Effect::new(item_core::Stat::Magic, 0),
                cost,
                "",
            ));
            session.character.gold = cost;

            session.purchase_item("trinket").unwrap();
            let refund = session.sell_item("trinket").unwrap();
            prop_assert_eq!(refund, cost / 2);
            prop_assert_eq!(session.character().gold, cost / 2);
        }
    }
}
