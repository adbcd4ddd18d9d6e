//! Turn-based battle between a character and one enemy
//!
//! ```text
//! Idle --start--> Active --(a side hits 0 health)--> Resolved(winner)
//!                   |
//!                   +--(successful flee)--> Escaped
//! ```
//!
//! The player acts first each round, then the enemy. The end condition is
//! checked after every action, so a killing blow ends the battle before the
//! other side gets to act.

use super::ability::SpecialAbility;
use super::enemy::Enemy;
use super::resolution::resolve_attack;
use super::result::{victory_rewards, BattleOutcome, BattleResult, CombatEvent, Rewards, TurnReport};
use crate::character::Character;
use crate::config::GameConstants;
use crate::error::GameError;
use crate::progression::gain_experience;
use crate::types::Side;
use rand::Rng;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleState {
    Idle,
    Active,
    Resolved(Side),
    Escaped,
}

/// What the player does on their turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    Ability,
    Flee,
}

pub struct Battle<'a> {
    character: &'a mut Character,
    enemy: Enemy,
    rules: &'a GameConstants,
    state: BattleState,
    turn: u32,
    next: Side,
    /// First turn on which the special ability may be used again
    ability_ready_turn: u32,
    log: Vec<CombatEvent>,
    outcome: Option<BattleOutcome>,
}

impl<'a> Battle<'a> {
    pub fn new(character: &'a mut Character, enemy: Enemy, rules: &'a GameConstants) -> Self {
        Battle {
            character,
            enemy,
            rules,
            state: BattleState::Idle,
            turn: 0,
            next: Side::Player,
            ability_ready_turn: 0,
            log: Vec::new(),
            outcome: None,
        }
    }

    pub fn start(&mut self) -> Result<TurnReport, GameError> {
        if self.state != BattleState::Idle {
            return Err(GameError::CombatAlreadyStarted);
        }
        if self.character.is_dead() {
            return Err(GameError::CharacterDead);
        }

        self.state = BattleState::Active;
        self.turn = 1;
        self.next = Side::Player;
        self.log.push(CombatEvent::Started {
            enemy: self.enemy.name.clone(),
        });

        info!(
            character = %self.character.name(),
            enemy = %self.enemy.name,
            "battle started"
        );
        Ok(self.report_since(self.log.len() - 1))
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == BattleState::Active
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Whose action comes next
    pub fn next_side(&self) -> Side {
        self.next
    }

    pub fn character(&self) -> &Character {
        &*self.character
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn ability(&self) -> SpecialAbility {
        SpecialAbility::for_class(self.character.class())
    }

    /// Rounds until the special ability can be used again
    pub fn cooldown(&self) -> u32 {
        self.ability_ready_turn.saturating_sub(self.turn)
    }

    pub fn log(&self) -> &[CombatEvent] {
        &self.log
    }

    pub fn outcome(&self) -> Option<&BattleOutcome> {
        self.outcome.as_ref()
    }

    // ------------------------------------------------------------------------
    // Turns
    // ------------------------------------------------------------------------

    fn expect_turn(&self, side: Side) -> Result<(), GameError> {
        if self.state != BattleState::Active {
            return Err(GameError::CombatNotActive);
        }
        if self.next != side {
            return Err(GameError::OutOfTurn {
                expected: self.next,
            });
        }
        Ok(())
    }

    pub fn player_turn(
        &mut self,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<TurnReport, GameError> {
        self.expect_turn(Side::Player)?;
        let mark = self.log.len();
        let combat = &self.rules.combat;

        match action {
            PlayerAction::Attack => {
                let damage = resolve_attack(&*self.character, &mut self.enemy, combat);
                self.log.push(CombatEvent::Attack {
                    attacker: Side::Player,
                    damage,
                    remaining: self.enemy.health,
                });
            }
            PlayerAction::Ability => {
                let ability = self.ability();
                let rounds = self.cooldown();
                if rounds > 0 {
                    return Err(GameError::AbilityOnCooldown {
                        ability: ability.name().to_string(),
                        rounds,
                    });
                }
                let effect = ability.resolve(self.character, &mut self.enemy, combat, rng);
                self.ability_ready_turn = self.turn + combat.ability_cooldown + 1;
                self.log.push(CombatEvent::Ability { ability, effect });
            }
            PlayerAction::Flee => {
                if rng.gen::<f64>() < combat.escape_chance {
                    self.state = BattleState::Escaped;
                    self.outcome = Some(BattleOutcome::Escaped);
                    self.log.push(CombatEvent::Escaped);
                    info!(character = %self.character.name(), "escaped from battle");
                    return Ok(self.report_since(mark));
                }
                self.log.push(CombatEvent::FleeFailed);
            }
        }

        if let Some(event) = self.log.last() {
            debug!(turn = self.turn, ?event, "player action");
        }
        self.check_end()?;
        if self.is_active() {
            self.next = Side::Enemy;
        }
        Ok(self.report_since(mark))
    }

    pub fn enemy_turn(&mut self) -> Result<TurnReport, GameError> {
        self.expect_turn(Side::Enemy)?;
        let mark = self.log.len();

        let damage = resolve_attack(&self.enemy, &mut *self.character, &self.rules.combat);
        self.log.push(CombatEvent::Attack {
            attacker: Side::Enemy,
            damage,
            remaining: self.character.health,
        });
        debug!(turn = self.turn, damage, "enemy attack");

        self.check_end()?;
        if self.is_active() {
            self.next = Side::Player;
            self.turn += 1;
        }
        Ok(self.report_since(mark))
    }

    /// A player turn followed by the enemy's reply if the battle goes on
    pub fn round(
        &mut self,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<TurnReport, GameError> {
        let mut report = self.player_turn(action, rng)?;
        if self.is_active() {
            let reply = self.enemy_turn()?;
            report.events.extend(reply.events);
            report.outcome = reply.outcome;
        }
        Ok(report)
    }

    /// Run rounds until the battle ends, asking `choose` for each action
    ///
    /// An ability chosen while on cooldown becomes a basic attack.
    pub fn fight<F>(&mut self, rng: &mut impl Rng, mut choose: F) -> Result<BattleOutcome, GameError>
    where
        F: FnMut(&Battle<'_>) -> PlayerAction,
    {
        if self.state == BattleState::Idle {
            self.start()?;
        }

        while self.is_active() {
            if self.next == Side::Enemy {
                self.enemy_turn()?;
                continue;
            }
            let action = match choose(&*self) {
                PlayerAction::Ability if self.cooldown() > 0 => PlayerAction::Attack,
                action => action,
            };
            self.round(action, rng)?;
        }

        self.outcome.clone().ok_or(GameError::CombatNotActive)
    }

    // ------------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------------

    fn check_end(&mut self) -> Result<(), GameError> {
        if self.enemy.is_dead() {
            let rewards = victory_rewards(&self.enemy);
            let levels = gain_experience(self.character, rewards.xp, self.rules)?;
            self.character.add_gold(rewards.gold);
            self.log.push(CombatEvent::Victory {
                xp: rewards.xp,
                gold: rewards.gold,
            });
            self.finish(Side::Player, rewards, levels);
        } else if self.character.is_dead() {
            self.log.push(CombatEvent::Defeat);
            self.finish(Side::Enemy, Rewards::default(), 0);
        }
        Ok(())
    }

    fn finish(&mut self, winner: Side, rewards: Rewards, levels_gained: u32) {
        self.state = BattleState::Resolved(winner);
        self.outcome = Some(BattleOutcome::Resolved(BattleResult {
            winner,
            xp_gained: rewards.xp,
            gold_gained: rewards.gold,
            levels_gained,
            turns: self.turn,
        }));
        info!(
            winner = %winner,
            turns = self.turn,
            xp = rewards.xp,
            gold = rewards.gold,
            "battle resolved"
        );
    }

    fn report_since(&self, mark: usize) -> TurnReport {
        TurnReport {
            events: self.log[mark..].to_vec(),
            outcome: self.outcome.clone(),
        }
    }
}
