//! Combat session: owns every piece of combat state and exposes the
//! player-facing actions.
//!
//! A [`CombatSession`] is created from an already-assembled party and enemy
//! list, then driven by three calls: [`play_card`](CombatSession::play_card),
//! [`tag_in`](CombatSession::tag_in) and [`end_turn`](CombatSession::end_turn).
//! Each returns the ordered events it produced. Rejected actions return an
//! [`ActionError`] and leave the session untouched.

mod enemy_turn;
mod errors;

pub use errors::{ActionError, SetupError};

use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::CombatConfig;
use crate::effect::{EffectContext, resolve_card};
use crate::event::{CombatEvent, CombatResult, EventLog};
use crate::resources::EnergyPool;
use crate::roster::{Party, PartyRoster, handle_incapacitation};
use crate::scoring::{PerformanceCounters, PerformanceSummary, score};
use crate::state::{
    CombatEntity, Enemy, EnemyTier, EntityId, PartyMember, PartyPosition, TurnHookReport,
};
use crate::turn::{Phase, TurnSequencer};

/// A single combat, from setup to its performance summary.
#[derive(Clone, Debug)]
pub struct CombatSession<R: PartyRoster = Party> {
    config: CombatConfig,
    roster: R,
    enemies: Vec<Enemy>,
    energy: EnergyPool,
    sequencer: TurnSequencer,
    rng: ChaCha8Rng,
    counters: PerformanceCounters,
    result: Option<CombatResult>,
    summary: Option<PerformanceSummary>,
}

impl<R: PartyRoster> CombatSession<R> {
    /// Validates the setup and creates an idle session.
    ///
    /// All randomness in the combat is drawn from `seed`.
    pub fn new(
        config: CombatConfig,
        roster: R,
        enemies: Vec<Enemy>,
        seed: u64,
    ) -> Result<Self, SetupError> {
        if enemies.is_empty() {
            return Err(SetupError::NoEnemies);
        }
        let members = roster.members();
        if members.is_empty() {
            return Err(SetupError::EmptyParty);
        }
        let active = members.iter().filter(|m| m.is_active()).count();
        if active != 1 {
            return Err(SetupError::ActiveCount { found: active });
        }
        let mut seen = HashSet::new();
        let ids = members
            .iter()
            .map(PartyMember::id)
            .chain(enemies.iter().map(Enemy::id));
        for id in ids {
            if !seen.insert(id) {
                return Err(SetupError::DuplicateId { id });
            }
        }

        let baseline_tier = enemies
            .iter()
            .map(|e| e.tier)
            .max()
            .unwrap_or(EnemyTier::Normal);
        let counters = PerformanceCounters::new(baseline_tier, enemies.len() as u32);

        Ok(Self {
            energy: EnergyPool::new(config.max_energy),
            config,
            roster,
            enemies,
            sequencer: TurnSequencer::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            counters,
            result: None,
            summary: None,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.sequencer.phase()
    }

    pub fn turn(&self) -> u32 {
        self.sequencer.turn()
    }

    pub fn energy(&self) -> &EnergyPool {
        &self.energy
    }

    pub fn roster(&self) -> &R {
        &self.roster
    }

    pub fn active_member(&self) -> Option<&PartyMember> {
        self.roster.active_member()
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id() == id)
    }

    pub fn counters(&self) -> &PerformanceCounters {
        &self.counters
    }

    pub fn result(&self) -> Option<CombatResult> {
        self.result
    }

    pub fn summary(&self) -> Option<&PerformanceSummary> {
        self.summary.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.sequencer.is_over()
    }

    // ========================================================================
    // Player-facing actions
    // ========================================================================

    /// Shuffles every deck and runs the first player turn start.
    pub fn start(&mut self) -> Result<Vec<CombatEvent>, ActionError> {
        if self.phase() != Phase::Idle {
            return Err(self.reject(ActionError::InvalidPhase {
                phase: self.phase(),
            }));
        }
        let mut events = EventLog::new();
        events.push(CombatEvent::CombatStarted {
            party: self.roster.members().iter().map(PartyMember::id).collect(),
            enemies: self.enemies.iter().map(Enemy::id).collect(),
        });
        for member in self.roster.members_mut() {
            member.deck.shuffle(&mut self.rng);
        }
        tracing::info!(
            party = self.roster.members().len(),
            enemies = self.enemies.len(),
            "combat started"
        );

        self.begin_player_turn(&mut events);
        Ok(events.into_vec())
    }

    /// Plays the card at `hand_index` from the Active member's hand.
    ///
    /// Costs are checked before anything is spent; a rejected play changes
    /// nothing.
    pub fn play_card(
        &mut self,
        hand_index: usize,
        target: Option<EntityId>,
    ) -> Result<Vec<CombatEvent>, ActionError> {
        self.ensure_player_action()?;
        let active = self.acting_member()?;
        let source = active.id();
        let focus_at_play = active.focus();

        let Some(card) = active.deck.hand().get(hand_index) else {
            return Err(self.reject(ActionError::CardNotInHand { index: hand_index }));
        };
        let data = card.effective();
        if !self.energy.can_afford(data.cost) {
            return Err(self.reject(ActionError::InsufficientEnergy {
                required: data.cost,
                available: self.energy.current(),
            }));
        }
        if focus_at_play < data.focus_cost {
            return Err(self.reject(ActionError::InsufficientFocus {
                required: data.focus_cost,
                available: focus_at_play,
            }));
        }

        let Some(card) = self
            .roster
            .member_mut(source)
            .and_then(|m| m.deck.take_from_hand(hand_index))
        else {
            return Err(self.reject(ActionError::CardNotInHand { index: hand_index }));
        };
        let data = card.effective();

        let mut events = EventLog::new();
        self.energy.try_spend(data.cost);
        events.push(CombatEvent::EnergyChanged {
            current: self.energy.current(),
            max: self.energy.max(),
        });
        if data.focus_cost > 0
            && let Some(member) = self.roster.member_mut(source)
        {
            member.spend_focus(data.focus_cost);
            events.push(CombatEvent::FocusChanged {
                member: source,
                focus: member.focus(),
            });
        }

        let mut ctx = EffectContext {
            source,
            target,
            focus_at_play,
            party: &mut self.roster,
            enemies: &mut self.enemies,
            energy: &mut self.energy,
            rng: &mut self.rng,
            events: &mut events,
            counters: &mut self.counters,
        };
        resolve_card(data, &mut ctx);

        let card_id = data.id;
        if let Some(member) = self.roster.member_mut(source) {
            member.deck.on_card_played(card);
        }
        events.push(CombatEvent::CardPlayed {
            member: source,
            card: card_id,
            target,
            focus_at_play,
        });

        if !self.check_combat_end(&mut events) {
            self.refill_replacement_hand(source, &mut events);
        }
        Ok(events.into_vec())
    }

    /// Swaps `member` into the Active slot, paying the Tag-In cost.
    pub fn tag_in(&mut self, member: EntityId) -> Result<Vec<CombatEvent>, ActionError> {
        self.ensure_player_action()?;
        let Some(cost) = self.roster.tag_in_cost(member) else {
            return Err(self.reject(ActionError::MemberNotFound { member }));
        };
        if !self.roster.can_tag_in(member) {
            return Err(self.reject(ActionError::TagInUnavailable { member }));
        }
        if !self.energy.can_afford(cost) {
            return Err(self.reject(ActionError::InsufficientEnergy {
                required: cost,
                available: self.energy.current(),
            }));
        }
        let Some(outgoing) = self.roster.active_member().map(PartyMember::id) else {
            return Err(self.reject(ActionError::NoActiveMember));
        };
        if !self.roster.execute_tag_in(member) {
            return Err(self.reject(ActionError::TagInUnavailable { member }));
        }

        let mut events = EventLog::new();
        self.energy.try_spend(cost);
        events.push(CombatEvent::EnergyChanged {
            current: self.energy.current(),
            max: self.energy.max(),
        });
        if let Some(previous) = self.roster.member_mut(outgoing) {
            let discarded = previous.deck.discard_hand();
            events.push(CombatEvent::CardsDiscarded {
                member: outgoing,
                count: discarded,
            });
        }
        events.push(CombatEvent::PositionChanged {
            member: outgoing,
            position: PartyPosition::Standby,
        });
        events.push(CombatEvent::PositionChanged {
            member,
            position: PartyPosition::Active,
        });
        events.push(CombatEvent::TaggedIn {
            incoming: member,
            outgoing,
            energy_cost: cost,
        });
        tracing::debug!(%member, %outgoing, cost, "tag-in");

        let draw = self.config.tag_in_draw;
        self.draw_for(member, draw, &mut events);
        Ok(events.into_vec())
    }

    /// Revives an incapacitated member with `hp` health.
    pub fn revive_member(
        &mut self,
        member: EntityId,
        hp: u32,
    ) -> Result<Vec<CombatEvent>, ActionError> {
        self.ensure_player_action()?;
        let Some(target) = self.roster.member_mut(member) else {
            return Err(self.reject(ActionError::MemberNotFound { member }));
        };
        if !target.revive(hp) {
            return Err(self.reject(ActionError::NotIncapacitated { member }));
        }
        let hp = target.health().current;
        Ok(vec![CombatEvent::CharacterRevived { member, hp }])
    }

    /// Ends the player turn, runs every enemy, and starts the next player
    /// turn unless combat ended on the way.
    pub fn end_turn(&mut self) -> Result<Vec<CombatEvent>, ActionError> {
        self.ensure_player_action()?;
        let mut events = EventLog::new();

        self.advance(Phase::PlayerTurnEnd, &mut events);
        self.player_turn_end(&mut events);
        if self.check_combat_end(&mut events) {
            return Ok(events.into_vec());
        }

        self.advance(Phase::EnemyTurn, &mut events);
        if self.run_enemy_turn(&mut events) {
            return Ok(events.into_vec());
        }

        self.begin_player_turn(&mut events);
        Ok(events.into_vec())
    }

    // ========================================================================
    // Phase work
    // ========================================================================

    fn begin_player_turn(&mut self, events: &mut EventLog) {
        self.advance(Phase::PlayerTurnStart, events);
        let turn = self.sequencer.turn();
        self.counters.turns_taken = turn;
        events.push(CombatEvent::TurnStarted { turn });

        for member in self.roster.members_mut() {
            let report = member.on_turn_start();
            if report.block_cleared > 0 {
                events.push(CombatEvent::BlockCleared {
                    entity: member.id(),
                    amount: report.block_cleared,
                });
            }
        }

        self.energy.refill();
        events.push(CombatEvent::EnergyChanged {
            current: self.energy.current(),
            max: self.energy.max(),
        });

        if let Some(active) = self.roster.active_member().map(PartyMember::id) {
            let hand_size = self.config.hand_size;
            self.draw_for(active, hand_size, events);
        }

        self.advance(Phase::PlayerAction, events);
    }

    /// Discard, turn-end hooks, then Focus: Standby members gain one stack,
    /// the Active member's Focus is spent.
    fn player_turn_end(&mut self, events: &mut EventLog) {
        let active = self.roster.active_member().map(PartyMember::id);
        let standby: Vec<EntityId> = self
            .roster
            .members()
            .iter()
            .filter(|m| !m.is_active())
            .map(PartyMember::id)
            .collect();

        for member in self.roster.members_mut() {
            let discarded = member.deck.discard_hand();
            if discarded > 0 {
                events.push(CombatEvent::CardsDiscarded {
                    member: member.id(),
                    count: discarded,
                });
            }
        }

        let ids: Vec<EntityId> = self.roster.members().iter().map(PartyMember::id).collect();
        for id in ids {
            let Some(member) = self.roster.member_mut(id) else {
                continue;
            };
            let report = member.on_turn_end();
            if push_hook_report(id, &report, events) {
                handle_incapacitation(&mut self.roster, id, events, &mut self.counters);
            }
        }

        for id in standby {
            if let Some(member) = self.roster.member_mut(id)
                && !member.is_incapacitated()
            {
                let focus = member.gain_focus(1);
                events.push(CombatEvent::FocusChanged { member: id, focus });
            }
        }
        if let Some(id) = active
            && let Some(member) = self.roster.member_mut(id)
            && member.consume_focus() > 0
        {
            events.push(CombatEvent::FocusChanged {
                member: id,
                focus: 0,
            });
        }

        events.push(CombatEvent::TurnEnded {
            turn: self.sequencer.turn(),
        });
    }

    fn draw_for(&mut self, member: EntityId, count: u32, events: &mut EventLog) {
        if let Some(m) = self.roster.member_mut(member) {
            let drawn = m.deck.draw_cards(count, &mut self.rng);
            events.push(CombatEvent::CardsDrawn {
                member,
                count: drawn,
            });
        }
    }

    /// A replacement promoted mid-turn gets a fresh hand.
    fn refill_replacement_hand(&mut self, previous: EntityId, events: &mut EventLog) {
        let Some(active) = self.roster.active_member().map(PartyMember::id) else {
            return;
        };
        if active != previous && self.sequencer.accepts_player_actions() {
            let draw = self.config.tag_in_draw;
            self.draw_for(active, draw, events);
        }
    }

    // ========================================================================
    // Combat end
    // ========================================================================

    /// Ends combat on victory or defeat. Returns true once combat is over.
    fn check_combat_end(&mut self, events: &mut EventLog) -> bool {
        if self.sequencer.is_over() {
            return true;
        }
        let result = if self.enemies.iter().all(|e| !e.is_alive()) {
            CombatResult::Victory
        } else if self.roster.is_party_wiped() {
            CombatResult::Defeat
        } else {
            return false;
        };

        if self.sequencer.end_combat() {
            events.push(CombatEvent::PhaseChanged {
                phase: Phase::CombatEnd,
            });
        }
        let turns = self.sequencer.turn();
        self.counters.turns_taken = turns;
        self.result = Some(result);
        events.push(CombatEvent::CombatEnded { result, turns });

        let summary = score(&self.counters, &self.config.scoring);
        self.summary = Some(summary);
        events.push(CombatEvent::PerformanceSummary(summary));
        tracing::info!(?result, turns, bonus = summary.total, "combat ended");
        true
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn advance(&mut self, to: Phase, events: &mut EventLog) {
        match self.sequencer.transition(to) {
            Ok(phase) => events.push(CombatEvent::PhaseChanged { phase }),
            Err(error) => tracing::warn!(%error, "phase transition refused"),
        }
    }

    fn ensure_player_action(&self) -> Result<(), ActionError> {
        if self.sequencer.accepts_player_actions() {
            Ok(())
        } else {
            Err(self.reject(ActionError::InvalidPhase {
                phase: self.phase(),
            }))
        }
    }

    fn acting_member(&self) -> Result<&PartyMember, ActionError> {
        self.roster
            .active_member()
            .filter(|m| !m.is_incapacitated())
            .ok_or_else(|| self.reject(ActionError::NoActiveMember))
    }

    fn reject(&self, error: ActionError) -> ActionError {
        tracing::debug!(%error, phase = %self.phase(), "action rejected");
        error
    }
}

/// Records a turn hook's side effects. Returns true if its Poison tick was
/// lethal.
fn push_hook_report(entity: EntityId, report: &TurnHookReport, events: &mut EventLog) -> bool {
    if report.block_cleared > 0 {
        events.push(CombatEvent::BlockCleared {
            entity,
            amount: report.block_cleared,
        });
    }
    let mut lethal = false;
    if let Some(poison) = &report.poison {
        events.push(CombatEvent::DamageDealt {
            source: None,
            target: entity,
            amount: poison.amount,
            blocked: poison.blocked,
            hp_lost: poison.hp_lost,
            overkill: poison.overkill,
        });
        lethal = poison.lethal;
    }
    if report.regenerated > 0 {
        events.push(CombatEvent::Healed {
            entity,
            amount: report.regenerated,
        });
    }
    lethal
}
