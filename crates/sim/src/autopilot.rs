//! Fixed play policy used to drive a combat without input.
//!
//! Each step looks at the session and picks one action:
//! 1. Tag in a Standby member whose Tag-In is free (once per turn)
//! 2. Play the first affordable card in hand against the weakest enemy
//! 3. End the turn

use combat_core::{
    ActionError, CombatEntity, CombatEvent, CombatSession, EntityId, GameError, PartyRoster,
};

/// Safety valve against zero-cost cards that refill the hand.
const MAX_ACTIONS_PER_TURN: usize = 24;

/// One action chosen by the policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    TagIn(EntityId),
    PlayCard {
        hand_index: usize,
        target: Option<EntityId>,
    },
    EndTurn,
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Finished,
    TurnLimit,
}

pub struct Autopilot {
    tagged_this_turn: bool,
    actions_this_turn: usize,
}

impl Autopilot {
    pub fn new() -> Self {
        Self {
            tagged_this_turn: false,
            actions_this_turn: 0,
        }
    }

    /// Chooses the next action for the current player turn.
    pub fn decide(&self, session: &CombatSession) -> Decision {
        if self.actions_this_turn >= MAX_ACTIONS_PER_TURN {
            return Decision::EndTurn;
        }

        if !self.tagged_this_turn
            && let Some(member) = free_tag_in(session)
        {
            return Decision::TagIn(member);
        }

        let Some(active) = session.active_member() else {
            return Decision::EndTurn;
        };
        let target = weakest_enemy(session);
        let energy = session.energy().current();

        active
            .deck
            .hand()
            .iter()
            .position(|card| {
                let data = card.effective();
                data.cost <= energy && data.focus_cost <= active.focus()
            })
            .map_or(Decision::EndTurn, |hand_index| Decision::PlayCard {
                hand_index,
                target,
            })
    }

    /// Plays until the combat ends or `max_turns` player turns have passed.
    ///
    /// Every produced event is handed to `on_event` in order.
    pub fn run(
        &mut self,
        session: &mut CombatSession,
        max_turns: u32,
        mut on_event: impl FnMut(&CombatEvent),
    ) -> Result<RunOutcome, ActionError> {
        session.start()?.iter().for_each(&mut on_event);

        while !session.is_over() {
            if session.turn() > max_turns {
                return Ok(RunOutcome::TurnLimit);
            }

            let decision = self.decide(session);
            let result = match decision {
                Decision::TagIn(member) => {
                    self.tagged_this_turn = true;
                    session.tag_in(member)
                }
                Decision::PlayCard { hand_index, target } => {
                    session.play_card(hand_index, target)
                }
                Decision::EndTurn => {
                    self.tagged_this_turn = false;
                    self.actions_this_turn = 0;
                    session.end_turn()
                }
            };
            self.actions_this_turn += 1;

            match result {
                Ok(events) => events.iter().for_each(&mut on_event),
                Err(err) if decision != Decision::EndTurn && !err.severity().is_internal() => {
                    tracing::warn!(
                        ?decision,
                        %err,
                        code = err.error_code(),
                        severity = err.severity().as_str(),
                        "Autopilot action rejected, ending turn"
                    );
                    self.actions_this_turn = MAX_ACTIONS_PER_TURN;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(RunOutcome::Finished)
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new()
    }
}

fn free_tag_in(session: &CombatSession) -> Option<EntityId> {
    let roster = session.roster();
    roster
        .members()
        .iter()
        .map(|m| m.id())
        .find(|&id| roster.can_tag_in(id) && roster.tag_in_cost(id) == Some(0))
}

fn weakest_enemy(session: &CombatSession) -> Option<EntityId> {
    session
        .enemies()
        .iter()
        .filter(|e| e.is_alive())
        .min_by_key(|e| e.health().current)
        .map(|e| e.id())
}
