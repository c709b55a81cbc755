//! Phase state machine for a combat.
//!
//! ```text
//! Idle → PlayerTurnStart → PlayerAction → PlayerTurnEnd → EnemyTurn ─┐
//!             ▲                                                      │
//!             └──────────────────────────────────────────────────────┘
//! any non-terminal phase → CombatEnd
//! ```
//!
//! The sequencer only validates edges and counts turns. The session performs
//! the work attached to each phase and decides when combat ends.

use strum::Display;

use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Idle,
    PlayerTurnStart,
    PlayerAction,
    PlayerTurnEnd,
    EnemyTurn,
    CombatEnd,
}

impl Phase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::CombatEnd)
    }

    /// Whether `self → to` is an edge of the phase graph.
    pub const fn can_transition_to(self, to: Phase) -> bool {
        use Phase::*;
        match (self, to) {
            (CombatEnd, _) => false,
            (_, CombatEnd) => true,
            (Idle, PlayerTurnStart)
            | (PlayerTurnStart, PlayerAction)
            | (PlayerAction, PlayerTurnEnd)
            | (PlayerTurnEnd, EnemyTurn)
            | (EnemyTurn, PlayerTurnStart) => true,
            _ => false,
        }
    }
}

/// Illegal phase edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("cannot transition from {from} to {to}")]
pub struct TransitionError {
    pub from: Phase,
    pub to: Phase,
}

impl GameError for TransitionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        "TURN_INVALID_TRANSITION"
    }
}

/// Current phase plus the 1-based turn counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnSequencer {
    phase: Phase,
    turn: u32,
}

impl TurnSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of player turns started so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// `play_card` and `tag_in` are only accepted here.
    pub fn accepts_player_actions(&self) -> bool {
        self.phase == Phase::PlayerAction
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Moves to `to`. Entering `PlayerTurnStart` starts a new turn.
    pub fn transition(&mut self, to: Phase) -> Result<Phase, TransitionError> {
        if !self.phase.can_transition_to(to) {
            return Err(TransitionError {
                from: self.phase,
                to,
            });
        }
        if to == Phase::PlayerTurnStart {
            self.turn += 1;
        }
        tracing::debug!(from = %self.phase, %to, turn = self.turn, "phase transition");
        self.phase = to;
        Ok(to)
    }

    /// Forces `CombatEnd`. Returns false if combat had already ended.
    pub fn end_combat(&mut self) -> bool {
        self.transition(Phase::CombatEnd).is_ok()
    }
}
