//! Outbound combat notifications.
//!
//! Every mutating session operation returns the events it produced, in the
//! order the mutations happened. Each event is pushed exactly once, after the
//! change it describes. Nothing in the engine reads them back.

use crate::card::CardId;
use crate::scoring::PerformanceSummary;
use crate::state::{EntityId, PartyPosition, StatusKind};
use crate::turn::Phase;

/// How a combat ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatResult {
    Victory,
    Defeat,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    CombatStarted {
        party: Vec<EntityId>,
        enemies: Vec<EntityId>,
    },
    CombatEnded {
        result: CombatResult,
        turns: u32,
    },
    PhaseChanged {
        phase: Phase,
    },
    TurnStarted {
        turn: u32,
    },
    TurnEnded {
        turn: u32,
    },
    EnergyChanged {
        current: u32,
        max: u32,
    },
    CardsDrawn {
        member: EntityId,
        count: u32,
    },
    CardsDiscarded {
        member: EntityId,
        count: u32,
    },
    CardPlayed {
        member: EntityId,
        card: CardId,
        target: Option<EntityId>,
        focus_at_play: u8,
    },
    /// An effect found no valid target and was skipped.
    EffectFizzled {
        source: EntityId,
    },
    DamageDealt {
        /// `None` for damage over time.
        source: Option<EntityId>,
        target: EntityId,
        amount: u32,
        blocked: u32,
        hp_lost: u32,
        overkill: u32,
    },
    BlockGained {
        entity: EntityId,
        amount: u32,
    },
    BlockCleared {
        entity: EntityId,
        amount: u32,
    },
    Healed {
        entity: EntityId,
        amount: u32,
    },
    StatusApplied {
        target: EntityId,
        status: StatusKind,
        stacks: i32,
        total: i32,
    },
    IntentExecuted {
        enemy: EntityId,
        intent: crate::intent::IntentKind,
        target: Option<EntityId>,
    },
    EnemyBroken {
        enemy: EntityId,
        groggy_turns: u32,
    },
    GroggyEnded {
        enemy: EntityId,
    },
    EnemyDefeated {
        enemy: EntityId,
    },
    CharacterIncapacitated {
        member: EntityId,
    },
    CharacterRevived {
        member: EntityId,
        hp: u32,
    },
    TaggedIn {
        incoming: EntityId,
        outgoing: EntityId,
        energy_cost: u32,
    },
    FocusChanged {
        member: EntityId,
        focus: u8,
    },
    PositionChanged {
        member: EntityId,
        position: PartyPosition,
    },
    PerformanceSummary(PerformanceSummary),
}

/// Ordered buffer of events produced by one operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventLog {
    events: Vec<CombatEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &CombatEvent> + ExactSizeIterator {
        self.events.iter()
    }

    pub fn into_vec(self) -> Vec<CombatEvent> {
        self.events
    }
}

impl IntoIterator for EventLog {
    type Item = CombatEvent;
    type IntoIter = std::vec::IntoIter<CombatEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}
