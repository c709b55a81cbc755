//! Card definitions and instances.
//!
//! [`CardData`] is immutable static content. A [`CardInstance`] shares its
//! data through an `Arc` and only carries the one-way upgrade flag.

mod deck;

pub use deck::Deck;

use std::sync::Arc;

use crate::state::StatusKind;

/// Identifier of a card definition in the content catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardId(pub u16);

/// Which entities an effect resolves against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetSelector {
    /// The card's user.
    Caster,
    /// The enemy chosen when the card was played.
    SingleEnemy,
    /// Every living enemy.
    AllEnemies,
    /// One living enemy chosen uniformly at random.
    RandomEnemy,
}

/// A single effect descriptor on a card.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardEffect {
    Damage {
        amount: u32,
        target: TargetSelector,
    },
    Block {
        amount: u32,
        target: TargetSelector,
    },
    ApplyStatus {
        status: StatusKind,
        stacks: i32,
        target: TargetSelector,
    },
    Draw {
        count: u32,
    },
    GainEnergy {
        amount: u32,
    },
    Heal {
        amount: u32,
        target: TargetSelector,
    },
    /// Discards random cards from the user's hand.
    Discard {
        count: u32,
    },
    /// Marks the card to be exhausted once played.
    Exhaust,
}

/// Immutable card definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardData {
    pub id: CardId,
    pub name: String,
    /// Energy cost.
    pub cost: u32,
    /// Focus spent by the user when played.
    #[cfg_attr(feature = "serde", serde(default))]
    pub focus_cost: u8,
    pub effects: Vec<CardEffect>,
    /// Extra effects resolved after `effects` when the user had Focus.
    #[cfg_attr(feature = "serde", serde(default))]
    pub focus_bonus: Vec<CardEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub upgraded: Option<Box<CardData>>,
}

impl CardData {
    pub fn new(id: CardId, name: impl Into<String>, cost: u32) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            focus_cost: 0,
            effects: Vec::new(),
            focus_bonus: Vec::new(),
            upgraded: None,
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_focus_bonus(mut self, effect: CardEffect) -> Self {
        self.focus_bonus.push(effect);
        self
    }

    #[must_use]
    pub fn with_focus_cost(mut self, focus_cost: u8) -> Self {
        self.focus_cost = focus_cost;
        self
    }

    #[must_use]
    pub fn with_upgrade(mut self, upgraded: CardData) -> Self {
        self.upgraded = Some(Box::new(upgraded));
        self
    }

    pub fn exhausts(&self) -> bool {
        self.effects.iter().any(|e| matches!(e, CardEffect::Exhaust))
    }
}

/// A card in a deck pile.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardInstance {
    data: Arc<CardData>,
    is_upgraded: bool,
}

impl CardInstance {
    pub fn new(data: Arc<CardData>) -> Self {
        Self {
            data,
            is_upgraded: false,
        }
    }

    pub fn is_upgraded(&self) -> bool {
        self.is_upgraded
    }

    /// Upgrades the card. One-way and idempotent.
    pub fn upgrade(&mut self) {
        self.is_upgraded = true;
    }

    /// The upgraded variant when flagged and present, otherwise the base data.
    pub fn effective(&self) -> &CardData {
        match (&self.data.upgraded, self.is_upgraded) {
            (Some(upgraded), true) => upgraded,
            _ => &self.data,
        }
    }
}

impl From<CardData> for CardInstance {
    fn from(data: CardData) -> Self {
        Self::new(Arc::new(data))
    }
}
