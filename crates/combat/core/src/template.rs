//! Static content records for characters and enemies.
//!
//! Templates are immutable; `spawn` produces a fresh combat entity with the
//! id assigned by the caller.

use std::collections::HashMap;
use std::sync::Arc;

use crate::card::{CardData, CardId, CardInstance, Deck};
use crate::intent::Intent;
use crate::state::{
    BreakCondition, CharacterClass, Combatant, Enemy, EnemyTier, EntityId, PartyMember,
    PartyPosition, TargetingStrategy,
};

/// Card definitions keyed by id, shared by every spawned deck.
pub type CardCatalog = HashMap<CardId, Arc<CardData>>;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterTemplate {
    pub name: String,
    pub class: CharacterClass,
    pub max_hp: u32,
    /// Starting deck, by card id. Duplicates are separate copies.
    pub deck: Vec<CardId>,
}

impl CharacterTemplate {
    /// Builds a party member with a deck resolved from `catalog`.
    ///
    /// Returns the first card id missing from the catalog as the error.
    pub fn spawn(
        &self,
        id: EntityId,
        position: PartyPosition,
        catalog: &CardCatalog,
    ) -> Result<PartyMember, CardId> {
        let cards = self
            .deck
            .iter()
            .map(|card| {
                catalog
                    .get(card)
                    .map(|data| CardInstance::new(Arc::clone(data)))
                    .ok_or(*card)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PartyMember::new(
            Combatant::new(id, self.name.clone(), self.max_hp),
            self.class,
            position,
        )
        .with_deck(Deck::new(cards)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub name: String,
    pub tier: EnemyTier,
    pub max_hp: u32,
    pub pattern: Vec<Intent>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub groggy_pattern: Vec<Intent>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub break_condition: Option<BreakCondition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub targeting: TargetingStrategy,
}

impl EnemyTemplate {
    pub fn spawn(&self, id: EntityId) -> Enemy {
        let enemy = Enemy::new(
            Combatant::new(id, self.name.clone(), self.max_hp),
            self.tier,
            self.pattern.clone(),
        )
        .with_targeting(self.targeting)
        .with_groggy_pattern(self.groggy_pattern.clone());

        match self.break_condition {
            Some(condition) => enemy.with_break(condition),
            None => enemy,
        }
    }
}
