//! Per-member deck store: draw pile, hand, discard and exhaust piles.

use arrayvec::ArrayVec;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::CardInstance;
use crate::config::CombatConfig;

/// Deck, hand, and discard state owned by one party member.
///
/// Every operation clamps to what is available: drawing from an empty deck
/// or discarding from an empty hand does nothing rather than failing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deck {
    draw_pile: Vec<CardInstance>,
    hand: ArrayVec<CardInstance, { CombatConfig::MAX_HAND_SIZE }>,
    discard_pile: Vec<CardInstance>,
    exhaust_pile: Vec<CardInstance>,
}

impl Deck {
    /// Creates a deck whose draw pile holds `cards` in order.
    ///
    /// The top of the draw pile is the end of the vector.
    pub fn new(cards: Vec<CardInstance>) -> Self {
        Self {
            draw_pile: cards,
            ..Self::default()
        }
    }

    pub fn hand(&self) -> &[CardInstance] {
        &self.hand
    }

    pub fn draw_pile(&self) -> &[CardInstance] {
        &self.draw_pile
    }

    pub fn discard_pile(&self) -> &[CardInstance] {
        &self.discard_pile
    }

    pub fn exhaust_pile(&self) -> &[CardInstance] {
        &self.exhaust_pile
    }

    pub fn shuffle(&mut self, rng: &mut dyn RngCore) {
        self.draw_pile.shuffle(rng);
    }

    /// Draws up to `count` cards and returns how many were drawn.
    ///
    /// An empty draw pile is refilled by shuffling the discard pile. Drawing
    /// stops early once the hand is full or both piles are empty.
    pub fn draw_cards(&mut self, count: u32, rng: &mut dyn RngCore) -> u32 {
        let mut drawn = 0;
        while drawn < count && !self.hand.is_full() {
            if self.draw_pile.is_empty() {
                if self.discard_pile.is_empty() {
                    break;
                }
                self.draw_pile.append(&mut self.discard_pile);
                self.draw_pile.shuffle(rng);
            }
            let Some(card) = self.draw_pile.pop() else {
                break;
            };
            self.hand.push(card);
            drawn += 1;
        }
        drawn
    }

    /// Removes the card at `index` from the hand without routing it anywhere.
    pub fn take_from_hand(&mut self, index: usize) -> Option<CardInstance> {
        (index < self.hand.len()).then(|| self.hand.remove(index))
    }

    /// Moves the card at `index` from the hand to the discard pile.
    pub fn discard_card(&mut self, index: usize) -> bool {
        match self.take_from_hand(index) {
            Some(card) => {
                self.discard_pile.push(card);
                true
            }
            None => false,
        }
    }

    /// Discards up to `count` uniformly random cards from the hand.
    pub fn discard_random(&mut self, count: u32, rng: &mut dyn RngCore) -> u32 {
        let mut discarded = 0;
        while discarded < count && !self.hand.is_empty() {
            let index = rng.gen_range(0..self.hand.len());
            self.discard_card(index);
            discarded += 1;
        }
        discarded
    }

    /// Discards the whole hand and returns how many cards were moved.
    pub fn discard_hand(&mut self) -> u32 {
        let count = self.hand.len() as u32;
        self.discard_pile.extend(self.hand.drain(..));
        count
    }

    /// Routes a played card to the exhaust pile or the discard pile.
    pub fn on_card_played(&mut self, card: CardInstance) {
        if card.effective().exhausts() {
            self.exhaust_pile.push(card);
        } else {
            self.discard_pile.push(card);
        }
    }
}
