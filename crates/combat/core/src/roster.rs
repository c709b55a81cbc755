//! Party roster: who holds the Active slot and who enemies hit.
//!
//! The engine never rearranges the party itself; it asks the roster through
//! [`PartyRoster`]. [`Party`] is the standard implementation.

use rand::RngCore;
use rand::seq::SliceRandom;

use crate::event::{CombatEvent, EventLog};
use crate::resources::TagInRules;
use crate::scoring::PerformanceCounters;
use crate::state::{CombatEntity, EntityId, PartyMember, PartyPosition, TargetingStrategy};

/// Interface the combat engine consumes from the party roster.
///
/// Implementations must keep exactly one member in [`PartyPosition::Active`]
/// while combat runs.
pub trait PartyRoster {
    fn members(&self) -> &[PartyMember];

    fn members_mut(&mut self) -> &mut [PartyMember];

    fn member(&self, id: EntityId) -> Option<&PartyMember> {
        self.members().iter().find(|m| m.id() == id)
    }

    fn member_mut(&mut self, id: EntityId) -> Option<&mut PartyMember> {
        self.members_mut().iter_mut().find(|m| m.id() == id)
    }

    fn active_member(&self) -> Option<&PartyMember> {
        self.members().iter().find(|m| m.is_active())
    }

    fn active_member_mut(&mut self) -> Option<&mut PartyMember> {
        self.members_mut().iter_mut().find(|m| m.is_active())
    }

    /// Selects the member an enemy with `strategy` attacks.
    fn target(&self, strategy: TargetingStrategy, rng: &mut dyn RngCore) -> Option<EntityId>;

    fn is_party_wiped(&self) -> bool {
        self.members().iter().all(PartyMember::is_incapacitated)
    }

    fn can_tag_in(&self, id: EntityId) -> bool {
        self.member(id)
            .is_some_and(|m| !m.is_active() && !m.is_incapacitated())
    }

    /// Energy required to tag `id` in.
    fn tag_in_cost(&self, id: EntityId) -> Option<u32>;

    /// Swaps `id` into the Active slot. Returns false if not allowed.
    fn execute_tag_in(&mut self, id: EntityId) -> bool;

    /// Fills an Active slot left by an incapacitated member.
    ///
    /// Returns the promoted member, or `None` if nobody can act.
    fn promote_replacement(&mut self) -> Option<EntityId>;
}

/// Bookkeeping after `member` was brought to zero HP: counts the
/// incapacitation, drops the member's hand, and refills the Active slot.
///
/// Returns the promoted replacement, if any.
pub(crate) fn handle_incapacitation(
    roster: &mut dyn PartyRoster,
    member: EntityId,
    events: &mut EventLog,
    counters: &mut PerformanceCounters,
) -> Option<EntityId> {
    counters.record_incapacitation();
    let was_active = match roster.member_mut(member) {
        Some(downed) => {
            downed.deck.discard_hand();
            downed.is_active()
        }
        None => false,
    };
    tracing::debug!(%member, "party member incapacitated");
    events.push(CombatEvent::CharacterIncapacitated { member });

    if !was_active {
        return None;
    }
    let incoming = roster.promote_replacement()?;
    events.push(CombatEvent::PositionChanged {
        member,
        position: PartyPosition::Standby,
    });
    events.push(CombatEvent::PositionChanged {
        member: incoming,
        position: PartyPosition::Active,
    });
    Some(incoming)
}

/// Standard roster: members in fixed order, tag-in priced by [`TagInRules`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Party {
    members: Vec<PartyMember>,
    rules: TagInRules,
}

impl Party {
    pub fn new(members: Vec<PartyMember>, rules: TagInRules) -> Self {
        Self { members, rules }
    }

    pub fn rules(&self) -> &TagInRules {
        &self.rules
    }

    fn set_position(&mut self, id: EntityId, position: PartyPosition) {
        if let Some(member) = self.member_mut(id) {
            member.position = position;
        }
    }
}

impl PartyRoster for Party {
    fn members(&self) -> &[PartyMember] {
        &self.members
    }

    fn members_mut(&mut self) -> &mut [PartyMember] {
        &mut self.members
    }

    fn target(&self, strategy: TargetingStrategy, rng: &mut dyn RngCore) -> Option<EntityId> {
        let standing = || self.members.iter().filter(|m| !m.is_incapacitated());
        match strategy {
            TargetingStrategy::Active => self
                .active_member()
                .filter(|m| !m.is_incapacitated())
                .map(PartyMember::id),
            TargetingStrategy::LowestHp => standing()
                .min_by_key(|m| m.health().current)
                .map(PartyMember::id),
            TargetingStrategy::Random => standing()
                .collect::<Vec<_>>()
                .choose(rng)
                .map(|m| m.id()),
        }
    }

    fn tag_in_cost(&self, id: EntityId) -> Option<u32> {
        self.member(id).map(|m| self.rules.cost_for(m.focus()))
    }

    fn execute_tag_in(&mut self, id: EntityId) -> bool {
        if !self.can_tag_in(id) {
            return false;
        }
        if let Some(outgoing) = self.active_member().map(PartyMember::id) {
            self.set_position(outgoing, PartyPosition::Standby);
        }
        self.set_position(id, PartyPosition::Active);
        true
    }

    fn promote_replacement(&mut self) -> Option<EntityId> {
        if self.active_member().is_some_and(|m| !m.is_incapacitated()) {
            return None;
        }
        let incoming = self
            .members
            .iter()
            .find(|m| !m.is_active() && !m.is_incapacitated())
            .map(PartyMember::id)?;
        self.execute_tag_in(incoming).then_some(incoming)
    }
}
