#![allow(dead_code)]

use combat_core::{
    CardData, CardEffect, CardId, CardInstance, CharacterClass, CombatConfig, CombatEvent,
    CombatSession, Combatant, Deck, Enemy, EnemyTier, EntityId, Intent, Party, PartyMember,
    PartyPosition, TagInRules, TargetSelector,
};

pub const SEED: u64 = 0x5eed;
pub const LEAD: EntityId = EntityId(0);
pub const RESERVE: EntityId = EntityId(1);
pub const FOE: EntityId = EntityId(100);

/// 1-cost, 6-damage single-target attack.
pub fn strike() -> CardData {
    CardData::new(CardId(1), "Strike", 1).with_effect(CardEffect::Damage {
        amount: 6,
        target: TargetSelector::SingleEnemy,
    })
}

pub fn strike_deck(count: usize) -> Deck {
    let strike = strike();
    Deck::new(
        (0..count)
            .map(|_| CardInstance::from(strike.clone()))
            .collect(),
    )
}

pub fn member(id: EntityId, hp: u32, position: PartyPosition) -> PartyMember {
    PartyMember::new(
        Combatant::new(id, format!("Hero {}", id.0), hp),
        CharacterClass::Striker,
        position,
    )
    .with_deck(strike_deck(8))
}

/// Active `LEAD` and Standby `RESERVE`, 30 HP each.
pub fn duo() -> Party {
    Party::new(
        vec![
            member(LEAD, 30, PartyPosition::Active),
            member(RESERVE, 30, PartyPosition::Standby),
        ],
        TagInRules::default(),
    )
}

pub fn enemy(id: EntityId, hp: u32, pattern: Vec<Intent>) -> Enemy {
    Enemy::new(Combatant::new(id, "Foe", hp), EnemyTier::Normal, pattern)
}

pub fn session(party: Party, enemies: Vec<Enemy>) -> CombatSession {
    CombatSession::new(CombatConfig::default(), party, enemies, SEED)
        .expect("combat setup should be valid")
}

pub fn started(party: Party, enemies: Vec<Enemy>) -> CombatSession {
    let mut session = session(party, enemies);
    session.start().expect("combat should start");
    session
}

/// Index of the first event matching `pred`.
pub fn position_of(events: &[CombatEvent], pred: impl Fn(&CombatEvent) -> bool) -> usize {
    events
        .iter()
        .position(pred)
        .expect("expected event was not emitted")
}
