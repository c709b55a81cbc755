mod common;

use combat_core::{
    ActionError, BreakCondition, CardData, CardEffect, CardId, CardInstance, CombatEntity,
    CombatEvent, Deck, Intent, IntentKind, Party, PartyPosition, PartyRoster, StatusKind,
    TagInRules, TargetSelector,
};
use common::*;

fn count(events: &[CombatEvent], pred: impl Fn(&CombatEvent) -> bool) -> usize {
    events.iter().filter(|&e| pred(e)).count()
}

// ============================================================================
// Break / Groggy
// ============================================================================

/// Break lifecycle against an enemy without a groggy pattern
///
/// 1. Two card hits break the enemy (hit threshold 2, one Groggy turn)
/// 2. The Groggy enemy idles on its turn
/// 3. Hits while Broken but no longer Groggy do not re-break it
/// 4. The next enemy turn start ends Groggy and the normal pattern resumes
/// 5. The gauge fills again from zero
#[test]
fn break_interrupts_pattern_until_groggy_ends() {
    let foe = enemy(FOE, 40, vec![Intent::Attack { damage: 5, hits: 1 }])
        .with_break(BreakCondition::hits(2, 1));
    let mut session = started(duo(), vec![foe]);

    // ================================================================
    // Turn 1: break
    // ================================================================
    let events = session.play_card(0, Some(FOE)).expect("strike");
    assert_eq!(count(&events, |e| matches!(e, CombatEvent::EnemyBroken { .. })), 0);

    let events = session.play_card(0, Some(FOE)).expect("strike");
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::EnemyBroken {
            enemy: FOE,
            groggy_turns: 1
        }
    )));
    let foe = session.enemy(FOE).expect("foe exists");
    assert!(foe.is_broken());
    assert!(foe.is_groggy());
    assert_eq!(foe.intent(), Intent::Unknown);

    let events = session.end_turn().expect("turn should end");
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::IntentExecuted {
            intent: IntentKind::Unknown,
            target: None,
            ..
        }
    )));
    assert_eq!(session.active_member().map(|m| m.health().current), Some(30));

    // ================================================================
    // Turn 2: broken flag still set, Groggy over
    // ================================================================
    let foe = session.enemy(FOE).expect("foe exists");
    assert!(foe.is_broken());
    assert!(!foe.is_groggy());

    session.play_card(0, Some(FOE)).expect("strike");
    let events = session.play_card(0, Some(FOE)).expect("strike");
    assert_eq!(count(&events, |e| matches!(e, CombatEvent::EnemyBroken { .. })), 0);

    let events = session.end_turn().expect("turn should end");
    let ended = position_of(&events, |e| {
        matches!(e, CombatEvent::GroggyEnded { enemy } if *enemy == FOE)
    });
    let attack = position_of(&events, |e| {
        matches!(
            e,
            CombatEvent::IntentExecuted {
                intent: IntentKind::Attack,
                ..
            }
        )
    });
    assert!(ended < attack);
    assert_eq!(session.active_member().map(|m| m.health().current), Some(25));
    assert!(!session.enemy(FOE).is_some_and(|e| e.is_broken()));

    // ================================================================
    // Turn 3: breakable again
    // ================================================================
    session.play_card(0, Some(FOE)).expect("strike");
    session.play_card(0, Some(FOE)).expect("strike");
    assert!(session.enemy(FOE).is_some_and(|e| e.is_broken()));
    assert_eq!(session.enemy(FOE).map(|e| e.health().current), Some(4));
}

#[test]
fn groggy_pattern_replaces_normal_pattern() {
    let foe = enemy(FOE, 60, vec![Intent::Attack { damage: 5, hits: 1 }])
        .with_groggy_pattern(vec![Intent::Defend { block: 2 }])
        .with_break(BreakCondition::damage(10, 2));
    let mut session = started(duo(), vec![foe]);

    session.play_card(0, Some(FOE)).expect("strike");
    session.play_card(0, Some(FOE)).expect("strike");

    for _ in 0..2 {
        let events = session.end_turn().expect("turn should end");
        assert!(events.iter().any(|e| matches!(
            e,
            CombatEvent::IntentExecuted {
                intent: IntentKind::Defend,
                ..
            }
        )));
    }
    let events = session.end_turn().expect("turn should end");
    assert_eq!(count(&events, |e| matches!(e, CombatEvent::GroggyEnded { .. })), 1);
    assert_eq!(session.active_member().map(|m| m.health().current), Some(25));
}

/// The intent shown after the last Groggy turn is the one executed next
///
/// 1. Break the enemy; its single Groggy turn runs the groggy pattern
/// 2. During the following player turn the shown intent is already the
///    normal pattern's first step, while the enemy is still Broken
/// 3. The recovery turn executes exactly that intent
#[test]
fn shown_intent_after_groggy_matches_execution() {
    let foe = enemy(FOE, 60, vec![Intent::Attack { damage: 5, hits: 1 }])
        .with_groggy_pattern(vec![Intent::Defend { block: 2 }])
        .with_break(BreakCondition::damage(10, 1));
    let mut session = started(duo(), vec![foe]);

    session.play_card(0, Some(FOE)).expect("strike");
    session.play_card(0, Some(FOE)).expect("strike");
    assert_eq!(
        session.enemy(FOE).map(|e| e.intent()),
        Some(Intent::Defend { block: 2 })
    );

    session.end_turn().expect("turn should end");
    let foe = session.enemy(FOE).expect("foe exists");
    assert!(foe.is_broken());
    assert!(!foe.is_groggy());
    let shown = foe.intent();
    assert_eq!(shown, Intent::Attack { damage: 5, hits: 1 });

    let events = session.end_turn().expect("turn should end");
    assert_eq!(
        count(&events, |e| matches!(e, CombatEvent::GroggyEnded { .. })),
        1
    );
    let executed: Vec<IntentKind> = events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::IntentExecuted { intent, .. } => Some(*intent),
            _ => None,
        })
        .collect();
    assert_eq!(executed, vec![IntentKind::from(&shown)]);
}

#[test]
fn hits_on_a_dead_enemy_do_not_break_it() {
    let foe =
        enemy(FOE, 6, vec![Intent::Defend { block: 1 }]).with_break(BreakCondition::hits(1, 1));
    let other = enemy(
        combat_core::EntityId(101),
        40,
        vec![Intent::Defend { block: 1 }],
    );
    let mut session = started(duo(), vec![foe, other]);

    let events = session.play_card(0, Some(FOE)).expect("strike");
    assert!(
        events
            .iter()
            .any(|e| matches!(e, CombatEvent::EnemyDefeated { enemy } if *enemy == FOE))
    );
    assert_eq!(count(&events, |e| matches!(e, CombatEvent::EnemyBroken { .. })), 0);
}

// ============================================================================
// Focus / Tag-In
// ============================================================================

#[test]
fn full_focus_makes_tag_in_free_and_boosts_cards() {
    let foe = enemy(FOE, 100, vec![Intent::Defend { block: 1 }]);
    let mut session = started(duo(), vec![foe]);

    for expected in 1..=3u8 {
        let events = session.end_turn().expect("turn should end");
        assert!(events.iter().any(|e| matches!(
            e,
            CombatEvent::FocusChanged { member, focus } if *member == RESERVE && *focus == expected
        )));
    }
    // capped
    let reserve = session.roster().member(RESERVE).expect("reserve exists");
    assert_eq!(reserve.focus(), 3);

    let events = session.tag_in(RESERVE).expect("free tag-in");
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::TaggedIn {
            incoming: RESERVE,
            outgoing: LEAD,
            energy_cost: 0
        }
    )));
    assert_eq!(session.energy().current(), 3);

    // 6 × 1.75 = 10.5 → 11, one point absorbed by Block
    let events = session.play_card(0, Some(FOE)).expect("boosted strike");
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::DamageDealt {
            amount: 11,
            blocked: 1,
            hp_lost: 10,
            ..
        }
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::CardPlayed {
            focus_at_play: 3,
            ..
        }
    )));

    let events = session.end_turn().expect("turn should end");
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::FocusChanged { member, focus: 0 } if *member == RESERVE
    )));
    assert_eq!(session.roster().member(LEAD).map(|m| m.focus()), Some(1));
    assert_eq!(
        session.roster().member(LEAD).map(|m| m.position),
        Some(PartyPosition::Standby)
    );
}

#[test]
fn focus_cost_cards_use_the_pre_payment_snapshot() {
    let finisher = CardData::new(CardId(7), "Finisher", 1)
        .with_focus_cost(2)
        .with_effect(CardEffect::Damage {
            amount: 10,
            target: TargetSelector::SingleEnemy,
        })
        .with_focus_bonus(CardEffect::Block {
            amount: 5,
            target: TargetSelector::Caster,
        });
    let finishers = Deck::new(
        (0..6)
            .map(|_| CardInstance::from(finisher.clone()))
            .collect(),
    );
    let party = Party::new(
        vec![
            member(LEAD, 30, PartyPosition::Active).with_deck(finishers.clone()),
            member(RESERVE, 30, PartyPosition::Standby).with_deck(finishers),
        ],
        TagInRules::default(),
    );
    let mut session = started(party, vec![enemy(FOE, 100, vec![Intent::Unknown])]);

    let err = session.play_card(0, Some(FOE)).unwrap_err();
    assert_eq!(
        err,
        ActionError::InsufficientFocus {
            required: 2,
            available: 0
        }
    );
    assert_eq!(session.energy().current(), 3);

    for _ in 0..3 {
        session.end_turn().expect("turn should end");
    }
    session.tag_in(RESERVE).expect("free tag-in");
    session.play_card(0, Some(FOE)).expect("finisher");

    // 10 × 1.75 = 17.5 → 18; bonus Block 5 × 1.75 = 8.75 → 9
    assert_eq!(session.enemy(FOE).map(|e| e.health().current), Some(82));
    let reserve = session.active_member().expect("reserve active");
    assert_eq!(reserve.focus(), 1);
    assert_eq!(reserve.block(), 9);
}

#[test]
fn poison_resolves_before_focus_grant() {
    let mut party = duo();
    if let Some(reserve) = party.member_mut(RESERVE) {
        reserve.combatant.health.current = 2;
        reserve.apply_status(StatusKind::Poison, 3);
    }
    let mut session = started(party, vec![enemy(FOE, 40, vec![Intent::Defend { block: 1 }])]);

    let events = session.end_turn().expect("turn should end");
    let poison = position_of(&events, |e| {
        matches!(
            e,
            CombatEvent::DamageDealt {
                source: None,
                hp_lost: 2,
                ..
            }
        )
    });
    let down = position_of(&events, |e| {
        matches!(e, CombatEvent::CharacterIncapacitated { member } if *member == RESERVE)
    });
    assert!(poison < down);
    assert_eq!(
        count(&events, |e| matches!(
            e,
            CombatEvent::FocusChanged { member, .. } if *member == RESERVE
        )),
        0
    );
    assert_eq!(session.counters().incapacitations, 1);
    assert!(session.result().is_none());
}
