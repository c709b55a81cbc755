//! Card effect resolution.
//!
//! This module contains:
//! - `EffectContext`: everything a card's effects may touch
//! - `resolve_card`: runs a card's effect list, then its Focus-bonus list
//!
//! ## Targeting
//!
//! - `Caster` resolves to the card's user
//! - `SingleEnemy` resolves to the chosen target if it is a living enemy
//! - `AllEnemies` iterates living enemies in encounter order
//! - `RandomEnemy` picks one living enemy uniformly
//!
//! An effect whose selector resolves to nothing fizzles: it is skipped and an
//! `EffectFizzled` event is recorded.

use rand::RngCore;
use rand::seq::SliceRandom;

use crate::card::{CardData, CardEffect, TargetSelector};
use crate::event::{CombatEvent, EventLog};
use crate::formula::{apply_focus_bonus, compute_attack_damage, compute_block};
use crate::resources::EnergyPool;
use crate::roster::{PartyRoster, handle_incapacitation};
use crate::scoring::PerformanceCounters;
use crate::state::{CombatEntity, DamageReport, Enemy, EntityId, StatusEffects, StatusKind};

// ============================================================================
// Effect Context
// ============================================================================

/// Context for resolving one played card.
pub struct EffectContext<'a> {
    /// The party member who played the card.
    pub source: EntityId,

    /// Enemy chosen at play time, used by `SingleEnemy`.
    pub target: Option<EntityId>,

    /// User's Focus recorded when the card was played.
    pub focus_at_play: u8,

    pub party: &'a mut dyn PartyRoster,
    pub enemies: &'a mut [Enemy],
    pub energy: &'a mut EnergyPool,
    pub rng: &'a mut dyn RngCore,
    pub events: &'a mut EventLog,
    pub counters: &'a mut PerformanceCounters,
}

/// Resolved target set of one effect.
enum Targets {
    Caster,
    Enemies(Vec<usize>),
    None,
}

// ============================================================================
// Card Resolution
// ============================================================================

/// Resolves `card`'s effects in order, then its Focus-bonus effects if the
/// user had Focus at play time. Both passes share the same Focus snapshot.
pub fn resolve_card(card: &CardData, ctx: &mut EffectContext<'_>) {
    for effect in &card.effects {
        apply_effect(effect, ctx);
    }
    if ctx.focus_at_play > 0 {
        for effect in &card.focus_bonus {
            apply_effect(effect, ctx);
        }
    }
}

fn apply_effect(effect: &CardEffect, ctx: &mut EffectContext<'_>) {
    match *effect {
        CardEffect::Damage { amount, target } => deal_damage(amount, target, ctx),
        CardEffect::Block { amount, target } => grant_block(amount, target, ctx),
        CardEffect::ApplyStatus {
            status,
            stacks,
            target,
        } => apply_status(status, stacks, target, ctx),
        CardEffect::Heal { amount, target } => heal(amount, target, ctx),
        CardEffect::Draw { count } => draw(count, ctx),
        CardEffect::GainEnergy { amount } => {
            ctx.energy.gain(amount);
            ctx.events.push(CombatEvent::EnergyChanged {
                current: ctx.energy.current(),
                max: ctx.energy.max(),
            });
        }
        CardEffect::Discard { count } => discard(count, ctx),
        // Routed to the exhaust pile by the deck once the card is consumed.
        CardEffect::Exhaust => {}
    }
}

fn resolve_targets(selector: TargetSelector, ctx: &mut EffectContext<'_>) -> Targets {
    let living = || {
        ctx.enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_alive())
            .map(|(i, _)| i)
    };
    let targets = match selector {
        TargetSelector::Caster => return Targets::Caster,
        TargetSelector::SingleEnemy => ctx
            .target
            .and_then(|id| {
                ctx.enemies
                    .iter()
                    .position(|e| e.id() == id && e.is_alive())
            })
            .into_iter()
            .collect::<Vec<_>>(),
        TargetSelector::AllEnemies => living().collect(),
        TargetSelector::RandomEnemy => {
            let candidates = living().collect::<Vec<_>>();
            candidates.choose(&mut *ctx.rng).copied().into_iter().collect()
        }
    };
    if targets.is_empty() {
        Targets::None
    } else {
        Targets::Enemies(targets)
    }
}

fn fizzle(ctx: &mut EffectContext<'_>) {
    ctx.events.push(CombatEvent::EffectFizzled { source: ctx.source });
}

fn caster_status(ctx: &EffectContext<'_>) -> StatusEffects {
    ctx.party
        .member(ctx.source)
        .map(|m| m.status().clone())
        .unwrap_or_default()
}

fn with_focus(value: u32, focus_at_play: u8) -> u32 {
    if focus_at_play > 0 {
        apply_focus_bonus(value, focus_at_play)
    } else {
        value
    }
}

// ============================================================================
// Effect Implementations
// ============================================================================

fn deal_damage(base: u32, selector: TargetSelector, ctx: &mut EffectContext<'_>) {
    let attacker = caster_status(ctx);
    match resolve_targets(selector, ctx) {
        Targets::None => fizzle(ctx),
        Targets::Caster => {
            let source = ctx.source;
            let Some(member) = ctx.party.member_mut(source) else {
                return fizzle(ctx);
            };
            let amount = with_focus(
                compute_attack_damage(base, &attacker, member.status()),
                ctx.focus_at_play,
            );
            let report = member.take_damage(amount);
            push_damage(ctx.events, source, source, &report);
            if report.lethal {
                handle_incapacitation(ctx.party, source, ctx.events, ctx.counters);
            }
        }
        Targets::Enemies(indices) => {
            for index in indices {
                let amount = with_focus(
                    compute_attack_damage(base, &attacker, ctx.enemies[index].status()),
                    ctx.focus_at_play,
                );
                hit_enemy(index, amount, ctx);
            }
        }
    }
}

/// One card hit on an enemy: damage, overkill, break gauge, defeat.
fn hit_enemy(index: usize, amount: u32, ctx: &mut EffectContext<'_>) {
    let enemy = &mut ctx.enemies[index];
    let id = enemy.id();
    let report = enemy.take_damage(amount);
    push_damage(ctx.events, ctx.source, id, &report);
    ctx.counters.record_overkill(report.overkill);

    if enemy.register_hit(amount) {
        let groggy_turns = enemy.gauge().map_or(0, |g| g.groggy_turns_left());
        tracing::debug!(enemy = %id, groggy_turns, "enemy broken");
        ctx.events.push(CombatEvent::EnemyBroken {
            enemy: id,
            groggy_turns,
        });
    }
    if report.lethal {
        tracing::debug!(enemy = %id, "enemy defeated");
        ctx.events.push(CombatEvent::EnemyDefeated { enemy: id });
    }
}

fn push_damage(events: &mut EventLog, source: EntityId, target: EntityId, report: &DamageReport) {
    events.push(CombatEvent::DamageDealt {
        source: Some(source),
        target,
        amount: report.amount,
        blocked: report.blocked,
        hp_lost: report.hp_lost,
        overkill: report.overkill,
    });
}

fn grant_block(base: u32, selector: TargetSelector, ctx: &mut EffectContext<'_>) {
    let amount = with_focus(compute_block(base, &caster_status(ctx)), ctx.focus_at_play);
    match resolve_targets(selector, ctx) {
        Targets::None => fizzle(ctx),
        Targets::Caster => {
            let source = ctx.source;
            match ctx.party.member_mut(source) {
                Some(member) => {
                    member.gain_block(amount);
                    ctx.events.push(CombatEvent::BlockGained {
                        entity: source,
                        amount,
                    });
                }
                None => fizzle(ctx),
            }
        }
        Targets::Enemies(indices) => {
            for index in indices {
                let enemy = &mut ctx.enemies[index];
                enemy.gain_block(amount);
                ctx.events.push(CombatEvent::BlockGained {
                    entity: enemy.id(),
                    amount,
                });
            }
        }
    }
}

fn apply_status(
    status: StatusKind,
    stacks: i32,
    selector: TargetSelector,
    ctx: &mut EffectContext<'_>,
) {
    match resolve_targets(selector, ctx) {
        Targets::None => fizzle(ctx),
        Targets::Caster => {
            let source = ctx.source;
            match ctx.party.member_mut(source).filter(|m| m.is_alive()) {
                Some(member) => {
                    let total = member.apply_status(status, stacks);
                    ctx.events.push(CombatEvent::StatusApplied {
                        target: source,
                        status,
                        stacks,
                        total,
                    });
                }
                None => fizzle(ctx),
            }
        }
        Targets::Enemies(indices) => {
            for index in indices {
                let enemy = &mut ctx.enemies[index];
                let total = enemy.apply_status(status, stacks);
                ctx.events.push(CombatEvent::StatusApplied {
                    target: enemy.id(),
                    status,
                    stacks,
                    total,
                });
            }
        }
    }
}

fn heal(amount: u32, selector: TargetSelector, ctx: &mut EffectContext<'_>) {
    match resolve_targets(selector, ctx) {
        Targets::None => fizzle(ctx),
        Targets::Caster => {
            let source = ctx.source;
            let healed = ctx.party.member_mut(source).map_or(0, |m| m.heal(amount));
            ctx.events.push(CombatEvent::Healed {
                entity: source,
                amount: healed,
            });
        }
        Targets::Enemies(indices) => {
            for index in indices {
                let enemy = &mut ctx.enemies[index];
                let healed = enemy.heal(amount);
                ctx.events.push(CombatEvent::Healed {
                    entity: enemy.id(),
                    amount: healed,
                });
            }
        }
    }
}

fn draw(count: u32, ctx: &mut EffectContext<'_>) {
    let source = ctx.source;
    let Some(member) = ctx.party.member_mut(source) else {
        return;
    };
    let drawn = member.deck.draw_cards(count, &mut *ctx.rng);
    ctx.events.push(CombatEvent::CardsDrawn {
        member: source,
        count: drawn,
    });
}

fn discard(count: u32, ctx: &mut EffectContext<'_>) {
    let source = ctx.source;
    let Some(member) = ctx.party.member_mut(source) else {
        return;
    };
    let discarded = member.deck.discard_random(count, &mut *ctx.rng);
    ctx.events.push(CombatEvent::CardsDiscarded {
        member: source,
        count: discarded,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardId, CardInstance, Deck};
    use crate::resources::TagInRules;
    use crate::roster::Party;
    use crate::state::{
        BreakCondition, CharacterClass, Combatant, EnemyTier, PartyMember, PartyPosition,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const HERO: EntityId = EntityId(0);
    const SLIME: EntityId = EntityId(100);
    const BAT: EntityId = EntityId(101);

    struct Fixture {
        party: Party,
        enemies: Vec<Enemy>,
        energy: EnergyPool,
        rng: ChaCha8Rng,
        events: EventLog,
        counters: PerformanceCounters,
    }

    impl Fixture {
        fn new() -> Self {
            let filler = (0..6)
                .map(|i| CardInstance::from(CardData::new(CardId(90 + i), "Filler", 1)))
                .collect();
            let hero = PartyMember::new(
                Combatant::new(HERO, "Aria", 30),
                CharacterClass::Striker,
                PartyPosition::Active,
            )
            .with_deck(Deck::new(filler));

            let mut energy = EnergyPool::new(3);
            energy.refill();
            Self {
                party: Party::new(vec![hero], TagInRules::default()),
                enemies: vec![
                    Enemy::new(Combatant::new(SLIME, "Slime", 20), EnemyTier::Normal, vec![])
                        .with_break(BreakCondition::damage(10, 1)),
                    Enemy::new(Combatant::new(BAT, "Bat", 8), EnemyTier::Normal, vec![]),
                ],
                energy,
                rng: ChaCha8Rng::seed_from_u64(5),
                events: EventLog::new(),
                counters: PerformanceCounters::new(EnemyTier::Normal, 2),
            }
        }

        fn play(&mut self, card: &CardData, target: Option<EntityId>, focus_at_play: u8) {
            let mut ctx = EffectContext {
                source: HERO,
                target,
                focus_at_play,
                party: &mut self.party,
                enemies: &mut self.enemies,
                energy: &mut self.energy,
                rng: &mut self.rng,
                events: &mut self.events,
                counters: &mut self.counters,
            };
            resolve_card(card, &mut ctx);
        }

        fn enemy(&self, id: EntityId) -> &Enemy {
            self.enemies.iter().find(|e| e.id() == id).unwrap()
        }

        fn fizzles(&self) -> usize {
            self.events
                .iter()
                .filter(|e| matches!(e, CombatEvent::EffectFizzled { .. }))
                .count()
        }
    }

    fn strike(amount: u32, target: TargetSelector) -> CardData {
        CardData::new(CardId(1), "Strike", 1).with_effect(CardEffect::Damage { amount, target })
    }

    #[test]
    fn single_target_damage_absorbed_by_block_first() {
        let mut fx = Fixture::new();
        fx.enemies[0].gain_block(2);
        fx.play(&strike(6, TargetSelector::SingleEnemy), Some(SLIME), 0);

        assert_eq!(fx.enemy(SLIME).health().current, 16);
        assert_eq!(fx.enemy(SLIME).block(), 0);
    }

    #[test]
    fn missing_target_fizzles() {
        let mut fx = Fixture::new();
        fx.play(&strike(6, TargetSelector::SingleEnemy), None, 0);
        fx.play(&strike(6, TargetSelector::SingleEnemy), Some(EntityId(999)), 0);

        assert_eq!(fx.fizzles(), 2);
        assert_eq!(fx.enemy(SLIME).health().current, 20);
    }

    #[test]
    fn all_enemies_skips_the_dead_and_counts_overkill() {
        let mut fx = Fixture::new();
        fx.play(&strike(10, TargetSelector::AllEnemies), None, 0);

        assert_eq!(fx.enemy(SLIME).health().current, 10);
        assert!(!fx.enemy(BAT).is_alive());
        assert_eq!(fx.counters.total_overkill, 2);
        assert!(
            fx.events
                .iter()
                .any(|e| matches!(e, CombatEvent::EnemyDefeated { enemy } if *enemy == BAT))
        );

        fx.events = EventLog::new();
        fx.play(&strike(1, TargetSelector::AllEnemies), None, 0);
        let hits = fx
            .events
            .iter()
            .filter(|e| matches!(e, CombatEvent::DamageDealt { .. }))
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn damage_breaks_enemy() {
        let mut fx = Fixture::new();
        fx.play(&strike(10, TargetSelector::SingleEnemy), Some(SLIME), 0);

        assert!(fx.enemy(SLIME).is_broken());
        assert!(
            fx.events
                .iter()
                .any(|e| matches!(e, CombatEvent::EnemyBroken { groggy_turns: 1, .. }))
        );
    }

    #[test]
    fn focus_multiplies_damage_and_enables_bonus_pass() {
        let mut fx = Fixture::new();
        let card = strike(4, TargetSelector::SingleEnemy).with_focus_bonus(CardEffect::Block {
            amount: 4,
            target: TargetSelector::Caster,
        });

        fx.play(&card, Some(SLIME), 2);
        // 4 × 1.5 = 6
        assert_eq!(fx.enemy(SLIME).health().current, 14);
        assert_eq!(fx.party.member(HERO).unwrap().block(), 6);

        fx.play(&card, Some(SLIME), 0);
        assert_eq!(fx.enemy(SLIME).health().current, 10);
        assert_eq!(fx.party.member(HERO).unwrap().block(), 6);
    }

    #[test]
    fn status_block_and_caster_effects() {
        let mut fx = Fixture::new();
        let card = CardData::new(CardId(2), "Bash", 2)
            .with_effect(CardEffect::ApplyStatus {
                status: StatusKind::Vulnerable,
                stacks: 2,
                target: TargetSelector::SingleEnemy,
            })
            .with_effect(CardEffect::Damage {
                amount: 6,
                target: TargetSelector::SingleEnemy,
            })
            .with_effect(CardEffect::ApplyStatus {
                status: StatusKind::Dexterity,
                stacks: 1,
                target: TargetSelector::Caster,
            })
            .with_effect(CardEffect::Block {
                amount: 4,
                target: TargetSelector::Caster,
            });

        fx.play(&card, Some(BAT), 0);
        // Vulnerable applies before the hit: 6 × 1.5 = 9 on an 8 HP bat
        assert!(!fx.enemy(BAT).is_alive());
        assert_eq!(fx.counters.total_overkill, 1);
        assert_eq!(fx.party.member(HERO).unwrap().block(), 5);
    }

    #[test]
    fn random_enemy_only_picks_the_living() {
        let mut fx = Fixture::new();
        fx.enemies[1].take_damage(100);
        for _ in 0..5 {
            fx.play(&strike(1, TargetSelector::RandomEnemy), None, 0);
        }
        assert_eq!(fx.enemy(SLIME).health().current, 15);
    }

    #[test]
    fn deck_and_energy_effects() {
        let mut fx = Fixture::new();
        let card = CardData::new(CardId(3), "Prepare", 0)
            .with_effect(CardEffect::Draw { count: 3 })
            .with_effect(CardEffect::Discard { count: 1 })
            .with_effect(CardEffect::GainEnergy { amount: 2 })
            .with_effect(CardEffect::Exhaust);

        fx.play(&card, None, 0);
        let deck = &fx.party.member(HERO).unwrap().deck;
        assert_eq!(deck.hand().len(), 2);
        assert_eq!(deck.discard_pile().len(), 1);
        assert_eq!(fx.energy.current(), 5);
    }

    #[test]
    fn self_damage_can_incapacitate() {
        let mut fx = Fixture::new();
        fx.play(&strike(40, TargetSelector::Caster), None, 0);

        assert!(fx.party.member(HERO).unwrap().is_incapacitated());
        assert_eq!(fx.counters.incapacitations, 1);
    }
}
