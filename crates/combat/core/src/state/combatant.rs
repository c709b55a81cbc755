//! Shared combatant record and the capability set both entity kinds expose.

use super::{EntityId, HealthMeter, StatusEffects, StatusKind, StatusTick};

/// Base record shared by party members and enemies.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: EntityId,
    pub name: String,
    pub health: HealthMeter,
    pub block: u32,
    pub status: StatusEffects,
}

impl Combatant {
    pub fn new(id: EntityId, name: impl Into<String>, max_hp: u32) -> Self {
        Self {
            id,
            name: name.into(),
            health: HealthMeter::full(max_hp),
            block: 0,
            status: StatusEffects::empty(),
        }
    }

    /// Absorbs `amount` with Block first, then reduces HP.
    pub fn absorb_damage(&mut self, amount: u32) -> DamageReport {
        let blocked = amount.min(self.block);
        self.block -= blocked;

        let remainder = amount - blocked;
        let hp_lost = remainder.min(self.health.current);
        self.health.current -= hp_lost;

        DamageReport {
            amount,
            blocked,
            hp_lost,
            overkill: remainder - hp_lost,
            lethal: hp_lost > 0 && self.health.is_empty(),
        }
    }

    /// Loses HP directly, bypassing Block.
    pub fn lose_hp(&mut self, amount: u32) -> DamageReport {
        let hp_lost = amount.min(self.health.current);
        self.health.current -= hp_lost;

        DamageReport {
            amount,
            blocked: 0,
            hp_lost,
            overkill: amount - hp_lost,
            lethal: hp_lost > 0 && self.health.is_empty(),
        }
    }

    /// Restores HP up to the maximum and returns the amount restored.
    pub fn restore_hp(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.health.missing());
        self.health.current += actual;
        actual
    }
}

/// Outcome of a single damage application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageReport {
    /// Damage that arrived before Block.
    pub amount: u32,
    pub blocked: u32,
    pub hp_lost: u32,
    /// Damage beyond what was needed to bring HP to zero.
    pub overkill: u32,
    /// This application brought HP to zero.
    pub lethal: bool,
}

/// What a turn hook changed on its combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnHookReport {
    pub block_cleared: u32,
    pub poison: Option<DamageReport>,
    pub regenerated: u32,
}

/// Capability set every combat entity exposes: take damage, heal, gain or
/// clear block, react to turn start/end, and own a status store.
///
/// Implementors provide access to their [`Combatant`] record; kind-specific
/// rules (incapacitation, break gauges) are layered by overriding hooks.
pub trait CombatEntity {
    fn combatant(&self) -> &Combatant;

    fn combatant_mut(&mut self) -> &mut Combatant;

    /// Whether the entity can still act and be targeted.
    fn is_alive(&self) -> bool {
        !self.combatant().health.is_empty()
    }

    fn id(&self) -> EntityId {
        self.combatant().id
    }

    fn name(&self) -> &str {
        &self.combatant().name
    }

    fn health(&self) -> HealthMeter {
        self.combatant().health
    }

    fn block(&self) -> u32 {
        self.combatant().block
    }

    fn status(&self) -> &StatusEffects {
        &self.combatant().status
    }

    fn take_damage(&mut self, amount: u32) -> DamageReport {
        self.combatant_mut().absorb_damage(amount)
    }

    /// Heals up to max HP. Dead or incapacitated entities cannot be healed.
    fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        self.combatant_mut().restore_hp(amount)
    }

    fn gain_block(&mut self, amount: u32) {
        let combatant = self.combatant_mut();
        combatant.block = combatant.block.saturating_add(amount);
    }

    fn clear_block(&mut self) -> u32 {
        std::mem::take(&mut self.combatant_mut().block)
    }

    fn apply_status(&mut self, kind: StatusKind, stacks: i32) -> i32 {
        self.combatant_mut().status.add(kind, stacks)
    }

    fn on_turn_start(&mut self) -> TurnHookReport {
        TurnHookReport {
            block_cleared: self.clear_block(),
            ..TurnHookReport::default()
        }
    }

    /// Resolves turn-end status ticks: Poison first, then Regeneration if
    /// the entity is still standing.
    fn on_turn_end(&mut self) -> TurnHookReport {
        let StatusTick {
            poison,
            regeneration,
        } = self.combatant_mut().status.tick_turn_end();

        let poison = (poison > 0).then(|| self.combatant_mut().lose_hp(poison));
        let regenerated = if regeneration > 0 {
            self.heal(regeneration)
        } else {
            0
        };

        TurnHookReport {
            block_cleared: 0,
            poison,
            regenerated,
        }
    }
}
