//! Enemy phase: each living enemy runs turn start, its intent, and turn end
//! before the next one begins.

use super::{CombatSession, push_hook_report};
use crate::event::{CombatEvent, EventLog};
use crate::intent::execute_intent;
use crate::roster::PartyRoster;
use crate::state::CombatEntity;

impl<R: PartyRoster> CombatSession<R> {
    /// Runs every living enemy in encounter order. Returns true if combat
    /// ended during the phase.
    pub(super) fn run_enemy_turn(&mut self, events: &mut EventLog) -> bool {
        for index in 0..self.enemies.len() {
            if !self.enemies[index].is_alive() {
                continue;
            }
            self.run_enemy(index, events);
            if self.check_combat_end(events) {
                return true;
            }
        }
        false
    }

    fn run_enemy(&mut self, index: usize, events: &mut EventLog) {
        let enemy = &mut self.enemies[index];
        let id = enemy.id();

        let (report, recovered) = enemy.begin_turn();
        push_hook_report(id, &report, events);
        if recovered {
            tracing::debug!(enemy = %id, "groggy ended");
            events.push(CombatEvent::GroggyEnded { enemy: id });
        }

        execute_intent(
            enemy,
            &mut self.roster,
            &mut self.rng,
            events,
            &mut self.counters,
        );

        let report = enemy.finish_turn();
        if push_hook_report(id, &report, events) {
            tracing::debug!(enemy = %id, "enemy defeated by poison");
            events.push(CombatEvent::EnemyDefeated { enemy: id });
        }
    }
}
