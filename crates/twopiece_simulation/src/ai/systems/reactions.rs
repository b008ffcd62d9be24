//! Реакции врагов на урон.
//!
//! Базовый враг: счётчики WeaponHealth (меч / дубина), смерть → despawn.
//! Босс: `apply_damage` автомата, смерть → Dead + DespawnAfter(death_linger).

use bevy::prelude::*;

use crate::ai::approach_flee::{ApproachFleeStateMachine, DamageOutcome};
use crate::ai::events::{FeedbackRequested, TierTriggersActivated};
use crate::ai::patrol_attack::PatrolAttackStateMachine;
use crate::ai::ports::{ActuatorCommand, CommandBuffer};
use crate::combat::damage::{DamageKind, DamageTaken, Dead, DespawnAfter, EntityDied};
use crate::components::WeaponHealth;

/// Система: урон базовому врагу
///
/// Sword/Club уменьшают свой счётчик. Любой счётчик на нуле → смерть:
/// автомат больше не тикает (недоигранный замах отменён), entity удаляется.
pub fn apply_enemy_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageTaken>,
    mut died_events: EventWriter<EntityDied>,
    mut enemies: Query<&mut WeaponHealth, (With<PatrolAttackStateMachine>, Without<Dead>)>,
) {
    for event in damage_events.read() {
        let Ok(mut weapon_health) = enemies.get_mut(event.target) else {
            continue;
        };
        if !weapon_health.is_alive() {
            continue;
        }

        match event.kind {
            DamageKind::Sword => weapon_health.hit_by_sword(),
            DamageKind::Club => weapon_health.hit_by_club(),
            // Враги не бьют друг друга
            DamageKind::Melee => continue,
        }

        if !weapon_health.is_alive() {
            commands.entity(event.target).despawn();
            died_events.write(EntityDied {
                entity: event.target,
                killer: event.source,
            });
            crate::log_info(&format!(
                "Enemy {:?} killed by {:?} ({:?})",
                event.target, event.source, event.kind
            ));
        }
    }
}

/// Система: урон боссу (любой вид урона = -1 здоровья)
pub fn apply_boss_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageTaken>,
    mut died_events: EventWriter<EntityDied>,
    mut feedback_events: EventWriter<FeedbackRequested>,
    mut tier_events: EventWriter<TierTriggersActivated>,
    mut bosses: Query<&mut ApproachFleeStateMachine, Without<Dead>>,
) {
    for event in damage_events.read() {
        let Ok(mut machine) = bosses.get_mut(event.target) else {
            continue;
        };

        let mut buffer = CommandBuffer::new();
        let outcome = machine.apply_damage(&mut buffer);

        // apply_damage даёт только сигналы: feedback и тиры
        for command in buffer.drain() {
            match command {
                ActuatorCommand::Feedback(kind) => {
                    feedback_events.write(FeedbackRequested {
                        entity: event.target,
                        kind,
                    });
                }
                ActuatorCommand::ActivateTier(tier) => {
                    crate::log_info(&format!(
                        "Boss {:?}: activating tier {} triggers",
                        event.target, tier.0
                    ));
                    tier_events.write(TierTriggersActivated {
                        owner: event.target,
                        tier,
                    });
                }
                other => {
                    crate::log_warning(&format!("Boss damage: unexpected command {:?}", other));
                }
            }
        }

        if outcome == DamageOutcome::Destroyed {
            commands.entity(event.target).insert((
                Dead,
                DespawnAfter {
                    remaining: machine.config.death_linger,
                },
            ));
            died_events.write(EntityDied {
                entity: event.target,
                killer: event.source,
            });
        }
    }
}
